//! Hybrid encryption: ECDH on the curve, HKDF-SHA256 and AES-256-GCM.
//!
//! Used to seal commitment openings for an auditor holding the matching private key. Every
//! message gets a fresh ephemeral keypair and a random IV.

use crate::serde_hex::base64_bytes;
use crate::*;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::Aes256Gcm;
use hkdf::Hkdf;
use rand::{thread_rng, Rng};
use sha2::Sha256;
use tracing::error;

pub const AES_IV_LENGTH: usize = 12;

pub const AES_TAG_LENGTH: usize = 16;

type AesKey = [u8; 32];

/// A sealed message. Serializes to JSON with base64 byte fields and a hex public key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Ciphertext {
    #[serde(with = "base64_bytes")]
    pub ciphertext: Vec<u8>,

    #[serde(with = "base64_bytes")]
    pub tag: Vec<u8>,

    #[serde(with = "base64_bytes")]
    pub iv: Vec<u8>,

    pub ephemeral_public_key: String,
}

impl Ciphertext {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Encrypt `message` so that only the holder of `encryption_key`'s private key can read it.
pub fn encrypt<C: Curve>(message: &[u8], encryption_key: &C::Point) -> Result<Ciphertext> {
    let ephemeral = KeyPair::<C>::random();
    let aes_key = derive_key::<C>(&ephemeral.secret, encryption_key, &ephemeral.public)?;

    let mut iv = [0u8; AES_IV_LENGTH];
    thread_rng().fill(&mut iv);

    let (ciphertext, tag) = aes_encrypt(&aes_key, &iv, message);

    Ok(Ciphertext {
        ciphertext,
        tag,
        iv: iv.to_vec(),
        ephemeral_public_key: point_to_hex::<C>(&ephemeral.public),
    })
}

/// Decrypt with the receiver's private key. Fails with [`Error::Authentication`] if the
/// ciphertext, tag, IV or ephemeral key was tampered with, or the key is wrong.
pub fn decrypt<C: Curve>(ciphertext: &Ciphertext, private_key: &C::Scalar) -> Result<Vec<u8>> {
    if ciphertext.iv.len() != AES_IV_LENGTH || ciphertext.tag.len() != AES_TAG_LENGTH {
        error!(
            iv = ciphertext.iv.len(),
            tag = ciphertext.tag.len(),
            "wrong IV or tag length"
        );
        return Err(Error::Authentication);
    }

    let ephemeral_public = point_from_hex::<C>(&ciphertext.ephemeral_public_key)?;
    let aes_key = derive_key::<C>(private_key, &ephemeral_public, &ephemeral_public)?;

    aes_decrypt(&aes_key, &ciphertext.iv, &ciphertext.ciphertext, &ciphertext.tag)
}

fn hkdf_sha256(master: &[u8]) -> AesKey {
    let h = Hkdf::<Sha256>::new(None, master);
    let mut out = [0u8; 32];
    h.expand(&[], &mut out)
        .expect("ballotcrypt: symmetric: 32 bytes is a valid HKDF-SHA256 length");
    out
}

/// x-coordinate of `secret·public`
fn generate_shared<C: Curve>(secret: &C::Scalar, public: &C::Point) -> Result<Vec<u8>> {
    C::point_x(&(*public * secret)).ok_or_else(|| {
        error!("ECDH produced the identity point");
        Error::PointNotOnCurve
    })
}

/// HKDF over `ephemeral_public ‖ shared_x`.
fn derive_key<C: Curve>(
    secret: &C::Scalar,
    peer: &C::Point,
    ephemeral_public: &C::Point,
) -> Result<AesKey> {
    let shared = generate_shared::<C>(secret, peer)?;

    let mut master = C::encode_point(ephemeral_public);
    master.extend(shared);
    Ok(hkdf_sha256(&master))
}

fn aes_encrypt(key: &AesKey, iv: &[u8; AES_IV_LENGTH], msg: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let aead = Aes256Gcm::new(GenericArray::from_slice(key));

    let mut buffer = msg.to_vec();
    let tag = aead
        .encrypt_in_place_detached(GenericArray::from_slice(iv), b"", &mut buffer)
        .expect("ballotcrypt: symmetric: encryption failure!");

    (buffer, tag.to_vec())
}

fn aes_decrypt(key: &AesKey, iv: &[u8], ciphertext: &[u8], tag: &[u8]) -> Result<Vec<u8>> {
    let aead = Aes256Gcm::new(GenericArray::from_slice(key));

    let mut buffer = ciphertext.to_vec();
    aead.decrypt_in_place_detached(
        GenericArray::from_slice(iv),
        b"",
        &mut buffer,
        GenericArray::from_slice(tag),
    )
    .map_err(|_| {
        error!("ciphertext failed authentication");
        Error::Authentication
    })?;

    Ok(buffer)
}
