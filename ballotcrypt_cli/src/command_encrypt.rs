use ballotcrypt::elgamal::{self, Cryptogram};
use ballotcrypt::{encoder, point_from_hex, Curve};
use serde::{Deserialize, Serialize};

/// Text encrypted point by point, with the byte length needed to decode it.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound = "")]
pub struct EncryptedText<C: Curve> {
    pub byte_count: usize,
    pub cryptograms: Vec<Cryptogram<C>>,
}

pub fn command_encrypt<C: Curve>(matches: &clap::ArgMatches) {
    let public_key = crate::required("ballotcrypt encrypt", matches, "PUBLIC-KEY");
    let public_key = point_from_hex::<C>(public_key)
        .unwrap_or_else(|e| crate::exit_with("ballotcrypt encrypt", e));
    let message = crate::required("ballotcrypt encrypt", matches, "MESSAGE");

    let points = encoder::encode_text::<C>(message)
        .unwrap_or_else(|e| crate::exit_with("ballotcrypt encrypt", e));
    tracing::debug!(points = points.len(), "encoded message");

    let encrypted = EncryptedText {
        byte_count: message.len(),
        cryptograms: elgamal::encrypt_many::<C>(&points, &public_key),
    };

    let json = serde_json::to_string_pretty(&encrypted)
        .unwrap_or_else(|e| crate::exit_with("ballotcrypt encrypt", e));
    println!("{}", json);
}

pub fn command_decrypt<C: Curve>(matches: &clap::ArgMatches, secret_key: Option<&str>) {
    let secret_key = crate::secret_key::<C>("ballotcrypt decrypt", secret_key);
    let input = crate::read_input("ballotcrypt decrypt", matches);

    let encrypted: EncryptedText<C> = serde_json::from_str(&input)
        .unwrap_or_else(|e| crate::exit_with("ballotcrypt decrypt", e));

    let points = elgamal::decrypt_many::<C>(&encrypted.cryptograms, &secret_key);
    let message = encoder::decode_text::<C>(&points, encrypted.byte_count)
        .unwrap_or_else(|e| crate::exit_with("ballotcrypt decrypt", e));

    println!("{}", message);
}
