//! Schnorr signatures.
//!
//! `e = H(R ‖ message)` with `R = r·G`, and `s = r − e·private_key`. Verification recomputes
//! `R' = s·G + e·public_key` and accepts iff `H(R' ‖ message) = e`.

use crate::codec::{check_pattern, patterns};
use crate::*;
use std::fmt;
use std::str::FromStr;

/// Challenge scalar `e` and response scalar `s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature<C: Curve> {
    pub e: C::Scalar,
    pub s: C::Scalar,
}

impl<C: Curve> fmt::Display for Signature<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", scalar_to_hex::<C>(&self.e), scalar_to_hex::<C>(&self.s))
    }
}

impl<C: Curve> FromStr for Signature<C> {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        check_pattern(&patterns::<C>().signature, input)?;
        let (e, s) = input.split_once(',').ok_or(Error::InvalidEncoding)?;

        Ok(Signature {
            e: scalar_from_hex::<C>(e)?,
            s: scalar_from_hex::<C>(s)?,
        })
    }
}

impl_serde_as_string!(Signature);

/// Sign `message`. A fresh nonce is drawn unless `randomness` is given.
pub fn sign<C: Curve>(
    message: &str,
    private_key: &C::Scalar,
    randomness: Option<&KeyPair<C>>,
) -> Result<Signature<C>> {
    let nonce = randomness.copied().unwrap_or_else(KeyPair::random);
    let e = challenge::<C>(&nonce.public, message)?;

    Ok(Signature {
        e,
        s: nonce.secret - e * private_key,
    })
}

/// Sign with the secret half of `keypair`
pub fn sign_with_keypair<C: Curve>(message: &str, keypair: &KeyPair<C>) -> Result<Signature<C>> {
    sign::<C>(message, &keypair.secret, None)
}

/// Verify a signature
pub fn is_valid<C: Curve>(signature: &Signature<C>, message: &str, public_key: &C::Point) -> bool {
    let r = C::generator() * signature.s + *public_key * signature.e;

    match challenge::<C>(&r, message) {
        Ok(e) => e == signature.e,
        Err(_) => false,
    }
}

/// `H(R ‖ message)`, shared with threshold signing.
pub(crate) fn challenge<C: Curve>(r: &C::Point, message: &str) -> Result<C::Scalar> {
    hash_into_scalar::<C>(&format!("{}{}", point_to_hex::<C>(r), message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_signature() {
        let private_key = hash_into_scalar::<Secp256k1>("fixed value 1").unwrap();
        let nonce = KeyPair::<Secp256k1>::from_string_seed("fixed_keypair").unwrap();

        let signature = sign::<Secp256k1>("hello", &private_key, Some(&nonce)).unwrap();
        assert_eq!(
            signature.to_string(),
            "90f41d88aa1751b71359676fb0295fb8e08486d77ee588b172b487270795b346,81ca5f119ed21764d8282b10301be695a11795d6c38aaecf1686c0d36e3c6851"
        );
        assert_eq!(signature, sign::<Secp256k1>("hello", &private_key, Some(&nonce)).unwrap());

        let parsed: Signature<Secp256k1> = signature.to_string().parse().unwrap();
        assert_eq!(parsed, signature);
    }

    fn sign_and_verify<C: Curve>() {
        let keypair = KeyPair::<C>::random();
        let signature = sign_with_keypair::<C>("ballot receipt", &keypair).unwrap();
        assert!(is_valid::<C>(&signature, "ballot receipt", &keypair.public));

        // Changed message
        assert!(!is_valid::<C>(&signature, "ballot receipT", &keypair.public));

        // Different public key
        assert!(!is_valid::<C>(&signature, "ballot receipt", &KeyPair::<C>::random().public));
    }

    #[test]
    fn test_sign_and_verify() {
        sign_and_verify::<Secp256k1>();
        sign_and_verify::<Secp256r1>();
        sign_and_verify::<Secp384r1>();
        sign_and_verify::<Secp521r1>();
    }

    #[test]
    fn test_parse_errors() {
        assert!("1234,5678".parse::<Signature<Secp256k1>>().is_err());

        let signature = sign_with_keypair::<Secp256k1>("m", &KeyPair::random()).unwrap();
        assert!(signature.to_string().parse::<Signature<Secp384r1>>().is_err());
    }
}
