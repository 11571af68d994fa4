use crate::*;
use elliptic_curve::ff::Field;
use rand::rngs::OsRng;

/// A secret scalar together with its public point `secret·G`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPair<C: Curve> {
    pub secret: C::Scalar,
    pub public: C::Point,
}

impl<C: Curve> KeyPair<C> {
    /// Generate a fresh random keypair
    pub fn random() -> Self {
        Self::from_secret(C::Scalar::random(&mut OsRng))
    }

    pub fn from_secret(secret: C::Scalar) -> Self {
        KeyPair {
            secret,
            public: C::generator() * secret,
        }
    }

    /// Deterministic keypair whose secret is `hash_into_scalar(seed)`.
    ///
    /// Only suitable for test vectors and other public values.
    pub fn from_string_seed(seed: &str) -> Result<Self> {
        Ok(Self::from_secret(hash_into_scalar::<C>(seed)?))
    }
}

/// Generate a fresh random scalar
pub fn random_scalar<C: Curve>() -> C::Scalar {
    C::Scalar::random(&mut OsRng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair() {
        let keypair = KeyPair::<Secp256k1>::from_string_seed("fixed value 1").unwrap();
        assert_eq!(
            point_to_hex::<Secp256k1>(&keypair.public),
            "02b450f852e4121810907af0b516881cb90f32b2f5c36b1fff59b16f05dd379fd2"
        );

        let random = KeyPair::<Secp384r1>::random();
        assert_eq!(random.public, Secp384r1::generator() * random.secret);
        assert_ne!(random, KeyPair::<Secp384r1>::random());
    }
}
