//! ElGamal encryption of curve points.
//!
//! Cryptograms are additively homomorphic: adding two cryptograms component-wise yields a
//! cryptogram of the sum of their messages under the sum of their randomness. Ballots use this
//! to combine the voter's randomness with randomness contributed by the board, so that neither
//! party alone determines the final randomness.

use crate::codec::{check_pattern, patterns};
use crate::*;
use std::fmt;
use std::str::FromStr;

/// An ElGamal ciphertext: `r = k·G`, `c = message + k·encryption_key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cryptogram<C: Curve> {
    pub r: C::Point,
    pub c: C::Point,
}

impl<C: Curve> Cryptogram<C> {
    pub fn new(r: C::Point, c: C::Point) -> Self {
        Cryptogram { r, c }
    }
}

impl<C: Curve> fmt::Display for Cryptogram<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", point_to_hex::<C>(&self.r), point_to_hex::<C>(&self.c))
    }
}

impl<C: Curve> FromStr for Cryptogram<C> {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        check_pattern(&patterns::<C>().cryptogram, input)?;
        let (r, c) = input.split_once(',').ok_or(Error::InvalidEncoding)?;

        Ok(Cryptogram {
            r: point_from_hex::<C>(r)?,
            c: point_from_hex::<C>(c)?,
        })
    }
}

impl_serde_as_string!(Cryptogram);

/// Encrypt a point. Fresh randomness is drawn unless `randomness` is given.
pub fn encrypt<C: Curve>(
    message: &C::Point,
    encryption_key: &C::Point,
    randomness: Option<&C::Scalar>,
) -> Cryptogram<C> {
    let k = randomness.copied().unwrap_or_else(random_scalar::<C>);

    Cryptogram {
        r: C::generator() * k,
        c: *encryption_key * k + message,
    }
}

/// Encrypt the identity point. Adding this to a cryptogram re-randomizes it without changing
/// its message.
pub fn encrypt_empty<C: Curve>(
    encryption_key: &C::Point,
    randomness: Option<&C::Scalar>,
) -> Cryptogram<C> {
    encrypt::<C>(&C::identity(), encryption_key, randomness)
}

/// Encrypt a sequence of points, each under fresh randomness.
pub fn encrypt_many<C: Curve>(messages: &[C::Point], encryption_key: &C::Point) -> Vec<Cryptogram<C>> {
    messages
        .iter()
        .map(|message| encrypt::<C>(message, encryption_key, None))
        .collect()
}

/// Recover the message: `c − private_key·r`.
pub fn decrypt<C: Curve>(cryptogram: &Cryptogram<C>, private_key: &C::Scalar) -> C::Point {
    cryptogram.c + -(cryptogram.r * private_key)
}

pub fn decrypt_many<C: Curve>(cryptograms: &[Cryptogram<C>], private_key: &C::Scalar) -> Vec<C::Point> {
    cryptograms
        .iter()
        .map(|cryptogram| decrypt::<C>(cryptogram, private_key))
        .collect()
}

/// Component-wise sum of all cryptograms. The sum of no cryptograms is the identity pair.
pub fn homomorphically_add<C: Curve>(cryptograms: &[Cryptogram<C>]) -> Cryptogram<C> {
    cryptograms.iter().fold(
        Cryptogram::new(C::identity(), C::identity()),
        |sum, cryptogram| Cryptogram {
            r: sum.r + cryptogram.r,
            c: sum.c + cryptogram.c,
        },
    )
}

/// Add an empty cryptogram to `cryptogram`, changing its randomness but not its message.
pub fn randomize<C: Curve>(
    cryptogram: &Cryptogram<C>,
    encryption_key: &C::Point,
    randomness: Option<&C::Scalar>,
) -> Cryptogram<C> {
    let empty = encrypt_empty::<C>(encryption_key, randomness);
    homomorphically_add::<C>(&[*cryptogram, empty])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_cryptogram() {
        let private_key = hash_into_scalar::<Secp256k1>("fixed value 1").unwrap();
        let encryption_key = Secp256k1::generator() * private_key;
        let message = KeyPair::<Secp256k1>::from_string_seed("fixed value 2").unwrap().public;
        let randomness = KeyPair::<Secp256k1>::from_string_seed("fixed_keypair").unwrap();

        let cryptogram = encrypt::<Secp256k1>(&message, &encryption_key, Some(&randomness.secret));
        assert_eq!(cryptogram.r, randomness.public);
        assert_eq!(
            cryptogram.to_string(),
            "02e8e293426bcb9a6b6e519f551e2a3e015d686379bf84aaecb5dcf25b054376cd,0295ec3edb1005d865f48e40aee2fbd9b5674a49f96888ddb82f60e0f94f9fa347"
        );

        assert_eq!(decrypt::<Secp256k1>(&cryptogram, &private_key), message);

        let parsed: Cryptogram<Secp256k1> = cryptogram.to_string().parse().unwrap();
        assert_eq!(parsed, cryptogram);
    }

    fn homomorphism<C: Curve>() {
        let key = KeyPair::<C>::random();
        let m1 = KeyPair::<C>::random().public;
        let m2 = KeyPair::<C>::random().public;

        let sum = homomorphically_add::<C>(&[
            encrypt::<C>(&m1, &key.public, None),
            encrypt::<C>(&m2, &key.public, None),
        ]);
        assert_eq!(decrypt::<C>(&sum, &key.secret), m1 + m2);
    }

    #[test]
    fn test_homomorphism() {
        homomorphism::<Secp256k1>();
        homomorphism::<Secp256r1>();
        homomorphism::<Secp384r1>();
        homomorphism::<Secp521r1>();
    }

    #[test]
    fn test_randomness_combination() {
        let key = KeyPair::<Secp256r1>::random();
        let k1 = random_scalar::<Secp256r1>();
        let k2 = random_scalar::<Secp256r1>();
        let vote = encoder::encode_text::<Secp256r1>("yes").unwrap()[0];

        // The voter encrypts with k1, the board contributes an empty cryptogram with k2
        let voter = encrypt::<Secp256r1>(&vote, &key.public, Some(&k1));
        let board = encrypt_empty::<Secp256r1>(&key.public, Some(&k2));
        let combined = homomorphically_add::<Secp256r1>(&[voter, board]);

        assert_eq!(combined, encrypt::<Secp256r1>(&vote, &key.public, Some(&(k1 + k2))));
        assert_eq!(decrypt::<Secp256r1>(&combined, &key.secret), vote);

        let randomized = randomize::<Secp256r1>(&combined, &key.public, None);
        assert_ne!(randomized, combined);
        assert_eq!(decrypt::<Secp256r1>(&randomized, &key.secret), vote);
    }

    #[test]
    fn test_many() {
        let key = KeyPair::<Secp521r1>::random();
        let points = encoder::encode_text::<Secp521r1>(&"ballot ".repeat(30)).unwrap();
        let cryptograms = encrypt_many::<Secp521r1>(&points, &key.public);
        assert_eq!(decrypt_many::<Secp521r1>(&cryptograms, &key.secret), points);

        let empty = homomorphically_add::<Secp521r1>(&[]);
        assert_eq!(decrypt::<Secp521r1>(&empty, &key.secret), Secp521r1::identity());
    }

    #[test]
    fn test_parse_errors() {
        assert!("02abc,02abc".parse::<Cryptogram<Secp256k1>>().is_err());
        assert!("00".parse::<Cryptogram<Secp256k1>>().is_err());
        assert_eq!(
            "00,00".parse::<Cryptogram<Secp256k1>>().unwrap(),
            Cryptogram::new(Secp256k1::identity(), Secp256k1::identity())
        );

        let json = serde_json::to_string(&Cryptogram::<Secp384r1>::new(
            Secp384r1::generator(),
            Secp384r1::identity(),
        ))
        .unwrap();
        let parsed: Cryptogram<Secp384r1> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.r, Secp384r1::generator());
    }
}
