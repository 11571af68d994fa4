//! Supported elliptic curves.
//!
//! Every scheme in this crate is generic over [`Curve`]. The four implementors are zero-sized
//! markers wrapping the RustCrypto curve crates, so values from one curve can never be mixed
//! with another. [`curve`] resolves the public curve names used on the wire.

use crate::{Error, Result};
use elliptic_curve::bigint::Encoding;
use elliptic_curve::ff::PrimeField;
use elliptic_curve::group::{Curve as _, Group};
use elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::fmt;
use std::str::FromStr;

/// The public names of the supported curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveName {
    Secp256k1 = 0,
    Secp256r1 = 1,
    Secp384r1 = 2,
    Secp521r1 = 3,
}

impl CurveName {
    pub const ALL: [CurveName; 4] = [
        CurveName::Secp256k1,
        CurveName::Secp256r1,
        CurveName::Secp384r1,
        CurveName::Secp521r1,
    ];

    /// Name as used by the public API
    pub const fn as_str(&self) -> &'static str {
        match self {
            CurveName::Secp256k1 => "secp256k1",
            CurveName::Secp256r1 => "secp256r1",
            CurveName::Secp384r1 => "secp384r1",
            CurveName::Secp521r1 => "secp521r1",
        }
    }

    /// Short identifier of the underlying parameter set
    pub const fn internal_id(&self) -> &'static str {
        match self {
            CurveName::Secp256k1 => "k256",
            CurveName::Secp256r1 => "c256",
            CurveName::Secp384r1 => "c384",
            CurveName::Secp521r1 => "c521",
        }
    }

    /// Bit length of the field prime
    pub const fn degree_bits(&self) -> usize {
        match self {
            CurveName::Secp256k1 | CurveName::Secp256r1 => 256,
            CurveName::Secp384r1 => 384,
            CurveName::Secp521r1 => 521,
        }
    }

    /// Byte width of field elements and scalars
    pub const fn field_bytes(&self) -> usize {
        (self.degree_bits() + 7) / 8
    }

    /// Hex width of an encoded scalar
    pub const fn scalar_hex_width(&self) -> usize {
        self.field_bytes() * 2
    }

    /// Hex width of an encoded non-identity point
    pub const fn point_hex_width(&self) -> usize {
        self.scalar_hex_width() + 2
    }
}

impl fmt::Display for CurveName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurveName {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        CurveName::ALL
            .iter()
            .find(|curve| curve.as_str() == name)
            .copied()
            .ok_or_else(|| {
                tracing::error!(name, "unsupported curve requested");
                Error::UnsupportedCurve(name.to_owned())
            })
    }
}

/// Look up a curve by its public name.
pub fn curve(name: &str) -> Result<CurveName> {
    name.parse()
}

/// An elliptic curve usable by every scheme in this crate.
pub trait Curve: 'static + Copy + Clone + fmt::Debug + Default + PartialEq + Eq + Send + Sync {
    /// Integers modulo the group order.
    type Scalar: PrimeField;

    /// Curve points, including the identity.
    type Point: Group<Scalar = Self::Scalar>;

    /// The hash function associated with the curve.
    type Hash: Digest;

    const NAME: CurveName;

    const DEGREE_BITS: usize = Self::NAME.degree_bits();

    const FIELD_BYTES: usize = Self::NAME.field_bytes();

    fn generator() -> Self::Point {
        Self::Point::generator()
    }

    fn identity() -> Self::Point {
        Self::Point::identity()
    }

    /// Group order as lowercase big-endian hex.
    fn order() -> String;

    /// Field prime as lowercase big-endian hex.
    fn field_prime() -> &'static str;

    fn scalar_hex_width() -> usize {
        Self::NAME.scalar_hex_width()
    }

    fn point_hex_width() -> usize {
        Self::NAME.point_hex_width()
    }

    fn hash(data: &[u8]) -> Vec<u8> {
        Self::Hash::digest(data).to_vec()
    }

    /// Compressed SEC1 encoding, or a single zero byte for the identity.
    fn encode_point(point: &Self::Point) -> Vec<u8>;

    /// Decode any SEC1 encoding. Returns `None` if the bytes are not a point on the curve.
    fn decode_point(bytes: &[u8]) -> Option<Self::Point>;

    /// Big-endian affine x-coordinate, `None` for the identity.
    fn point_x(point: &Self::Point) -> Option<Vec<u8>>;

    /// Big-endian scalar bytes, `FIELD_BYTES` wide.
    fn scalar_to_bytes(scalar: &Self::Scalar) -> Vec<u8> {
        scalar.to_repr().as_ref().to_vec()
    }

    /// Parse big-endian scalar bytes. Returns `None` unless the value is below the order.
    fn scalar_from_bytes(bytes: &[u8]) -> Option<Self::Scalar> {
        let mut repr = <Self::Scalar as PrimeField>::Repr::default();
        if repr.as_ref().len() != bytes.len() {
            return None;
        }
        repr.as_mut().copy_from_slice(bytes);
        Option::from(Self::Scalar::from_repr(repr))
    }
}

macro_rules! impl_curve {
    ($marker:ident, $krate:ident, $params:ty, $hash:ty, $name:expr, $prime:expr) => {
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $marker;

        impl Curve for $marker {
            type Scalar = $krate::Scalar;
            type Point = $krate::ProjectivePoint;
            type Hash = $hash;

            const NAME: CurveName = $name;

            fn order() -> String {
                let order = <$params as elliptic_curve::Curve>::ORDER.to_be_bytes();
                hex::encode(&order[order.len() - Self::FIELD_BYTES..])
            }

            fn field_prime() -> &'static str {
                $prime
            }

            fn encode_point(point: &Self::Point) -> Vec<u8> {
                point.to_affine().to_encoded_point(true).as_bytes().to_vec()
            }

            fn decode_point(bytes: &[u8]) -> Option<Self::Point> {
                let encoded = $krate::EncodedPoint::from_bytes(bytes).ok()?;
                let affine: Option<$krate::AffinePoint> =
                    $krate::AffinePoint::from_encoded_point(&encoded).into();
                affine.map($krate::ProjectivePoint::from)
            }

            fn point_x(point: &Self::Point) -> Option<Vec<u8>> {
                let encoded = point.to_affine().to_encoded_point(true);
                encoded.x().map(|x| x.to_vec())
            }
        }
    };
}

impl_curve!(
    Secp256k1,
    k256,
    k256::Secp256k1,
    Sha256,
    CurveName::Secp256k1,
    "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"
);

impl_curve!(
    Secp256r1,
    p256,
    p256::NistP256,
    Sha256,
    CurveName::Secp256r1,
    "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"
);

impl_curve!(
    Secp384r1,
    p384,
    p384::NistP384,
    Sha384,
    CurveName::Secp384r1,
    "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffff0000000000000000ffffffff"
);

impl_curve!(
    Secp521r1,
    p521,
    p521::NistP521,
    Sha512,
    CurveName::Secp521r1,
    "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
);
