//! Hex wire encoding of scalars and points, and hashing into either.

use crate::*;
use elliptic_curve::group::Group;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, error, trace};

/// Upper bound on the counter used by [`hash_into_scalar`] and [`hash_into_point`].
pub const MAX_HASH_ATTEMPTS: usize = 10_000;

const SEC1_EVEN_TAG: u8 = 0x02;

/// Regular expressions every wire string of a curve must match before it is decoded.
pub(crate) struct WirePatterns {
    pub scalar: Regex,
    pub point: Regex,
    pub cryptogram: Regex,
    pub proof: Regex,
    pub signature: Regex,
    pub commitment_share: Regex,
}

impl WirePatterns {
    fn new(curve: CurveName) -> Self {
        let scalar = format!("[0-9a-f]{{{}}}", curve.scalar_hex_width());
        let point = format!("(?:00|0[23][0-9a-f]{{{}}})", curve.scalar_hex_width());
        let anchored = |body: String| Regex::new(&format!("^{}$", body)).expect("valid wire pattern");

        WirePatterns {
            scalar: anchored(scalar.clone()),
            point: anchored(point.clone()),
            cryptogram: anchored(format!("({}),({})", point, point)),
            proof: anchored(format!("({}),({})", point, scalar)),
            signature: anchored(format!("({}),({})", scalar, scalar)),
            commitment_share: anchored(format!("({}),({}),({})", scalar, point, point)),
        }
    }
}

lazy_static! {
    static ref PATTERNS: [WirePatterns; 4] = CurveName::ALL.map(WirePatterns::new);
}

pub(crate) fn patterns<C: Curve>() -> &'static WirePatterns {
    &PATTERNS[C::NAME as usize]
}

/// Fail with [`Error::MalformedInput`] unless `input` matches `pattern`.
pub(crate) fn check_pattern(pattern: &Regex, input: &str) -> Result<()> {
    if pattern.is_match(input) {
        Ok(())
    } else {
        error!(input, pattern = pattern.as_str(), "malformed wire input");
        Err(Error::MalformedInput {
            input: input.to_owned(),
            pattern: pattern.as_str().to_owned(),
        })
    }
}

/// Fixed-width, zero-padded, lowercase big-endian hex.
pub fn scalar_to_hex<C: Curve>(scalar: &C::Scalar) -> String {
    hex::encode(C::scalar_to_bytes(scalar))
}

/// Parse a scalar, rejecting values that are not below the curve order.
pub fn scalar_from_hex<C: Curve>(input: &str) -> Result<C::Scalar> {
    let pattern = &patterns::<C>().scalar;
    check_pattern(pattern, input)?;

    let bytes = hex::decode(input).map_err(|_| Error::MalformedInput {
        input: input.to_owned(),
        pattern: pattern.as_str().to_owned(),
    })?;

    C::scalar_from_bytes(&bytes).ok_or_else(|| {
        error!(input, "scalar is not below the curve order");
        Error::MalformedInput {
            input: input.to_owned(),
            pattern: format!("{} below {}", pattern.as_str(), C::order()),
        }
    })
}

/// `02`/`03` followed by the x-coordinate, or `00` for the identity.
pub fn point_to_hex<C: Curve>(point: &C::Point) -> String {
    hex::encode(C::encode_point(point))
}

/// Parse a compressed point.
pub fn point_from_hex<C: Curve>(input: &str) -> Result<C::Point> {
    let pattern = &patterns::<C>().point;
    check_pattern(pattern, input)?;

    let bytes = hex::decode(input).map_err(|_| Error::MalformedInput {
        input: input.to_owned(),
        pattern: pattern.as_str().to_owned(),
    })?;

    C::decode_point(&bytes).ok_or_else(|| {
        error!(input, "point is not on the curve");
        Error::PointNotOnCurve
    })
}

/// Convert a participant id or index into a scalar.
pub fn scalar_from_u32<C: Curve>(value: u32) -> C::Scalar {
    C::Scalar::from(u64::from(value))
}

/// Hash `context ‖ counter` for counter = 0, 1, 2, … and return the first digest that is a
/// scalar strictly below the curve order.
pub fn hash_into_scalar<C: Curve>(context: &str) -> Result<C::Scalar> {
    for counter in 0..MAX_HASH_ATTEMPTS {
        let digest = C::hash(format!("{}{}", context, counter).as_bytes());
        let candidate = fit_width(&digest, C::FIELD_BYTES);

        if let Some(scalar) = C::scalar_from_bytes(&candidate) {
            if counter > 0 {
                debug!(counter, curve = %C::NAME, "hash_into_scalar needed retries");
            }
            return Ok(scalar);
        }
        trace!(counter, "digest out of scalar range");
    }

    error!(context, curve = %C::NAME, "hash_into_scalar exhausted");
    Err(Error::EncodingExhausted(MAX_HASH_ATTEMPTS))
}

/// Hash `context ‖ counter` for counter = 0, 1, 2, … and return the first digest that is the
/// x-coordinate of a curve point, taking the point with even y.
pub fn hash_into_point<C: Curve>(context: &str) -> Result<C::Point> {
    for counter in 0..MAX_HASH_ATTEMPTS {
        let digest = C::hash(format!("{}{}", context, counter).as_bytes());

        let mut candidate = Vec::with_capacity(C::FIELD_BYTES + 1);
        candidate.push(SEC1_EVEN_TAG);
        candidate.extend(fit_width(&digest, C::FIELD_BYTES));

        if let Some(point) = C::decode_point(&candidate) {
            if counter > 0 {
                debug!(counter, curve = %C::NAME, "hash_into_point needed retries");
            }
            return Ok(point);
        }
        trace!(counter, "digest is not an x-coordinate");
    }

    error!(context, curve = %C::NAME, "hash_into_point exhausted");
    Err(Error::EncodingExhausted(MAX_HASH_ATTEMPTS))
}

/// Left-pad with zeros, or keep the leading bytes, so that `bytes` is exactly `width` long.
fn fit_width(bytes: &[u8], width: usize) -> Vec<u8> {
    if bytes.len() >= width {
        return bytes[..width].to_vec();
    }
    let mut padded = vec![0u8; width - bytes.len()];
    padded.extend_from_slice(bytes);
    padded
}

/// True if the point is the identity
pub fn is_identity<C: Curve>(point: &C::Point) -> bool {
    bool::from(point.is_identity())
}
