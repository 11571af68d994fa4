//! Bidirectional mapping between byte sequences and curve points.
//!
//! Each chunk of input is placed in the x-coordinate of a point, after a single adjustment
//! byte. The adjustment byte is incremented until the x-coordinate lies on the curve. Roughly
//! half of all x-coordinates are valid, so failure after 256 attempts is negligible for honest
//! input.

use crate::*;
use tracing::{error, trace};

/// Bytes of each x-coordinate reserved for the adjustment byte.
pub const ADJUSTING_BYTE_COUNT: usize = 1;

const SEC1_EVEN_TAG: u8 = 0x02;

/// Number of message bytes carried by each point.
pub fn point_encoding_byte_size<C: Curve>() -> usize {
    C::DEGREE_BITS / 8 - ADJUSTING_BYTE_COUNT
}

/// Number of points needed to carry `byte_count` bytes.
pub fn points_needed<C: Curve>(byte_count: usize) -> usize {
    let size = point_encoding_byte_size::<C>();
    (byte_count + size - 1) / size
}

/// Encode bytes as points. The last chunk is zero-padded on the right.
pub fn encode<C: Curve>(bytes: &[u8]) -> Result<Vec<C::Point>> {
    bytes
        .chunks(point_encoding_byte_size::<C>())
        .map(encode_chunk::<C>)
        .collect()
}

/// Decode points back into exactly `byte_count` bytes.
///
/// Fails if a point is the identity, if a point was not produced by [`encode`], or if the
/// bytes trimmed away beyond `byte_count` are not zero padding.
pub fn decode<C: Curve>(points: &[C::Point], byte_count: usize) -> Result<Vec<u8>> {
    let size = point_encoding_byte_size::<C>();
    let leading = leading_zero_bytes::<C>();

    let mut bytes = Vec::with_capacity(points.len() * size);
    for point in points {
        let x = C::point_x(point).ok_or_else(|| {
            error!("cannot decode the identity point");
            Error::InvalidEncoding
        })?;

        if x[..leading].iter().any(|b| *b != 0) {
            return Err(Error::InvalidEncoding);
        }
        bytes.extend_from_slice(&x[leading + ADJUSTING_BYTE_COUNT..]);
    }

    if byte_count > bytes.len() {
        error!(byte_count, available = bytes.len(), "not enough encoded bytes");
        return Err(Error::InvalidEncoding);
    }

    let padding = bytes.split_off(byte_count);
    if padding.iter().any(|b| *b != 0) {
        error!("non-zero padding in encoded points");
        return Err(Error::InvalidEncoding);
    }

    Ok(bytes)
}

/// Encode a UTF-8 string as points
pub fn encode_text<C: Curve>(text: &str) -> Result<Vec<C::Point>> {
    encode::<C>(text.as_bytes())
}

/// Decode points produced by [`encode_text`]
pub fn decode_text<C: Curve>(points: &[C::Point], byte_count: usize) -> Result<String> {
    let bytes = decode::<C>(points, byte_count)?;
    String::from_utf8(bytes).map_err(|_| Error::InvalidEncoding)
}

// Zero bytes in front of the adjustment byte when the field is wider than a whole chunk,
// as on secp521r1.
fn leading_zero_bytes<C: Curve>() -> usize {
    C::FIELD_BYTES - point_encoding_byte_size::<C>() - ADJUSTING_BYTE_COUNT
}

fn encode_chunk<C: Curve>(chunk: &[u8]) -> Result<C::Point> {
    let adjustment_index = 1 + leading_zero_bytes::<C>();
    let chunk_start = adjustment_index + ADJUSTING_BYTE_COUNT;

    let mut candidate = vec![0u8; 1 + C::FIELD_BYTES];
    candidate[0] = SEC1_EVEN_TAG;
    candidate[chunk_start..chunk_start + chunk.len()].copy_from_slice(chunk);

    for adjustment in 0..=u8::MAX {
        candidate[adjustment_index] = adjustment;
        if let Some(point) = C::decode_point(&candidate) {
            return Ok(point);
        }
        trace!(adjustment, "chunk is not an x-coordinate");
    }

    error!(curve = %C::NAME, "no adjustment byte encodes chunk");
    Err(Error::PointEncodingExhausted)
}
