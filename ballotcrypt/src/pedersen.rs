//! Pedersen commitments to one or more scalars.
//!
//! The commitment to messages `m₀ … mₙ` under randomness `r` is `r·G + Σ mᵢ·Hᵢ`, where each
//! base `Hᵢ` is hashed from the context, the generator and the message index, so nobody knows
//! a discrete log relation between the bases.

use crate::*;
use std::fmt;
use std::str::FromStr;
use tracing::error;

/// A commitment point, with its opening if this party created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commitment<C: Curve> {
    pub c: C::Point,
    pub r: Option<C::Scalar>,
}

impl<C: Curve> Commitment<C> {
    /// True if the opening randomness is present.
    pub fn is_openable(&self) -> bool {
        self.r.is_some()
    }

    /// The commitment without its opening, safe to publish.
    pub fn public(&self) -> Self {
        Commitment { c: self.c, r: None }
    }

    pub fn opening(&self) -> Option<&C::Scalar> {
        self.r.as_ref()
    }
}

/// Only the commitment point is written; openings never travel in the clear.
impl<C: Curve> fmt::Display for Commitment<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&point_to_hex::<C>(&self.c))
    }
}

impl<C: Curve> FromStr for Commitment<C> {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        Ok(Commitment {
            c: point_from_hex::<C>(input)?,
            r: None,
        })
    }
}

impl_serde_as_string!(Commitment);

/// The message bases `H₀ … H_{count-1}` for a context.
pub fn generators<C: Curve>(count: usize, context: &str) -> Result<Vec<C::Point>> {
    let generator = point_to_hex::<C>(&C::generator());
    (0..count)
        .map(|index| hash_into_point::<C>(&format!("{}{}{}", context, generator, index)))
        .collect()
}

/// Commit to `messages` under `context`. Fresh randomness is drawn unless given.
pub fn commit<C: Curve>(
    messages: &[C::Scalar],
    context: &str,
    randomness: Option<&C::Scalar>,
) -> Result<Commitment<C>> {
    let r = randomness.copied().unwrap_or_else(random_scalar::<C>);

    Ok(Commitment {
        c: compute::<C>(messages, context, &r)?,
        r: Some(r),
    })
}

/// Check that `commitment` opens to `messages` under `context`.
///
/// Returns `Ok(false)` on a mismatch and fails with [`Error::NotOpenable`] if the commitment
/// carries no opening.
pub fn is_valid<C: Curve>(
    commitment: &Commitment<C>,
    messages: &[C::Scalar],
    context: &str,
) -> Result<bool> {
    let r = commitment.r.as_ref().ok_or_else(|| {
        error!("cannot verify a commitment without its opening");
        Error::NotOpenable
    })?;

    Ok(compute::<C>(messages, context, r)? == commitment.c)
}

fn compute<C: Curve>(messages: &[C::Scalar], context: &str, r: &C::Scalar) -> Result<C::Point> {
    let bases = generators::<C>(messages.len(), context)?;

    Ok(messages
        .iter()
        .zip(bases)
        .fold(C::generator() * r, |sum, (message, base)| sum + base * message))
}
