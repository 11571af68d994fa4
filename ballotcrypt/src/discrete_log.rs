//! Non-interactive proofs of knowledge of a discrete logarithm.
//!
//! A proof shows knowledge of one scalar `x` with `public_key = x·G` and
//! `points[i] = x·generators[i]` for every `i`, without revealing `x`. All relations are folded
//! into one Schnorr-style sigma protocol: each index `i > 0` is weighted by a scalar `zᵢ` hashed
//! from the points, and the challenge is derived with Fiat-Shamir from the context, the
//! generators, the points and the prover's commitment. With a single generator this is a plain
//! Schnorr proof of knowledge.

use crate::codec::{check_pattern, patterns};
use crate::*;
use std::fmt;
use std::str::FromStr;
use tracing::error;

/// Commitment point `k` and response scalar `r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proof<C: Curve> {
    pub k: C::Point,
    pub r: C::Scalar,
}

impl<C: Curve> fmt::Display for Proof<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", point_to_hex::<C>(&self.k), scalar_to_hex::<C>(&self.r))
    }
}

impl<C: Curve> FromStr for Proof<C> {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        check_pattern(&patterns::<C>().proof, input)?;
        let (k, r) = input.split_once(',').ok_or(Error::InvalidEncoding)?;

        Ok(Proof {
            k: point_from_hex::<C>(k)?,
            r: scalar_from_hex::<C>(r)?,
        })
    }
}

impl_serde_as_string!(Proof);

/// Prove knowledge of `secret` relative to `G` and to each of `generators`.
///
/// The matching points are `secret·generators[i]` and the public key is `secret·G`.
pub fn prove<C: Curve>(
    secret: &C::Scalar,
    context: &str,
    generators: &[C::Point],
    randomness: Option<&C::Scalar>,
) -> Result<Proof<C>> {
    let points: Vec<C::Point> = generators.iter().map(|g| *g * secret).collect();
    let weights = weights::<C>(&points)?;

    let w = randomness.copied().unwrap_or_else(random_scalar::<C>);
    let k = combine::<C>(&C::generator(), generators, &weights) * w;

    let c = challenge::<C>(context, generators, &points, &k)?;
    let r = w + c * secret;

    Ok(Proof { k, r })
}

/// Verify a proof.
///
/// Returns `Ok(false)` for a proof that does not verify, and fails with
/// [`Error::MismatchedLength`] if `generators` and `points` differ in length.
pub fn is_valid<C: Curve>(
    proof: &Proof<C>,
    context: &str,
    generators: &[C::Point],
    points: &[C::Point],
    public_key: &C::Point,
) -> Result<bool> {
    if generators.len() != points.len() {
        error!(
            generators = generators.len(),
            points = points.len(),
            "mismatched proof statement"
        );
        return Err(Error::MismatchedLength(generators.len(), points.len()));
    }

    let weights = weights::<C>(points)?;
    let c = challenge::<C>(context, generators, points, &proof.k)?;

    let lhs = combine::<C>(&C::generator(), generators, &weights) * proof.r;
    let rhs = proof.k + combine::<C>(public_key, points, &weights) * c;

    Ok(lhs == rhs)
}

// zᵢ for every index; the weight at index 0 is unused.
fn weights<C: Curve>(points: &[C::Point]) -> Result<Vec<C::Scalar>> {
    let points_hex = concat_hex::<C>(points);
    (0..points.len())
        .map(|i| hash_into_scalar::<C>(&format!("{}{}", points_hex, i)))
        .collect()
}

// first + Σ_{i>0} zᵢ·elements[i]
fn combine<C: Curve>(first: &C::Point, elements: &[C::Point], weights: &[C::Scalar]) -> C::Point {
    elements
        .iter()
        .zip(weights)
        .skip(1)
        .fold(*first, |sum, (element, weight)| sum + *element * weight)
}

fn challenge<C: Curve>(
    context: &str,
    generators: &[C::Point],
    points: &[C::Point],
    k: &C::Point,
) -> Result<C::Scalar> {
    hash_into_scalar::<C>(&format!(
        "{}{}{}{}",
        context,
        concat_hex::<C>(generators),
        concat_hex::<C>(points),
        point_to_hex::<C>(k)
    ))
}

fn concat_hex<C: Curve>(points: &[C::Point]) -> String {
    points.iter().map(point_to_hex::<C>).collect()
}
