//! FROST threshold Schnorr signing.
//!
//! Each signer publishes a [`CommitmentShare`] for a fresh [`SingleUseNonce`], then produces a
//! partial signature with [`partial_sign`]. The sum of the partial signatures, paired with the
//! shared challenge, is an ordinary [`schnorr::Signature`] under the group public key.
//!
//! A nonce signs exactly once: [`partial_sign`] takes it by value, and it is neither `Clone`
//! nor `Copy`. Two partial signatures over one nonce would reveal the private share.

use crate::codec::{check_pattern, patterns};
use crate::schnorr::{self, Signature};
use crate::*;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::error;

/// A participant's published nonce commitments `D = d·G` and `E = e·G`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitmentShare<C: Curve> {
    pub id: u32,
    pub d: C::Point,
    pub e: C::Point,
}

impl<C: Curve> fmt::Display for CommitmentShare<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{},{},{}",
            scalar_to_hex::<C>(&scalar_from_u32::<C>(self.id)),
            point_to_hex::<C>(&self.d),
            point_to_hex::<C>(&self.e)
        )
    }
}

impl<C: Curve> FromStr for CommitmentShare<C> {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let pattern = &patterns::<C>().commitment_share;
        check_pattern(pattern, input)?;

        let mut parts = input.split(',');
        let (id, d, e) = match (parts.next(), parts.next(), parts.next()) {
            (Some(id), Some(d), Some(e)) => (id, d, e),
            _ => return Err(Error::InvalidEncoding),
        };

        // Ids are small integers written at scalar width
        let id_bytes = hex::decode(id).map_err(|_| Error::InvalidEncoding)?;
        let (high, low) = id_bytes.split_at(id_bytes.len() - 4);
        if high.iter().any(|b| *b != 0) {
            return Err(Error::MalformedInput {
                input: input.to_owned(),
                pattern: format!("{} with an id below 2^32", pattern.as_str()),
            });
        }
        let id = u32::from_be_bytes([low[0], low[1], low[2], low[3]]);

        Ok(CommitmentShare {
            id,
            d: point_from_hex::<C>(d)?,
            e: point_from_hex::<C>(e)?,
        })
    }
}

impl_serde_as_string!(CommitmentShare);

/// The secret nonce pair `(d, e)` behind one [`CommitmentShare`].
pub struct SingleUseNonce<C: Curve> {
    d: C::Scalar,
    e: C::Scalar,
}

impl<C: Curve> SingleUseNonce<C> {
    /// Draw a fresh nonce and the commitment share to publish for it.
    pub fn generate(id: u32) -> (Self, CommitmentShare<C>) {
        let nonce = SingleUseNonce {
            d: random_scalar::<C>(),
            e: random_scalar::<C>(),
        };
        let commitment = nonce.commitment(id);
        (nonce, commitment)
    }

    pub fn from_scalars(d: C::Scalar, e: C::Scalar) -> Self {
        SingleUseNonce { d, e }
    }

    pub fn commitment(&self, id: u32) -> CommitmentShare<C> {
        CommitmentShare {
            id,
            d: C::generator() * self.d,
            e: C::generator() * self.e,
        }
    }
}

impl<C: Curve> fmt::Debug for SingleUseNonce<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("SingleUseNonce([redacted])")
    }
}

/// Binding values (one per commitment, in order) and the shared challenge of a signing round.
struct SigningRound<C: Curve> {
    bindings: Vec<C::Scalar>,
    challenge: C::Scalar,
}

impl<C: Curve> SigningRound<C> {
    fn new(message: &str, commitments: &[CommitmentShare<C>]) -> Result<Self> {
        let mut seen = HashSet::with_capacity(commitments.len());
        for commitment in commitments {
            if commitment.id == 0 || !seen.insert(commitment.id) {
                error!(id = commitment.id, "invalid or duplicate signer id");
                return Err(Error::InvalidParticipantId(commitment.id));
            }
        }

        let context: String = commitments.iter().map(|c| c.to_string()).collect();

        let bindings = commitments
            .iter()
            .map(|c| {
                let id = scalar_to_hex::<C>(&scalar_from_u32::<C>(c.id));
                hash_into_scalar::<C>(&format!("{}{}{}", id, message, context))
            })
            .collect::<Result<Vec<_>>>()?;

        let group_commitment = commitments
            .iter()
            .zip(&bindings)
            .fold(C::identity(), |sum, (c, rho)| sum + c.d + c.e * rho);

        let challenge = schnorr::challenge::<C>(&group_commitment, message)?;

        Ok(SigningRound {
            bindings,
            challenge,
        })
    }

    fn binding_for(&self, id: u32, commitments: &[CommitmentShare<C>]) -> Result<C::Scalar> {
        commitments
            .iter()
            .position(|c| c.id == id)
            .map(|index| self.bindings[index])
            .ok_or_else(|| {
                error!(id, "signer has no published commitment");
                Error::InvalidParticipantId(id)
            })
    }

    fn lambda(id: u32, commitments: &[CommitmentShare<C>]) -> Result<C::Scalar> {
        let others: Vec<u32> = commitments
            .iter()
            .map(|c| c.id)
            .filter(|other| *other != id)
            .collect();
        threshold::compute_lambda::<C>(id, &others)
    }
}

/// Produce participant `id`'s partial signature over `message`.
///
/// `commitments` holds the commitment share of every participating signer, this one included,
/// in the same order for every signer. Consumes `nonce`.
pub fn partial_sign<C: Curve>(
    message: &str,
    private_share: &C::Scalar,
    id: u32,
    nonce: SingleUseNonce<C>,
    commitments: &[CommitmentShare<C>],
) -> Result<C::Scalar> {
    let round = SigningRound::new(message, commitments)?;
    let rho = round.binding_for(id, commitments)?;
    let lambda = SigningRound::lambda(id, commitments)?;

    Ok(nonce.d + nonce.e * rho - round.challenge * private_share * lambda)
}

/// Check one participant's partial signature against its public share `private_share·G`.
pub fn verify_partial<C: Curve>(
    message: &str,
    partial: &C::Scalar,
    id: u32,
    public_share: &C::Point,
    commitments: &[CommitmentShare<C>],
) -> Result<bool> {
    let round = SigningRound::new(message, commitments)?;
    let rho = round.binding_for(id, commitments)?;
    let lambda = SigningRound::lambda(id, commitments)?;

    let commitment = commitments
        .iter()
        .find(|c| c.id == id)
        .ok_or(Error::InvalidParticipantId(id))?;

    let expected = commitment.d + commitment.e * rho - *public_share * (round.challenge * lambda);
    Ok(C::generator() * partial == expected)
}

/// Combine the partial signatures of every signer in `commitments` into a Schnorr signature.
pub fn aggregate<C: Curve>(
    message: &str,
    partials: &[C::Scalar],
    commitments: &[CommitmentShare<C>],
) -> Result<Signature<C>> {
    if partials.len() != commitments.len() {
        return Err(Error::MismatchedLength(commitments.len(), partials.len()));
    }
    let round = SigningRound::new(message, commitments)?;

    Ok(Signature {
        e: round.challenge,
        s: partials.iter().sum(),
    })
}
