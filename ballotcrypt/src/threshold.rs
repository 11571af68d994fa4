//! Shamir secret sharing over the scalar field.
//!
//! Each dealer in a key ceremony holds a secret [`Polynomial`] whose constant term is its
//! contribution to the joint secret, and publishes the matching coefficient points. Participant
//! `id` receives `f(id)` from every dealer; the public coefficients let anyone compute the public
//! counterpart of that share without learning it. Any `degree + 1` shares recombine at zero with
//! the Lagrange coefficients from [`compute_lambda`].

use crate::*;
use tracing::error;

/// A secret polynomial `f(x) = Σ cᵢ·xⁱ`, with the public point of each coefficient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial<C: Curve> {
    coefficients: Vec<KeyPair<C>>,
}

impl<C: Curve> Polynomial<C> {
    pub fn new(coefficients: Vec<KeyPair<C>>) -> Self {
        Polynomial { coefficients }
    }

    /// Random polynomial of the given degree. Any `degree + 1` shares recover its secret.
    pub fn random(degree: usize) -> Self {
        Polynomial {
            coefficients: (0..=degree).map(|_| KeyPair::random()).collect(),
        }
    }

    /// Coefficient count minus one
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn coefficients(&self) -> &[KeyPair<C>] {
        &self.coefficients
    }

    /// The constant term, this polynomial's contribution to the shared secret.
    pub fn secret(&self) -> C::Scalar {
        self.coefficients
            .first()
            .map(|c| c.secret)
            .unwrap_or(C::Scalar::ZERO)
    }

    /// The public point of each coefficient, in order.
    pub fn public_coefficients(&self) -> Vec<C::Point> {
        self.coefficients.iter().map(|c| c.public).collect()
    }

    /// `Σ cᵢ·xⁱ mod order`
    pub fn evaluate_at(&self, x: &C::Scalar) -> C::Scalar {
        self.coefficients
            .iter()
            .rev()
            .fold(C::Scalar::ZERO, |acc, coefficient| acc * x + coefficient.secret)
    }

    /// The secret share for participant `id`
    pub fn share_for(&self, id: u32) -> C::Scalar {
        self.evaluate_at(&scalar_from_u32::<C>(id))
    }
}

/// Evaluate a public polynomial `Σ Cᵢ·xⁱ` given its coefficient points.
pub fn evaluate_public<C: Curve>(coefficient_points: &[C::Point], x: &C::Scalar) -> C::Point {
    coefficient_points
        .iter()
        .rev()
        .fold(C::identity(), |acc, coefficient| acc * x + coefficient)
}

/// The public counterpart of participant `id`'s combined share.
///
/// `public_keys[j]` is dealer `j`'s constant-term point and `coefficient_points[j]` its
/// remaining coefficient points, starting at degree one.
pub fn compute_public_share<C: Curve>(
    id: u32,
    public_keys: &[C::Point],
    coefficient_points: &[Vec<C::Point>],
) -> Result<C::Point> {
    if public_keys.len() != coefficient_points.len() {
        error!(
            public_keys = public_keys.len(),
            coefficients = coefficient_points.len(),
            "each dealer needs a public key and coefficients"
        );
        return Err(Error::MismatchedLength(public_keys.len(), coefficient_points.len()));
    }

    let x = scalar_from_u32::<C>(id);
    Ok(public_keys
        .iter()
        .zip(coefficient_points)
        .fold(C::identity(), |sum, (public_key, higher)| {
            sum + *public_key + evaluate_public::<C>(higher, &x) * x
        }))
}

/// Check a secret share received from a dealer against the dealer's public coefficients.
pub fn verify_share<C: Curve>(share: &C::Scalar, id: u32, coefficient_points: &[C::Point]) -> bool {
    C::generator() * share == evaluate_public::<C>(coefficient_points, &scalar_from_u32::<C>(id))
}

/// Lagrange coefficient at zero for `id` among `other_ids`: `Π j / (j − id)`.
pub fn compute_lambda<C: Curve>(id: u32, other_ids: &[u32]) -> Result<C::Scalar> {
    if id == 0 {
        return Err(Error::InvalidParticipantId(id));
    }

    let x = scalar_from_u32::<C>(id);
    let mut numerator = C::Scalar::ONE;
    let mut denominator = C::Scalar::ONE;

    for &other in other_ids {
        if other == id || other == 0 {
            error!(id, other, "participant ids must be distinct and non-zero");
            return Err(Error::InvalidParticipantId(other));
        }
        let j = scalar_from_u32::<C>(other);
        numerator *= j;
        denominator *= j - x;
    }

    let inverse: Option<C::Scalar> = denominator.invert().into();
    inverse
        .map(|inverse| numerator * inverse)
        .ok_or(Error::InvalidParticipantId(id))
}

/// Recover the shared secret from `(id, share)` pairs by interpolating at zero.
pub fn recover_secret<C: Curve>(shares: &[(u32, C::Scalar)]) -> Result<C::Scalar> {
    let ids: Vec<u32> = shares.iter().map(|(id, _)| *id).collect();

    let mut secret = C::Scalar::ZERO;
    for (id, share) in shares {
        let others: Vec<u32> = ids.iter().copied().filter(|other| other != id).collect();
        if others.len() + 1 != ids.len() {
            return Err(Error::InvalidParticipantId(*id));
        }
        secret += compute_lambda::<C>(*id, &others)? * share;
    }

    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    type Scalar = <Secp256k1 as Curve>::Scalar;

    #[test]
    fn test_lambda_vector() {
        let lambda = compute_lambda::<Secp256k1>(10, &[26, 8]).unwrap();
        assert_eq!(
            scalar_to_hex::<Secp256k1>(&lambda),
            "7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b209a"
        );
    }

    #[test]
    fn test_lambda_errors() {
        assert!(matches!(
            compute_lambda::<Secp256k1>(3, &[1, 3]),
            Err(Error::InvalidParticipantId(3))
        ));
        assert!(matches!(
            compute_lambda::<Secp256k1>(0, &[1]),
            Err(Error::InvalidParticipantId(0))
        ));
        assert_eq!(compute_lambda::<Secp256k1>(4, &[]).unwrap(), Scalar::ONE);
    }

    #[test]
    fn test_evaluate_at() {
        // f(x) = 3 + 2x + x²
        let polynomial = Polynomial::<Secp256k1>::new(
            [3u64, 2, 1]
                .iter()
                .map(|c| KeyPair::from_secret(Scalar::from(*c)))
                .collect(),
        );
        assert_eq!(polynomial.degree(), 2);
        assert_eq!(polynomial.secret(), Scalar::from(3u64));
        assert_eq!(polynomial.evaluate_at(&Scalar::from(0u64)), Scalar::from(3u64));
        assert_eq!(polynomial.share_for(5), Scalar::from(38u64));

        // Public evaluation agrees with the secret one
        assert_eq!(
            evaluate_public::<Secp256k1>(&polynomial.public_coefficients(), &Scalar::from(5u64)),
            Secp256k1::generator() * Scalar::from(38u64)
        );
    }

    fn sharing<C: Curve>() {
        let polynomial = Polynomial::<C>::random(2);
        let coefficients = polynomial.public_coefficients();

        let shares: Vec<(u32, C::Scalar)> = [1u32, 2, 3, 4, 5]
            .iter()
            .map(|id| (*id, polynomial.share_for(*id)))
            .collect();

        for (id, share) in &shares {
            assert!(verify_share::<C>(share, *id, &coefficients));
        }
        assert!(!verify_share::<C>(&shares[0].1, 2, &coefficients));

        // Any three shares recover the secret, two do not
        assert_eq!(recover_secret::<C>(&shares[..3]).unwrap(), polynomial.secret());
        assert_eq!(recover_secret::<C>(&shares[2..]).unwrap(), polynomial.secret());
        assert_ne!(recover_secret::<C>(&shares[..2]).unwrap(), polynomial.secret());
    }

    #[test]
    fn test_sharing() {
        sharing::<Secp256k1>();
        sharing::<Secp256r1>();
        sharing::<Secp384r1>();
        sharing::<Secp521r1>();
    }

    #[test]
    fn test_public_share_from_several_dealers() {
        let dealers: Vec<Polynomial<Secp256r1>> = (0..3).map(|_| Polynomial::random(1)).collect();
        let public_keys: Vec<_> = dealers.iter().map(|d| d.public_coefficients()[0]).collect();
        let higher: Vec<Vec<_>> = dealers
            .iter()
            .map(|d| d.public_coefficients()[1..].to_vec())
            .collect();

        for id in 1..=3u32 {
            let combined: <Secp256r1 as Curve>::Scalar =
                dealers.iter().map(|d| d.share_for(id)).sum();
            assert_eq!(
                compute_public_share::<Secp256r1>(id, &public_keys, &higher).unwrap(),
                Secp256r1::generator() * combined
            );
        }

        assert!(matches!(
            compute_public_share::<Secp256r1>(1, &public_keys[..2], &higher),
            Err(Error::MismatchedLength(2, 3))
        ));
    }
}
