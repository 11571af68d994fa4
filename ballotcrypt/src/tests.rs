use super::*;
use crate::threshold::Polynomial;

struct Trustee<C: Curve> {
    id: u32,
    polynomial: Polynomial<C>,
    share: C::Scalar,
}

fn end_to_end_election<C: Curve>() {
    // Three trustees, any two of which can decrypt and sign
    let mut trustees: Vec<Trustee<C>> = (1..=3u32)
        .map(|id| Trustee {
            id,
            polynomial: Polynomial::random(1),
            share: C::Scalar::ZERO,
        })
        .collect();

    // Every trustee deals a share to every other trustee, who checks it against the dealer's
    // public coefficients before adding it to its own
    for receiver in 0..trustees.len() {
        let id = trustees[receiver].id;
        let mut combined = C::Scalar::ZERO;
        for dealer in &trustees {
            let share = dealer.polynomial.share_for(id);
            assert!(threshold::verify_share::<C>(
                &share,
                id,
                &dealer.polynomial.public_coefficients()
            ));
            combined += share;
        }
        trustees[receiver].share = combined;
    }

    let public_keys: Vec<C::Point> = trustees
        .iter()
        .map(|t| t.polynomial.public_coefficients()[0])
        .collect();
    let higher: Vec<Vec<C::Point>> = trustees
        .iter()
        .map(|t| t.polynomial.public_coefficients()[1..].to_vec())
        .collect();
    let election_key: C::Point = public_keys.iter().sum();

    for trustee in &trustees {
        assert_eq!(
            threshold::compute_public_share::<C>(trustee.id, &public_keys, &higher).unwrap(),
            C::generator() * trustee.share
        );
    }

    // Publish the election key
    let election_key_hex = point_to_hex::<C>(&election_key);
    let election_key = point_from_hex::<C>(&election_key_hex).unwrap();

    // The voter encodes and encrypts the vote
    let vote = "Jane Doe";
    let points = encoder::encode_text::<C>(vote).unwrap();
    assert_eq!(points.len(), encoder::points_needed::<C>(vote.len()));

    let voter_randomness = random_scalar::<C>();
    let voter_cryptogram =
        elgamal::encrypt::<C>(&points[0], &election_key, Some(&voter_randomness));

    // The voter proves knowledge of the randomness behind the cryptogram
    let proof = discrete_log::prove::<C>(&voter_randomness, "vote", &[], None).unwrap();
    assert!(
        discrete_log::is_valid::<C>(&proof, "vote", &[], &[], &voter_cryptogram.r).unwrap()
    );

    // The voter commits to the randomness and seals the opening for an auditor
    let commitment = pedersen::commit::<C>(&[voter_randomness], "audit", None).unwrap();
    let public_commitment: pedersen::Commitment<C> =
        commitment.public().to_string().parse().unwrap();
    assert!(!public_commitment.is_openable());

    let auditor = KeyPair::<C>::random();
    let opening = scalar_to_hex::<C>(commitment.opening().unwrap());
    let sealed = symmetric::encrypt::<C>(opening.as_bytes(), &auditor.public)
        .unwrap()
        .to_json()
        .unwrap();

    // The board contributes its own randomness
    let board_randomness = random_scalar::<C>();
    let board_cryptogram =
        elgamal::encrypt_empty::<C>(&election_key, Some(&board_randomness));
    let cryptogram = elgamal::homomorphically_add::<C>(&[voter_cryptogram, board_cryptogram]);
    assert_eq!(
        cryptogram,
        elgamal::encrypt::<C>(
            &points[0],
            &election_key,
            Some(&(voter_randomness + board_randomness))
        )
    );

    // Trustees 1 and 3 sign a receipt for the stored cryptogram
    let signers = [&trustees[0], &trustees[2]];
    let receipt = cryptogram.to_string();

    let (nonces, commitments): (Vec<_>, Vec<_>) = signers
        .iter()
        .map(|t| frost::SingleUseNonce::<C>::generate(t.id))
        .unzip();
    let partials: Vec<C::Scalar> = signers
        .iter()
        .zip(nonces)
        .map(|(t, nonce)| {
            frost::partial_sign::<C>(&receipt, &t.share, t.id, nonce, &commitments).unwrap()
        })
        .collect();
    let signature = frost::aggregate::<C>(&receipt, &partials, &commitments).unwrap();
    let signature: schnorr::Signature<C> = signature.to_string().parse().unwrap();
    assert!(schnorr::is_valid::<C>(&signature, &receipt, &election_key));

    // Voting is over
    // ----------------

    // The auditor opens the sealed commitment
    let sealed = symmetric::Ciphertext::from_json(&sealed).unwrap();
    let opened = symmetric::decrypt::<C>(&sealed, &auditor.secret).unwrap();
    let opened = scalar_from_hex::<C>(std::str::from_utf8(&opened).unwrap()).unwrap();
    let reopened = pedersen::Commitment {
        c: public_commitment.c,
        r: Some(opened),
    };
    assert!(pedersen::is_valid::<C>(&reopened, &[voter_randomness], "audit").unwrap());

    // Trustees 1 and 3 publish partial decryptions
    let ids: Vec<u32> = signers.iter().map(|t| t.id).collect();
    let combined: C::Point = signers
        .iter()
        .map(|t| {
            let others: Vec<u32> = ids.iter().copied().filter(|id| *id != t.id).collect();
            let lambda = threshold::compute_lambda::<C>(t.id, &others).unwrap();
            cryptogram.r * t.share * lambda
        })
        .sum();
    let decrypted = cryptogram.c - combined;
    assert_eq!(encoder::decode_text::<C>(&[decrypted], vote.len()).unwrap(), vote);

    // The same two shares recover the joint secret
    let election_secret = threshold::recover_secret::<C>(
        &signers.iter().map(|t| (t.id, t.share)).collect::<Vec<_>>(),
    )
    .unwrap();
    assert_eq!(C::generator() * election_secret, election_key);
    assert_eq!(elgamal::decrypt::<C>(&cryptogram, &election_secret), points[0]);
}

#[test]
fn end_to_end_secp256k1() {
    end_to_end_election::<Secp256k1>();
}

#[test]
fn end_to_end_secp256r1() {
    end_to_end_election::<Secp256r1>();
}

#[test]
fn end_to_end_secp384r1() {
    end_to_end_election::<Secp384r1>();
}

#[test]
fn end_to_end_secp521r1() {
    end_to_end_election::<Secp521r1>();
}
