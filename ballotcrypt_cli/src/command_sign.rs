use ballotcrypt::schnorr::{self, Signature};
use ballotcrypt::{point_from_hex, Curve, KeyPair};

pub fn command_sign<C: Curve>(matches: &clap::ArgMatches, secret_key: Option<&str>) {
    let keypair = KeyPair::<C>::from_secret(crate::secret_key::<C>("ballotcrypt sign", secret_key));
    let message = crate::required("ballotcrypt sign", matches, "MESSAGE");

    let signature = schnorr::sign_with_keypair::<C>(message, &keypair)
        .unwrap_or_else(|e| crate::exit_with("ballotcrypt sign", e));

    println!("{}", signature);
}

pub fn command_verify<C: Curve>(matches: &clap::ArgMatches) {
    let public_key = point_from_hex::<C>(crate::required("ballotcrypt verify", matches, "PUBLIC-KEY"))
        .unwrap_or_else(|e| crate::exit_with("ballotcrypt verify", e));
    let message = crate::required("ballotcrypt verify", matches, "MESSAGE");
    let signature: Signature<C> = crate::required("ballotcrypt verify", matches, "SIGNATURE")
        .parse()
        .unwrap_or_else(|e| crate::exit_with("ballotcrypt verify", e));

    if schnorr::is_valid::<C>(&signature, message, &public_key) {
        println!("> Signature verified OK");
    } else {
        crate::exit_with("ballotcrypt verify", "invalid signature");
    }
}
