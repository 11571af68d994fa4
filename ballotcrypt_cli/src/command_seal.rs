use ballotcrypt::symmetric::{self, Ciphertext};
use ballotcrypt::{point_from_hex, Curve};

pub fn command_seal<C: Curve>(matches: &clap::ArgMatches) {
    let public_key = point_from_hex::<C>(crate::required("ballotcrypt seal", matches, "PUBLIC-KEY"))
        .unwrap_or_else(|e| crate::exit_with("ballotcrypt seal", e));
    let message = crate::required("ballotcrypt seal", matches, "MESSAGE");

    let json = symmetric::encrypt::<C>(message.as_bytes(), &public_key)
        .and_then(|sealed| sealed.to_json())
        .unwrap_or_else(|e| crate::exit_with("ballotcrypt seal", e));

    println!("{}", json);
}

pub fn command_open<C: Curve>(matches: &clap::ArgMatches, secret_key: Option<&str>) {
    let secret_key = crate::secret_key::<C>("ballotcrypt open", secret_key);
    let input = crate::read_input("ballotcrypt open", matches);

    let opened = Ciphertext::from_json(&input)
        .and_then(|sealed| symmetric::decrypt::<C>(&sealed, &secret_key))
        .unwrap_or_else(|e| crate::exit_with("ballotcrypt open", e));

    match String::from_utf8(opened) {
        Ok(message) => println!("{}", message),
        Err(e) => println!("{}", hex::encode(e.into_bytes())),
    }
}
