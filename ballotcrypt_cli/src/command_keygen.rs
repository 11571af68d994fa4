use ballotcrypt::{point_to_hex, scalar_to_hex, Curve, KeyPair};

pub fn command_keygen<C: Curve>() {
    let keypair = KeyPair::<C>::random();

    println!("curve: {}", C::NAME);
    println!("secret-key: {}", scalar_to_hex::<C>(&keypair.secret));
    println!("public-key: {}", point_to_hex::<C>(&keypair.public));
}
