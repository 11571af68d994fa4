use ballotcrypt::{Curve, CurveName, Secp256k1, Secp256r1, Secp384r1, Secp521r1};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use num_enum::TryFromPrimitive;
use std::convert::TryFrom;
use std::fmt::Display;
use tracing_subscriber::EnvFilter;

mod command_encrypt;
mod command_keygen;
mod command_seal;
mod command_sign;

pub use command_encrypt::*;
pub use command_keygen::*;
pub use command_seal::*;
pub use command_sign::*;

#[derive(TryFromPrimitive, PartialEq, Copy, Clone, Debug)]
#[repr(u8)]
enum Verbosity {
    Warn = 0,
    Info = 1,
    Debug = 2,
    Trace = 3,
}

impl Verbosity {
    fn filter(self) -> &'static str {
        match self {
            Verbosity::Warn => "warn",
            Verbosity::Info => "info",
            Verbosity::Debug => "debug",
            Verbosity::Trace => "trace",
        }
    }
}

/// Run a generic command with the curve selected at runtime.
macro_rules! with_curve {
    ($curve:expr, $command:ident($($arg:expr),*)) => {
        match $curve {
            CurveName::Secp256k1 => $command::<Secp256k1>($($arg),*),
            CurveName::Secp256r1 => $command::<Secp256r1>($($arg),*),
            CurveName::Secp384r1 => $command::<Secp384r1>($($arg),*),
            CurveName::Secp521r1 => $command::<Secp521r1>($($arg),*),
        }
    };
}

fn main() {
    let matches = App::new("BallotCrypt CLI")
        .version("0.1")
        .author("Patrick Hayes <patrick.d.hayes@gmail.com>")
        .about("Elliptic-curve tooling for verifiable voting")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("curve")
                .long("curve")
                .takes_value(true)
                .help("Curve to use - can also be set with BALLOTCRYPT_CURVE (default secp256k1)"),
        )
        .arg(
            Arg::with_name("secret-key")
                .long("secret-key")
                .takes_value(true)
                .help("Hex secret key - can also be set with BALLOTCRYPT_SECRET_KEY"),
        )
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .help("Sets the level of verbosity"),
        )
        .subcommand(SubCommand::with_name("keygen").about("Generate a keypair"))
        .subcommand(
            SubCommand::with_name("encrypt")
                .about("Encode text as points and encrypt them with ElGamal")
                .arg(
                    Arg::with_name("PUBLIC-KEY")
                        .index(1)
                        .required(true)
                        .help("Hex encryption key"),
                )
                .arg(
                    Arg::with_name("MESSAGE")
                        .index(2)
                        .required(true)
                        .help("Text to encrypt"),
                ),
        )
        .subcommand(
            SubCommand::with_name("decrypt")
                .about("Decrypt the output of encrypt with the secret key")
                .arg(
                    Arg::with_name("INPUT")
                        .index(1)
                        .required(true)
                        .help("JSON file produced by encrypt"),
                ),
        )
        .subcommand(
            SubCommand::with_name("sign")
                .about("Schnorr-sign a message with the secret key")
                .arg(
                    Arg::with_name("MESSAGE")
                        .index(1)
                        .required(true)
                        .help("Message to sign"),
                ),
        )
        .subcommand(
            SubCommand::with_name("verify")
                .about("Verify a Schnorr signature")
                .arg(Arg::with_name("PUBLIC-KEY").index(1).required(true))
                .arg(Arg::with_name("MESSAGE").index(2).required(true))
                .arg(Arg::with_name("SIGNATURE").index(3).required(true)),
        )
        .subcommand(
            SubCommand::with_name("seal")
                .about("Encrypt a message for a public key with ECDH and AES-GCM")
                .arg(Arg::with_name("PUBLIC-KEY").index(1).required(true))
                .arg(Arg::with_name("MESSAGE").index(2).required(true)),
        )
        .subcommand(
            SubCommand::with_name("open")
                .about("Decrypt the output of seal with the secret key")
                .arg(
                    Arg::with_name("INPUT")
                        .index(1)
                        .required(true)
                        .help("JSON file produced by seal"),
                ),
        )
        .get_matches();

    let verbosity = Verbosity::try_from(matches.occurrences_of("v").min(3) as u8)
        .unwrap_or(Verbosity::Trace);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Gets the curve if supplied by user, or from the environment, or defaults to secp256k1
    let env_var = std::env::var("BALLOTCRYPT_CURVE");
    let curve_name = match matches.value_of("curve") {
        Some(curve) => curve,
        None => env_var.as_deref().unwrap_or("secp256k1"),
    };
    let curve = ballotcrypt::curve(curve_name).unwrap_or_else(|e| exit_with("ballotcrypt", e));
    tracing::info!(curve = %curve, "selected curve");

    let env_var = std::env::var("BALLOTCRYPT_SECRET_KEY");
    let secret_key = match matches.value_of("secret-key") {
        Some(secret_key) => Some(secret_key.to_owned()),
        None => env_var.ok(),
    };
    let secret_key = secret_key.as_deref();

    // Subcommands
    match matches.subcommand() {
        ("keygen", Some(_)) => with_curve!(curve, command_keygen()),
        ("encrypt", Some(matches)) => with_curve!(curve, command_encrypt(matches)),
        ("decrypt", Some(matches)) => with_curve!(curve, command_decrypt(matches, secret_key)),
        ("sign", Some(matches)) => with_curve!(curve, command_sign(matches, secret_key)),
        ("verify", Some(matches)) => with_curve!(curve, command_verify(matches)),
        ("seal", Some(matches)) => with_curve!(curve, command_seal(matches)),
        ("open", Some(matches)) => with_curve!(curve, command_open(matches, secret_key)),
        _ => {}
    }
}

/// Print an error for `command` and exit
pub fn exit_with<E: Display>(command: &str, e: E) -> ! {
    eprintln!("{}: {}", command, e);
    std::process::exit(1);
}

/// Expand `~` and environment variables in a path argument
pub fn expand(input: &str) -> String {
    shellexpand::full(input)
        .map(|expanded| expanded.into_owned())
        .unwrap_or_else(|_| input.to_owned())
}

/// Read the secret key, exiting if it is missing or malformed
pub fn secret_key<C: Curve>(command: &str, secret_key: Option<&str>) -> C::Scalar {
    let secret_key = secret_key.unwrap_or_else(|| {
        exit_with(
            command,
            "secret key required, use --secret-key or BALLOTCRYPT_SECRET_KEY",
        )
    });
    ballotcrypt::scalar_from_hex::<C>(secret_key).unwrap_or_else(|e| exit_with(command, e))
}

/// Read a positional argument, exiting if it is missing
pub fn required<'a>(command: &str, matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .value_of(name)
        .unwrap_or_else(|| exit_with(command, format!("{} required", name)))
}

/// Read a file named by a positional argument
pub fn read_input(command: &str, matches: &ArgMatches) -> String {
    let filename = expand(required(command, matches, "INPUT"));
    std::fs::read_to_string(&filename)
        .unwrap_or_else(|e| exit_with(command, format!("unable to read {}: {}", filename, e)))
}
