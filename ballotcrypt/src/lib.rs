//! Elliptic-curve primitives for an end-to-end verifiable voting client.
//!
//! Every scheme is generic over a [`Curve`]: one of [`Secp256k1`], [`Secp256r1`],
//! [`Secp384r1`] or [`Secp521r1`]. Values cross the wire as lowercase hex strings, see
//! [`scalar_to_hex`] and [`point_to_hex`].

#[macro_use]
extern crate serde;

#[macro_use]
mod serde_hex;

mod codec;
mod curve;
mod error;
mod keypair;

pub mod discrete_log;
pub mod elgamal;
pub mod encoder;
pub mod frost;
pub mod pedersen;
pub mod schnorr;
pub mod symmetric;
pub mod threshold;

pub use codec::*;
pub use curve::*;
pub use error::*;
pub use keypair::*;

pub use elliptic_curve::ff::{Field, PrimeField};
pub use elliptic_curve::group::Group;

#[cfg(test)]
mod tests;
