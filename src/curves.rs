//! Concrete pairing backends, selected by Cargo feature.
//!
//! The protocol in [`crate::broadcast`] is generic over
//! [`ark_ec::pairing::Pairing`]; these aliases only save downstream crates a
//! direct dependency on the curve crates.

#[cfg(feature = "bls12-381")]
pub use ark_bls12_381::Bls12_381;

#[cfg(feature = "bn254")]
pub use ark_bn254::Bn254;
