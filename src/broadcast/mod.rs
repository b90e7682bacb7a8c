//! This module implements the BESTIE broadcast encryption scheme with
//! subset-based revocation.
//!
//! The four algorithms are:
//! - [`setup`]: public parameters and master key for `L`-bit identities,
//! - [`MasterKey::key_gen`]: a secret key for one identity,
//! - [`PublicParameters::encrypt`]: a header for a [`SubsetDescriptor`](crate::SubsetDescriptor),
//! - [`SecretKey::decrypt`]: the message, or [`Error::Revoked`](crate::Error::Revoked).
//!
//! The recovered message is a bare GT element. Nothing in the header
//! authenticates it, so a key used outside its covered set decrypts to an
//! unrelated element rather than failing.

pub mod header;
pub mod master_key;
pub mod public_params;
pub mod secret_key;

use ark_ec::pairing::{Pairing, PairingOutput};
use ark_ec::{AffineRepr, CurveGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, SerializationError};
use ark_std::rand::RngCore;
use ark_std::UniformRand;
use std::ops::Mul;
use tracing::instrument;
use zeroize::Zeroizing;

use crate::config::SetupConfig;
use crate::error::Result;

pub use header::Header;
pub use master_key::MasterKey;
pub use public_params::PublicParameters;
pub use secret_key::SecretKey;

/// Plaintexts are elements of the target group GT.
pub type Message<E> = PairingOutput<E>;

/// Generates public parameters and the master key for identities of
/// `identity_len` bits.
///
/// # Example
///
/// ```rust
/// use ark_std::test_rng;
/// use bestie::broadcast;
///
/// type E = ark_bls12_381::Bls12_381;
///
/// let rng = &mut test_rng();
/// let (pp, mk) = broadcast::setup::<E, _>(rng, 4).unwrap();
/// assert_eq!(pp.identity_len(), 4);
/// assert!(pp.verify_master_key(&mk));
///
/// assert!(broadcast::setup::<E, _>(rng, 0).is_err());
/// ```
pub fn setup<E: Pairing, R: RngCore>(
    rng: &mut R,
    identity_len: usize,
) -> Result<(PublicParameters<E>, MasterKey<E>)> {
    let config = SetupConfig::new(identity_len)?;
    Ok(setup_with_config(rng, &config))
}

/// Same as [`setup`] for an already validated configuration.
#[instrument(level = "debug", skip_all, fields(identity_len = config.identity_len()))]
pub fn setup_with_config<E: Pairing, R: RngCore>(
    rng: &mut R,
    config: &SetupConfig,
) -> (PublicParameters<E>, MasterKey<E>) {
    let l = config.identity_len();
    let g1 = E::G1Affine::generator();
    let g2 = E::G2Affine::generator();

    let alpha = Zeroizing::new(E::ScalarField::rand(rng));

    // g1^s for a fresh s that does not outlive the call
    let mut sample = || -> E::G1 {
        let s = Zeroizing::new(E::ScalarField::rand(rng));
        g1.mul(&*s)
    };

    let h0 = sample().into_affine();
    let helements0 = E::G1::normalize_batch(&(0..l).map(|_| sample()).collect::<Vec<_>>());
    let helements1 = E::G1::normalize_batch(&(0..l).map(|_| sample()).collect::<Vec<_>>());
    let k0 = sample().into_affine();
    let kelements0 = E::G1::normalize_batch(&(0..l).map(|_| sample()).collect::<Vec<_>>());
    let kelements1 = E::G1::normalize_batch(&(0..l).map(|_| sample()).collect::<Vec<_>>());

    let mk = g1.mul(&*alpha).into_affine();
    let omega = E::pairing(g1, g2).mul(&*alpha);

    (
        PublicParameters {
            g1,
            g2,
            h0,
            helements0,
            helements1,
            k0,
            kelements0,
            kelements1,
            omega,
        },
        MasterKey { mk },
    )
}

/// Compressed canonical encoding.
pub(crate) fn to_bytes<T: CanonicalSerialize>(value: &T) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(value.compressed_size());
    value.serialize_compressed(&mut bytes)?;
    Ok(bytes)
}

/// Decodes a compressed canonical encoding, checking group membership of
/// every element and rejecting trailing bytes.
pub(crate) fn from_bytes<T: CanonicalDeserialize>(bytes: &[u8]) -> Result<T> {
    let mut reader = bytes;
    let value = T::deserialize_compressed(&mut reader)?;
    if !reader.is_empty() {
        return Err(SerializationError::InvalidData.into());
    }
    Ok(value)
}
