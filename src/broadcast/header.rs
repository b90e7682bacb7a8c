use ark_ec::pairing::Pairing;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use crate::error;

use super::Message;

/// The ciphertext header `(c0, c1, c2, c3)`.
///
/// - `c0 = omega^t * m`
/// - `c1 = g2^t`
/// - `c2 = H(CL)^t`
/// - `c3 = K(RL)^t`
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Header<E: Pairing> {
    pub c0: Message<E>,
    pub c1: E::G2Affine,
    pub c2: E::G1Affine,
    pub c3: E::G1Affine,
}

impl<E: Pairing> Header<E> {
    pub fn to_bytes(&self) -> error::Result<Vec<u8>> {
        super::to_bytes(self)
    }

    /// Decodes a header, rejecting elements outside their groups.
    pub fn from_bytes(bytes: &[u8]) -> error::Result<Self> {
        super::from_bytes(bytes)
    }
}
