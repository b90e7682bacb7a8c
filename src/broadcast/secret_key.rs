use ark_ec::pairing::Pairing;
use ark_ec::AffineRepr;
use ark_ff::Field;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, SerializationError};
use std::ops::Mul;
use tracing::{debug, instrument};
use zeroize::Zeroize;

use crate::error::{self, BackendError, Error};
use crate::pattern::{Identity, SubsetDescriptor};

use super::header::Header;
use super::Message;

/// The secret key of one identity, issued by [`MasterKey::key_gen`](super::MasterKey::key_gen).
///
/// A key is only meaningful together with the identity it was issued for.
/// Zeroized on drop.
#[derive(Clone, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct SecretKey<E: Pairing> {
    pub(crate) x0: E::G1Affine,
    pub(crate) xelements: Vec<E::G1Affine>,
    pub(crate) y0: E::G1Affine,
    pub(crate) y_odd: Vec<E::G1Affine>,
    pub(crate) y_even: Vec<E::G1Affine>,
    pub(crate) z: E::G2Affine,
}

impl<E: Pairing> SecretKey<E> {
    pub fn identity_len(&self) -> usize {
        self.xelements.len()
    }

    /// Recover the message of a header encrypted under `subset`.
    ///
    /// `id` must be the identity this key was issued for. Fails with
    /// [`Error::Revoked`] when `id` equals the revoked list on every fixed
    /// position. If `id` is not covered by the covered list the result is an
    /// unrelated GT element; the scheme has no integrity check.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ark_std::test_rng;
    /// use bestie::{broadcast, Identity, SubsetDescriptor};
    ///
    /// type E = ark_bls12_381::Bls12_381;
    ///
    /// let rng = &mut test_rng();
    /// let (pp, mk) = broadcast::setup::<E, _>(rng, 8).unwrap();
    ///
    /// let id: Identity = "00000110".parse().unwrap();
    /// let sk = mk.key_gen(rng, &pp, &id).unwrap();
    ///
    /// let subset = SubsetDescriptor::parse("*******0", "*******0").unwrap();
    /// let m = pp.random_message(rng);
    /// let hdr = pp.encrypt(rng, &subset, m).unwrap();
    /// assert!(sk.decrypt(&subset, &id, &hdr).unwrap_err().is_revoked());
    /// ```
    #[instrument(
        level = "debug",
        skip_all,
        fields(identity_len = self.identity_len(), d = tracing::field::Empty)
    )]
    pub fn decrypt(
        &self,
        subset: &SubsetDescriptor,
        id: &Identity,
        header: &Header<E>,
    ) -> error::Result<Message<E>> {
        subset.ensure_len(self.identity_len())?;
        let coverage = subset.coverage(id)?;

        let d = coverage.d();
        tracing::Span::current().record("d", d);
        if coverage.is_revoked() {
            debug!("identity matches every fixed position of the revoked list");
            return Err(Error::Revoked);
        }
        let d_inv = E::ScalarField::from(d as u64)
            .inverse()
            .ok_or(BackendError::NonInvertible(d as u64))?;

        // x' = x0 + sum of x_i over the wildcard positions of CL
        let x = subset
            .covered()
            .symbols()
            .iter()
            .zip(&self.xelements)
            .filter(|(s, _)| s.is_wildcard())
            .fold(self.x0.into_group(), |acc, (_, x)| acc + *x);

        // y' = (y0 + sum_P y_odd + sum_Q y_even) / d
        let y = coverage
            .p
            .iter()
            .map(|&i| self.y_odd[i])
            .chain(coverage.q.iter().map(|&i| self.y_even[i]))
            .fold(self.y0.into_group(), |acc, y| acc + y)
            .mul(d_inv);

        let c3 = header.c3.mul(d_inv);

        // c0 * e(x' + y', c1)^-1 * e(c2 + c3 / d, z)
        let blinding = E::multi_pairing(
            [-(x + y), header.c2.into_group() + c3],
            [header.c1, self.z],
        );
        Ok(header.c0 + blinding)
    }

    pub fn to_bytes(&self) -> error::Result<Vec<u8>> {
        super::to_bytes(self)
    }

    /// Decodes a key, rejecting points outside their groups and per-position
    /// vectors of unequal length.
    pub fn from_bytes(bytes: &[u8]) -> error::Result<Self> {
        let sk: Self = super::from_bytes(bytes)?;
        let l = sk.identity_len();
        if l == 0 || sk.y_odd.len() != l || sk.y_even.len() != l {
            return Err(SerializationError::InvalidData.into());
        }
        Ok(sk)
    }
}

impl<E: Pairing> Drop for SecretKey<E> {
    fn drop(&mut self) {
        self.x0.zeroize();
        self.xelements.zeroize();
        self.y0.zeroize();
        self.y_odd.zeroize();
        self.y_even.zeroize();
        self.z.zeroize();
    }
}
