use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::rand::RngCore;
use ark_std::UniformRand;
use std::ops::Mul;
use tracing::instrument;
use zeroize::{Zeroize, Zeroizing};

use crate::error;
use crate::pattern::Identity;

use super::public_params::PublicParameters;
use super::secret_key::SecretKey;

/// The issuer's master key `mk = g1^alpha`. Zeroized on drop.
#[derive(Clone, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct MasterKey<E: Pairing> {
    pub(crate) mk: E::G1Affine,
}

impl<E: Pairing> MasterKey<E> {
    /// Issue the secret key of identity `id`.
    ///
    /// Every call samples fresh `alpha_omega` and `r`, so two keys for the same
    /// identity are unrelated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ark_std::test_rng;
    /// use bestie::{broadcast, Identity};
    ///
    /// type E = ark_bls12_381::Bls12_381;
    ///
    /// let rng = &mut test_rng();
    /// let (pp, mk) = broadcast::setup::<E, _>(rng, 4).unwrap();
    ///
    /// let id: Identity = "0110".parse().unwrap();
    /// let sk = mk.key_gen(rng, &pp, &id).unwrap();
    /// assert_eq!(sk.identity_len(), 4);
    ///
    /// let short: Identity = "011".parse().unwrap();
    /// assert!(mk.key_gen(rng, &pp, &short).is_err());
    /// ```
    #[instrument(level = "debug", skip_all, fields(identity_len = pp.identity_len()))]
    pub fn key_gen<R: RngCore>(
        &self,
        rng: &mut R,
        pp: &PublicParameters<E>,
        id: &Identity,
    ) -> error::Result<SecretKey<E>> {
        id.ensure_len(pp.identity_len())?;

        let alpha_omega = Zeroizing::new(E::ScalarField::rand(rng));
        let r = Zeroizing::new(E::ScalarField::rand(rng));
        let a = Zeroizing::new(pp.g1.mul(&*alpha_omega));

        // x0 = mk - A + H(ID)^r
        let x0 = (self.mk.into_group() - &*a + pp.identity_aggregate(id).mul(&*r)).into_affine();

        // the complementary branch of each bit, so that a wildcard in CL
        // can be completed to h_{i,0} + h_{i,1}
        let xelements = E::G1::normalize_batch(
            &id.bits()
                .iter()
                .enumerate()
                .map(|(i, b)| pp.h(i, b.flip()).mul(&*r))
                .collect::<Vec<_>>(),
        );

        let y0 = pp.k0.mul(&*r).into_affine();

        let y_odd = E::G1::normalize_batch(
            &id.bits()
                .iter()
                .enumerate()
                .map(|(i, b)| pp.k(i, b.flip()).mul(&*r) + &*a)
                .collect::<Vec<_>>(),
        );
        let y_even = E::G1::normalize_batch(
            &id.bits()
                .iter()
                .enumerate()
                .map(|(i, b)| pp.k(i, *b).mul(&*r))
                .collect::<Vec<_>>(),
        );

        let z = pp.g2.mul(&*r).into_affine();

        Ok(SecretKey {
            x0,
            xelements,
            y0,
            y_odd,
            y_even,
            z,
        })
    }

    pub fn to_bytes(&self) -> error::Result<Vec<u8>> {
        super::to_bytes(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> error::Result<Self> {
        super::from_bytes(bytes)
    }
}

impl<E: Pairing> Drop for MasterKey<E> {
    fn drop(&mut self) {
        self.mk.zeroize();
    }
}
