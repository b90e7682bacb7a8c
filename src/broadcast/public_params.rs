use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, SerializationError};
use ark_std::rand::RngCore;
use ark_std::UniformRand;
use std::ops::Mul;
use tracing::instrument;
use zeroize::Zeroizing;

use crate::error;
use crate::pattern::{Bit, Identity, Pattern, SubsetDescriptor, Symbol};

use super::header::Header;
use super::master_key::MasterKey;
use super::Message;

/// The public parameters produced by [`setup`](super::setup).
///
/// Every per-position vector has exactly `L` entries, index-aligned with the
/// identity and pattern strings.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct PublicParameters<E: Pairing> {
    pub(crate) g1: E::G1Affine,
    pub(crate) g2: E::G2Affine,
    pub(crate) h0: E::G1Affine,
    pub(crate) helements0: Vec<E::G1Affine>,
    pub(crate) helements1: Vec<E::G1Affine>,
    pub(crate) k0: E::G1Affine,
    pub(crate) kelements0: Vec<E::G1Affine>,
    pub(crate) kelements1: Vec<E::G1Affine>,
    pub(crate) omega: Message<E>,
}

impl<E: Pairing> PublicParameters<E> {
    /// Bit length `L` of the identities this system supports.
    pub fn identity_len(&self) -> usize {
        self.helements0.len()
    }

    pub fn g1(&self) -> E::G1Affine {
        self.g1
    }

    pub fn g2(&self) -> E::G2Affine {
        self.g2
    }

    /// `e(g1, g2)^alpha`.
    pub fn omega(&self) -> Message<E> {
        self.omega
    }

    /// Encrypt `message` for the identities covered by `subset` and not revoked by it.
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
    /// let (pp, mk) = broadcast::setup::<E, _>(rng, 4).unwrap();
    ///
    /// let id: Identity = "0110".parse().unwrap();
    /// let sk = mk.key_gen(rng, &pp, &id).unwrap();
    ///
    /// let subset = SubsetDescriptor::parse("***0", "*100").unwrap();
    /// let m = pp.random_message(rng);
    /// let hdr = pp.encrypt(rng, &subset, m).unwrap();
    ///
    /// assert_eq!(sk.decrypt(&subset, &id, &hdr).unwrap(), m);
    /// ```
    #[instrument(level = "debug", skip_all, fields(identity_len = self.identity_len()))]
    pub fn encrypt<R: RngCore>(
        &self,
        rng: &mut R,
        subset: &SubsetDescriptor,
        message: Message<E>,
    ) -> error::Result<Header<E>> {
        subset.ensure_len(self.identity_len())?;

        let t = Zeroizing::new(E::ScalarField::rand(rng));

        let c0 = self.omega.mul(&*t) + message;
        let c1 = self.g2.mul(&*t).into_affine();
        let c2 = self.covered_aggregate(subset.covered()).mul(&*t).into_affine();
        let c3 = self.revoked_aggregate(subset.revoked()).mul(&*t).into_affine();

        Ok(Header { c0, c1, c2, c3 })
    }

    /// A uniformly random GT element `e(g1^a, g2^b)`, suitable as a message or
    /// as key material for a caller-side symmetric layer.
    pub fn random_message<R: RngCore>(&self, rng: &mut R) -> Message<E> {
        let a = Zeroizing::new(E::ScalarField::rand(rng));
        let b = Zeroizing::new(E::ScalarField::rand(rng));
        E::pairing(self.g1.mul(&*a), self.g2.mul(&*b))
    }

    /// Checks `e(mk, g2) == omega`, i.e. that `mk` belongs to these parameters.
    pub fn verify_master_key(&self, mk: &MasterKey<E>) -> bool {
        E::pairing(mk.mk, self.g2) == self.omega
    }

    pub fn to_bytes(&self) -> error::Result<Vec<u8>> {
        super::to_bytes(self)
    }

    /// Decodes parameters, rejecting points outside their groups and
    /// per-position vectors of unequal length.
    pub fn from_bytes(bytes: &[u8]) -> error::Result<Self> {
        let pp: Self = super::from_bytes(bytes)?;
        let l = pp.identity_len();
        if l == 0
            || pp.helements1.len() != l
            || pp.kelements0.len() != l
            || pp.kelements1.len() != l
        {
            return Err(SerializationError::InvalidData.into());
        }
        Ok(pp)
    }

    /// `h_{i,b}`.
    pub(crate) fn h(&self, i: usize, b: Bit) -> E::G1Affine {
        match b {
            Bit::Zero => self.helements0[i],
            Bit::One => self.helements1[i],
        }
    }

    /// `k_{i,b}`.
    pub(crate) fn k(&self, i: usize, b: Bit) -> E::G1Affine {
        match b {
            Bit::Zero => self.kelements0[i],
            Bit::One => self.kelements1[i],
        }
    }

    /// `H(ID) = h0 + sum h_{i,ID[i]}`.
    pub(crate) fn identity_aggregate(&self, id: &Identity) -> E::G1 {
        id.bits()
            .iter()
            .enumerate()
            .fold(self.h0.into_group(), |acc, (i, b)| acc + self.h(i, *b))
    }

    /// `H(CL) = h0 + sum f(CL[i])`, a wildcard contributing both branches.
    pub(crate) fn covered_aggregate(&self, cl: &Pattern) -> E::G1 {
        cl.symbols()
            .iter()
            .enumerate()
            .fold(self.h0.into_group(), |acc, (i, s)| match s {
                Symbol::Fixed(b) => acc + self.h(i, *b),
                Symbol::Wildcard => acc + self.helements0[i] + self.helements1[i],
            })
    }

    /// `K(RL) = k0 + sum g(RL[i])`, a wildcard contributing nothing.
    pub(crate) fn revoked_aggregate(&self, rl: &Pattern) -> E::G1 {
        rl.symbols()
            .iter()
            .enumerate()
            .fold(self.k0.into_group(), |acc, (i, s)| match s {
                Symbol::Fixed(b) => acc + self.k(i, *b),
                Symbol::Wildcard => acc,
            })
    }
}
