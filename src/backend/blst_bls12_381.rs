//! blst-backed concrete implementation for BLS12-381.
//!
//! This module provides the concrete types for `BlstBackend` when the `blst`
//! feature is enabled, implementing `FieldElement`, `CurvePoint`,
//! `TargetGroup` and `PairingBackend` on top of the `blstrs` crate.
//!
//! Exported types:
//! - `BlstG1`, `BlstG2`, `BlstGt` - wrapped group/target types
//! - `BlstBackend` - top-level backend type
//!
//! Points use the Zcash compressed encoding (big-endian coordinates, flag bits
//! in the most significant byte). Messages are hashed with the standard SSWU
//! hash-to-curve for G1.
//!
//! # Feature
//!
//! Compiled when the Cargo feature `blst` is enabled.

use blstrs::{Bls12, Compress, G1Affine, G1Projective, G2Affine, G2Prepared, G2Projective, Gt, Scalar};
use ff::Field;
use group::{Curve, Group, prime::PrimeCurveAffine};
use pairing::{MillerLoopResult as PairingMillerLoopResult, MultiMillerLoop};
use rand_core::RngCore;
use std::io::Cursor;

use super::SCALAR_SAMPLE_BYTES;
use crate::backend::{CurvePoint, FieldElement, PairingBackend, TargetGroup};
use crate::config::CurveId;
use crate::errors::BackendError;

const G1_COMPRESSED_SIZE: usize = 48;
const G2_COMPRESSED_SIZE: usize = 96;
const SCALAR_SIZE: usize = 32;
const GT_COMPRESSED_SIZE: usize = 288;

impl FieldElement for Scalar {
    fn zero() -> Self {
        Scalar::ZERO
    }

    fn one() -> Self {
        Scalar::ONE
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Result<Self, BackendError> {
        let mut bytes = [0u8; SCALAR_SAMPLE_BYTES];
        rng.try_fill_bytes(&mut bytes)
            .map_err(|err| BackendError::Randomness(err.to_string()))?;
        Ok(<Self as FieldElement>::from_le_bytes_mod_order(&bytes))
    }

    fn invert(&self) -> Option<Self> {
        Field::invert(self).into()
    }

    fn from_u64(value: u64) -> Self {
        Scalar::from(value)
    }

    fn from_le_bytes_mod_order(bytes: &[u8]) -> Self {
        // Horner evaluation in base 256, most significant byte first.
        let base = Scalar::from(256u64);
        bytes
            .iter()
            .rev()
            .fold(Scalar::ZERO, |acc, byte| acc * base + Scalar::from(u64::from(*byte)))
    }

    fn repr_len() -> usize {
        SCALAR_SIZE
    }

    fn to_repr(&self) -> Vec<u8> {
        self.to_bytes_be().to_vec()
    }

    fn from_repr(bytes: &[u8]) -> Result<Self, BackendError> {
        let bytes: [u8; SCALAR_SIZE] = bytes
            .try_into()
            .map_err(|_| BackendError::Serialization("invalid scalar length"))?;
        Option::<Scalar>::from(Scalar::from_bytes_be(&bytes))
            .ok_or(BackendError::Serialization("invalid scalar bytes"))
    }
}

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct BlstG1(pub G1Projective);

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct BlstG2(pub G2Projective);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlstGt(pub Gt);

impl CurvePoint<Scalar> for BlstG1 {
    fn identity() -> Self {
        BlstG1(G1Projective::identity())
    }

    fn generator() -> Self {
        BlstG1(G1Projective::generator())
    }

    fn is_identity(&self) -> bool {
        bool::from(self.0.is_identity())
    }

    fn add(&self, other: &Self) -> Self {
        BlstG1(self.0 + other.0)
    }

    fn sub(&self, other: &Self) -> Self {
        BlstG1(self.0 - other.0)
    }

    fn negate(&self) -> Self {
        BlstG1(-self.0)
    }

    fn mul_scalar(&self, scalar: &Scalar) -> Self {
        BlstG1(self.0 * scalar)
    }

    fn compressed_len() -> usize {
        G1_COMPRESSED_SIZE
    }

    fn to_compressed(&self) -> Result<Vec<u8>, BackendError> {
        Ok(self.0.to_affine().to_compressed().to_vec())
    }

    fn from_compressed(bytes: &[u8]) -> Result<Self, BackendError> {
        let bytes = g1_array(bytes)?;
        Option::<G1Affine>::from(G1Affine::from_compressed(&bytes))
            .map(|affine| BlstG1(affine.into()))
            .ok_or(BackendError::Serialization("invalid G1 point bytes"))
    }

    fn from_compressed_unchecked(bytes: &[u8]) -> Result<Self, BackendError> {
        let bytes = g1_array(bytes)?;
        Option::<G1Affine>::from(G1Affine::from_compressed_unchecked(&bytes))
            .map(|affine| BlstG1(affine.into()))
            .ok_or(BackendError::Serialization("invalid G1 point bytes"))
    }

    fn is_on_curve(&self) -> bool {
        bool::from(self.0.to_affine().is_on_curve())
    }

    fn is_torsion_free(&self) -> bool {
        bool::from(self.0.to_affine().is_torsion_free())
    }

    fn msm(bases: &[Self], scalars: &[Scalar]) -> Result<Self, BackendError> {
        if bases.len() != scalars.len() {
            return Err(BackendError::Math("msm length mismatch"));
        }
        let projectives: Vec<G1Projective> = bases.iter().map(|p| p.0).collect();
        Ok(BlstG1(G1Projective::multi_exp(&projectives, scalars)))
    }
}

impl CurvePoint<Scalar> for BlstG2 {
    fn identity() -> Self {
        BlstG2(G2Projective::identity())
    }

    fn generator() -> Self {
        BlstG2(G2Projective::generator())
    }

    fn is_identity(&self) -> bool {
        bool::from(self.0.is_identity())
    }

    fn add(&self, other: &Self) -> Self {
        BlstG2(self.0 + other.0)
    }

    fn sub(&self, other: &Self) -> Self {
        BlstG2(self.0 - other.0)
    }

    fn negate(&self) -> Self {
        BlstG2(-self.0)
    }

    fn mul_scalar(&self, scalar: &Scalar) -> Self {
        BlstG2(self.0 * scalar)
    }

    fn compressed_len() -> usize {
        G2_COMPRESSED_SIZE
    }

    fn to_compressed(&self) -> Result<Vec<u8>, BackendError> {
        Ok(self.0.to_affine().to_compressed().to_vec())
    }

    fn from_compressed(bytes: &[u8]) -> Result<Self, BackendError> {
        let bytes = g2_array(bytes)?;
        Option::<G2Affine>::from(G2Affine::from_compressed(&bytes))
            .map(|affine| BlstG2(affine.into()))
            .ok_or(BackendError::Serialization("invalid G2 point bytes"))
    }

    fn from_compressed_unchecked(bytes: &[u8]) -> Result<Self, BackendError> {
        let bytes = g2_array(bytes)?;
        Option::<G2Affine>::from(G2Affine::from_compressed_unchecked(&bytes))
            .map(|affine| BlstG2(affine.into()))
            .ok_or(BackendError::Serialization("invalid G2 point bytes"))
    }

    fn is_on_curve(&self) -> bool {
        bool::from(self.0.to_affine().is_on_curve())
    }

    fn is_torsion_free(&self) -> bool {
        bool::from(self.0.to_affine().is_torsion_free())
    }

    fn msm(bases: &[Self], scalars: &[Scalar]) -> Result<Self, BackendError> {
        if bases.len() != scalars.len() {
            return Err(BackendError::Math("msm length mismatch"));
        }
        let projectives: Vec<G2Projective> = bases.iter().map(|p| p.0).collect();
        Ok(BlstG2(G2Projective::multi_exp(&projectives, scalars)))
    }
}

fn g1_array(bytes: &[u8]) -> Result<[u8; G1_COMPRESSED_SIZE], BackendError> {
    bytes
        .try_into()
        .map_err(|_| BackendError::Serialization("invalid G1 point length"))
}

fn g2_array(bytes: &[u8]) -> Result<[u8; G2_COMPRESSED_SIZE], BackendError> {
    bytes
        .try_into()
        .map_err(|_| BackendError::Serialization("invalid G2 point length"))
}

impl TargetGroup for BlstGt {
    type Scalar = Scalar;

    fn identity() -> Self {
        BlstGt(Gt::identity())
    }

    fn mul_scalar(&self, scalar: &Self::Scalar) -> Self {
        BlstGt(self.0 * scalar)
    }

    fn combine(&self, other: &Self) -> Self {
        let mut tmp = self.0;
        tmp += &other.0;
        BlstGt(tmp)
    }

    fn repr_len() -> usize {
        GT_COMPRESSED_SIZE
    }

    fn to_repr(&self) -> Result<Vec<u8>, BackendError> {
        let mut bytes = Vec::with_capacity(GT_COMPRESSED_SIZE);
        self.0
            .write_compressed(&mut bytes)
            .map_err(|_| BackendError::Serialization("gt serialization failure"))?;
        Ok(bytes)
    }

    fn from_repr(bytes: &[u8]) -> Result<Self, BackendError> {
        if bytes.len() != GT_COMPRESSED_SIZE {
            return Err(BackendError::Serialization("invalid GT length"));
        }
        let mut cursor = Cursor::new(bytes);
        Gt::read_compressed(&mut cursor)
            .map(BlstGt)
            .map_err(|_| BackendError::Serialization("invalid GT bytes"))
    }
}

/// blst-backed `PairingBackend` implementation for BLS12-381.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlstBackend;

impl PairingBackend for BlstBackend {
    const NAME: &'static str = "BLS12-381";
    const CURVE: CurveId = CurveId::Bls12_381;
    const EXCLUDES_TRIVIAL_SCALARS: bool = true;
    const SIGNATURE_DST: &'static [u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_";

    type Scalar = Scalar;
    type G1 = BlstG1;
    type G2 = BlstG2;
    type Target = BlstGt;

    fn pairing(g1: &Self::G1, g2: &Self::G2) -> Self::Target {
        BlstGt(blstrs::pairing(&g1.0.to_affine(), &g2.0.to_affine()))
    }

    fn multi_pairing(g1: &[Self::G1], g2: &[Self::G2]) -> Result<Self::Target, BackendError> {
        if g1.len() != g2.len() {
            return Err(BackendError::Math("pairing length mismatch"));
        }
        let lhs_proj: Vec<G1Projective> = g1.iter().map(|p| p.0).collect();
        let rhs_proj: Vec<G2Projective> = g2.iter().map(|p| p.0).collect();
        let mut g1_affine = vec![G1Affine::identity(); lhs_proj.len()];
        let mut g2_affine = vec![G2Affine::identity(); rhs_proj.len()];
        G1Projective::batch_normalize(&lhs_proj, &mut g1_affine);
        G2Projective::batch_normalize(&rhs_proj, &mut g2_affine);
        let g2_prepared: Vec<G2Prepared> =
            g2_affine.iter().map(|aff| G2Prepared::from(*aff)).collect();
        let terms: Vec<_> = g1_affine.iter().zip(g2_prepared.iter()).collect();
        let result = Bls12::multi_miller_loop(&terms).final_exponentiation();
        Ok(BlstGt(result))
    }

    fn hash_to_g1(msg: &[u8], dst: &[u8]) -> Result<Self::G1, BackendError> {
        let point = G1Projective::hash_to_curve(msg, dst, &[]);
        if bool::from(point.is_identity()) {
            return Err(BackendError::Math("message hashed to the identity"));
        }
        Ok(BlstG1(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_encoding_is_big_endian() {
        let bytes = <Scalar as FieldElement>::from_u64(0x0102).to_repr();
        assert_eq!(&bytes[SCALAR_SIZE - 2..], &[0x01, 0x02]);
        assert!(bytes[..SCALAR_SIZE - 2].iter().all(|b| *b == 0));
    }

    #[test]
    fn wide_reduction_matches_native_reduction() {
        let mut wide = [0u8; SCALAR_SAMPLE_BYTES];
        wide[0] = 5;
        wide[32] = 1;
        // 2^256 mod r, computed natively.
        let two_pow_64 = Scalar::from(u64::MAX) + Scalar::ONE;
        let two_pow_256 = two_pow_64.square().square();
        let expected = Scalar::from(5u64) + two_pow_256;
        assert_eq!(<Scalar as FieldElement>::from_le_bytes_mod_order(&wide), expected);
    }

    #[test]
    fn compressed_generator_has_zcash_flags() {
        let bytes = BlstG1::generator().to_compressed().unwrap();
        assert_eq!(bytes.len(), G1_COMPRESSED_SIZE);
        assert_eq!(bytes[0] & 0x80, 0x80, "compression flag must be set");
        assert_eq!(bytes[0] & 0x40, 0, "generator is not the point at infinity");
    }
}
