//! Arkworks-backed concrete implementation for BN254.
//!
//! Public keys live in G2 (64-byte compressed points), signatures and message
//! hashes in G1 (32-byte compressed points). G1 has cofactor one, so hashing
//! needs no cofactor clearing beyond the identity check.
//!
//! Unlike the BLS12 curves, key sampling on BN254 accepts the scalar one; only
//! zero is rejected.
//!
//! # Feature
//!
//! Compiled when the Cargo feature `ark_bn254` is enabled.

use ark_bn254::{Bn254, Fr, G1Projective, G2Projective, g1, g2};
use ark_ec::{CurveGroup, pairing::Pairing};

use super::arkworks::{ArkGt, ArkPoint, hash_to_curve};
use crate::backend::PairingBackend;
use crate::config::CurveId;
use crate::errors::BackendError;

pub type Bn254G1 = ArkPoint<g1::Config>;
pub type Bn254G2 = ArkPoint<g2::Config>;
pub type Bn254Gt = ArkGt<Bn254>;

#[derive(Clone, Copy, Debug, Default)]
pub struct ArkworksBn254;

impl PairingBackend for ArkworksBn254 {
    const NAME: &'static str = "BN254";
    const CURVE: CurveId = CurveId::Bn254;
    const EXCLUDES_TRIVIAL_SCALARS: bool = false;
    const SIGNATURE_DST: &'static [u8] = b"BLS_SIG_BN254G1_XOF:BLAKE3_TAI_NUL_";

    type Scalar = Fr;
    type G1 = Bn254G1;
    type G2 = Bn254G2;
    type Target = Bn254Gt;

    fn pairing(g1: &Self::G1, g2: &Self::G2) -> Self::Target {
        ArkGt(Bn254::pairing(g1.0.into_affine(), g2.0.into_affine()))
    }

    fn multi_pairing(g1: &[Self::G1], g2: &[Self::G2]) -> Result<Self::Target, BackendError> {
        if g1.len() != g2.len() {
            return Err(BackendError::Math("pairing length mismatch"));
        }
        let lhs_proj: Vec<G1Projective> = g1.iter().map(|p| p.0).collect();
        let rhs_proj: Vec<G2Projective> = g2.iter().map(|p| p.0).collect();
        let lhs = G1Projective::normalize_batch(&lhs_proj);
        let rhs = G2Projective::normalize_batch(&rhs_proj);
        Ok(ArkGt(Bn254::multi_pairing(lhs, rhs)))
    }

    fn hash_to_g1(msg: &[u8], dst: &[u8]) -> Result<Self::G1, BackendError> {
        hash_to_curve::<g1::Config>(msg, dst)
    }
}
