//! Arkworks-backed concrete implementation for BLS12-377.
//!
//! Binds the generic arkworks glue to the `ark-bls12-377` curve. Public keys
//! live in G2 (96-byte compressed points), signatures and message hashes in G1
//! (48-byte compressed points).
//!
//! # Feature
//!
//! Compiled when the Cargo feature `ark_bls12377` is enabled.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "ark_bls12377")]
//! # {
//! use curve_suites::backend::{ArkworksBls12377, CurvePoint, PairingBackend};
//!
//! assert_eq!(<ArkworksBls12377 as PairingBackend>::G2::compressed_len(), 96);
//! # }
//! ```

use ark_bls12_377::{Bls12_377, Fr, G1Projective, G2Projective, g1, g2};
use ark_ec::{CurveGroup, pairing::Pairing};

use super::arkworks::{ArkGt, ArkPoint, hash_to_curve};
use crate::backend::PairingBackend;
use crate::config::CurveId;
use crate::errors::BackendError;

pub type Bls12377G1 = ArkPoint<g1::Config>;
pub type Bls12377G2 = ArkPoint<g2::Config>;
pub type Bls12377Gt = ArkGt<Bls12_377>;

#[derive(Clone, Copy, Debug, Default)]
pub struct ArkworksBls12377;

impl PairingBackend for ArkworksBls12377 {
    const NAME: &'static str = "BLS12-377";
    const CURVE: CurveId = CurveId::Bls12_377;
    const EXCLUDES_TRIVIAL_SCALARS: bool = true;
    const SIGNATURE_DST: &'static [u8] = b"BLS_SIG_BLS12377G1_XOF:BLAKE3_TAI_NUL_";

    type Scalar = Fr;
    type G1 = Bls12377G1;
    type G2 = Bls12377G2;
    type Target = Bls12377Gt;

    fn pairing(g1: &Self::G1, g2: &Self::G2) -> Self::Target {
        ArkGt(Bls12_377::pairing(g1.0.into_affine(), g2.0.into_affine()))
    }

    fn multi_pairing(g1: &[Self::G1], g2: &[Self::G2]) -> Result<Self::Target, BackendError> {
        if g1.len() != g2.len() {
            return Err(BackendError::Math("pairing length mismatch"));
        }
        let lhs_proj: Vec<G1Projective> = g1.iter().map(|p| p.0).collect();
        let rhs_proj: Vec<G2Projective> = g2.iter().map(|p| p.0).collect();
        let lhs = G1Projective::normalize_batch(&lhs_proj);
        let rhs = G2Projective::normalize_batch(&rhs_proj);
        Ok(ArkGt(Bls12_377::multi_pairing(lhs, rhs)))
    }

    fn hash_to_g1(msg: &[u8], dst: &[u8]) -> Result<Self::G1, BackendError> {
        hash_to_curve::<g1::Config>(msg, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{CurvePoint, FieldElement};

    #[test]
    fn encoding_sizes() {
        assert_eq!(Bls12377G1::compressed_len(), 48);
        assert_eq!(Bls12377G2::compressed_len(), 96);
        assert_eq!(<Fr as FieldElement>::repr_len(), 32);
    }

    #[test]
    fn scalar_encoding_is_little_endian() {
        let bytes = <Fr as FieldElement>::from_u64(0x0102).to_repr();
        assert_eq!(&bytes[..3], &[0x02, 0x01, 0x00]);
    }
}
