//! Shared arkworks glue for the arkworks-backed curves.
//!
//! Every arkworks curve exposes its scalar field as `Fp<P, N>`, its groups as
//! short-Weierstrass `Projective<P>` and its pairing output as
//! `PairingOutput<E>`, so the trait implementations are written once here and
//! the curve modules only bind the concrete configs and the pairing engine.
//!
//! Hashing to G1 uses try-and-increment: a BLAKE3 XOF seeded with the domain
//! separation tag, a counter and the message yields a candidate x-coordinate
//! and a sign bit; the first candidate on the curve is multiplied by the
//! cofactor.

use core::fmt;

use ark_ec::{
    AffineRepr, CurveGroup, PrimeGroup,
    pairing::{Pairing, PairingOutput},
    scalar_mul::variable_base::VariableBaseMSM,
    short_weierstrass::{Affine, Projective, SWCurveConfig},
};
use ark_ff::{BigInteger, Fp, FpConfig, PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, Compress, Validate};
use rand_core::RngCore;

use super::SCALAR_SAMPLE_BYTES;
use crate::backend::{CurvePoint, FieldElement, TargetGroup};
use crate::errors::BackendError;

/// Upper bound on try-and-increment candidates before giving up.
///
/// Roughly half of all x-coordinates lie on the curve, so this is never hit
/// in practice.
const HASH_TO_CURVE_ATTEMPTS: u32 = 256;

impl<P: FpConfig<N>, const N: usize> FieldElement for Fp<P, N> {
    fn zero() -> Self {
        <Self as Zero>::zero()
    }

    fn one() -> Self {
        <Self as ark_ff::One>::one()
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Result<Self, BackendError> {
        let mut bytes = [0u8; SCALAR_SAMPLE_BYTES];
        rng.try_fill_bytes(&mut bytes)
            .map_err(|err| BackendError::Randomness(err.to_string()))?;
        Ok(<Self as PrimeField>::from_le_bytes_mod_order(&bytes))
    }

    fn invert(&self) -> Option<Self> {
        ark_ff::Field::inverse(self)
    }

    fn from_u64(value: u64) -> Self {
        Self::from(value)
    }

    fn from_le_bytes_mod_order(bytes: &[u8]) -> Self {
        <Self as PrimeField>::from_le_bytes_mod_order(bytes)
    }

    fn repr_len() -> usize {
        (<Self as PrimeField>::MODULUS_BIT_SIZE as usize).div_ceil(8)
    }

    fn to_repr(&self) -> Vec<u8> {
        let mut bytes = self.into_bigint().to_bytes_le();
        bytes.truncate(<Self as FieldElement>::repr_len());
        bytes
    }

    fn from_repr(bytes: &[u8]) -> Result<Self, BackendError> {
        if bytes.len() != <Self as FieldElement>::repr_len() {
            return Err(BackendError::Serialization("invalid scalar length"));
        }
        Self::deserialize_compressed(bytes)
            .map_err(|_| BackendError::Serialization("invalid scalar bytes"))
    }
}

/// Arkworks short-Weierstrass group element.
pub struct ArkPoint<P: SWCurveConfig>(pub Projective<P>);

impl<P: SWCurveConfig> Clone for ArkPoint<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: SWCurveConfig> Copy for ArkPoint<P> {}

impl<P: SWCurveConfig> PartialEq for ArkPoint<P> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<P: SWCurveConfig> Eq for ArkPoint<P> {}

impl<P: SWCurveConfig> fmt::Debug for ArkPoint<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ArkPoint").field(&self.0.into_affine()).finish()
    }
}

impl<P> CurvePoint<P::ScalarField> for ArkPoint<P>
where
    P: SWCurveConfig,
    P::ScalarField: FieldElement,
{
    fn identity() -> Self {
        ArkPoint(Projective::<P>::zero())
    }

    fn generator() -> Self {
        ArkPoint(Projective::<P>::generator())
    }

    fn is_identity(&self) -> bool {
        self.0.is_zero()
    }

    fn add(&self, other: &Self) -> Self {
        let mut tmp = self.0;
        tmp += other.0;
        ArkPoint(tmp)
    }

    fn sub(&self, other: &Self) -> Self {
        let mut tmp = self.0;
        tmp -= other.0;
        ArkPoint(tmp)
    }

    fn negate(&self) -> Self {
        ArkPoint(-self.0)
    }

    fn mul_scalar(&self, scalar: &P::ScalarField) -> Self {
        ArkPoint(self.0.mul_bigint(scalar.into_bigint()))
    }

    fn compressed_len() -> usize {
        Affine::<P>::identity().serialized_size(Compress::Yes)
    }

    fn to_compressed(&self) -> Result<Vec<u8>, BackendError> {
        let mut bytes = Vec::with_capacity(Self::compressed_len());
        self.0
            .into_affine()
            .serialize_compressed(&mut bytes)
            .map_err(|_| BackendError::Serialization("point serialization failure"))?;
        Ok(bytes)
    }

    fn from_compressed(bytes: &[u8]) -> Result<Self, BackendError> {
        decode_affine::<P>(bytes, Validate::Yes).map(|affine| ArkPoint(affine.into_group()))
    }

    fn from_compressed_unchecked(bytes: &[u8]) -> Result<Self, BackendError> {
        decode_affine::<P>(bytes, Validate::No).map(|affine| ArkPoint(affine.into_group()))
    }

    fn is_on_curve(&self) -> bool {
        self.0.into_affine().is_on_curve()
    }

    fn is_torsion_free(&self) -> bool {
        self.0
            .into_affine()
            .is_in_correct_subgroup_assuming_on_curve()
    }

    fn msm(bases: &[Self], scalars: &[P::ScalarField]) -> Result<Self, BackendError> {
        if bases.len() != scalars.len() {
            return Err(BackendError::Math("msm length mismatch"));
        }
        let projectives: Vec<Projective<P>> = bases.iter().map(|p| p.0).collect();
        let affines = Projective::<P>::normalize_batch(&projectives);
        let coeffs: Vec<_> = scalars.iter().map(|s| s.into_bigint()).collect();
        Ok(ArkPoint(Projective::<P>::msm_bigint(&affines, &coeffs)))
    }
}

fn decode_affine<P: SWCurveConfig>(bytes: &[u8], validate: Validate) -> Result<Affine<P>, BackendError> {
    let expected = Affine::<P>::identity().serialized_size(Compress::Yes);
    if bytes.len() != expected {
        return Err(BackendError::Serialization("invalid point length"));
    }
    Affine::<P>::deserialize_with_mode(bytes, Compress::Yes, validate)
        .map_err(|_| BackendError::Serialization("invalid point bytes"))
}

/// Arkworks pairing output wrapper.
pub struct ArkGt<E: Pairing>(pub PairingOutput<E>);

impl<E: Pairing> Clone for ArkGt<E> {
    fn clone(&self) -> Self {
        ArkGt(self.0)
    }
}

impl<E: Pairing> PartialEq for ArkGt<E> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<E: Pairing> Eq for ArkGt<E> {}

impl<E: Pairing> fmt::Debug for ArkGt<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ArkGt").field(&self.0).finish()
    }
}

impl<E> TargetGroup for ArkGt<E>
where
    E: Pairing,
    E::ScalarField: FieldElement,
{
    type Scalar = E::ScalarField;

    fn identity() -> Self {
        ArkGt(PairingOutput::<E>::zero())
    }

    fn mul_scalar(&self, scalar: &Self::Scalar) -> Self {
        ArkGt(self.0.mul_bigint(scalar.into_bigint()))
    }

    fn combine(&self, other: &Self) -> Self {
        ArkGt(self.0 + other.0)
    }

    fn repr_len() -> usize {
        PairingOutput::<E>::zero().compressed_size()
    }

    fn to_repr(&self) -> Result<Vec<u8>, BackendError> {
        let mut bytes = Vec::with_capacity(Self::repr_len());
        self.0
            .serialize_compressed(&mut bytes)
            .map_err(|_| BackendError::Serialization("gt serialization failure"))?;
        Ok(bytes)
    }

    fn from_repr(bytes: &[u8]) -> Result<Self, BackendError> {
        if bytes.len() != Self::repr_len() {
            return Err(BackendError::Serialization("invalid GT length"));
        }
        PairingOutput::<E>::deserialize_compressed(bytes)
            .map(ArkGt)
            .map_err(|_| BackendError::Serialization("invalid GT bytes"))
    }
}

/// Hashes `msg` to a non-identity point of the prime-order subgroup.
pub(crate) fn hash_to_curve<P>(msg: &[u8], dst: &[u8]) -> Result<ArkPoint<P>, BackendError>
where
    P: SWCurveConfig,
    P::BaseField: PrimeField,
{
    // 16 extra bytes keep the reduced x-coordinate close to uniform.
    let x_len = (P::BaseField::MODULUS_BIT_SIZE as usize).div_ceil(8) + 16;
    let mut buf = vec![0u8; x_len + 1];
    for counter in 0..HASH_TO_CURVE_ATTEMPTS {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(dst.len() as u64).to_le_bytes());
        hasher.update(dst);
        hasher.update(&counter.to_le_bytes());
        hasher.update(msg);
        hasher.finalize_xof().fill(&mut buf);

        let greatest = buf[x_len] & 1 == 1;
        let x = <P::BaseField as PrimeField>::from_le_bytes_mod_order(&buf[..x_len]);
        let Some(candidate) = Affine::<P>::get_point_from_x_unchecked(x, greatest) else {
            continue;
        };
        let point = candidate.clear_cofactor();
        if !AffineRepr::is_zero(&point) {
            return Ok(ArkPoint(point.into_group()));
        }
    }
    Err(BackendError::Math("hash to curve exhausted its attempts"))
}
