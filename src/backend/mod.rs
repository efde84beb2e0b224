//! Backend trait abstractions for curve arithmetic and pairings.
//!
//! This module defines the trait hierarchy that lets every curve suite run on
//! top of a concrete arithmetic library (blstrs or arkworks) through one
//! uniform interface. The traits abstract over scalar field arithmetic, group
//! operations on G1 and G2, the pairing target group and the pairing itself.
//!
//! # Architecture
//!
//! - **[`FieldElement`]**: Scalar field operations (arithmetic, inversion,
//!   sampling, canonical encodings)
//! - **[`CurvePoint`]**: Group operations on G1/G2, compressed encodings and
//!   validity checks
//! - **[`TargetGroup`]**: Pairing output group (GT) operations
//! - **[`PairingBackend`]**: Umbrella trait tying the groups together with
//!   the pairing and hash-to-G1
//!
//! # Available Backends
//!
//! - **`BlstBackend`** (feature: `blst`): BLS12-381 using blstrs
//! - **`ArkworksBls12377`** (feature: `ark_bls12377`): BLS12-377 using arkworks
//! - **`ArkworksBn254`** (feature: `ark_bn254`): BN254 using arkworks
//!
//! # Example: Using a Backend
//!
//! ```rust,no_run
//! # #[cfg(feature = "blst")]
//! # {
//! use curve_suites::backend::{BlstBackend, CurvePoint, FieldElement, PairingBackend};
//! use rand::thread_rng;
//!
//! let mut rng = thread_rng();
//! let scalar = <BlstBackend as PairingBackend>::Scalar::random(&mut rng).unwrap();
//!
//! let g1 = <BlstBackend as PairingBackend>::G1::generator().mul_scalar(&scalar);
//! let g2 = <BlstBackend as PairingBackend>::G2::generator();
//! let target = BlstBackend::pairing(&g1, &g2);
//! # }
//! ```

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use rand_core::RngCore;

use crate::config::CurveId;
use crate::errors::BackendError;

/// Number of random bytes drawn per scalar sample.
///
/// Twice the width of every supported scalar field, so the modular
/// reduction bias is negligible.
pub(crate) const SCALAR_SAMPLE_BYTES: usize = 64;

/// Scalar field element of a pairing-friendly curve.
///
/// Values are immutable: every operation returns a new element and leaves its
/// operands untouched. Arithmetic is always reduced modulo the group order.
///
/// # Example
///
/// ```rust,no_run
/// # #[cfg(feature = "blst")]
/// # {
/// use curve_suites::backend::{BlstBackend, FieldElement, PairingBackend};
/// use rand::thread_rng;
///
/// type Scalar = <BlstBackend as PairingBackend>::Scalar;
///
/// let mut rng = thread_rng();
/// let a = Scalar::random(&mut rng).unwrap();
/// let b = Scalar::from_i64(-7);
///
/// let sum = a + b;
/// assert_eq!(sum - b, a);
///
/// let bytes = a.to_repr();
/// assert_eq!(Scalar::from_repr(&bytes).unwrap(), a);
/// # }
/// ```
pub trait FieldElement:
    Copy
    + PartialEq
    + Eq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
    + Debug
    + 'static
{
    /// Returns the additive identity (zero) element.
    fn zero() -> Self;

    /// Returns the multiplicative identity (one) element.
    fn one() -> Self;

    /// Samples a uniformly random field element.
    ///
    /// Fails only when the randomness source does.
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Result<Self, BackendError>;

    /// Computes the multiplicative inverse, returning `None` for zero.
    fn invert(&self) -> Option<Self>;

    /// Embeds an unsigned integer into the field.
    fn from_u64(value: u64) -> Self;

    /// Embeds a signed integer into the field; negative values wrap around
    /// the group order.
    fn from_i64(value: i64) -> Self {
        if value < 0 {
            -Self::from_u64(value.unsigned_abs())
        } else {
            Self::from_u64(value as u64)
        }
    }

    /// Reduces an arbitrary little-endian byte string modulo the group order.
    fn from_le_bytes_mod_order(bytes: &[u8]) -> Self;

    /// Length of the canonical byte encoding.
    fn repr_len() -> usize;

    /// Serializes this element to its canonical byte encoding.
    fn to_repr(&self) -> Vec<u8>;

    /// Deserializes a canonical encoding.
    ///
    /// Returns an error for wrong lengths and for values not reduced modulo
    /// the group order.
    fn from_repr(bytes: &[u8]) -> Result<Self, BackendError>;

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    fn is_one(&self) -> bool {
        *self == Self::one()
    }

    /// Divides by `other`, returning `None` when `other` is zero.
    fn checked_div(&self, other: &Self) -> Option<Self> {
        other.invert().map(|inv| *self * inv)
    }
}

/// Group element of G1 or G2.
///
/// Points are kept in projective form internally and encoded in the curve
/// library's compressed format at the byte boundary.
pub trait CurvePoint<F: FieldElement>: Copy + PartialEq + Eq + Send + Sync + Debug + 'static {
    /// Returns the point at infinity (identity element).
    fn identity() -> Self;

    /// Returns the standard generator for this group.
    fn generator() -> Self;

    /// Checks if this point is the identity element.
    fn is_identity(&self) -> bool;

    /// Performs elliptic curve point addition.
    fn add(&self, other: &Self) -> Self;

    /// Performs elliptic curve point subtraction.
    fn sub(&self, other: &Self) -> Self;

    /// Returns the additive inverse of this point.
    fn negate(&self) -> Self;

    /// Performs scalar multiplication: returns `scalar * self`.
    fn mul_scalar(&self, scalar: &F) -> Self;

    /// Samples a random group element as a random multiple of the generator.
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Result<Self, BackendError> {
        Ok(Self::generator().mul_scalar(&F::random(rng)?))
    }

    /// Length of the compressed encoding.
    fn compressed_len() -> usize;

    /// Serializes the point in compressed form.
    fn to_compressed(&self) -> Result<Vec<u8>, BackendError>;

    /// Deserializes a compressed point, checking that it lies on the curve and
    /// in the prime-order subgroup. The identity encoding is accepted.
    fn from_compressed(bytes: &[u8]) -> Result<Self, BackendError>;

    /// Deserializes a compressed point without the subgroup check.
    fn from_compressed_unchecked(bytes: &[u8]) -> Result<Self, BackendError>;

    fn is_on_curve(&self) -> bool;

    /// Checks membership in the prime-order subgroup.
    fn is_torsion_free(&self) -> bool;

    /// Computes `∑ scalars[i] * bases[i]`.
    fn msm(bases: &[Self], scalars: &[F]) -> Result<Self, BackendError>;
}

/// Pairing target group (GT) abstraction.
///
/// The group is written additively here (`combine`, `mul_scalar`) even though
/// it is a multiplicative subgroup of the extension field.
pub trait TargetGroup: Clone + PartialEq + Eq + Send + Sync + Debug + 'static {
    /// Scalar field type for scalar multiplication.
    type Scalar: FieldElement;

    /// Returns the identity element.
    fn identity() -> Self;

    /// Performs scalar multiplication (exponentiation in multiplicative notation).
    fn mul_scalar(&self, scalar: &Self::Scalar) -> Self;

    /// Combines (multiplies) two target group elements.
    fn combine(&self, other: &Self) -> Self;

    /// Length of the serialized form.
    fn repr_len() -> usize;

    fn to_repr(&self) -> Result<Vec<u8>, BackendError>;

    fn from_repr(bytes: &[u8]) -> Result<Self, BackendError>;
}

/// Main backend trait that ties the groups of one curve together.
///
/// Every suite draws public keys from G2 and hashes messages into G1, so the
/// backend only has to provide hash-to-curve for G1.
///
/// # Example
///
/// ```rust,no_run
/// # #[cfg(feature = "blst")]
/// # {
/// use curve_suites::backend::{BlstBackend, CurvePoint, PairingBackend};
///
/// let h = BlstBackend::hash_to_g1(b"message", BlstBackend::SIGNATURE_DST).unwrap();
/// let g2 = <BlstBackend as PairingBackend>::G2::generator();
/// let gt = BlstBackend::pairing(&h, &g2);
/// # }
/// ```
pub trait PairingBackend: Send + Sync + Debug + Sized + 'static {
    /// Human-readable curve name.
    const NAME: &'static str;
    /// Curve identifier used by configuration.
    const CURVE: CurveId;
    /// Whether key sampling rejects the scalars zero and one.
    const EXCLUDES_TRIVIAL_SCALARS: bool;
    /// Domain separation tag for hashing messages into G1.
    const SIGNATURE_DST: &'static [u8];

    /// Scalar field type (Fr).
    type Scalar: FieldElement;
    /// First curve group (G1), used for message hashes and signatures.
    type G1: CurvePoint<Self::Scalar>;
    /// Second curve group (G2), used for public keys.
    type G2: CurvePoint<Self::Scalar>;
    /// Pairing target group (GT).
    type Target: TargetGroup<Scalar = Self::Scalar>;

    /// Computes the bilinear pairing: `e(g1, g2) -> GT`.
    fn pairing(g1: &Self::G1, g2: &Self::G2) -> Self::Target;

    /// Computes a product of pairings: `∏ e(g1[i], g2[i])`.
    ///
    /// Returns an error if the input slices have different lengths.
    fn multi_pairing(g1: &[Self::G1], g2: &[Self::G2]) -> Result<Self::Target, BackendError>;

    /// Hashes an arbitrary message to a non-identity point of the G1
    /// prime-order subgroup.
    fn hash_to_g1(msg: &[u8], dst: &[u8]) -> Result<Self::G1, BackendError>;
}

#[cfg(feature = "arkworks")]
mod arkworks;
#[cfg(feature = "ark_bls12377")]
mod ark_bls12_377;
#[cfg(feature = "ark_bn254")]
mod ark_bn254;
#[cfg(feature = "blst")]
mod blst_bls12_381;

#[cfg(feature = "ark_bls12377")]
pub use ark_bls12_377::*;
#[cfg(feature = "ark_bn254")]
pub use ark_bn254::*;
#[cfg(feature = "arkworks")]
pub use arkworks::{ArkGt, ArkPoint};
#[cfg(feature = "blst")]
pub use blst_bls12_381::*;
