//! Curve suites and their group descriptors.
//!
//! A [`Suite`] is a zero-sized, stateless handle on one pairing curve. It fixes
//! the role of every group: private keys are scalars, public keys are G2
//! points, messages hash into G1 and signatures are G1 points. Suites are
//! `Copy` and can be created anywhere with [`Suite::new`]; there is no global
//! registry.
//!
//! The group descriptors [`G1Group`], [`G2Group`] and [`GtGroup`] expose the
//! per-group view (name, lengths, generator multiples) behind the common
//! [`SuiteGroup`] trait.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "blst")]
//! # {
//! use curve_suites::{CurvePoint, SuiteBls12381};
//! use rand::thread_rng;
//!
//! let suite = SuiteBls12381::new();
//! let (scalar, point) = suite.create_key_pair(&mut thread_rng()).unwrap();
//! let bytes = point.to_compressed().unwrap();
//! assert_eq!(bytes.len(), suite.point_len());
//! suite.check_point_valid(&bytes).unwrap();
//! # let _ = scalar;
//! # }
//! ```

use core::fmt;
use core::marker::PhantomData;

use rand_core::RngCore;
use tracing::debug;

use crate::backend::{CurvePoint, FieldElement, PairingBackend, TargetGroup};
use crate::config::CurveId;
use crate::errors::{BackendError, Error};

/// Draws allowed before key sampling gives up on the RNG.
const KEY_SAMPLE_ATTEMPTS: usize = 64;

/// Stateless per-curve suite.
pub struct Suite<B: PairingBackend> {
    _backend: PhantomData<fn() -> B>,
}

impl<B: PairingBackend> Clone for Suite<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: PairingBackend> Copy for Suite<B> {}

impl<B: PairingBackend> Default for Suite<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: PairingBackend> PartialEq for Suite<B> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<B: PairingBackend> Eq for Suite<B> {}

impl<B: PairingBackend> fmt::Debug for Suite<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suite").field("curve", &B::NAME).finish()
    }
}

#[cfg(feature = "blst")]
pub type SuiteBls12381 = Suite<crate::backend::BlstBackend>;
#[cfg(feature = "ark_bls12377")]
pub type SuiteBls12377 = Suite<crate::backend::ArkworksBls12377>;
#[cfg(feature = "ark_bn254")]
pub type SuiteBn254 = Suite<crate::backend::ArkworksBn254>;

impl<B: PairingBackend> Suite<B> {
    pub const fn new() -> Self {
        Self {
            _backend: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        B::NAME
    }

    pub fn curve(&self) -> CurveId {
        B::CURVE
    }

    /// Length of an encoded private key scalar.
    pub fn scalar_len(&self) -> usize {
        B::Scalar::repr_len()
    }

    /// Length of an encoded public key (compressed G2 point).
    pub fn point_len(&self) -> usize {
        B::G2::compressed_len()
    }

    /// Length of an encoded signature (compressed G1 point).
    pub fn signature_len(&self) -> usize {
        B::G1::compressed_len()
    }

    /// Samples a private key scalar.
    ///
    /// Zero is always rejected; curves flagged with
    /// `EXCLUDES_TRIVIAL_SCALARS` also reject one. An RNG that keeps producing
    /// rejected scalars yields [`BackendError::Randomness`].
    pub fn create_scalar<R: RngCore + ?Sized>(&self, rng: &mut R) -> Result<B::Scalar, Error> {
        sample_key_scalar::<B, R>(rng)
    }

    /// Returns the G2 generator, the base point for public keys.
    pub fn create_point(&self) -> B::G2 {
        self.g2().create_point()
    }

    /// Derives the public point `scalar * G2`.
    pub fn create_point_for_scalar(&self, scalar: &B::Scalar) -> Result<B::G2, Error> {
        if scalar.is_zero() {
            return Err(Error::InvalidPrivateKey("zero scalar"));
        }
        self.g2().create_point_for_scalar(scalar)
    }

    /// Samples a fresh `(scalar, scalar * G2)` pair.
    pub fn create_key_pair<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(B::Scalar, B::G2), Error> {
        let scalar = self.create_scalar(rng)?;
        let point = self.create_point_for_scalar(&scalar)?;
        Ok((scalar, point))
    }

    /// Checks that `bytes` encode a non-identity G2 point on the curve and in
    /// the prime-order subgroup.
    pub fn check_point_valid(&self, bytes: &[u8]) -> Result<(), Error> {
        self.decode_public_point(bytes).map(|_| ())
    }

    /// Decodes a public key point with the same checks as
    /// [`check_point_valid`](Self::check_point_valid).
    pub fn decode_public_point(&self, bytes: &[u8]) -> Result<B::G2, Error> {
        decode_valid_point::<B, B::G2>(bytes, "public key")
    }

    /// Checks that `bytes` encode a valid signature point (G1).
    pub fn check_signature_valid(&self, bytes: &[u8]) -> Result<(), Error> {
        self.decode_signature(bytes).map(|_| ())
    }

    pub fn decode_signature(&self, bytes: &[u8]) -> Result<B::G1, Error> {
        decode_valid_point::<B, B::G1>(bytes, "signature")
    }

    /// Hashes a message into the signature group.
    pub fn hash_to_signature_group(&self, msg: &[u8]) -> Result<B::G1, Error> {
        B::hash_to_g1(msg, B::SIGNATURE_DST).map_err(Error::from)
    }

    pub fn g1(&self) -> G1Group<B> {
        G1Group(PhantomData)
    }

    pub fn g2(&self) -> G2Group<B> {
        G2Group(PhantomData)
    }

    pub fn gt(&self) -> GtGroup<B> {
        GtGroup(PhantomData)
    }
}

fn sample_key_scalar<B: PairingBackend, R: RngCore + ?Sized>(
    rng: &mut R,
) -> Result<B::Scalar, Error> {
    for _ in 0..KEY_SAMPLE_ATTEMPTS {
        let scalar = B::Scalar::random(rng)?;
        if scalar.is_zero() || (B::EXCLUDES_TRIVIAL_SCALARS && scalar.is_one()) {
            continue;
        }
        return Ok(scalar);
    }
    debug!(curve = B::NAME, attempts = KEY_SAMPLE_ATTEMPTS, "key sampling exhausted");
    Err(BackendError::Randomness(format!(
        "no usable key scalar after {KEY_SAMPLE_ATTEMPTS} draws"
    ))
    .into())
}

fn decode_valid_point<B, P>(bytes: &[u8], what: &'static str) -> Result<P, Error>
where
    B: PairingBackend,
    P: CurvePoint<B::Scalar>,
{
    if bytes.len() != P::compressed_len() {
        return Err(Error::InvalidParam(format!(
            "{what} length: expected {}, got {}",
            P::compressed_len(),
            bytes.len()
        )));
    }
    let point = P::from_compressed_unchecked(bytes).map_err(|err| {
        debug!(curve = B::NAME, error = %err, "point decoding failed");
        Error::InvalidPoint("cannot decode point")
    })?;
    if point.is_identity() {
        return Err(Error::InvalidPoint("point at infinity"));
    }
    if !point.is_on_curve() {
        return Err(Error::InvalidPoint("point not on curve"));
    }
    if !point.is_torsion_free() {
        return Err(Error::InvalidPoint("point not in prime-order subgroup"));
    }
    Ok(point)
}

/// Per-group view of a suite.
pub trait SuiteGroup<B: PairingBackend> {
    type Element: Clone + PartialEq + fmt::Debug;

    fn name(&self) -> String;

    fn scalar_len(&self) -> usize {
        B::Scalar::repr_len()
    }

    fn point_len(&self) -> usize;

    fn create_scalar<R: RngCore + ?Sized>(&self, rng: &mut R) -> Result<B::Scalar, Error> {
        B::Scalar::random(rng).map_err(Error::from)
    }

    /// Returns the group's base element.
    fn create_point(&self) -> Self::Element;

    /// Multiplies the base element by `scalar`.
    fn create_point_for_scalar(&self, scalar: &B::Scalar) -> Result<Self::Element, Error>;
}

pub struct G1Group<B>(PhantomData<fn() -> B>);
pub struct G2Group<B>(PhantomData<fn() -> B>);
/// Pairing target group; has no generator-multiplication.
pub struct GtGroup<B>(PhantomData<fn() -> B>);

impl<B: PairingBackend> SuiteGroup<B> for G1Group<B> {
    type Element = B::G1;

    fn name(&self) -> String {
        format!("{} G1", B::NAME)
    }

    fn point_len(&self) -> usize {
        B::G1::compressed_len()
    }

    fn create_point(&self) -> B::G1 {
        B::G1::generator()
    }

    fn create_point_for_scalar(&self, scalar: &B::Scalar) -> Result<B::G1, Error> {
        Ok(B::G1::generator().mul_scalar(scalar))
    }
}

impl<B: PairingBackend> SuiteGroup<B> for G2Group<B> {
    type Element = B::G2;

    fn name(&self) -> String {
        format!("{} G2", B::NAME)
    }

    fn point_len(&self) -> usize {
        B::G2::compressed_len()
    }

    fn create_point(&self) -> B::G2 {
        B::G2::generator()
    }

    fn create_point_for_scalar(&self, scalar: &B::Scalar) -> Result<B::G2, Error> {
        Ok(B::G2::generator().mul_scalar(scalar))
    }
}

impl<B: PairingBackend> SuiteGroup<B> for GtGroup<B> {
    type Element = B::Target;

    fn name(&self) -> String {
        format!("{} GT", B::NAME)
    }

    fn point_len(&self) -> usize {
        B::Target::repr_len()
    }

    fn create_point(&self) -> B::Target {
        B::Target::identity()
    }

    fn create_point_for_scalar(&self, _scalar: &B::Scalar) -> Result<B::Target, Error> {
        Err(Error::NotImplemented(
            "generator multiplication in the pairing target group",
        ))
    }
}
