//! # curve-suites: curve suites and BLS multi-signatures over pairing curves
//!
//! This crate provides a curve-agnostic algebraic layer (scalars, points,
//! groups, suites) instantiated over BLS12-381, BLS12-377 and BN254, and a BLS
//! multi-signature protocol built on it, in both the knowledge-of-secret-key
//! (KOSK) and the rogue-key resistant (non-KOSK) variants.
//!
//! ## Architecture
//!
//! - **[`backend`]**: Trait abstractions over the arithmetic libraries
//!   ([`FieldElement`], [`CurvePoint`], [`TargetGroup`], [`PairingBackend`])
//!   and their blstrs and arkworks implementations.
//!
//! - **[`suite`]**: [`Suite`], the stateless per-curve handle that fixes keys
//!   on G2 and signatures on G1, plus the [`SuiteGroup`] descriptors.
//!
//! - **[`keys`]**: [`PrivateKey`], [`PublicKey`] and the [`KeyGenerator`].
//!
//! - **[`multisig`]**: [`LowLevelSignerBls`] with [`KoskSigner`] and
//!   [`NonKoskSigner`], and the byte-level [`BlsMultiSigner`].
//!
//! - **[`singlesig`]**: [`BlsSingleSigner`] for plain BLS signatures.
//!
//! - **[`interop`]**: Transcoders between the Zcash and little-endian
//!   compressed encodings of BLS12-381 points.
//!
//! - **[`config`]**: [`MultiSigConfig`], [`CurveId`] and [`SignerVariant`].
//!
//! - **[`errors`]**: Error types for backend and protocol operations.
//!
//! ## Quick Example
//!
//! ```rust
//! # #[cfg(feature = "blst")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use curve_suites::{BlsMultiSigner, BlstBackend, CurveId, MultiSigConfig, SignerVariant};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let config = MultiSigConfig::new(CurveId::Bls12_381, SignerVariant::NonKosk)?;
//! let multisigner = BlsMultiSigner::<BlstBackend, _>::from_config(&config)?;
//! let mut rng = StdRng::from_entropy();
//! let message = b"block header";
//!
//! let mut public_keys = Vec::new();
//! let mut shares = Vec::new();
//! for _ in 0..5 {
//!     let (sk, pk) = multisigner.key_generator().generate_pair(&mut rng)?;
//!     shares.push(multisigner.create_signature_share(&sk.to_bytes(), message)?);
//!     public_keys.push(pk.to_bytes()?);
//! }
//!
//! let aggregated = multisigner.aggregate_sigs(&public_keys, &shares)?;
//! multisigner.verify_aggregated_sig(&public_keys, message, &aggregated)?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "blst"))]
//! # fn main() {}
//! ```
//!
//! ## Feature Flags
//!
//! - **`blst`** (default): blstrs backend for BLS12-381
//! - **`ark_bls12377`** (default): Arkworks backend for BLS12-377
//! - **`ark_bn254`** (default): Arkworks backend for BN254
//!
//! ## Security Considerations
//!
//! - **KOSK** aggregation is only sound when every public key was registered
//!   with a proof of possession of its secret key. Without that, use
//!   [`NonKoskSigner`].
//! - Decoded signatures and keys used for verification are checked for curve
//!   membership, subgroup membership and the identity before any pairing.

pub mod backend;
pub mod config;
pub mod errors;
pub mod hashing;
pub mod interop;
pub mod keys;
pub mod multisig;
mod serde_impl;
pub mod singlesig;
pub mod suite;

#[cfg(feature = "ark_bls12377")]
pub use backend::ArkworksBls12377;
#[cfg(feature = "ark_bn254")]
pub use backend::ArkworksBn254;
#[cfg(feature = "blst")]
pub use backend::BlstBackend;
pub use backend::{CurvePoint, FieldElement, PairingBackend, TargetGroup};
pub use config::{CurveId, MultiSigConfig, SignerVariant};
pub use errors::{BackendError, Error};
pub use hashing::{Blake3Hasher, Hasher};
pub use keys::{KeyGenerator, PrivateKey, PublicKey};
pub use multisig::{
    BlsMultiSigner, ConfiguredSigner, KoskSigner, LowLevelSignerBls, NonKoskSigner,
    PreparedPublicKeys,
};
pub use singlesig::BlsSingleSigner;
#[cfg(feature = "ark_bls12377")]
pub use suite::SuiteBls12377;
#[cfg(feature = "blst")]
pub use suite::SuiteBls12381;
#[cfg(feature = "ark_bn254")]
pub use suite::SuiteBn254;
pub use suite::{G1Group, G2Group, GtGroup, Suite, SuiteGroup};
