//! Configuration types for curve and multi-signature selection.
//!
//! This module provides the serializable knobs that pick a curve suite, the
//! multi-signature variant and the coefficient hash width used by the
//! rogue-key resistant variant.
//!
//! # Example
//!
//! ```rust
//! use curve_suites::{CurveId, MultiSigConfig, SignerVariant};
//!
//! let config = MultiSigConfig::new(CurveId::Bls12_381, SignerVariant::NonKosk).expect("valid config");
//! assert_eq!(config.coefficient_hash_size, 16);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{BackendError, Error};

/// Width in bytes of the per-key coefficient hash used by the non-KOSK
/// variant unless configured otherwise.
pub const DEFAULT_COEFFICIENT_HASH_SIZE: usize = 16;

/// Largest supported coefficient hash width.
pub const MAX_COEFFICIENT_HASH_SIZE: usize = 64;

/// Supported pairing-friendly elliptic curves.
///
/// - **BLS12-381**: ~128-bit security, blstrs backend.
/// - **BLS12-377**: ~128-bit security, arkworks backend.
/// - **BN254**: ~100-bit security, arkworks backend.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CurveId {
    /// BLS12-381 curve (~128-bit security, recommended)
    Bls12_381,
    /// BLS12-377 curve (~128-bit security)
    Bls12_377,
    /// BN254 curve (~100-bit security)
    Bn254,
}

impl CurveId {
    /// Validates that the backend for this curve was compiled in.
    ///
    /// # Example
    ///
    /// ```rust
    /// use curve_suites::CurveId;
    ///
    /// # #[cfg(feature = "blst")]
    /// CurveId::Bls12_381.ensure_supported().expect("blst feature enabled");
    /// ```
    pub fn ensure_supported(&self) -> Result<(), BackendError> {
        match self {
            CurveId::Bls12_381 => {
                if cfg!(feature = "blst") {
                    Ok(())
                } else {
                    Err(BackendError::UnsupportedFeature(
                        "compile with `blst` feature to use BLS12-381",
                    ))
                }
            }
            CurveId::Bls12_377 => {
                if cfg!(feature = "ark_bls12377") {
                    Ok(())
                } else {
                    Err(BackendError::UnsupportedFeature(
                        "compile with `ark_bls12377` feature to use BLS12-377",
                    ))
                }
            }
            CurveId::Bn254 => {
                if cfg!(feature = "ark_bn254") {
                    Ok(())
                } else {
                    Err(BackendError::UnsupportedFeature(
                        "compile with `ark_bn254` feature to use BN254",
                    ))
                }
            }
        }
    }
}

/// Multi-signature verification strategy.
///
/// - **Kosk**: assumes every signer proved knowledge of its secret key at
///   registration; aggregation is a plain sum.
/// - **NonKosk**: weights every key and share with a hash-derived coefficient
///   bound to the whole signer set, defeating rogue-key attacks without any
///   registration-time proof.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum SignerVariant {
    Kosk,
    NonKosk,
}

/// Multi-signature configuration.
///
/// # Example
///
/// ```rust
/// use curve_suites::{CurveId, MultiSigConfig, SignerVariant};
///
/// let mut config = MultiSigConfig::new(CurveId::Bn254, SignerVariant::NonKosk).unwrap();
/// config.coefficient_hash_size = 0;
/// assert!(config.validate().is_err());
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MultiSigConfig {
    /// The pairing-friendly curve to use
    pub curve: CurveId,
    /// KOSK or rogue-key resistant aggregation
    pub variant: SignerVariant,
    /// Output width of the coefficient hash (non-KOSK only)
    #[serde(default = "default_hash_size")]
    pub coefficient_hash_size: usize,
}

fn default_hash_size() -> usize {
    DEFAULT_COEFFICIENT_HASH_SIZE
}

impl MultiSigConfig {
    /// Creates and validates a configuration with the default hash width.
    pub fn new(curve: CurveId, variant: SignerVariant) -> Result<Self, Error> {
        let config = Self {
            curve,
            variant,
            coefficient_hash_size: DEFAULT_COEFFICIENT_HASH_SIZE,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// This checks that:
    /// - The curve backend is compiled in
    /// - The coefficient hash width is within `1..=64` bytes
    pub fn validate(&self) -> Result<(), Error> {
        self.curve.ensure_supported().map_err(Error::Backend)?;
        if self.coefficient_hash_size == 0 || self.coefficient_hash_size > MAX_COEFFICIENT_HASH_SIZE {
            return Err(Error::InvalidConfig(format!(
                "coefficient hash size must be within [1, {MAX_COEFFICIENT_HASH_SIZE}], got {}",
                self.coefficient_hash_size
            )));
        }
        Ok(())
    }
}
