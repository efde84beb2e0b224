//! Key pairs and key generation.
//!
//! A [`PrivateKey`] is a scalar bound to its [`Suite`]; the matching
//! [`PublicKey`] is `scalar * G2`. [`KeyGenerator`] samples pairs and decodes
//! keys from their raw byte encodings.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "blst")]
//! # {
//! use curve_suites::{KeyGenerator, SuiteBls12381};
//! use rand::thread_rng;
//!
//! let keygen = KeyGenerator::new(SuiteBls12381::new());
//! let (sk, pk) = keygen.generate_pair(&mut thread_rng()).unwrap();
//!
//! let restored = keygen.private_key_from_bytes(&sk.to_bytes()).unwrap();
//! assert_eq!(restored.generate_public().unwrap(), pk);
//! # }
//! ```

use core::fmt;

use rand_core::RngCore;
use tracing::warn;

use crate::backend::{CurvePoint, FieldElement, PairingBackend};
use crate::errors::Error;
use crate::suite::Suite;

/// Secret signing key.
///
/// The scalar is never printed by `Debug`.
pub struct PrivateKey<B: PairingBackend> {
    suite: Suite<B>,
    scalar: B::Scalar,
}

impl<B: PairingBackend> Clone for PrivateKey<B> {
    fn clone(&self) -> Self {
        Self {
            suite: self.suite,
            scalar: self.scalar,
        }
    }
}

impl<B: PairingBackend> fmt::Debug for PrivateKey<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("suite", &self.suite)
            .field("scalar", &"<redacted>")
            .finish()
    }
}

impl<B: PairingBackend> PrivateKey<B> {
    pub fn new(suite: Suite<B>, scalar: B::Scalar) -> Self {
        Self { suite, scalar }
    }

    /// Canonical scalar encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.scalar.to_repr()
    }

    /// Derives the public key for this private key.
    ///
    /// Fails with [`Error::InvalidPrivateKey`] when the scalar is zero.
    pub fn generate_public(&self) -> Result<PublicKey<B>, Error> {
        match self.suite.create_point_for_scalar(&self.scalar) {
            Ok(point) => Ok(PublicKey::new(self.suite, point)),
            Err(err) => {
                warn!(curve = B::NAME, error = %err, "problem generating public key");
                Err(err)
            }
        }
    }

    pub fn suite(&self) -> Suite<B> {
        self.suite
    }

    pub fn scalar(&self) -> &B::Scalar {
        &self.scalar
    }
}

/// Public verification key: a G2 point.
pub struct PublicKey<B: PairingBackend> {
    suite: Suite<B>,
    point: B::G2,
}

impl<B: PairingBackend> Clone for PublicKey<B> {
    fn clone(&self) -> Self {
        Self {
            suite: self.suite,
            point: self.point,
        }
    }
}

impl<B: PairingBackend> PartialEq for PublicKey<B> {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}

impl<B: PairingBackend> Eq for PublicKey<B> {}

impl<B: PairingBackend> fmt::Debug for PublicKey<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("suite", &self.suite)
            .field("point", &self.point)
            .finish()
    }
}

impl<B: PairingBackend> PublicKey<B> {
    /// Wraps `point` as is. Signers reject identity, off-curve and
    /// off-subgroup keys before pairing; use
    /// [`KeyGenerator::public_key_from_bytes`] for validated decoding.
    pub fn new(suite: Suite<B>, point: B::G2) -> Self {
        Self { suite, point }
    }

    /// Compressed point encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        self.point.to_compressed().map_err(Error::from)
    }

    pub fn suite(&self) -> Suite<B> {
        self.suite
    }

    pub fn point(&self) -> &B::G2 {
        &self.point
    }
}

/// Generates and decodes keys for one suite.
pub struct KeyGenerator<B: PairingBackend> {
    suite: Suite<B>,
}

impl<B: PairingBackend> Clone for KeyGenerator<B> {
    fn clone(&self) -> Self {
        Self { suite: self.suite }
    }
}

impl<B: PairingBackend> Copy for KeyGenerator<B> {}

impl<B: PairingBackend> Default for KeyGenerator<B> {
    fn default() -> Self {
        Self::new(Suite::new())
    }
}

impl<B: PairingBackend> fmt::Debug for KeyGenerator<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyGenerator")
            .field("suite", &self.suite)
            .finish()
    }
}

impl<B: PairingBackend> KeyGenerator<B> {
    pub fn new(suite: Suite<B>) -> Self {
        Self { suite }
    }

    /// Samples a fresh key pair from `rng`.
    pub fn generate_pair<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(PrivateKey<B>, PublicKey<B>), Error> {
        let (scalar, point) = self.suite.create_key_pair(rng)?;
        Ok((
            PrivateKey::new(self.suite, scalar),
            PublicKey::new(self.suite, point),
        ))
    }

    /// Samples a fresh key pair from the thread-local generator.
    pub fn generate_pair_default(&self) -> Result<(PrivateKey<B>, PublicKey<B>), Error> {
        self.generate_pair(&mut rand::thread_rng())
    }

    /// Decodes a private key from its canonical scalar encoding.
    pub fn private_key_from_bytes(&self, bytes: &[u8]) -> Result<PrivateKey<B>, Error> {
        if bytes.is_empty() {
            return Err(Error::InvalidParam("empty private key bytes".into()));
        }
        let scalar = B::Scalar::from_repr(bytes)?;
        Ok(PrivateKey::new(self.suite, scalar))
    }

    /// Decodes a public key from its compressed point encoding.
    ///
    /// Only the length and the curve library's own decoding checks apply;
    /// use [`check_public_key_valid`](Self::check_public_key_valid) to also
    /// reject the identity.
    pub fn public_key_from_bytes(&self, bytes: &[u8]) -> Result<PublicKey<B>, Error> {
        if bytes.len() != self.suite.point_len() {
            return Err(Error::InvalidParam(format!(
                "public key length: expected {}, got {}",
                self.suite.point_len(),
                bytes.len()
            )));
        }
        let point = B::G2::from_compressed(bytes)?;
        Ok(PublicKey::new(self.suite, point))
    }

    pub fn check_public_key_valid(&self, bytes: &[u8]) -> Result<(), Error> {
        self.suite.check_point_valid(bytes)
    }

    pub fn suite(&self) -> Suite<B> {
        self.suite
    }
}
