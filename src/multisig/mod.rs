//! BLS multi-signatures.
//!
//! Signers sign the same message with their own keys; the shares are then
//! aggregated into one G1 point that verifies against the whole signer set
//! with a single pairing check.
//!
//! Two low-level strategies implement [`LowLevelSignerBls`]:
//!
//! - **[`KoskSigner`]**: aggregate key and aggregate signature are plain sums.
//!   Secure only when every key was registered with a proof of possession.
//! - **[`NonKoskSigner`]**: every key and share is weighted by a coefficient
//!   hashed from the key and the sorted signer set, which defeats rogue-key
//!   attacks without any registration-time proof.
//!
//! [`BlsMultiSigner`] wraps either strategy behind a byte-level API, and
//! [`ConfiguredSigner`] selects the strategy from a [`MultiSigConfig`](crate::MultiSigConfig).
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "blst")]
//! # {
//! use curve_suites::{KeyGenerator, KoskSigner, LowLevelSignerBls, SuiteBls12381};
//! use rand::thread_rng;
//!
//! let suite = SuiteBls12381::new();
//! let keygen = KeyGenerator::new(suite);
//! let signer = KoskSigner;
//! let msg = b"testMessage";
//!
//! let mut public_keys = Vec::new();
//! let mut shares = Vec::new();
//! for _ in 0..4 {
//!     let (sk, pk) = keygen.generate_pair(&mut thread_rng()).unwrap();
//!     shares.push(signer.sign_share(&sk, msg).unwrap());
//!     public_keys.push(pk);
//! }
//!
//! let aggregated = signer.aggregate_signatures(suite, &shares, &public_keys).unwrap();
//! signer.verify_aggregated_sig(suite, &public_keys, &aggregated, msg).unwrap();
//! # }
//! ```

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::backend::{CurvePoint, FieldElement, PairingBackend, TargetGroup};
use crate::errors::Error;
use crate::keys::{PrivateKey, PublicKey};
use crate::suite::Suite;

mod kosk;
mod non_kosk;
mod signer;

pub use kosk::KoskSigner;
pub use non_kosk::{NonKoskSigner, PreparedPublicKeys, concat_pub_keys, hash_public_key_point};
pub use signer::{BlsMultiSigner, ConfiguredSigner};

/// Low-level BLS multi-signature operations over typed keys.
pub trait LowLevelSignerBls<B: PairingBackend>: Send + Sync {
    /// Signs `message`, returning the compressed G1 share `sk * H(message)`.
    fn sign_share(&self, private_key: &PrivateKey<B>, message: &[u8]) -> Result<Vec<u8>, Error>;

    /// Verifies one share against the signer's public key.
    fn verify_sig_share(
        &self,
        public_key: &PublicKey<B>,
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), Error>;

    /// Aggregates shares produced by `public_keys`, in matching order.
    fn aggregate_signatures(
        &self,
        suite: Suite<B>,
        signatures: &[Vec<u8>],
        public_keys: &[PublicKey<B>],
    ) -> Result<Vec<u8>, Error>;

    /// Verifies an aggregated signature against the full signer set.
    fn verify_aggregated_sig(
        &self,
        suite: Suite<B>,
        public_keys: &[PublicKey<B>],
        aggregated_sig: &[u8],
        message: &[u8],
    ) -> Result<(), Error>;
}

pub(crate) fn sign_message<B: PairingBackend>(
    private_key: &PrivateKey<B>,
    message: &[u8],
) -> Result<Vec<u8>, Error> {
    if message.is_empty() {
        return Err(Error::NilMessage);
    }
    if private_key.scalar().is_zero() {
        return Err(Error::InvalidPrivateKey("zero scalar"));
    }
    let hashed = private_key.suite().hash_to_signature_group(message)?;
    hashed
        .mul_scalar(private_key.scalar())
        .to_compressed()
        .map_err(Error::from)
}

pub(crate) fn verify_message<B: PairingBackend>(
    public_key: &PublicKey<B>,
    message: &[u8],
    signature: &[u8],
) -> Result<(), Error> {
    if message.is_empty() {
        return Err(Error::NilMessage);
    }
    if signature.is_empty() {
        return Err(Error::NilSignature);
    }
    check_public_key_point::<B>(public_key.point())?;
    let suite = public_key.suite();
    let sig = suite.decode_signature(signature)?;
    let hashed = suite.hash_to_signature_group(message)?;
    check_pairing::<B>(&sig, &hashed, public_key.point())
}

/// Checks `e(sig, G2) == e(H(m), key)` as a single product of pairings.
pub(crate) fn check_pairing<B: PairingBackend>(
    sig: &B::G1,
    hashed: &B::G1,
    key: &B::G2,
) -> Result<(), Error> {
    let product = B::multi_pairing(&[*sig, hashed.negate()], &[B::G2::generator(), *key])?;
    if product == B::Target::identity() {
        Ok(())
    } else {
        debug!(curve = B::NAME, "pairing check failed");
        Err(Error::SigNotValid)
    }
}

/// Keys built with [`PublicKey::new`] skip decoding, so their points are
/// checked again before any pairing.
pub(crate) fn check_public_key_point<B: PairingBackend>(point: &B::G2) -> Result<(), Error> {
    if point.is_identity() {
        return Err(Error::InvalidPublicKey("point at infinity"));
    }
    if !point.is_on_curve() {
        return Err(Error::InvalidPublicKey("point not on curve"));
    }
    if !point.is_torsion_free() {
        return Err(Error::InvalidPublicKey("point not in prime-order subgroup"));
    }
    Ok(())
}

/// Rejects empty signer sets and keys outside the prime-order subgroup.
pub(crate) fn check_public_keys<B: PairingBackend>(public_keys: &[PublicKey<B>]) -> Result<(), Error> {
    if public_keys.is_empty() {
        return Err(Error::NilPublicKeys);
    }
    public_keys
        .par_iter()
        .try_for_each(|pk| check_public_key_point::<B>(pk.point()))
}

pub(crate) fn check_aggregation_input<B: PairingBackend>(
    signatures: &[Vec<u8>],
    public_keys: &[PublicKey<B>],
) -> Result<(), Error> {
    if signatures.is_empty() {
        return Err(Error::NilSignature);
    }
    check_public_keys(public_keys)?;
    if signatures.len() != public_keys.len() {
        return Err(Error::LenMismatch {
            signatures: signatures.len(),
            public_keys: public_keys.len(),
        });
    }
    Ok(())
}

/// Decodes and validates every share in parallel.
pub(crate) fn decode_shares<B: PairingBackend>(
    suite: Suite<B>,
    signatures: &[Vec<u8>],
) -> Result<Vec<B::G1>, Error> {
    signatures
        .par_iter()
        .enumerate()
        .map(|(idx, bytes)| {
            if bytes.is_empty() {
                return Err(Error::NilSignature);
            }
            suite.decode_signature(bytes).inspect_err(|err| {
                trace!(index = idx, error = %err, "rejected signature share");
            })
        })
        .collect()
}
