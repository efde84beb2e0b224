//! Error types for the crate.
//!
//! This module defines low-level backend errors returned by concrete
//! backend implementations (Arkworks, blstrs) as well as the high-level
//! `Error` type returned by suites, key generation, the multi-signature
//! protocol and the point transcoders.
//!
//! The errors are implemented with `thiserror` so they are easy to convert
//! and debug in higher-level code.
//!
//! # Examples
//!
//! ```rust
//! use curve_suites::errors::{BackendError, Error};
//!
//! let err: Error = BackendError::Serialization("invalid point bytes").into();
//! assert!(matches!(err, Error::Backend(_)));
//! ```

use thiserror::Error;

/// Errors bubbled up from backend implementations (Arkworks, blstrs, etc.).
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("unsupported backend feature: {0}")]
    UnsupportedFeature(&'static str),
    #[error("serialization failure: {0}")]
    Serialization(&'static str),
    #[error("math error: {0}")]
    Math(&'static str),
    #[error("randomness source failure: {0}")]
    Randomness(String),
}

/// High-level errors returned by suites, keys, signers and transcoders.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("invalid parameter: {0}")]
    InvalidParam(String),
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(&'static str),
    #[error("invalid public key: {0}")]
    InvalidPublicKey(&'static str),
    #[error("invalid scalar: {0}")]
    InvalidScalar(&'static str),
    #[error("invalid point: {0}")]
    InvalidPoint(&'static str),
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
    /// The pairing check failed; covers failed authentication as well.
    #[error("signature is invalid")]
    SigNotValid,
    #[error("nil or empty signature")]
    NilSignature,
    #[error("nil or empty message")]
    NilMessage,
    #[error("nil or empty public keys list")]
    NilPublicKeys,
    #[error("empty public key bytes")]
    EmptyPublicKeyBytes,
    #[error("length mismatch: {signatures} signatures for {public_keys} public keys")]
    LenMismatch {
        signatures: usize,
        public_keys: usize,
    },
    #[error("invalid point length: expected {expected}, got {actual}")]
    InvalidPointLength { expected: usize, actual: usize },
    #[error("hash size mismatch: expected {expected}, got {actual}")]
    HashSizeMismatch { expected: usize, actual: usize },
}
