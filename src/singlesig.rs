//! Plain BLS signatures for a single signer.
//!
//! Uses the same hash-to-G1 and pairing check as the multi-signature shares,
//! so a single signature is interchangeable with a one-signer share.

use crate::backend::PairingBackend;
use crate::errors::Error;
use crate::keys::{PrivateKey, PublicKey};
use crate::multisig::{sign_message, verify_message};

#[derive(Clone, Copy, Debug, Default)]
pub struct BlsSingleSigner;

impl BlsSingleSigner {
    /// Signs `message`, returning the compressed G1 signature.
    pub fn sign<B: PairingBackend>(
        &self,
        private_key: &PrivateKey<B>,
        message: &[u8],
    ) -> Result<Vec<u8>, Error> {
        sign_message(private_key, message)
    }

    pub fn verify<B: PairingBackend>(
        &self,
        public_key: &PublicKey<B>,
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), Error> {
        verify_message(public_key, message, signature)
    }
}
