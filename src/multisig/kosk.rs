use tracing::instrument;

use super::{
    LowLevelSignerBls, check_aggregation_input, check_pairing, check_public_keys, decode_shares,
    sign_message, verify_message,
};
use crate::backend::{CurvePoint, PairingBackend};
use crate::errors::Error;
use crate::keys::{PrivateKey, PublicKey};
use crate::suite::Suite;

/// Multi-signer relying on knowledge of secret key (KOSK).
///
/// The aggregate key is the plain sum of the public keys. Callers must only
/// admit keys whose owners proved possession of the secret key; otherwise a
/// rogue key can cancel honest keys out of the sum.
#[derive(Clone, Copy, Debug, Default)]
pub struct KoskSigner;

impl<B: PairingBackend> LowLevelSignerBls<B> for KoskSigner {
    fn sign_share(&self, private_key: &PrivateKey<B>, message: &[u8]) -> Result<Vec<u8>, Error> {
        sign_message(private_key, message)
    }

    fn verify_sig_share(
        &self,
        public_key: &PublicKey<B>,
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), Error> {
        verify_message(public_key, message, signature)
    }

    #[instrument(level = "debug", skip_all, fields(curve = B::NAME, shares = signatures.len()))]
    fn aggregate_signatures(
        &self,
        suite: Suite<B>,
        signatures: &[Vec<u8>],
        public_keys: &[PublicKey<B>],
    ) -> Result<Vec<u8>, Error> {
        check_aggregation_input(signatures, public_keys)?;
        let shares = decode_shares(suite, signatures)?;
        let aggregated = shares
            .iter()
            .fold(B::G1::identity(), |acc, share| acc.add(share));
        aggregated.to_compressed().map_err(Error::from)
    }

    #[instrument(level = "debug", skip_all, fields(curve = B::NAME, signers = public_keys.len()))]
    fn verify_aggregated_sig(
        &self,
        suite: Suite<B>,
        public_keys: &[PublicKey<B>],
        aggregated_sig: &[u8],
        message: &[u8],
    ) -> Result<(), Error> {
        if message.is_empty() {
            return Err(Error::NilMessage);
        }
        if aggregated_sig.is_empty() {
            return Err(Error::NilSignature);
        }
        check_public_keys(public_keys)?;
        let signature = suite.decode_signature(aggregated_sig)?;
        let aggregated_key = public_keys
            .iter()
            .fold(B::G2::identity(), |acc, pk| acc.add(pk.point()));
        let hashed = suite.hash_to_signature_group(message)?;
        check_pairing::<B>(&signature, &hashed, &aggregated_key)
    }
}
