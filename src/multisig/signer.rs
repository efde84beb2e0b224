use core::fmt;

use tracing::instrument;

use super::{KoskSigner, LowLevelSignerBls, NonKoskSigner};
use crate::backend::PairingBackend;
use crate::config::{MultiSigConfig, SignerVariant};
use crate::errors::Error;
use crate::hashing::Blake3Hasher;
use crate::keys::{KeyGenerator, PrivateKey, PublicKey};
use crate::suite::Suite;

/// Signing strategy selected at runtime from a [`MultiSigConfig`].
#[derive(Clone, Debug)]
pub enum ConfiguredSigner {
    Kosk(KoskSigner),
    NonKosk(NonKoskSigner<Blake3Hasher>),
}

impl ConfiguredSigner {
    pub fn from_config(config: &MultiSigConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(match config.variant {
            SignerVariant::Kosk => ConfiguredSigner::Kosk(KoskSigner),
            SignerVariant::NonKosk => ConfiguredSigner::NonKosk(NonKoskSigner::new(
                Blake3Hasher::new(config.coefficient_hash_size)?,
            )),
        })
    }

    pub fn variant(&self) -> SignerVariant {
        match self {
            ConfiguredSigner::Kosk(_) => SignerVariant::Kosk,
            ConfiguredSigner::NonKosk(_) => SignerVariant::NonKosk,
        }
    }
}

impl<B: PairingBackend> LowLevelSignerBls<B> for ConfiguredSigner {
    fn sign_share(&self, private_key: &PrivateKey<B>, message: &[u8]) -> Result<Vec<u8>, Error> {
        match self {
            ConfiguredSigner::Kosk(signer) => signer.sign_share(private_key, message),
            ConfiguredSigner::NonKosk(signer) => signer.sign_share(private_key, message),
        }
    }

    fn verify_sig_share(
        &self,
        public_key: &PublicKey<B>,
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), Error> {
        match self {
            ConfiguredSigner::Kosk(signer) => signer.verify_sig_share(public_key, message, signature),
            ConfiguredSigner::NonKosk(signer) => {
                signer.verify_sig_share(public_key, message, signature)
            }
        }
    }

    fn aggregate_signatures(
        &self,
        suite: Suite<B>,
        signatures: &[Vec<u8>],
        public_keys: &[PublicKey<B>],
    ) -> Result<Vec<u8>, Error> {
        match self {
            ConfiguredSigner::Kosk(signer) => {
                signer.aggregate_signatures(suite, signatures, public_keys)
            }
            ConfiguredSigner::NonKosk(signer) => {
                signer.aggregate_signatures(suite, signatures, public_keys)
            }
        }
    }

    fn verify_aggregated_sig(
        &self,
        suite: Suite<B>,
        public_keys: &[PublicKey<B>],
        aggregated_sig: &[u8],
        message: &[u8],
    ) -> Result<(), Error> {
        match self {
            ConfiguredSigner::Kosk(signer) => {
                signer.verify_aggregated_sig(suite, public_keys, aggregated_sig, message)
            }
            ConfiguredSigner::NonKosk(signer) => {
                signer.verify_aggregated_sig(suite, public_keys, aggregated_sig, message)
            }
        }
    }
}

/// Byte-level multi-signer.
///
/// Decodes keys with its [`KeyGenerator`] and delegates the cryptography to a
/// [`LowLevelSignerBls`] strategy.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "blst")]
/// # {
/// use curve_suites::{BlsMultiSigner, BlstBackend, CurveId, MultiSigConfig, SignerVariant};
///
/// let config = MultiSigConfig::new(CurveId::Bls12_381, SignerVariant::NonKosk).unwrap();
/// let multisigner = BlsMultiSigner::<BlstBackend, _>::from_config(&config).unwrap();
///
/// let (sk, pk) = multisigner.key_generator().generate_pair_default().unwrap();
/// let share = multisigner.create_signature_share(&sk.to_bytes(), b"hello").unwrap();
/// multisigner
///     .verify_signature_share(&pk.to_bytes().unwrap(), b"hello", &share)
///     .unwrap();
/// # }
/// ```
pub struct BlsMultiSigner<B: PairingBackend, L: LowLevelSignerBls<B>> {
    key_gen: KeyGenerator<B>,
    signer: L,
}

impl<B: PairingBackend, L: LowLevelSignerBls<B> + Clone> Clone for BlsMultiSigner<B, L> {
    fn clone(&self) -> Self {
        Self {
            key_gen: self.key_gen,
            signer: self.signer.clone(),
        }
    }
}

impl<B: PairingBackend, L: LowLevelSignerBls<B> + fmt::Debug> fmt::Debug for BlsMultiSigner<B, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlsMultiSigner")
            .field("key_gen", &self.key_gen)
            .field("signer", &self.signer)
            .finish()
    }
}

impl<B: PairingBackend> BlsMultiSigner<B, ConfiguredSigner> {
    /// Builds a multi-signer for `config`, checking that the configured curve
    /// matches the backend `B`.
    pub fn from_config(config: &MultiSigConfig) -> Result<Self, Error> {
        if config.curve != B::CURVE {
            return Err(Error::InvalidConfig(format!(
                "configured curve {:?} does not match backend {}",
                config.curve,
                B::NAME
            )));
        }
        let signer = ConfiguredSigner::from_config(config)?;
        Ok(Self::new(signer, KeyGenerator::default()))
    }
}

impl<B: PairingBackend, L: LowLevelSignerBls<B>> BlsMultiSigner<B, L> {
    pub fn new(signer: L, key_gen: KeyGenerator<B>) -> Self {
        Self { key_gen, signer }
    }

    pub fn key_generator(&self) -> &KeyGenerator<B> {
        &self.key_gen
    }

    pub fn signer(&self) -> &L {
        &self.signer
    }

    /// Signs `message` with the private key encoded in `private_key`.
    pub fn create_signature_share(&self, private_key: &[u8], message: &[u8]) -> Result<Vec<u8>, Error> {
        let private_key = self.convert_bytes_to_private_key(private_key)?;
        self.signer.sign_share(&private_key, message)
    }

    /// Verifies one share against the encoded public key.
    pub fn verify_signature_share(
        &self,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), Error> {
        if signature.is_empty() {
            return Err(Error::NilSignature);
        }
        let public_key = self.convert_bytes_to_pub_key(public_key)?;
        self.signer.verify_sig_share(&public_key, message, signature)
    }

    /// Aggregates `signatures`, produced by `public_keys` in matching order.
    #[instrument(level = "debug", skip_all, fields(curve = B::NAME, signers = public_keys.len()))]
    pub fn aggregate_sigs(&self, public_keys: &[Vec<u8>], signatures: &[Vec<u8>]) -> Result<Vec<u8>, Error> {
        let public_keys = self.convert_bytes_to_pub_keys(public_keys)?;
        self.signer
            .aggregate_signatures(self.key_gen.suite(), signatures, &public_keys)
    }

    /// Verifies an aggregated signature against the encoded signer set.
    #[instrument(level = "debug", skip_all, fields(curve = B::NAME, signers = public_keys.len()))]
    pub fn verify_aggregated_sig(
        &self,
        public_keys: &[Vec<u8>],
        message: &[u8],
        aggregated_sig: &[u8],
    ) -> Result<(), Error> {
        let public_keys = self.convert_bytes_to_pub_keys(public_keys)?;
        self.signer
            .verify_aggregated_sig(self.key_gen.suite(), &public_keys, aggregated_sig, message)
    }

    fn convert_bytes_to_pub_keys(&self, public_keys: &[Vec<u8>]) -> Result<Vec<PublicKey<B>>, Error> {
        public_keys
            .iter()
            .map(|bytes| self.convert_bytes_to_pub_key(bytes))
            .collect()
    }

    fn convert_bytes_to_pub_key(&self, public_key: &[u8]) -> Result<PublicKey<B>, Error> {
        if public_key.is_empty() {
            return Err(Error::EmptyPublicKeyBytes);
        }
        self.key_gen.public_key_from_bytes(public_key)
    }

    fn convert_bytes_to_private_key(&self, private_key: &[u8]) -> Result<PrivateKey<B>, Error> {
        if private_key.is_empty() {
            return Err(Error::InvalidPrivateKey("empty private key bytes"));
        }
        self.key_gen.private_key_from_bytes(private_key)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    #[cfg(feature = "ark_bls12377")]
    use crate::backend::ArkworksBls12377;
    #[cfg(feature = "ark_bn254")]
    use crate::backend::ArkworksBn254;
    #[cfg(feature = "blst")]
    use crate::backend::BlstBackend;
    use crate::multisig::test_support::TEST_MESSAGE;

    fn byte_flow_helper<B: PairingBackend>(variant: SignerVariant) {
        let config = MultiSigConfig::new(B::CURVE, variant).expect("config");
        let multisigner = BlsMultiSigner::<B, _>::from_config(&config).expect("multisigner");
        assert_eq!(multisigner.signer().variant(), variant);

        let mut rng = StdRng::seed_from_u64(43);
        let mut public_keys = Vec::new();
        let mut shares = Vec::new();
        for _ in 0..8 {
            let (sk, pk) = multisigner
                .key_generator()
                .generate_pair(&mut rng)
                .expect("pair");
            let pk_bytes = pk.to_bytes().expect("pk bytes");
            let share = multisigner
                .create_signature_share(&sk.to_bytes(), TEST_MESSAGE)
                .expect("share");
            multisigner
                .verify_signature_share(&pk_bytes, TEST_MESSAGE, &share)
                .expect("share verifies");
            public_keys.push(pk_bytes);
            shares.push(share);
        }

        let aggregated = multisigner
            .aggregate_sigs(&public_keys, &shares)
            .expect("aggregate");
        multisigner
            .verify_aggregated_sig(&public_keys, TEST_MESSAGE, &aggregated)
            .expect("aggregate verifies");
        assert!(matches!(
            multisigner.verify_aggregated_sig(&public_keys[..7], TEST_MESSAGE, &aggregated),
            Err(Error::SigNotValid)
        ));
    }

    fn converter_errors_helper<B: PairingBackend>() {
        let config = MultiSigConfig::new(B::CURVE, SignerVariant::Kosk).expect("config");
        let multisigner = BlsMultiSigner::<B, _>::from_config(&config).expect("multisigner");
        assert!(matches!(
            multisigner.create_signature_share(&[], TEST_MESSAGE),
            Err(Error::InvalidPrivateKey(_))
        ));
        assert!(matches!(
            multisigner.verify_signature_share(&[], TEST_MESSAGE, &[1u8]),
            Err(Error::EmptyPublicKeyBytes)
        ));
        assert!(matches!(
            multisigner.verify_signature_share(&[1u8; 4], TEST_MESSAGE, &[]),
            Err(Error::NilSignature)
        ));
        assert!(matches!(
            multisigner.aggregate_sigs(&[Vec::new()], &[vec![1u8]]),
            Err(Error::EmptyPublicKeyBytes)
        ));
        assert!(matches!(
            multisigner.verify_aggregated_sig(&[vec![7u8; 3]], TEST_MESSAGE, &[1u8]),
            Err(Error::InvalidParam(_))
        ));
    }

    fn run_all<B: PairingBackend>() {
        byte_flow_helper::<B>(SignerVariant::Kosk);
        byte_flow_helper::<B>(SignerVariant::NonKosk);
        converter_errors_helper::<B>();
    }

    #[cfg(feature = "blst")]
    #[test]
    fn multisigner_bls12_381() {
        run_all::<BlstBackend>();
    }

    #[cfg(feature = "ark_bls12377")]
    #[test]
    fn multisigner_bls12_377() {
        run_all::<ArkworksBls12377>();
    }

    #[cfg(feature = "ark_bn254")]
    #[test]
    fn multisigner_bn254() {
        run_all::<ArkworksBn254>();
    }

    #[cfg(all(feature = "blst", feature = "ark_bn254"))]
    #[test]
    fn from_config_rejects_curve_mismatch() {
        let config = MultiSigConfig::new(crate::config::CurveId::Bn254, SignerVariant::Kosk).unwrap();
        assert!(matches!(
            BlsMultiSigner::<BlstBackend, _>::from_config(&config),
            Err(Error::InvalidConfig(_))
        ));
    }
}
