//! Rogue-key resistant BLS multi-signatures.
//!
//! For a signer set `{pk_1 .. pk_n}` every key gets a coefficient
//! `t_i = H(pk_i || sorted(pk_1 .. pk_n))`, reduced little-endian into the
//! scalar field. The aggregate key is `∑ t_i * pk_i` and the aggregate
//! signature `∑ t_i * σ_i`, so
//! `e(∑ t_i σ_i, G2) = e(H(m), ∑ t_i pk_i)` holds exactly when every share is
//! honest. An attacker cannot choose its key as a function of the others
//! because its own coefficient depends on the final set.
//!
//! The coefficient table for a signer set can be computed once with
//! [`NonKoskSigner::prepare_public_keys`] and reused across verifications.

use rayon::prelude::*;
use tracing::{instrument, trace};

use super::{
    LowLevelSignerBls, check_aggregation_input, check_pairing, check_public_key_point,
    check_public_keys, decode_shares, sign_message, verify_message,
};
use crate::backend::{CurvePoint, FieldElement, PairingBackend};
use crate::errors::Error;
use crate::hashing::{Blake3Hasher, Hasher};
use crate::keys::{PrivateKey, PublicKey};
use crate::suite::Suite;

/// Sorts the compressed key encodings and concatenates them.
///
/// The result does not depend on the order of `public_keys`.
pub fn concat_pub_keys<B: PairingBackend>(public_keys: &[PublicKey<B>]) -> Result<Vec<u8>, Error> {
    check_public_keys(public_keys)?;
    let encodings = encode_keys(public_keys)?;
    Ok(concat_sorted(&encodings))
}

/// Derives the coefficient `t = H(pk || concatenated)` for one key.
pub fn hash_public_key_point<B: PairingBackend, H: Hasher + ?Sized>(
    hasher: &H,
    public_key: &[u8],
    concatenated: &[u8],
) -> Result<B::Scalar, Error> {
    if public_key.is_empty() {
        return Err(Error::EmptyPublicKeyBytes);
    }
    if concatenated.is_empty() {
        return Err(Error::NilPublicKeys);
    }
    let mut input = Vec::with_capacity(public_key.len() + concatenated.len());
    input.extend_from_slice(public_key);
    input.extend_from_slice(concatenated);
    let digest = hasher.compute(&input);
    if digest.len() != hasher.size() {
        return Err(Error::HashSizeMismatch {
            expected: hasher.size(),
            actual: digest.len(),
        });
    }
    let coefficient = B::Scalar::from_le_bytes_mod_order(&digest);
    if coefficient.is_zero() {
        return Err(Error::InvalidScalar("zero public key coefficient"));
    }
    Ok(coefficient)
}

fn encode_keys<B: PairingBackend>(public_keys: &[PublicKey<B>]) -> Result<Vec<Vec<u8>>, Error> {
    public_keys.par_iter().map(|pk| pk.to_bytes()).collect()
}

fn concat_sorted(encodings: &[Vec<u8>]) -> Vec<u8> {
    let mut sorted: Vec<&[u8]> = encodings.iter().map(Vec::as_slice).collect();
    sorted.sort_unstable();
    sorted.concat()
}

/// Per-signer-set coefficient table and weighted keys.
pub struct PreparedPublicKeys<B: PairingBackend> {
    /// `t_i`, aligned with the input key order.
    pub coefficients: Vec<B::Scalar>,
    /// `t_i * pk_i`, aligned with the input key order.
    pub weighted_keys: Vec<B::G2>,
    /// `∑ t_i * pk_i`.
    pub aggregated_key: B::G2,
}

impl<B: PairingBackend> Clone for PreparedPublicKeys<B> {
    fn clone(&self) -> Self {
        Self {
            coefficients: self.coefficients.clone(),
            weighted_keys: self.weighted_keys.clone(),
            aggregated_key: self.aggregated_key,
        }
    }
}

impl<B: PairingBackend> core::fmt::Debug for PreparedPublicKeys<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PreparedPublicKeys")
            .field("signers", &self.coefficients.len())
            .field("aggregated_key", &self.aggregated_key)
            .finish()
    }
}

/// Multi-signer without the knowledge-of-secret-key assumption.
#[derive(Clone, Debug, Default)]
pub struct NonKoskSigner<H: Hasher = Blake3Hasher> {
    hasher: H,
}

impl<H: Hasher> NonKoskSigner<H> {
    pub fn new(hasher: H) -> Self {
        Self { hasher }
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Coefficients `t_i` for `public_keys`, in input order.
    pub fn coefficients<B: PairingBackend>(
        &self,
        public_keys: &[PublicKey<B>],
    ) -> Result<Vec<B::Scalar>, Error> {
        check_public_keys(public_keys)?;
        let encodings = encode_keys(public_keys)?;
        let concatenated = concat_sorted(&encodings);
        encodings
            .par_iter()
            .map(|pk| hash_public_key_point::<B, H>(&self.hasher, pk, &concatenated))
            .collect()
    }

    /// Computes the coefficient table, the weighted keys and their sum.
    #[instrument(level = "debug", skip_all, fields(curve = B::NAME, signers = public_keys.len()))]
    pub fn prepare_public_keys<B: PairingBackend>(
        &self,
        public_keys: &[PublicKey<B>],
    ) -> Result<PreparedPublicKeys<B>, Error> {
        let coefficients = self.coefficients(public_keys)?;
        let weighted_keys: Vec<B::G2> = public_keys
            .par_iter()
            .zip(coefficients.par_iter())
            .map(|(pk, t)| pk.point().mul_scalar(t))
            .collect();
        let aggregated_key = weighted_keys
            .iter()
            .fold(B::G2::identity(), |acc, key| acc.add(key));
        trace!(signers = weighted_keys.len(), "prepared public keys");
        Ok(PreparedPublicKeys {
            coefficients,
            weighted_keys,
            aggregated_key,
        })
    }

    /// Verifies an aggregated signature against a prepared signer set.
    pub fn verify_prepared<B: PairingBackend>(
        &self,
        suite: Suite<B>,
        prepared: &PreparedPublicKeys<B>,
        aggregated_sig: &[u8],
        message: &[u8],
    ) -> Result<(), Error> {
        if message.is_empty() {
            return Err(Error::NilMessage);
        }
        if aggregated_sig.is_empty() {
            return Err(Error::NilSignature);
        }
        if prepared.coefficients.is_empty() {
            return Err(Error::NilPublicKeys);
        }
        check_public_key_point::<B>(&prepared.aggregated_key)?;
        let signature = suite.decode_signature(aggregated_sig)?;
        let hashed = suite.hash_to_signature_group(message)?;
        check_pairing::<B>(&signature, &hashed, &prepared.aggregated_key)
    }
}

impl<B: PairingBackend, H: Hasher> LowLevelSignerBls<B> for NonKoskSigner<H> {
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
        let coefficients = self.coefficients(public_keys)?;
        let aggregated = B::G1::msm(&shares, &coefficients)?;
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
        let prepared = self.prepare_public_keys(public_keys)?;
        self.verify_prepared(suite, &prepared, aggregated_sig, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(feature = "ark_bls12377")]
    use crate::backend::ArkworksBls12377;
    #[cfg(feature = "ark_bn254")]
    use crate::backend::ArkworksBn254;
    #[cfg(feature = "blst")]
    use crate::backend::BlstBackend;
    use crate::multisig::KoskSigner;
    use crate::multisig::test_support::{TEST_MESSAGE, create_keys, create_sig_shares};
    use crate::suite::tests::{non_subgroup_g1_bytes, non_subgroup_public_key};

    fn default_signer() -> NonKoskSigner {
        NonKoskSigner::default()
    }

    /// Hasher returning fewer bytes than it advertises.
    struct ShortHasher;

    impl Hasher for ShortHasher {
        fn compute(&self, data: &[u8]) -> Vec<u8> {
            blake3::hash(data).as_bytes()[..8].to_vec()
        }

        fn size(&self) -> usize {
            16
        }
    }

    fn aggregate_and_verify_helper<B: PairingBackend>() {
        let signer = default_signer();
        let suite = Suite::<B>::new();
        let (public_keys, shares) = create_sig_shares::<B, _>(&signer, 20, TEST_MESSAGE);

        let aggregated = signer
            .aggregate_signatures(suite, &shares, &public_keys)
            .expect("aggregate");
        signer
            .verify_aggregated_sig(suite, &public_keys, &aggregated, TEST_MESSAGE)
            .expect("aggregate verifies");

        let prepared = signer.prepare_public_keys(&public_keys).expect("prepare");
        assert_eq!(prepared.coefficients.len(), 20);
        signer
            .verify_prepared(suite, &prepared, &aggregated, TEST_MESSAGE)
            .expect("prepared keys verify");
        assert!(matches!(
            signer.verify_prepared(suite, &prepared, &aggregated, b"otherMessage"),
            Err(Error::SigNotValid)
        ));

        let (_, unrelated) = create_keys::<B>(1, 77);
        let mut substituted = public_keys.clone();
        substituted[7] = unrelated[0].clone();
        assert!(matches!(
            signer.verify_aggregated_sig(suite, &substituted, &aggregated, TEST_MESSAGE),
            Err(Error::SigNotValid)
        ));

        // A plain sum of the shares is not a valid non-KOSK aggregate.
        let plain = KoskSigner
            .aggregate_signatures(suite, &shares, &public_keys)
            .expect("plain sum");
        assert!(matches!(
            signer.verify_aggregated_sig(suite, &public_keys, &plain, TEST_MESSAGE),
            Err(Error::SigNotValid)
        ));
    }

    fn coefficient_helper<B: PairingBackend>() {
        let signer = default_signer();
        let (_, public_keys) = create_keys::<B>(5, 53);
        let mut shuffled = public_keys.clone();
        shuffled.rotate_left(2);

        assert_eq!(
            concat_pub_keys(&public_keys).unwrap(),
            concat_pub_keys(&shuffled).unwrap(),
            "concatenation must not depend on input order"
        );

        let coefficients = signer.coefficients(&public_keys).unwrap();
        let rotated = signer.coefficients(&shuffled).unwrap();
        for (idx, t) in coefficients.iter().enumerate() {
            assert_eq!(*t, rotated[(idx + 3) % 5], "coefficients follow their key");
        }

        let prepared = signer.prepare_public_keys(&public_keys).unwrap();
        let expected = public_keys
            .iter()
            .zip(coefficients.iter())
            .fold(B::G2::identity(), |acc, (pk, t)| acc.add(&pk.point().mul_scalar(t)));
        assert_eq!(prepared.aggregated_key, expected);
        assert_eq!(prepared.weighted_keys.len(), 5);

        let concatenated = concat_pub_keys(&public_keys).unwrap();
        let pk_bytes = public_keys[0].to_bytes().unwrap();
        let direct = hash_public_key_point::<B, _>(signer.hasher(), &pk_bytes, &concatenated).unwrap();
        assert_eq!(direct, coefficients[0]);
        assert!(matches!(
            hash_public_key_point::<B, _>(&ShortHasher, &pk_bytes, &concatenated),
            Err(Error::HashSizeMismatch {
                expected: 16,
                actual: 8
            })
        ));
        assert!(matches!(
            hash_public_key_point::<B, _>(signer.hasher(), &[], &concatenated),
            Err(Error::EmptyPublicKeyBytes)
        ));
    }

    /// The attacker publishes `x*G2 - ∑ honest` and signs alone with `x`.
    fn rogue_key_helper<B: PairingBackend>() {
        let suite = Suite::<B>::new();
        let (_, honest_public) = create_keys::<B>(3, 61);

        let x = B::Scalar::from_u64(123_456_789);
        let honest_sum = honest_public
            .iter()
            .fold(B::G2::identity(), |acc, pk| acc.add(pk.point()));
        let rogue_point = B::G2::generator().mul_scalar(&x).sub(&honest_sum);
        let mut public_keys = honest_public.clone();
        public_keys.push(PublicKey::new(suite, rogue_point));

        let forged = suite
            .hash_to_signature_group(TEST_MESSAGE)
            .unwrap()
            .mul_scalar(&x)
            .to_compressed()
            .unwrap();

        KoskSigner
            .verify_aggregated_sig(suite, &public_keys, &forged, TEST_MESSAGE)
            .expect("rogue key forges a KOSK aggregate");
        assert!(matches!(
            default_signer().verify_aggregated_sig(suite, &public_keys, &forged, TEST_MESSAGE),
            Err(Error::SigNotValid)
        ));
    }

    fn invalid_input_helper<B: PairingBackend>() {
        let signer = default_signer();
        let suite = Suite::<B>::new();
        let (public_keys, shares) = create_sig_shares::<B, _>(&signer, 4, TEST_MESSAGE);
        assert!(matches!(
            signer.aggregate_signatures(suite, &shares, &public_keys[..3]),
            Err(Error::LenMismatch {
                signatures: 4,
                public_keys: 3
            })
        ));
        assert!(matches!(
            signer.prepare_public_keys::<B>(&[]),
            Err(Error::NilPublicKeys)
        ));
        let aggregated = signer
            .aggregate_signatures(suite, &shares, &public_keys)
            .unwrap();
        assert!(matches!(
            signer.verify_aggregated_sig(suite, &public_keys, &aggregated, b""),
            Err(Error::NilMessage)
        ));
        assert!(matches!(
            signer.verify_aggregated_sig(suite, &public_keys, &aggregated[1..], TEST_MESSAGE),
            Err(Error::InvalidParam(_))
        ));
    }

    fn invalid_point_helper<B: PairingBackend>(g2_lsb_index: usize, g1_lsb_index: Option<usize>) {
        let signer = default_signer();
        let suite = Suite::<B>::new();
        let (public_keys, shares) = create_sig_shares::<B, _>(&signer, 4, TEST_MESSAGE);
        let aggregated = signer
            .aggregate_signatures(suite, &shares, &public_keys)
            .expect("aggregate");

        let rogue = non_subgroup_public_key::<B>(g2_lsb_index);
        assert!(matches!(
            signer.verify_sig_share(&rogue, TEST_MESSAGE, &shares[0]),
            Err(Error::InvalidPublicKey(_))
        ));
        let mut keys = public_keys.clone();
        keys[0] = rogue.clone();
        assert!(matches!(
            signer.prepare_public_keys(&keys),
            Err(Error::InvalidPublicKey(_))
        ));
        assert!(matches!(
            signer.aggregate_signatures(suite, &shares, &keys),
            Err(Error::InvalidPublicKey(_))
        ));
        assert!(matches!(
            signer.verify_aggregated_sig(suite, &keys, &aggregated, TEST_MESSAGE),
            Err(Error::InvalidPublicKey(_))
        ));

        let mut prepared = signer.prepare_public_keys(&public_keys).expect("prepare");
        prepared.aggregated_key = *rogue.point();
        assert!(matches!(
            signer.verify_prepared(suite, &prepared, &aggregated, TEST_MESSAGE),
            Err(Error::InvalidPublicKey(_))
        ));

        let mut bad_shares = shares.clone();
        bad_shares[3] = B::G1::identity().to_compressed().unwrap();
        assert!(matches!(
            signer.aggregate_signatures(suite, &bad_shares, &public_keys),
            Err(Error::InvalidPoint(_))
        ));
        if let Some(index) = g1_lsb_index {
            bad_shares[3] = non_subgroup_g1_bytes::<B>(index);
            assert!(matches!(
                signer.aggregate_signatures(suite, &bad_shares, &public_keys),
                Err(Error::InvalidPoint(_))
            ));
            assert!(matches!(
                signer.verify_aggregated_sig(suite, &public_keys, &bad_shares[3], TEST_MESSAGE),
                Err(Error::InvalidPoint(_))
            ));
        }
    }

    fn run_all<B: PairingBackend>(g2_lsb_index: usize, g1_lsb_index: Option<usize>) {
        aggregate_and_verify_helper::<B>();
        coefficient_helper::<B>();
        rogue_key_helper::<B>();
        invalid_input_helper::<B>();
        invalid_point_helper::<B>(g2_lsb_index, g1_lsb_index);
    }

    #[cfg(feature = "blst")]
    #[test]
    fn non_kosk_bls12_381() {
        run_all::<BlstBackend>(95, Some(47));
    }

    #[cfg(feature = "ark_bls12377")]
    #[test]
    fn non_kosk_bls12_377() {
        run_all::<ArkworksBls12377>(0, Some(0));
    }

    #[cfg(feature = "ark_bn254")]
    #[test]
    fn non_kosk_bn254() {
        run_all::<ArkworksBn254>(0, None);
    }
}
