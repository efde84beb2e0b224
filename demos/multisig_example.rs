use rand::{SeedableRng, rngs::StdRng};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use curve_suites::{
    BlsMultiSigner, CurveId, KoskSigner, LowLevelSignerBls, MultiSigConfig, NonKoskSigner,
    PairingBackend, SignerVariant, Suite,
};

const SIGNERS: usize = 20;
const MESSAGE: &[u8] = b"testMessage";

fn run_byte_flow<B: PairingBackend>(
    rng: &mut StdRng,
    variant: SignerVariant,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = MultiSigConfig::new(B::CURVE, variant)?;
    let multisigner = BlsMultiSigner::<B, _>::from_config(&config)?;

    let mut public_keys = Vec::with_capacity(SIGNERS);
    let mut shares = Vec::with_capacity(SIGNERS);
    for _ in 0..SIGNERS {
        let (sk, pk) = multisigner.key_generator().generate_pair(rng)?;
        let pk_bytes = pk.to_bytes()?;
        let share = multisigner.create_signature_share(&sk.to_bytes(), MESSAGE)?;
        multisigner.verify_signature_share(&pk_bytes, MESSAGE, &share)?;
        public_keys.push(pk_bytes);
        shares.push(share);
    }

    let aggregated = multisigner.aggregate_sigs(&public_keys, &shares)?;
    multisigner.verify_aggregated_sig(&public_keys, MESSAGE, &aggregated)?;
    info!(
        curve = B::NAME,
        variant = ?variant,
        signers = SIGNERS,
        aggregated = %hex::encode(&aggregated),
        "aggregated signature verified"
    );
    Ok(())
}

/// A rogue key `x*G2 - Σ pk_honest` lets its owner forge a KOSK aggregate
/// alone; the coefficient weighting of the non-KOSK signer stops it.
fn run_rogue_key<B: PairingBackend>(rng: &mut StdRng) -> Result<(), Box<dyn std::error::Error>> {
    use curve_suites::{CurvePoint, FieldElement, PrivateKey, PublicKey};

    let suite = Suite::<B>::new();
    let (_, honest) = curve_suites::KeyGenerator::new(suite).generate_pair(rng)?;
    let x = B::Scalar::random(rng)?;
    let rogue_point = suite.create_point_for_scalar(&x)?.sub(honest.point());
    let rogue = PublicKey::new(suite, rogue_point);
    let forged = KoskSigner.sign_share(&PrivateKey::new(suite, x), MESSAGE)?;
    let keys = [honest, rogue];

    let kosk = KoskSigner.verify_aggregated_sig(suite, &keys, &forged, MESSAGE);
    let non_kosk = NonKoskSigner::<curve_suites::Blake3Hasher>::default()
        .verify_aggregated_sig(suite, &keys, &forged, MESSAGE);
    info!(
        curve = B::NAME,
        kosk_accepts = kosk.is_ok(),
        non_kosk_accepts = non_kosk.is_ok(),
        "rogue key forgery"
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging; RUST_LOG overrides the default level
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_target(false)
        .with_ansi(false)
        .init();

    let mut rng = StdRng::seed_from_u64(42);
    info!(signers = SIGNERS, "starting multisig example");

    for variant in [SignerVariant::Kosk, SignerVariant::NonKosk] {
        #[cfg(feature = "blst")]
        run_byte_flow::<curve_suites::BlstBackend>(&mut rng, variant)?;
        #[cfg(feature = "ark_bls12377")]
        run_byte_flow::<curve_suites::ArkworksBls12377>(&mut rng, variant)?;
        #[cfg(feature = "ark_bn254")]
        run_byte_flow::<curve_suites::ArkworksBn254>(&mut rng, variant)?;
    }

    #[cfg(feature = "blst")]
    run_rogue_key::<curve_suites::BlstBackend>(&mut rng)?;

    if !cfg!(feature = "blst") {
        info!(curve = ?CurveId::Bls12_381, "backend disabled, skipping rogue key demo");
    }
    Ok(())
}
