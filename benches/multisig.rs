use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use curve_suites::{
    KeyGenerator, LowLevelSignerBls, NonKoskSigner, PairingBackend, PublicKey, Suite,
};
use rand::{SeedableRng, rngs::StdRng};

const SIGNERS: usize = 400;
const MESSAGE: &[u8] = b"testMessage";

struct Fixture<B: PairingBackend> {
    public_keys: Vec<PublicKey<B>>,
    aggregated: Vec<u8>,
}

fn fixture<B: PairingBackend>(signer: &NonKoskSigner) -> Fixture<B> {
    let keygen = KeyGenerator::<B>::default();
    let mut rng = StdRng::seed_from_u64(42);
    let (private_keys, public_keys): (Vec<_>, Vec<_>) = (0..SIGNERS)
        .map(|_| keygen.generate_pair(&mut rng).unwrap())
        .unzip();
    let shares: Vec<Vec<u8>> = private_keys
        .iter()
        .map(|sk| signer.sign_share(sk, MESSAGE).unwrap())
        .collect();
    let aggregated = signer
        .aggregate_signatures(keygen.suite(), &shares, &public_keys)
        .unwrap();
    Fixture {
        public_keys,
        aggregated,
    }
}

fn bench_curve<B: PairingBackend>(c: &mut Criterion) {
    let signer: NonKoskSigner = NonKoskSigner::default();
    let suite = Suite::<B>::new();
    let fixture = fixture::<B>(&signer);
    let prepared = signer.prepare_public_keys(&fixture.public_keys).unwrap();

    let mut group = c.benchmark_group(format!("{}/non_kosk", B::NAME));
    group.sample_size(10);

    group.bench_with_input(
        BenchmarkId::new("prepare_public_keys", SIGNERS),
        &fixture.public_keys,
        |b, keys| {
            b.iter(|| {
                let prepared = signer.prepare_public_keys(black_box(keys)).unwrap();
                black_box(prepared);
            });
        },
    );

    group.bench_with_input(
        BenchmarkId::new("verify_aggregated_sig", SIGNERS),
        &fixture,
        |b, fixture| {
            b.iter(|| {
                signer
                    .verify_aggregated_sig(
                        suite,
                        black_box(&fixture.public_keys),
                        black_box(&fixture.aggregated),
                        MESSAGE,
                    )
                    .unwrap();
            });
        },
    );

    group.bench_with_input(
        BenchmarkId::new("verify_prepared", SIGNERS),
        &fixture,
        |b, fixture| {
            b.iter(|| {
                signer
                    .verify_prepared(
                        suite,
                        black_box(&prepared),
                        black_box(&fixture.aggregated),
                        MESSAGE,
                    )
                    .unwrap();
            });
        },
    );

    group.finish();
}

fn criterion_benches(c: &mut Criterion) {
    #[cfg(feature = "blst")]
    bench_curve::<curve_suites::BlstBackend>(c);
    #[cfg(feature = "ark_bls12377")]
    bench_curve::<curve_suites::ArkworksBls12377>(c);
    #[cfg(feature = "ark_bn254")]
    bench_curve::<curve_suites::ArkworksBn254>(c);
}

criterion_group!(benches, criterion_benches);
criterion_main!(benches);
