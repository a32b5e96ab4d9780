//! Signature benchmarks for both level-5 families using Criterion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qrypto_core::Signer;
use qrypto_dsa::{Dilithium5, MlDsa87, SigningMode};
use rand::rng;

/// Test message for signing benchmarks.
const TEST_MESSAGE: &[u8] = b"The quick brown fox jumps over the lazy dog";

fn bench_keygen(c: &mut Criterion) {
    let mut group = c.benchmark_group("KeyGen");
    group.throughput(Throughput::Elements(1));

    group.bench_function("ML-DSA-87", |b| {
        b.iter(|| black_box(MlDsa87::keygen(&mut rng()).unwrap()))
    });
    group.bench_function("Dilithium5", |b| {
        b.iter(|| black_box(Dilithium5::keygen(&mut rng()).unwrap()))
    });

    group.finish();
}

fn bench_sign(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sign");
    group.throughput(Throughput::Elements(1));

    let ml = MlDsa87::key_pair_from_seed(&[1u8; 32]).unwrap();
    let d5 = Dilithium5::key_pair_from_seed(&[1u8; 32]).unwrap();

    group.bench_function("ML-DSA-87/deterministic", |b| {
        b.iter(|| black_box(MlDsa87::sign(&ml.signing_key, TEST_MESSAGE).unwrap()))
    });
    group.bench_function("ML-DSA-87/randomized", |b| {
        let mut rng = rng();
        b.iter(|| {
            black_box(
                MlDsa87::sign_with(
                    &ml.signing_key,
                    TEST_MESSAGE,
                    None,
                    SigningMode::Randomized(&mut rng),
                )
                .unwrap(),
            )
        })
    });
    group.bench_function("Dilithium5/deterministic", |b| {
        b.iter(|| black_box(Dilithium5::sign(&d5.signing_key, TEST_MESSAGE).unwrap()))
    });
    group.bench_function("Dilithium5/randomized", |b| {
        let mut rng = rng();
        b.iter(|| {
            black_box(
                Dilithium5::sign_with(
                    &d5.signing_key,
                    TEST_MESSAGE,
                    None,
                    SigningMode::Randomized(&mut rng),
                )
                .unwrap(),
            )
        })
    });

    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("Verify");
    group.throughput(Throughput::Elements(1));

    let (sk_ml, vk_ml) = MlDsa87::keygen(&mut rng()).unwrap();
    let sig_ml = MlDsa87::sign(&sk_ml, TEST_MESSAGE).unwrap();
    let (sk_d5, vk_d5) = Dilithium5::keygen(&mut rng()).unwrap();
    let sig_d5 = Dilithium5::sign(&sk_d5, TEST_MESSAGE).unwrap();

    group.bench_function("ML-DSA-87", |b| {
        b.iter(|| {
            MlDsa87::verify(
                black_box(&vk_ml),
                black_box(TEST_MESSAGE),
                black_box(&sig_ml),
            )
            .unwrap()
        })
    });
    group.bench_function("Dilithium5", |b| {
        b.iter(|| {
            Dilithium5::verify(
                black_box(&vk_d5),
                black_box(TEST_MESSAGE),
                black_box(&sig_d5),
            )
            .unwrap()
        })
    });

    group.finish();
}

/// Signing cost as the message grows; hashing the message is the only
/// size-dependent step.
fn bench_message_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("ML-DSA-87 Sign by message size");
    let pair = MlDsa87::key_pair_from_seed(&[2u8; 32]).unwrap();

    for size in [64usize, 4 * 1024, 64 * 1024, 1024 * 1024] {
        let message = vec![0x5au8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &message, |b, m| {
            b.iter(|| black_box(MlDsa87::sign(&pair.signing_key, m).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_keygen,
    bench_sign,
    bench_verify,
    bench_message_size,
);

criterion_main!(benches);
