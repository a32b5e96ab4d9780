//! Constant-time check for deterministic signing.
//!
//! Two secret keys sign the same message; timing must not depend on which
//! key is used. Rejection sampling makes per-message timing vary, so the
//! message is fixed and only the key changes.
//!
//! Run with: `cargo run --release -p qrypto-timing --bin sign`

use dudect_bencher::rand::Rng;
use dudect_bencher::{ctbench_main, BenchRng, Class, CtRunner};
use once_cell::sync::Lazy;
use qrypto_dsa::dilithium5::{self, Dilithium5};
use qrypto_dsa::ml_dsa_87::{self, MlDsa87};
use qrypto_dsa::Signer;

struct TestData {
    ml_left: ml_dsa_87::SigningKey,
    ml_right: ml_dsa_87::SigningKey,
    d5_left: dilithium5::SigningKey,
    d5_right: dilithium5::SigningKey,
}

static TEST_DATA: Lazy<TestData> = Lazy::new(|| {
    let (ml_left, _) = MlDsa87::keygen(&mut rand::rng()).expect("keygen failed");
    let (ml_right, _) = MlDsa87::keygen(&mut rand::rng()).expect("keygen failed");
    let (d5_left, _) = Dilithium5::keygen(&mut rand::rng()).expect("keygen failed");
    let (d5_right, _) = Dilithium5::keygen(&mut rand::rng()).expect("keygen failed");
    TestData {
        ml_left,
        ml_right,
        d5_left,
        d5_right,
    }
});

const MESSAGE: &[u8] = b"constant-time test message for dudect verification";

/// Signing is slow, so batches are small.
const ITERATIONS: usize = 1_000;

fn classes(rng: &mut BenchRng) -> Vec<Class> {
    (0..ITERATIONS)
        .map(|_| if rng.gen::<bool>() { Class::Left } else { Class::Right })
        .collect()
}

fn bench_sign_ml_dsa_87(runner: &mut CtRunner, rng: &mut BenchRng) {
    let data = &*TEST_DATA;
    for class in classes(rng) {
        let sk = match class {
            Class::Left => &data.ml_left,
            Class::Right => &data.ml_right,
        };
        runner.run_one(class, || {
            let _ = MlDsa87::sign(sk, MESSAGE);
        });
    }
}

fn bench_sign_dilithium5(runner: &mut CtRunner, rng: &mut BenchRng) {
    let data = &*TEST_DATA;
    for class in classes(rng) {
        let sk = match class {
            Class::Left => &data.d5_left,
            Class::Right => &data.d5_right,
        };
        runner.run_one(class, || {
            let _ = Dilithium5::sign(sk, MESSAGE);
        });
    }
}

ctbench_main!(bench_sign_ml_dsa_87, bench_sign_dilithium5);
