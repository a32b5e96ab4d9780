//! Constant-time check for verification.
//!
//! Compares accepting a valid signature with rejecting a well-formed
//! signature over a different message. Both run the full pipeline, so any
//! gap points at an early exit in the final challenge comparison.
//!
//! Run with: `cargo run --release -p qrypto-timing --bin verify`

use dudect_bencher::rand::Rng;
use dudect_bencher::{ctbench_main, BenchRng, Class, CtRunner};
use once_cell::sync::Lazy;
use qrypto_dsa::ml_dsa_87::{MlDsa87, Signature, VerificationKey};
use qrypto_dsa::Signer;

struct TestData {
    vk: VerificationKey,
    valid: Signature,
    foreign: Signature,
}

const MESSAGE: &[u8] = b"constant-time test message for dudect verification";
const OTHER: &[u8] = b"a different message signed by the same key";

static TEST_DATA: Lazy<TestData> = Lazy::new(|| {
    let (sk, vk) = MlDsa87::keygen(&mut rand::rng()).expect("keygen failed");
    let valid = MlDsa87::sign(&sk, MESSAGE).expect("sign failed");
    let foreign = MlDsa87::sign(&sk, OTHER).expect("sign failed");
    TestData { vk, valid, foreign }
});

const ITERATIONS: usize = 5_000;

fn bench_verify_ml_dsa_87(runner: &mut CtRunner, rng: &mut BenchRng) {
    let data = &*TEST_DATA;

    let mut classes = Vec::with_capacity(ITERATIONS);
    for _ in 0..ITERATIONS {
        if rng.gen::<bool>() {
            classes.push(Class::Left);
        } else {
            classes.push(Class::Right);
        }
    }

    for class in classes {
        let sig = match class {
            Class::Left => &data.valid,
            Class::Right => &data.foreign,
        };
        runner.run_one(class, || {
            let _ = MlDsa87::verify(&data.vk, MESSAGE, sig);
        });
    }
}

ctbench_main!(bench_verify_ml_dsa_87);
