//! Fuzz target for the keygen -> sign -> verify flow.
//!
//! Checks that valid signatures verify, that deterministic signing is
//! reproducible, and that randomized signing driven by fuzzer bytes still
//! verifies.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand::rngs::StdRng;
use rand::SeedableRng;

use qrypto_dsa::{Dilithium5, MlDsa87, SigningMode};

#[derive(Debug, Arbitrary)]
struct RoundtripInput {
    seed: [u8; 32],
    rng_seed: [u8; 32],
    message: Vec<u8>,
    context: Option<Vec<u8>>,
    dilithium5: bool,
}

macro_rules! run {
    ($variant:ident, $input:expr, $context:expr) => {{
        let input = $input;
        let context: Option<&[u8]> = $context;
        let pair = $variant::key_pair_from_seed(&input.seed).unwrap();

        let det = || SigningMode::Deterministic;
        let sig = $variant::sign_with(&pair.signing_key, &input.message, context, det()).unwrap();
        assert!(
            $variant::verify_with(&pair.verification_key, &input.message, &sig, context),
            "Roundtrip failed: valid signature rejected"
        );

        let again = $variant::key_pair_from_seed(&input.seed).unwrap();
        assert_eq!(
            pair.verification_key, again.verification_key,
            "KeyGen should be deterministic"
        );
        let sig2 = $variant::sign_with(&again.signing_key, &input.message, context, det()).unwrap();
        assert_eq!(sig, sig2, "Deterministic signing should be reproducible");

        let mut rng = StdRng::from_seed(input.rng_seed);
        if let Ok(sig3) = $variant::sign_with(
            &pair.signing_key,
            &input.message,
            context,
            SigningMode::Randomized(&mut rng),
        ) {
            assert!($variant::verify_with(&pair.verification_key, &input.message, &sig3, context));
        }
    }};
}

fuzz_target!(|input: RoundtripInput| {
    if input.message.len() > 10000 {
        return;
    }

    if input.dilithium5 {
        run!(Dilithium5, &input, None);
    } else {
        let context = input.context.as_deref().filter(|c| c.len() <= 255);
        run!(MlDsa87, &input, context);
    }
});
