//! Fuzz target for attached signatures.
//!
//! `open_attached` must never panic on arbitrary input, and must return the
//! original message for a signed blob produced by `sign_attached`.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use qrypto_dsa::{Dilithium5, MlDsa87, SigningMode};

#[derive(Debug, Arbitrary)]
struct OpenInput {
    seed: [u8; 32],
    message: Vec<u8>,
    junk: Vec<u8>,
    dilithium5: bool,
}

macro_rules! run {
    ($variant:ident, $input:expr) => {{
        let input = $input;
        let pair = $variant::key_pair_from_seed(&input.seed).unwrap();
        let pk = pair.verification_key.as_bytes();

        let _ = $variant::open_attached(&input.junk, pk, None);

        let sk = &pair.signing_key;
        let signed = $variant::sign_attached(sk, &input.message, None, SigningMode::Deterministic);
        let signed = signed.unwrap();
        assert_eq!(
            $variant::open_attached(&signed, pk, None).as_deref(),
            Some(&input.message[..])
        );
    }};
}

fuzz_target!(|input: OpenInput| {
    if input.message.len() > 10000 || input.junk.len() > 20000 {
        return;
    }

    if input.dilithium5 {
        run!(Dilithium5, &input);
    } else {
        run!(MlDsa87, &input);
    }
});
