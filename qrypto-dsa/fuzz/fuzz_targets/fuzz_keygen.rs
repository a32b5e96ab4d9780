//! Fuzz target for key generation.
//!
//! KeyGen must accept any 32-byte seed, be deterministic, and reject every
//! other seed length with a typed error.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use qrypto_dsa::{Dilithium5, Error, MlDsa87, ParameterSet};

#[derive(Debug, Arbitrary)]
struct KeyGenInput {
    seed: Vec<u8>,
    dilithium5: bool,
}

macro_rules! run {
    ($variant:ident, $seed:expr) => {{
        let seed: &[u8] = $seed;
        match $variant::key_pair_from_seed(seed) {
            Ok(pair) => {
                assert_eq!(seed.len(), 32);
                let again = $variant::key_pair_from_seed(seed).unwrap();
                assert_eq!(pair.verification_key, again.verification_key);
                assert_eq!(
                    pair.signing_key.as_bytes()[..],
                    again.signing_key.as_bytes()[..],
                    "KeyGen should be deterministic"
                );
                let pk_len = pair.verification_key.as_bytes().len();
                let sk_len = pair.signing_key.as_bytes().len();
                assert_eq!(pk_len, <$variant as ParameterSet>::PK_BYTES);
                assert_eq!(sk_len, <$variant as ParameterSet>::SK_BYTES);
                assert_eq!(&pair.seed[..], seed);
            }
            Err(Error::InvalidSeedLength { actual, .. }) => {
                assert_ne!(seed.len(), 32);
                assert_eq!(actual, seed.len());
            }
            Err(e) => panic!("unexpected keygen error: {e}"),
        }
    }};
}

fuzz_target!(|input: KeyGenInput| {
    if input.dilithium5 {
        run!(Dilithium5, &input.seed);
    } else {
        run!(MlDsa87, &input.seed);
    }
});
