// Skip compilation entirely when no family features are enabled.
#![cfg(any(feature = "ml-dsa-87", feature = "dilithium5"))]

//! Property-based tests for both signature families.
//!
//! - Roundtrip: keygen, sign and verify agree; sizes match the family table
//! - Wrong key: a signature does not verify under another key
//! - Tampered message: flipping any byte breaks verification
//! - Randomized signing: fresh randomness still verifies

use proptest::prelude::*;

fn arb_seed() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform32(any::<u8>())
}

/// Messages of 0-256 bytes.
fn arb_message() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
}

macro_rules! dsa_proptest {
    ($mod_name:ident, $variant:ident, $feature:literal, $cases:expr) => {
        #[cfg(feature = $feature)]
        mod $mod_name {
            use super::*;
            use qrypto_dsa::$variant;
            use qrypto_dsa::{Signer, SigningMode};
            use rand::rngs::StdRng;
            use rand::SeedableRng;

            proptest! {
                #![proptest_config(ProptestConfig::with_cases($cases))]

                #[test]
                fn basic_properties(seed in arb_seed(), message in arb_message()) {
                    let mut rng = StdRng::from_seed(seed);
                    let (sk, pk) = $variant::keygen(&mut rng).unwrap();

                    prop_assert_eq!(sk.as_bytes().len(), $variant::SIGNING_KEY_SIZE);
                    prop_assert_eq!(pk.as_bytes().len(), $variant::VERIFICATION_KEY_SIZE);

                    let sig = $variant::sign(&sk, &message).unwrap();
                    prop_assert_eq!(sig.as_bytes().len(), $variant::SIGNATURE_SIZE);

                    prop_assert!($variant::verify(&pk, &message, &sig).is_ok());
                }

                #[test]
                fn deterministic_signing_is_stable(seed in arb_seed(), message in arb_message()) {
                    let pair = $variant::key_pair_from_seed(&seed).unwrap();
                    let sk = &pair.signing_key;
                    let a = $variant::sign_with(sk, &message, None, SigningMode::Deterministic);
                    let b = $variant::sign_with(sk, &message, None, SigningMode::Deterministic);
                    prop_assert_eq!(a.unwrap(), b.unwrap());
                }

                #[test]
                fn wrong_key_fails(
                    seed1 in arb_seed(),
                    seed2 in arb_seed(),
                    message in arb_message(),
                ) {
                    prop_assume!(seed1 != seed2);

                    let pair1 = $variant::key_pair_from_seed(&seed1).unwrap();
                    let pair2 = $variant::key_pair_from_seed(&seed2).unwrap();

                    let sig = $variant::sign(&pair1.signing_key, &message).unwrap();
                    let result = $variant::verify(&pair2.verification_key, &message, &sig);
                    prop_assert!(result.is_err());
                }

                #[test]
                fn tampered_message_fails(
                    seed in arb_seed(),
                    message in arb_message(),
                    flip_pos in 0usize..256,
                ) {
                    prop_assume!(!message.is_empty());

                    let pair = $variant::key_pair_from_seed(&seed).unwrap();
                    let sig = $variant::sign(&pair.signing_key, &message).unwrap();

                    let mut tampered = message.clone();
                    let pos = flip_pos % tampered.len();
                    tampered[pos] ^= 0xFF;

                    let result = $variant::verify(&pair.verification_key, &tampered, &sig);
                    prop_assert!(result.is_err());
                }

                #[test]
                fn randomized_signature_verifies(
                    seed in arb_seed(),
                    rng_seed in arb_seed(),
                    message in arb_message(),
                ) {
                    let pair = $variant::key_pair_from_seed(&seed).unwrap();
                    let mut rng = StdRng::from_seed(rng_seed);
                    let sig = $variant::sign_with(
                        &pair.signing_key,
                        &message,
                        None,
                        SigningMode::Randomized(&mut rng),
                    )
                    .unwrap();
                    let pk = &pair.verification_key;
                    prop_assert!($variant::verify_with(pk, &message, &sig, None));
                }
            }
        }
    };
}

dsa_proptest!(ml_dsa_87_props, MlDsa87, "ml-dsa-87", 16);
dsa_proptest!(dilithium5_props, Dilithium5, "dilithium5", 16);

#[cfg(feature = "ml-dsa-87")]
mod context_binding {
    use super::*;
    use qrypto_dsa::{MlDsa87, SigningMode};

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        /// A signature only verifies under the context it was made with.
        #[test]
        fn context_is_bound(
            seed in arb_seed(),
            message in arb_message(),
            ctx_a in prop::collection::vec(any::<u8>(), 0..=255),
            ctx_b in prop::collection::vec(any::<u8>(), 0..=255),
        ) {
            prop_assume!(ctx_a != ctx_b);

            let pair = MlDsa87::key_pair_from_seed(&seed).unwrap();
            let (sk, pk) = (&pair.signing_key, &pair.verification_key);
            let (ctx_a, ctx_b) = (Some(ctx_a.as_slice()), Some(ctx_b.as_slice()));
            let sig = MlDsa87::sign_with(sk, &message, ctx_a, SigningMode::Deterministic).unwrap();

            prop_assert!(MlDsa87::verify_with(pk, &message, &sig, ctx_a));
            prop_assert!(!MlDsa87::verify_with(pk, &message, &sig, ctx_b));
        }
    }
}
