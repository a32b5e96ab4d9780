// Skip compilation entirely when no family features are enabled.
#![cfg(any(feature = "ml-dsa-87", feature = "dilithium5"))]

//! Rejection paths: corrupted signatures, keys and messages, malformed hint
//! blocks, out-of-range lengths and the attached-signature format.

macro_rules! negative_suite {
    ($mod_name:ident, $variant:ident, $feature:literal) => {
        #[cfg(feature = $feature)]
        mod $mod_name {
            use qrypto_dsa::$variant;
            use qrypto_dsa::params::common::POLY_Z_PACKED_BYTES;
            use qrypto_dsa::{Error, ParameterSet, SigningMode};

            const MESSAGE: &[u8] = b"negative path message";
            const C_TILDE: usize = <$variant as ParameterSet>::C_TILDE_BYTES;
            const L: usize = <$variant as ParameterSet>::L;
            const K: usize = <$variant as ParameterSet>::K;
            const OMEGA: usize = <$variant as ParameterSet>::OMEGA;
            const HINT_OFFSET: usize = C_TILDE + L * POLY_Z_PACKED_BYTES;

            fn fixture() -> (Vec<u8>, Vec<u8>) {
                let pair = $variant::key_pair_from_seed(&[0x42u8; 32]).unwrap();
                let sig = $variant::sign_with(
                    &pair.signing_key,
                    MESSAGE,
                    None,
                    SigningMode::Deterministic,
                )
                .unwrap();
                (
                    pair.verification_key.as_bytes().to_vec(),
                    sig.as_bytes().to_vec(),
                )
            }

            fn verifies(pk: &[u8], msg: &[u8], sig: &[u8]) -> bool {
                $variant::verify_bytes(pk, msg, sig, None)
            }

            #[test]
            fn fixture_is_valid() {
                let (pk, sig) = fixture();
                assert_eq!(sig.len(), <$variant as ParameterSet>::SIG_BYTES);
                assert!(verifies(&pk, MESSAGE, &sig));
            }

            #[test]
            fn signature_bit_flips_are_rejected() {
                let (pk, sig) = fixture();
                // One position per region: challenge, each z block, hints.
                let mut positions = vec![0, C_TILDE - 1];
                positions.extend((0..L).map(|i| C_TILDE + i * POLY_Z_PACKED_BYTES + 7));
                positions.push(sig.len() - 1);

                for pos in positions {
                    for bit in [0u8, 3, 7] {
                        let mut bad = sig.clone();
                        bad[pos] ^= 1 << bit;
                        assert!(!verifies(&pk, MESSAGE, &bad), "flip at {pos}:{bit} accepted");
                    }
                }
            }

            #[test]
            fn public_key_bit_flips_are_rejected() {
                let (pk, sig) = fixture();
                for pos in [0, 31, 32, 1000, pk.len() - 1] {
                    let mut bad = pk.clone();
                    bad[pos] ^= 0x01;
                    assert!(!verifies(&bad, MESSAGE, &sig), "pk flip at {pos} accepted");
                }
            }

            #[test]
            fn message_changes_are_rejected() {
                let (pk, sig) = fixture();
                let mut msg = MESSAGE.to_vec();
                msg[0] ^= 0x80;
                assert!(!verifies(&pk, &msg, &sig));
                assert!(!verifies(&pk, &MESSAGE[1..], &sig));
                assert!(!verifies(&pk, b"", &sig));
            }

            #[test]
            fn truncated_or_extended_inputs_are_rejected() {
                let (pk, sig) = fixture();
                assert!(!verifies(&pk, MESSAGE, &sig[..sig.len() - 1]));
                assert!(!verifies(&pk[..pk.len() - 1], MESSAGE, &sig));
                assert!(!verifies(&pk, MESSAGE, &[]));
                assert!(!verifies(&[], MESSAGE, &sig));

                let mut long = sig.clone();
                long.push(0);
                assert!(!verifies(&pk, MESSAGE, &long));
            }

            #[test]
            fn oversized_z_is_rejected() {
                let (pk, mut sig) = fixture();
                // 0xFFFFF decodes to 1 - 2^19, beyond gamma1 - beta.
                sig[C_TILDE] = 0xFF;
                sig[C_TILDE + 1] = 0xFF;
                sig[C_TILDE + 2] |= 0x0F;
                assert!(!verifies(&pk, MESSAGE, &sig));
            }

            #[test]
            fn hint_count_above_omega_is_rejected() {
                let (pk, mut sig) = fixture();
                sig[HINT_OFFSET + OMEGA + K - 1] = (OMEGA + 1) as u8;
                assert!(!verifies(&pk, MESSAGE, &sig));
            }

            #[test]
            fn decreasing_hint_counts_are_rejected() {
                let (pk, mut sig) = fixture();
                let counts = HINT_OFFSET + OMEGA;
                let total = sig[counts + K - 1];
                assert!(total > 0, "fixture signature carries no hints");
                // Claim every hint in the first polynomial, then fewer in the second.
                sig[counts] = total;
                sig[counts + 1] = total - 1;
                assert!(!verifies(&pk, MESSAGE, &sig));
            }

            #[test]
            fn unsorted_hint_positions_are_rejected() {
                let (pk, sig) = fixture();
                let counts = HINT_OFFSET + OMEGA;
                let mut start = 0usize;
                let mut tested = false;
                for i in 0..K {
                    let end = sig[counts + i] as usize;
                    if end - start >= 2 {
                        let mut bad = sig.clone();
                        bad.swap(HINT_OFFSET + start, HINT_OFFSET + start + 1);
                        assert!(
                            !verifies(&pk, MESSAGE, &bad),
                            "swapped hints in poly {i} accepted"
                        );

                        let mut repeated = sig.clone();
                        repeated[HINT_OFFSET + start + 1] = repeated[HINT_OFFSET + start];
                        assert!(
                            !verifies(&pk, MESSAGE, &repeated),
                            "repeated hint in poly {i} accepted"
                        );
                        tested = true;
                    }
                    start = end;
                }
                assert!(tested, "no polynomial with two hints in the fixture");
            }

            #[test]
            fn dirty_hint_padding_is_rejected() {
                let (pk, mut sig) = fixture();
                let total = sig[HINT_OFFSET + OMEGA + K - 1] as usize;
                assert!(total < OMEGA);
                sig[HINT_OFFSET + OMEGA - 1] = 1;
                assert!(!verifies(&pk, MESSAGE, &sig));
            }

            #[test]
            fn wrong_lengths_are_typed_errors() {
                assert_eq!(
                    $variant::key_pair_from_seed(&[0u8; 31]).err(),
                    Some(Error::InvalidSeedLength { expected: 32, actual: 31 })
                );
                assert!(matches!(
                    $variant::key_pair_from_seed(&[0u8; 33]),
                    Err(Error::InvalidSeedLength { actual: 33, .. })
                ));
                assert!(matches!(
                    qrypto_dsa::$mod_name::SigningKey::from_bytes(&[0u8; 10]),
                    Err(Error::InvalidKeyLength { actual: 10, .. })
                ));
                assert!(matches!(
                    qrypto_dsa::$mod_name::VerificationKey::from_bytes(&[0u8; 10]),
                    Err(Error::InvalidKeyLength { actual: 10, .. })
                ));
                assert!(matches!(
                    qrypto_dsa::$mod_name::Signature::from_bytes(&[0u8; 10]),
                    Err(Error::InvalidSignatureLength { actual: 10, .. })
                ));
            }

            #[test]
            fn large_message_roundtrip() {
                let pair = $variant::key_pair_from_seed(&[7u8; 32]).unwrap();
                let message = vec![0xA5u8; 1 << 20];
                let sig = $variant::sign_with(
                    &pair.signing_key,
                    &message,
                    None,
                    SigningMode::Deterministic,
                )
                .unwrap();
                assert!($variant::verify_with(&pair.verification_key, &message, &sig, None));

                let mut tail = message.clone();
                *tail.last_mut().unwrap() ^= 1;
                assert!(!$variant::verify_with(&pair.verification_key, &tail, &sig, None));
            }

            #[test]
            fn attached_open() {
                let pair = $variant::key_pair_from_seed(&[9u8; 32]).unwrap();
                let pk = pair.verification_key.as_bytes();
                let signed = $variant::sign_attached(
                    &pair.signing_key,
                    MESSAGE,
                    None,
                    SigningMode::Deterministic,
                )
                .unwrap();
                assert_eq!(signed.len(), <$variant as ParameterSet>::SIG_BYTES + MESSAGE.len());
                assert_eq!($variant::open_attached(&signed, pk, None).as_deref(), Some(MESSAGE));

                assert!($variant::open_attached(&signed[..10], pk, None).is_none());
                assert!($variant::open_attached(&[], pk, None).is_none());

                let mut tampered = signed.clone();
                *tampered.last_mut().unwrap() ^= 1;
                assert!($variant::open_attached(&tampered, pk, None).is_none());
            }

            #[test]
            fn attached_empty_message() {
                let pair = $variant::key_pair_from_seed(&[3u8; 32]).unwrap();
                let signed = $variant::sign_attached(
                    &pair.signing_key,
                    b"",
                    None,
                    SigningMode::Deterministic,
                )
                .unwrap();
                assert_eq!(signed.len(), <$variant as ParameterSet>::SIG_BYTES);
                assert_eq!(
                    $variant::open_attached(&signed, pair.verification_key.as_bytes(), None),
                    Some(Vec::new())
                );
            }
        }
    };
}

negative_suite!(ml_dsa_87, MlDsa87, "ml-dsa-87");
negative_suite!(dilithium5, Dilithium5, "dilithium5");

#[cfg(feature = "ml-dsa-87")]
mod ml_dsa_87_context {
    use qrypto_dsa::{Error, MlDsa87, SigningMode};

    const DET: SigningMode<'static> = SigningMode::Deterministic;

    #[test]
    fn context_longer_than_255_bytes() {
        let pair = MlDsa87::key_pair_from_seed(&[1u8; 32]).unwrap();
        let (sk, pk) = (&pair.signing_key, &pair.verification_key);
        let ctx = [0u8; 256];
        let err = MlDsa87::sign_with(sk, b"msg", Some(&ctx[..]), DET).unwrap_err();
        assert_eq!(err, Error::ContextTooLong { max: 255, actual: 256 });

        let sig = MlDsa87::sign_with(sk, b"msg", Some(&ctx[..255]), DET).unwrap();
        assert!(MlDsa87::verify_with(pk, b"msg", &sig, Some(&ctx[..255])));
        assert!(!MlDsa87::verify_with(pk, b"msg", &sig, Some(&ctx[..])));
    }

    #[test]
    fn explicit_context_overrides_default() {
        let pair = MlDsa87::key_pair_from_seed(&[2u8; 32]).unwrap();
        let (sk, pk) = (&pair.signing_key, &pair.verification_key);
        let sig = MlDsa87::sign_with(sk, b"msg", Some(&b"other"[..]), DET).unwrap();
        assert!(MlDsa87::verify_with(pk, b"msg", &sig, Some(&b"other"[..])));
        assert!(!MlDsa87::verify_with(pk, b"msg", &sig, None));
        assert!(!MlDsa87::verify_with(pk, b"msg", &sig, Some(&b""[..])));
    }
}

#[cfg(feature = "dilithium5")]
mod dilithium5_context {
    use qrypto_dsa::{Dilithium5, Error, SigningMode};

    const DET: SigningMode<'static> = SigningMode::Deterministic;

    #[test]
    fn non_empty_context_is_unsupported() {
        let pair = Dilithium5::key_pair_from_seed(&[1u8; 32]).unwrap();
        let (sk, pk) = (&pair.signing_key, &pair.verification_key);
        let err = Dilithium5::sign_with(sk, b"msg", Some(&b"ctx"[..]), DET).unwrap_err();
        assert_eq!(err, Error::ContextUnsupported);

        let sig = Dilithium5::sign_with(sk, b"msg", Some(&b""[..]), DET).unwrap();
        assert!(Dilithium5::verify_with(pk, b"msg", &sig, None));
        assert!(!Dilithium5::verify_with(pk, b"msg", &sig, Some(&b"ctx"[..])));
    }
}

#[cfg(all(feature = "ml-dsa-87", feature = "dilithium5"))]
#[test]
fn families_do_not_cross_verify() {
    use qrypto_dsa::{Dilithium5, MlDsa87, SigningMode};

    let seed = [5u8; 32];
    let ml = MlDsa87::key_pair_from_seed(&seed).unwrap();
    let d5 = Dilithium5::key_pair_from_seed(&seed).unwrap();
    let pk = ml.verification_key.as_bytes();
    assert_ne!(pk, d5.verification_key.as_bytes());

    let sig = MlDsa87::sign_with(&ml.signing_key, b"msg", None, SigningMode::Deterministic);
    let sig = sig.unwrap();
    assert!(!Dilithium5::verify_bytes(pk, b"msg", sig.as_bytes(), None));
}
