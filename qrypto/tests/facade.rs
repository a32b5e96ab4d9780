#![cfg(all(feature = "ml-dsa-87", feature = "dilithium5"))]

use qrypto::dsa::{Dilithium5, MlDsa87, SigningMode};
use qrypto::traits::Signer;

fn roundtrip<S: Signer>() {
    let (sk, pk) = S::keygen(&mut rand::rng()).unwrap();
    let sig = S::sign(&sk, b"facade").unwrap();
    assert!(S::verify(&pk, b"facade", &sig).is_ok());
    assert_eq!(S::verify(&pk, b"facadE", &sig), Err(qrypto::Error::VerificationFailed));
}

#[test]
fn both_families_through_trait() {
    roundtrip::<MlDsa87>();
    roundtrip::<Dilithium5>();
}

#[test]
fn algorithm_names_and_sizes() {
    assert_eq!(MlDsa87::ALGORITHM, "ML-DSA-87");
    assert_eq!(Dilithium5::ALGORITHM, "Dilithium5");
    assert_eq!(MlDsa87::SIGNATURE_SIZE, 4627);
    assert_eq!(Dilithium5::SIGNATURE_SIZE, 4595);
    assert_eq!(MlDsa87::VERIFICATION_KEY_SIZE, Dilithium5::VERIFICATION_KEY_SIZE);
    assert_eq!(MlDsa87::SIGNING_KEY_SIZE, Dilithium5::SIGNING_KEY_SIZE);
}

#[test]
fn module_paths_are_reachable() {
    let pair = MlDsa87::key_pair_from_seed(&[0u8; 32]).unwrap();
    let _: &qrypto::dsa::ml_dsa_87::VerificationKey = &pair.verification_key;
    let sig = MlDsa87::sign_with(&pair.signing_key, b"m", None, SigningMode::Deterministic);
    let sig = sig.unwrap();
    let pk = pair.verification_key.as_bytes();
    assert!(MlDsa87::verify_bytes(pk, b"m", sig.as_bytes(), None));
}
