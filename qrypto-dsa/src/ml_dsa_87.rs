//! ML-DSA-87 as standardized in FIPS 204.
//!
//! Context strings are bound into every signature; without one the
//! default `"ZOND"` is used. Deterministic signing uses an all-zero `rnd`.

use crate::params::level5::{BETA, ETA, GAMMA1, GAMMA2, K, L, OMEGA, TAU};

/// ML-DSA-87 marker type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MlDsa87;

impl crate::params::Sealed for MlDsa87 {}

impl crate::ParameterSet for MlDsa87 {
    const NAME: &'static str = "ML-DSA-87";
    const K: usize = K;
    const L: usize = L;
    const ETA: usize = ETA;
    const TAU: usize = TAU;
    const BETA: i32 = BETA;
    const GAMMA1: i32 = GAMMA1;
    const GAMMA2: i32 = GAMMA2;
    const OMEGA: usize = OMEGA;
    const C_TILDE_BYTES: usize = 64;
    const KEYGEN_DOMAIN_SEPARATION: bool = true;
    const HEDGED_RND: bool = true;
    const CONTEXT: bool = true;
    const DEFAULT_CONTEXT: &'static [u8] = b"ZOND";
}

crate::types::define_dsa_variant!(MlDsa87);
