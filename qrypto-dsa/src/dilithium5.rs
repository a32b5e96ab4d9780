//! Dilithium5: the round-3 CRYSTALS-Dilithium construction at level 5 with a
//! 64-byte tr.
//!
//! No context string and no domain separator in key generation. Randomized
//! signing draws rhoPrime directly from the RNG; deterministic signing
//! derives it from the key and mu.

use crate::params::level5::{BETA, ETA, GAMMA1, GAMMA2, K, L, OMEGA, TAU};

/// Dilithium5 marker type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dilithium5;

impl crate::params::Sealed for Dilithium5 {}

impl crate::ParameterSet for Dilithium5 {
    const NAME: &'static str = "Dilithium5";
    const K: usize = K;
    const L: usize = L;
    const ETA: usize = ETA;
    const TAU: usize = TAU;
    const BETA: i32 = BETA;
    const GAMMA1: i32 = GAMMA1;
    const GAMMA2: i32 = GAMMA2;
    const OMEGA: usize = OMEGA;
    const C_TILDE_BYTES: usize = 32;
    const KEYGEN_DOMAIN_SEPARATION: bool = false;
    const HEDGED_RND: bool = false;
    const CONTEXT: bool = false;
    const DEFAULT_CONTEXT: &'static [u8] = b"";
}

crate::types::define_dsa_variant!(Dilithium5);
