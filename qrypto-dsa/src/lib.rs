//! Lattice signatures at NIST level 5 from a single generic engine.
//!
//! Two families share the ring arithmetic, sampling, rounding and encoding
//! layers and differ only in how seeds and the message representative are
//! derived:
//!
//! | Family | Public key | Secret key | Signature | Context |
//! |--------|------------|------------|-----------|---------|
//! | [`MlDsa87`] (FIPS 204) | 2,592 bytes | 4,896 bytes | 4,627 bytes | yes, default `"ZOND"` |
//! | [`Dilithium5`] (round 3) | 2,592 bytes | 4,896 bytes | 4,595 bytes | no |
//!
//! # Example
//!
//! ```
//! use qrypto_dsa::{MlDsa87, SigningMode};
//!
//! let pair = MlDsa87::key_pair_from_seed(&[0u8; 32]).unwrap();
//! let sig = MlDsa87::sign_with(&pair.signing_key, b"hello", None, SigningMode::Deterministic)
//!     .unwrap();
//! assert!(MlDsa87::verify_with(&pair.verification_key, b"hello", &sig, None));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(
    clippy::many_single_char_names,
    clippy::similar_names,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::module_name_repetitions
)]

extern crate alloc;

mod hash;
mod ntt;
mod packing;
pub mod params;
mod poly;
mod polyvec;
mod reduce;
mod rounding;
mod sample;
mod sign;
mod types;

#[cfg(feature = "dilithium5")]
pub mod dilithium5;
#[cfg(feature = "ml-dsa-87")]
pub mod ml_dsa_87;

#[cfg(feature = "dilithium5")]
pub use dilithium5::Dilithium5;
#[cfg(feature = "ml-dsa-87")]
pub use ml_dsa_87::MlDsa87;

pub use params::ParameterSet;
pub use qrypto_core::{Error, Result, Signer};

use rand_core::CryptoRng;

/// How a signature's per-message seed rhoPrime is obtained.
pub enum SigningMode<'r> {
    /// Derived from the secret key and the message alone; signing the same
    /// message twice gives the same signature.
    Deterministic,
    /// Mixes fresh randomness from the given generator.
    Randomized(&'r mut dyn CryptoRng),
}

impl<'r> SigningMode<'r> {
    fn into_rng(self) -> Option<&'r mut dyn CryptoRng> {
        match self {
            SigningMode::Deterministic => None,
            SigningMode::Randomized(rng) => Some(rng),
        }
    }
}

impl core::fmt::Debug for SigningMode<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SigningMode::Deterministic => f.write_str("Deterministic"),
            SigningMode::Randomized(_) => f.write_str("Randomized"),
        }
    }
}
