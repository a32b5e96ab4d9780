//! # Qrypto
//!
//! Post-quantum lattice signatures at NIST security level 5.
//!
//! ## Features
//!
//! - `std` (default): Enable standard library support
//! - `ml-dsa-87` (default): ML-DSA-87 as standardized in FIPS 204
//! - `dilithium5` (default): the round-3 Dilithium5 signature scheme
//!
//! ## Supported Algorithms
//!
//! - **ML-DSA-87** (FIPS 204), with context strings defaulting to `"ZOND"`
//! - **Dilithium5** (CRYSTALS round 3), context-free
//!
//! Both share one key format (2,592-byte public keys, 4,896-byte secret
//! keys) but produce differently sized signatures and are not
//! interchangeable.
//!
//! ## Example
//!
//! ```
//! use qrypto::dsa::{MlDsa87, Signer};
//!
//! let (sk, pk) = MlDsa87::keygen(&mut rand::rng())?;
//! let sig = MlDsa87::sign(&sk, b"attack at dawn")?;
//! MlDsa87::verify(&pk, b"attack at dawn", &sig)?;
//! # Ok::<(), qrypto::Error>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub use qrypto_core::{Error, Result};

/// Core traits for cryptographic primitives.
pub mod traits {
    pub use qrypto_core::Signer;
}

/// Lattice signature schemes.
#[cfg(any(feature = "ml-dsa-87", feature = "dilithium5"))]
pub mod dsa {
    pub use qrypto_core::Signer;
    pub use qrypto_dsa::params::ParameterSet;
    pub use qrypto_dsa::SigningMode;

    #[cfg(feature = "dilithium5")]
    pub use qrypto_dsa::{dilithium5, Dilithium5};
    #[cfg(feature = "ml-dsa-87")]
    pub use qrypto_dsa::{ml_dsa_87, MlDsa87};
}
