//! # qrypto core
//!
//! Pieces shared by every qrypto crate:
//! - the [`Error`] type and [`Result`] alias
//! - the [`Signer`] trait implemented by each signature family
//! - re-exports of `zeroize` and `subtle`, so downstream crates agree on versions

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod traits;

pub use error::{Error, Result};
pub use traits::Signer;

pub use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Constant-time primitives used by the engine.
pub use subtle;
