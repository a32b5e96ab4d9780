//! Error type shared by the qrypto crates.

use core::fmt;

/// Result type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by key generation, signing and the strict verification APIs.
///
/// Byte-level verification never produces one of these; it answers `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A public or secret key had the wrong length.
    InvalidKeyLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// A signature had the wrong length.
    InvalidSignatureLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// A key-generation seed had the wrong length.
    InvalidSeedLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// The context string exceeds the 255 bytes its length prefix can express.
    ContextTooLong {
        /// Largest accepted context, in bytes.
        max: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// A non-empty context was given to a family that does not bind one.
    ContextUnsupported,

    /// Signature verification failed.
    VerificationFailed,

    /// The random number generator returned an implausible (all-zero) block.
    InsufficientRandomness,

    /// The signing loop hit its iteration cap without producing a signature.
    SigningFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKeyLength { expected, actual } => {
                write!(f, "invalid key length: expected {expected}, got {actual}")
            }
            Error::InvalidSignatureLength { expected, actual } => {
                write!(
                    f,
                    "invalid signature length: expected {expected}, got {actual}"
                )
            }
            Error::InvalidSeedLength { expected, actual } => {
                write!(f, "invalid seed length: expected {expected}, got {actual}")
            }
            Error::ContextTooLong { max, actual } => {
                write!(f, "invalid context length: at most {max} bytes, got {actual}")
            }
            Error::ContextUnsupported => {
                write!(f, "this signature family does not accept a context string")
            }
            Error::VerificationFailed => write!(f, "signature verification failed"),
            Error::InsufficientRandomness => write!(f, "insufficient randomness provided"),
            Error::SigningFailed => write!(f, "signing did not converge"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
