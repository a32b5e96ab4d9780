//! Signature scheme trait.

use crate::Result;
use rand_core::CryptoRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A digital signature scheme with fixed-size keys and signatures.
///
/// `sign` is deterministic and binds the family's default context. The
/// concrete families expose richer entry points (explicit context, hedged
/// randomness, attached signatures) as inherent functions.
///
/// # Example
///
/// ```ignore
/// use qrypto_core::Signer;
///
/// let (sk, pk) = MlDsa87::keygen(&mut rng)?;
/// let sig = MlDsa87::sign(&sk, message)?;
/// MlDsa87::verify(&pk, message, &sig)?;
/// ```
pub trait Signer {
    /// Signing key (private key).
    type SigningKey: Zeroize + ZeroizeOnDrop;

    /// Verification key (public key).
    type VerificationKey: Clone;

    /// Signature produced by signing.
    type Signature: Clone;

    /// Human-readable algorithm name.
    const ALGORITHM: &'static str;

    /// Size of the signing key in bytes.
    const SIGNING_KEY_SIZE: usize;

    /// Size of the verification key in bytes.
    const VERIFICATION_KEY_SIZE: usize;

    /// Size of the signature in bytes.
    const SIGNATURE_SIZE: usize;

    /// Generate a new key pair from a fresh 32-byte seed drawn from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InsufficientRandomness`] if `rng` produced an
    /// all-zero block.
    fn keygen(rng: &mut impl CryptoRng) -> Result<(Self::SigningKey, Self::VerificationKey)>;

    /// Sign a message deterministically.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SigningFailed`] if the rejection loop does not
    /// terminate within its iteration cap.
    fn sign(sk: &Self::SigningKey, message: &[u8]) -> Result<Self::Signature>;

    /// Verify a signature.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::VerificationFailed`] if the signature does not
    /// verify.
    fn verify(
        pk: &Self::VerificationKey,
        message: &[u8],
        signature: &Self::Signature,
    ) -> Result<()>;
}
