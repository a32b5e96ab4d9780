//! Generates the public surface of one signature family: fixed-size key and
//! signature wrappers, the key pair, and the signing and verification entry
//! points.

/// Expands to the types and functions of a family module.
///
/// The invoking module must have `$marker` in scope, implementing
/// [`crate::ParameterSet`], and `K` / `L` constants matching it.
macro_rules! define_dsa_variant {
    ($marker:ident) => {
        use $crate::params::common::SEED_BYTES;
        use $crate::params::ParameterSet;
        use $crate::sign::{fill_random, keygen_internal, sign_internal, verify_internal};
        use $crate::SigningMode;
        use alloc::vec::Vec;
        use core::fmt;
        use qrypto_core::{Error, Result, Signer};
        use rand_core::CryptoRng;
        use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

        /// Encoded secret key size in bytes.
        pub const SK_BYTES: usize = <$marker as ParameterSet>::SK_BYTES;
        /// Encoded public key size in bytes.
        pub const PK_BYTES: usize = <$marker as ParameterSet>::PK_BYTES;
        /// Signature size in bytes.
        pub const SIG_BYTES: usize = <$marker as ParameterSet>::SIG_BYTES;

        /// Secret signing key. Cleared on drop.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct SigningKey {
            bytes: [u8; SK_BYTES],
        }

        impl SigningKey {
            /// Wraps an encoded secret key.
            ///
            /// # Errors
            ///
            /// [`Error::InvalidKeyLength`] unless `bytes` is exactly
            /// [`SK_BYTES`] long.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                let bytes = bytes.try_into().map_err(|_| Error::InvalidKeyLength {
                    expected: SK_BYTES,
                    actual: bytes.len(),
                })?;
                Ok(Self { bytes })
            }

            /// The encoded key.
            pub fn as_bytes(&self) -> &[u8; SK_BYTES] {
                &self.bytes
            }
        }

        impl fmt::Debug for SigningKey {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("SigningKey(..)")
            }
        }

        /// Public verification key.
        #[derive(Clone, PartialEq, Eq)]
        pub struct VerificationKey {
            bytes: [u8; PK_BYTES],
        }

        impl VerificationKey {
            /// Wraps an encoded public key.
            ///
            /// # Errors
            ///
            /// [`Error::InvalidKeyLength`] unless `bytes` is exactly
            /// [`PK_BYTES`] long.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                let bytes = bytes.try_into().map_err(|_| Error::InvalidKeyLength {
                    expected: PK_BYTES,
                    actual: bytes.len(),
                })?;
                Ok(Self { bytes })
            }

            /// The encoded key.
            pub fn as_bytes(&self) -> &[u8; PK_BYTES] {
                &self.bytes
            }
        }

        impl fmt::Debug for VerificationKey {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "VerificationKey({:02x?}..)", &self.bytes[..8])
            }
        }

        impl AsRef<[u8]> for VerificationKey {
            fn as_ref(&self) -> &[u8] {
                &self.bytes
            }
        }

        /// Detached signature.
        #[derive(Clone, PartialEq, Eq)]
        pub struct Signature {
            bytes: [u8; SIG_BYTES],
        }

        impl Signature {
            /// Wraps an encoded signature. The encoding itself is only
            /// checked during verification.
            ///
            /// # Errors
            ///
            /// [`Error::InvalidSignatureLength`] unless `bytes` is exactly
            /// [`SIG_BYTES`] long.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                let bytes = bytes
                    .try_into()
                    .map_err(|_| Error::InvalidSignatureLength {
                        expected: SIG_BYTES,
                        actual: bytes.len(),
                    })?;
                Ok(Self { bytes })
            }

            /// The encoded signature.
            pub fn as_bytes(&self) -> &[u8; SIG_BYTES] {
                &self.bytes
            }
        }

        impl fmt::Debug for Signature {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "Signature({:02x?}..)", &self.bytes[..8])
            }
        }

        impl AsRef<[u8]> for Signature {
            fn as_ref(&self) -> &[u8] {
                &self.bytes
            }
        }

        /// A key pair together with the seed it was derived from.
        pub struct KeyPair {
            /// Secret key.
            pub signing_key: SigningKey,
            /// Public key.
            pub verification_key: VerificationKey,
            /// The 32-byte seed; feeding it back to `key_pair_from_seed`
            /// reproduces both keys.
            pub seed: Zeroizing<[u8; SEED_BYTES]>,
        }

        impl $marker {
            /// Derives the key pair for a 32-byte seed.
            ///
            /// # Errors
            ///
            /// [`Error::InvalidSeedLength`] unless `seed` is exactly 32 bytes.
            pub fn key_pair_from_seed(seed: &[u8]) -> Result<KeyPair> {
                let seed: [u8; SEED_BYTES] =
                    seed.try_into().map_err(|_| Error::InvalidSeedLength {
                        expected: SEED_BYTES,
                        actual: seed.len(),
                    })?;
                let seed = Zeroizing::new(seed);

                let mut signing_key = SigningKey {
                    bytes: [0u8; SK_BYTES],
                };
                let mut verification_key = VerificationKey {
                    bytes: [0u8; PK_BYTES],
                };
                keygen_internal::<$marker, K, L>(
                    &seed,
                    &mut verification_key.bytes,
                    &mut signing_key.bytes,
                );
                Ok(KeyPair {
                    signing_key,
                    verification_key,
                    seed,
                })
            }

            /// Generates a key pair from a fresh seed drawn from `rng`.
            ///
            /// # Errors
            ///
            /// [`Error::InsufficientRandomness`] if `rng` returned zeros.
            pub fn generate_key_pair(rng: &mut impl CryptoRng) -> Result<KeyPair> {
                let mut seed = Zeroizing::new([0u8; SEED_BYTES]);
                fill_random(rng, &mut seed[..])?;
                Self::key_pair_from_seed(&seed[..])
            }

            /// Signs `message`.
            ///
            /// `context` of `None` binds the family default. `mode` picks
            /// between the deterministic and the randomized signer.
            ///
            /// # Errors
            ///
            /// [`Error::ContextTooLong`], [`Error::ContextUnsupported`],
            /// [`Error::InsufficientRandomness`] or [`Error::SigningFailed`].
            pub fn sign_with(
                sk: &SigningKey,
                message: &[u8],
                context: Option<&[u8]>,
                mode: SigningMode<'_>,
            ) -> Result<Signature> {
                let mut sig = Signature {
                    bytes: [0u8; SIG_BYTES],
                };
                sign_internal::<$marker, K, L>(
                    &sk.bytes,
                    message,
                    context,
                    mode.into_rng(),
                    &mut sig.bytes,
                )?;
                Ok(sig)
            }

            /// Checks a typed signature. Never errors.
            pub fn verify_with(
                pk: &VerificationKey,
                message: &[u8],
                signature: &Signature,
                context: Option<&[u8]>,
            ) -> bool {
                verify_internal::<$marker, K, L>(&pk.bytes, message, context, &signature.bytes)
            }

            /// Checks raw encodings of any length; anything malformed is
            /// simply `false`.
            pub fn verify_bytes(
                pk: &[u8],
                message: &[u8],
                signature: &[u8],
                context: Option<&[u8]>,
            ) -> bool {
                verify_internal::<$marker, K, L>(pk, message, context, signature)
            }

            /// Produces `signature ‖ message`.
            ///
            /// # Errors
            ///
            /// As [`sign_with`](Self::sign_with).
            pub fn sign_attached(
                sk: &SigningKey,
                message: &[u8],
                context: Option<&[u8]>,
                mode: SigningMode<'_>,
            ) -> Result<Vec<u8>> {
                let sig = Self::sign_with(sk, message, context, mode)?;
                let mut signed = Vec::with_capacity(SIG_BYTES + message.len());
                signed.extend_from_slice(&sig.bytes);
                signed.extend_from_slice(message);
                Ok(signed)
            }

            /// Verifies `signature ‖ message` and returns the message.
            ///
            /// `None` when `signed` is shorter than a signature or does not
            /// verify.
            pub fn open_attached(
                signed: &[u8],
                pk: &[u8],
                context: Option<&[u8]>,
            ) -> Option<Vec<u8>> {
                if signed.len() < SIG_BYTES {
                    return None;
                }
                let (sig, message) = signed.split_at(SIG_BYTES);
                Self::verify_bytes(pk, message, sig, context).then(|| message.to_vec())
            }
        }

        impl Signer for $marker {
            type SigningKey = SigningKey;
            type VerificationKey = VerificationKey;
            type Signature = Signature;

            const ALGORITHM: &'static str = <$marker as ParameterSet>::NAME;
            const SIGNING_KEY_SIZE: usize = SK_BYTES;
            const VERIFICATION_KEY_SIZE: usize = PK_BYTES;
            const SIGNATURE_SIZE: usize = SIG_BYTES;

            fn keygen(
                rng: &mut impl CryptoRng,
            ) -> Result<(Self::SigningKey, Self::VerificationKey)> {
                let pair = Self::generate_key_pair(rng)?;
                Ok((pair.signing_key, pair.verification_key))
            }

            fn sign(sk: &Self::SigningKey, message: &[u8]) -> Result<Self::Signature> {
                Self::sign_with(sk, message, None, SigningMode::Deterministic)
            }

            fn verify(
                pk: &Self::VerificationKey,
                message: &[u8],
                signature: &Self::Signature,
            ) -> Result<()> {
                if Self::verify_with(pk, message, signature, None) {
                    Ok(())
                } else {
                    Err(Error::VerificationFailed)
                }
            }
        }
    };
}

pub(crate) use define_dsa_variant;
