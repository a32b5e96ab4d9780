//! SHAKE128/SHAKE256 streams and the hash derivations built on them.

use crate::packing::pack_w1;
use crate::params::common::{CRH_BYTES, MAX_CONTEXT_BYTES, POLY_W1_PACKED_BYTES, TR_BYTES};
use crate::params::ParameterSet;
use crate::polyvec::PolyVecK;
use qrypto_core::{Error, Result};
use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake128, Shake128Reader, Shake256, Shake256Reader,
};

/// SHAKE128 rate in bytes.
pub const SHAKE128_RATE: usize = 168;

/// SHAKE256 rate in bytes.
pub const SHAKE256_RATE: usize = 136;

/// A SHAKE256 output stream.
pub struct Shake256Stream {
    reader: Shake256Reader,
}

impl Shake256Stream {
    /// Absorbs the concatenation of `parts`.
    pub fn absorb(parts: &[&[u8]]) -> Self {
        let mut hasher = Shake256::default();
        for part in parts {
            hasher.update(part);
        }
        Self {
            reader: hasher.finalize_xof(),
        }
    }

    /// Absorbs `seed ‖ nonce` with the nonce as two little-endian bytes.
    pub fn with_nonce(seed: &[u8], nonce: u16) -> Self {
        Self::absorb(&[seed, &nonce.to_le_bytes()])
    }

    /// Squeezes the next `out.len()` bytes.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }
}

/// A SHAKE128 output stream.
pub struct Shake128Stream {
    reader: Shake128Reader,
}

impl Shake128Stream {
    /// Absorbs `rho ‖ col ‖ row`, the seed of matrix entry A[row][col].
    pub fn for_matrix(rho: &[u8], row: u8, col: u8) -> Self {
        let mut hasher = Shake128::default();
        hasher.update(rho);
        hasher.update(&[col, row]);
        Self {
            reader: hasher.finalize_xof(),
        }
    }

    /// Squeezes the next `out.len()` bytes.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }
}

/// SHAKE256 of the concatenation of `parts`, filling `out`.
pub fn shake256(parts: &[&[u8]], out: &mut [u8]) {
    Shake256Stream::absorb(parts).squeeze(out);
}

/// tr = H(pk).
pub fn hash_public_key(pk: &[u8]) -> [u8; TR_BYTES] {
    let mut tr = [0u8; TR_BYTES];
    shake256(&[pk], &mut tr);
    tr
}

/// Resolves the caller's context against the family's rules.
///
/// `None` selects the family default. Families that do not bind a context
/// accept only an empty one.
pub fn resolve_context<P: ParameterSet>(context: Option<&[u8]>) -> Result<&[u8]> {
    let context = context.unwrap_or(P::DEFAULT_CONTEXT);
    if !P::CONTEXT && !context.is_empty() {
        return Err(Error::ContextUnsupported);
    }
    if context.len() > MAX_CONTEXT_BYTES {
        return Err(Error::ContextTooLong {
            max: MAX_CONTEXT_BYTES,
            actual: context.len(),
        });
    }
    Ok(context)
}

/// Message representative mu.
///
/// With a context: `H(tr ‖ 0x00 ‖ len(ctx) ‖ ctx ‖ M)`. Without: `H(tr ‖ M)`.
/// `context` must already have passed [`resolve_context`].
pub fn message_representative<P: ParameterSet>(
    tr: &[u8],
    context: &[u8],
    message: &[u8],
) -> [u8; CRH_BYTES] {
    let mut mu = [0u8; CRH_BYTES];
    if P::CONTEXT {
        // resolve_context caps the length at 255
        let prefix = [0u8, context.len() as u8];
        shake256(&[tr, &prefix, context, message], &mut mu);
    } else {
        shake256(&[tr, message], &mut mu);
    }
    mu
}

/// c_tilde = H(mu ‖ pack(w1)), truncated to `out.len()` bytes.
///
/// w1 is packed one polynomial at a time straight into the sponge.
pub fn challenge_hash<const K: usize>(mu: &[u8], w1: &PolyVecK<K>, out: &mut [u8]) {
    let mut hasher = Shake256::default();
    hasher.update(mu);
    let mut buf = [0u8; POLY_W1_PACKED_BYTES];
    for p in &w1.polys {
        pack_w1(p, &mut buf);
        hasher.update(&buf);
    }
    hasher.finalize_xof().read(out);
}
