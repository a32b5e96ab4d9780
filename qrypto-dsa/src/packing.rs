//! Byte encodings of polynomials, keys and signatures.
//!
//! Every polynomial encoding is a little-endian bit stream of fixed-width
//! fields, one per coefficient in order.

use crate::params::common::{
    D, N, POLY_ETA_PACKED_BYTES, POLY_T0_PACKED_BYTES, POLY_T1_PACKED_BYTES,
    POLY_Z_PACKED_BYTES, SEED_BYTES, TR_BYTES,
};
use crate::poly::Poly;
use crate::polyvec::{PolyVecK, PolyVecL};
use zeroize::{Zeroize, ZeroizeOnDrop};

const ETA: i32 = 2;
const GAMMA1: i32 = 1 << 19;
const T0_OFFSET: i32 = 1 << (D - 1);

/// Writes the low `bits` of each field produced by `field` into `out`.
fn pack_bits(out: &mut [u8], bits: u32, field: impl Fn(usize) -> u32) {
    debug_assert_eq!(out.len(), N * bits as usize / 8);
    let mut acc = 0u64;
    let mut filled = 0;
    let mut pos = 0;
    for i in 0..N {
        acc |= u64::from(field(i) & ((1 << bits) - 1)) << filled;
        filled += bits;
        while filled >= 8 {
            out[pos] = acc as u8;
            acc >>= 8;
            filled -= 8;
            pos += 1;
        }
    }
}

/// Reads 256 fields of `bits` bits each, mapping every one through `value`.
fn unpack_bits(input: &[u8], bits: u32, value: impl Fn(u32) -> i32) -> Poly {
    debug_assert_eq!(input.len(), N * bits as usize / 8);
    let mut poly = Poly::zero();
    let mask = (1u64 << bits) - 1;
    let mut acc = 0u64;
    let mut filled = 0;
    let mut bytes = input.iter();
    for c in &mut poly.coeffs {
        while filled < bits {
            // length checked above
            acc |= u64::from(bytes.next().copied().unwrap_or(0)) << filled;
            filled += 8;
        }
        *c = value((acc & mask) as u32);
        acc >>= bits;
        filled -= bits;
    }
    poly
}

/// t1 coefficients in [0, 2^10).
pub fn pack_t1(poly: &Poly, out: &mut [u8]) {
    pack_bits(out, 10, |i| poly.coeffs[i] as u32);
}

/// Inverse of [`pack_t1`].
pub fn unpack_t1(input: &[u8]) -> Poly {
    unpack_bits(input, 10, |v| v as i32)
}

/// t0 coefficients in (-2^12, 2^12], stored as 2^12 - t0.
pub fn pack_t0(poly: &Poly, out: &mut [u8]) {
    pack_bits(out, 13, |i| (T0_OFFSET - poly.coeffs[i]) as u32);
}

/// Inverse of [`pack_t0`].
pub fn unpack_t0(input: &[u8]) -> Poly {
    unpack_bits(input, 13, |v| T0_OFFSET - v as i32)
}

/// s1/s2 coefficients in [-2, 2], stored as 2 - s.
pub fn pack_eta(poly: &Poly, out: &mut [u8]) {
    pack_bits(out, 3, |i| (ETA - poly.coeffs[i]) as u32);
}

/// Inverse of [`pack_eta`]. Field values above 4 are not rejected and decode
/// to coefficients below -2.
pub fn unpack_eta(input: &[u8]) -> Poly {
    unpack_bits(input, 3, |v| ETA - v as i32)
}

/// z coefficients in (-2^19, 2^19], stored as 2^19 - z.
pub fn pack_z(poly: &Poly, out: &mut [u8]) {
    pack_bits(out, 20, |i| (GAMMA1 - poly.coeffs[i]) as u32);
}

/// Inverse of [`pack_z`].
pub fn unpack_z(input: &[u8]) -> Poly {
    unpack_bits(input, 20, |v| GAMMA1 - v as i32)
}

/// w1 coefficients in [0, 16).
pub fn pack_w1(poly: &Poly, out: &mut [u8]) {
    pack_bits(out, 4, |i| poly.coeffs[i] as u32);
}

/// Encodes the hint vector into `OMEGA + K` bytes: the positions of the set
/// coefficients, then one running count per polynomial.
///
/// The caller guarantees at most `omega` set coefficients.
pub fn pack_hints<const K: usize>(h: &PolyVecK<K>, omega: usize, out: &mut [u8]) {
    debug_assert_eq!(out.len(), omega + K);
    out.fill(0);
    let mut k = 0;
    for (i, p) in h.polys.iter().enumerate() {
        for (j, &bit) in p.coeffs.iter().enumerate() {
            if bit != 0 {
                out[k] = j as u8;
                k += 1;
            }
        }
        out[omega + i] = k as u8;
    }
}

/// Decodes a hint block, rejecting every non-canonical encoding.
///
/// Fails when a running count decreases or exceeds `omega`, when the
/// positions within one polynomial are not strictly increasing, or when an
/// unused position slot is non-zero.
pub fn unpack_hints<const K: usize>(input: &[u8], omega: usize) -> Option<PolyVecK<K>> {
    if input.len() != omega + K {
        return None;
    }

    let mut h = PolyVecK::<K>::zero();
    let mut k = 0;
    for (i, p) in h.polys.iter_mut().enumerate() {
        let end = usize::from(input[omega + i]);
        if end < k || end > omega {
            return None;
        }
        for j in k..end {
            if j > k && input[j] <= input[j - 1] {
                return None;
            }
            p.coeffs[usize::from(input[j])] = 1;
        }
        k = end;
    }

    if input[k..omega].iter().any(|&b| b != 0) {
        return None;
    }
    Some(h)
}

/// pk = rho ‖ t1[0] ‖ … ‖ t1[K-1].
pub fn pack_public_key<const K: usize>(rho: &[u8], t1: &PolyVecK<K>, out: &mut [u8]) {
    out[..SEED_BYTES].copy_from_slice(rho);
    for (p, chunk) in t1
        .polys
        .iter()
        .zip(out[SEED_BYTES..].chunks_exact_mut(POLY_T1_PACKED_BYTES))
    {
        pack_t1(p, chunk);
    }
}

/// Splits an encoded public key of the right length into rho and t1.
pub fn unpack_public_key<const K: usize>(pk: &[u8]) -> ([u8; SEED_BYTES], PolyVecK<K>) {
    let mut rho = [0u8; SEED_BYTES];
    rho.copy_from_slice(&pk[..SEED_BYTES]);
    let mut t1 = PolyVecK::zero();
    for (p, chunk) in t1
        .polys
        .iter_mut()
        .zip(pk[SEED_BYTES..].chunks_exact(POLY_T1_PACKED_BYTES))
    {
        *p = unpack_t1(chunk);
    }
    (rho, t1)
}

/// A decoded secret key. Cleared on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKeyParts<const K: usize, const L: usize> {
    /// Matrix seed.
    pub rho: [u8; SEED_BYTES],
    /// Signing seed mixed into rhoPrime.
    pub key: [u8; SEED_BYTES],
    /// H(pk).
    pub tr: [u8; TR_BYTES],
    /// Short secret, length L.
    pub s1: PolyVecL<L>,
    /// Short secret, length K.
    pub s2: PolyVecK<K>,
    /// Low bits of t.
    pub t0: PolyVecK<K>,
}

/// sk = rho ‖ key ‖ tr ‖ s1 ‖ s2 ‖ t0.
pub fn pack_secret_key<const K: usize, const L: usize>(
    parts: &SecretKeyParts<K, L>,
    out: &mut [u8],
) {
    let (head, rest) = out.split_at_mut(2 * SEED_BYTES + TR_BYTES);
    head[..SEED_BYTES].copy_from_slice(&parts.rho);
    head[SEED_BYTES..2 * SEED_BYTES].copy_from_slice(&parts.key);
    head[2 * SEED_BYTES..].copy_from_slice(&parts.tr);

    let (s1_bytes, rest) = rest.split_at_mut(L * POLY_ETA_PACKED_BYTES);
    let (s2_bytes, t0_bytes) = rest.split_at_mut(K * POLY_ETA_PACKED_BYTES);
    let s1_chunks = s1_bytes.chunks_exact_mut(POLY_ETA_PACKED_BYTES);
    for (p, chunk) in parts.s1.polys.iter().zip(s1_chunks) {
        pack_eta(p, chunk);
    }
    let s2_chunks = s2_bytes.chunks_exact_mut(POLY_ETA_PACKED_BYTES);
    for (p, chunk) in parts.s2.polys.iter().zip(s2_chunks) {
        pack_eta(p, chunk);
    }
    let t0_chunks = t0_bytes.chunks_exact_mut(POLY_T0_PACKED_BYTES);
    for (p, chunk) in parts.t0.polys.iter().zip(t0_chunks) {
        pack_t0(p, chunk);
    }
}

/// Decodes a secret key of the right length.
pub fn unpack_secret_key<const K: usize, const L: usize>(sk: &[u8]) -> SecretKeyParts<K, L> {
    let mut parts = SecretKeyParts {
        rho: [0u8; SEED_BYTES],
        key: [0u8; SEED_BYTES],
        tr: [0u8; TR_BYTES],
        s1: PolyVecL::zero(),
        s2: PolyVecK::zero(),
        t0: PolyVecK::zero(),
    };
    let (head, rest) = sk.split_at(2 * SEED_BYTES + TR_BYTES);
    parts.rho.copy_from_slice(&head[..SEED_BYTES]);
    parts.key.copy_from_slice(&head[SEED_BYTES..2 * SEED_BYTES]);
    parts.tr.copy_from_slice(&head[2 * SEED_BYTES..]);

    let (s1_bytes, rest) = rest.split_at(L * POLY_ETA_PACKED_BYTES);
    let (s2_bytes, t0_bytes) = rest.split_at(K * POLY_ETA_PACKED_BYTES);
    let s1_chunks = s1_bytes.chunks_exact(POLY_ETA_PACKED_BYTES);
    for (p, chunk) in parts.s1.polys.iter_mut().zip(s1_chunks) {
        *p = unpack_eta(chunk);
    }
    let s2_chunks = s2_bytes.chunks_exact(POLY_ETA_PACKED_BYTES);
    for (p, chunk) in parts.s2.polys.iter_mut().zip(s2_chunks) {
        *p = unpack_eta(chunk);
    }
    let t0_chunks = t0_bytes.chunks_exact(POLY_T0_PACKED_BYTES);
    for (p, chunk) in parts.t0.polys.iter_mut().zip(t0_chunks) {
        *p = unpack_t0(chunk);
    }
    parts
}

/// sig = c_tilde ‖ z ‖ hints.
pub fn pack_signature<const K: usize, const L: usize>(
    c_tilde: &[u8],
    z: &PolyVecL<L>,
    h: &PolyVecK<K>,
    omega: usize,
    out: &mut [u8],
) {
    let (ct_bytes, rest) = out.split_at_mut(c_tilde.len());
    ct_bytes.copy_from_slice(c_tilde);
    let (z_bytes, h_bytes) = rest.split_at_mut(L * POLY_Z_PACKED_BYTES);
    for (p, chunk) in z.polys.iter().zip(z_bytes.chunks_exact_mut(POLY_Z_PACKED_BYTES)) {
        pack_z(p, chunk);
    }
    pack_hints(h, omega, h_bytes);
}

/// A decoded signature; `c_tilde` borrows from the encoding.
pub struct SignatureParts<'a, const K: usize, const L: usize> {
    /// Challenge hash.
    pub c_tilde: &'a [u8],
    /// Response vector.
    pub z: PolyVecL<L>,
    /// Hint vector with 0/1 coefficients.
    pub h: PolyVecK<K>,
}

/// Decodes a signature of the right length; `None` on a malformed hint block.
pub fn unpack_signature<const K: usize, const L: usize>(
    sig: &[u8],
    c_tilde_bytes: usize,
    omega: usize,
) -> Option<SignatureParts<'_, K, L>> {
    let (c_tilde, rest) = sig.split_at(c_tilde_bytes);
    let (z_bytes, h_bytes) = rest.split_at(L * POLY_Z_PACKED_BYTES);
    let h = unpack_hints::<K>(h_bytes, omega)?;
    let mut z = PolyVecL::zero();
    for (p, chunk) in z.polys.iter_mut().zip(z_bytes.chunks_exact(POLY_Z_PACKED_BYTES)) {
        *p = unpack_z(chunk);
    }
    Some(SignatureParts { c_tilde, z, h })
}
