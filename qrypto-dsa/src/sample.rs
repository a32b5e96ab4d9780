//! Deterministic sampling from SHAKE streams: the matrix A, the secret
//! vectors, the mask y and the challenge c.

use crate::hash::{Shake128Stream, Shake256Stream, SHAKE128_RATE, SHAKE256_RATE};
use crate::packing::unpack_z;
use crate::params::common::{N, POLY_Z_PACKED_BYTES};
use crate::poly::Poly;
use crate::polyvec::{Matrix, PolyVecK, PolyVecL};
use crate::reduce::Q;
use zeroize::Zeroize;

/// SHAKE128 blocks squeezed up front for one uniform polynomial; enough for
/// 256 accepted coefficients with overwhelming probability.
const UNIFORM_INITIAL_BLOCKS: usize = 5;

/// Rejection-samples 23-bit little-endian values below q until `poly` has
/// 256 coefficients.
pub fn sample_uniform(stream: &mut Shake128Stream) -> Poly {
    let mut poly = Poly::zero();
    let mut buf = [0u8; UNIFORM_INITIAL_BLOCKS * SHAKE128_RATE + 2];
    let mut len = UNIFORM_INITIAL_BLOCKS * SHAKE128_RATE;
    stream.squeeze(&mut buf[..len]);

    let mut ctr = 0;
    loop {
        let mut pos = 0;
        while ctr < N && pos + 3 <= len {
            let t = i32::from(buf[pos])
                | i32::from(buf[pos + 1]) << 8
                | i32::from(buf[pos + 2] & 0x7F) << 16;
            pos += 3;
            if t < Q {
                poly.coeffs[ctr] = t;
                ctr += 1;
            }
        }
        if ctr == N {
            return poly;
        }

        // carry the partial triple into the next block
        let leftover = len - pos;
        buf.copy_within(pos..len, 0);
        stream.squeeze(&mut buf[leftover..leftover + SHAKE128_RATE]);
        len = leftover + SHAKE128_RATE;
    }
}

/// Expands rho into the NTT-domain matrix A. Entry (i, j) is sampled from
/// SHAKE128(rho ‖ j ‖ i).
pub fn expand_matrix<const K: usize, const L: usize>(rho: &[u8]) -> Matrix<K, L> {
    let mut a = Matrix::zero();
    for (i, row) in a.rows.iter_mut().enumerate() {
        for (j, entry) in row.polys.iter_mut().enumerate() {
            let mut stream = Shake128Stream::for_matrix(rho, i as u8, j as u8);
            *entry = sample_uniform(&mut stream);
        }
    }
    a
}

/// Samples a polynomial with coefficients uniform in [-2, 2] from
/// SHAKE256(seed ‖ nonce).
///
/// Nibbles of value 15 are rejected; the stream is squeezed one block at a
/// time until all 256 coefficients are filled.
pub fn sample_eta(seed: &[u8], nonce: u16) -> Poly {
    let mut poly = Poly::zero();
    let mut stream = Shake256Stream::with_nonce(seed, nonce);
    let mut buf = [0u8; SHAKE256_RATE];

    let mut ctr = 0;
    while ctr < N {
        stream.squeeze(&mut buf);
        for &byte in &buf {
            for t in [i32::from(byte & 0x0F), i32::from(byte >> 4)] {
                if ctr < N && t < 15 {
                    // t mod 5 via 205 / 1024 ≈ 1/5
                    poly.coeffs[ctr] = 2 - (t - ((205 * t) >> 10) * 5);
                    ctr += 1;
                }
            }
        }
    }

    buf.zeroize();
    poly
}

/// Expands rhoPrime into the secret vectors: `s1[i]` uses nonce i and
/// `s2[i]` uses nonce L + i.
pub fn expand_secrets<const K: usize, const L: usize>(
    rho_prime: &[u8],
) -> (PolyVecL<L>, PolyVecK<K>) {
    let mut s1 = PolyVecL::zero();
    let mut s2 = PolyVecK::zero();
    for (i, p) in s1.polys.iter_mut().enumerate() {
        *p = sample_eta(rho_prime, i as u16);
    }
    for (i, p) in s2.polys.iter_mut().enumerate() {
        *p = sample_eta(rho_prime, (L + i) as u16);
    }
    (s1, s2)
}

/// Samples a polynomial with coefficients in (-2^19, 2^19] from 640 bytes of
/// SHAKE256(seed ‖ nonce).
pub fn sample_gamma1(seed: &[u8], nonce: u16) -> Poly {
    let mut buf = [0u8; POLY_Z_PACKED_BYTES];
    Shake256Stream::with_nonce(seed, nonce).squeeze(&mut buf);
    let poly = unpack_z(&buf);
    buf.zeroize();
    poly
}

/// The mask y for attempt `kappa`: component i uses nonce L · kappa + i,
/// truncated to 16 bits.
pub fn expand_mask<const L: usize>(rho_prime: &[u8], kappa: u16) -> PolyVecL<L> {
    let mut y = PolyVecL::zero();
    let base = (L as u16).wrapping_mul(kappa);
    for (i, p) in y.polys.iter_mut().enumerate() {
        *p = sample_gamma1(rho_prime, base.wrapping_add(i as u16));
    }
    y
}

/// Samples the challenge c with exactly `tau` coefficients in {-1, +1} from
/// SHAKE256 of the whole `c_tilde`.
///
/// The first 8 squeezed bytes give the signs, little-endian; the rest drive
/// an inside-out Fisher-Yates placement over positions 256 - tau .. 256.
pub fn sample_challenge(c_tilde: &[u8], tau: usize) -> Poly {
    let mut c = Poly::zero();
    let mut stream = Shake256Stream::absorb(&[c_tilde]);
    let mut buf = [0u8; SHAKE256_RATE];
    stream.squeeze(&mut buf);

    let mut signs = u64::from_le_bytes([
        buf[0], buf[1], buf[2], buf[3], buf[4], buf[5], buf[6], buf[7],
    ]);
    let mut pos = 8;

    for i in N - tau..N {
        let b = loop {
            if pos >= SHAKE256_RATE {
                stream.squeeze(&mut buf);
                pos = 0;
            }
            let b = usize::from(buf[pos]);
            pos += 1;
            if b <= i {
                break b;
            }
        };

        c.coeffs[i] = c.coeffs[b];
        c.coeffs[b] = 1 - 2 * (signs & 1) as i32;
        signs >>= 1;
    }

    c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_coefficients_below_q() {
        let rho = [0x42u8; 32];
        let mut stream = Shake128Stream::for_matrix(&rho, 0, 0);
        let p = sample_uniform(&mut stream);
        assert!(p.coeffs.iter().all(|&c| (0..Q).contains(&c)));
        assert!(p.coeffs.iter().any(|&c| c != 0));
    }

    #[test]
    fn uniform_matches_bytewise_stream() {
        // a straight 3-bytes-at-a-time reader over the same stream
        let rho = [9u8; 32];
        let mut reference = Poly::zero();
        let mut stream = Shake128Stream::for_matrix(&rho, 2, 1);
        let mut ctr = 0;
        while ctr < N {
            let mut b = [0u8; 3];
            stream.squeeze(&mut b);
            let t = i32::from_le_bytes([b[0], b[1], b[2] & 0x7F, 0]);
            if t < Q {
                reference.coeffs[ctr] = t;
                ctr += 1;
            }
        }

        let mut stream = Shake128Stream::for_matrix(&rho, 2, 1);
        assert_eq!(sample_uniform(&mut stream).coeffs, reference.coeffs);
    }

    #[test]
    fn matrix_entries_differ() {
        let a = expand_matrix::<2, 2>(&[1u8; 32]);
        assert_ne!(a.rows[0].polys[1].coeffs, a.rows[1].polys[0].coeffs);
        assert_ne!(a.rows[0].polys[0].coeffs, a.rows[1].polys[1].coeffs);
    }

    #[test]
    fn eta_coefficients_in_range() {
        let seed = [0u8; 64];
        for nonce in 0..15 {
            let p = sample_eta(&seed, nonce);
            assert!(p.coeffs.iter().all(|&c| (-2..=2).contains(&c)));
        }
    }

    #[test]
    fn eta_keeps_squeezing_past_first_block() {
        // 136 bytes give 272 nibbles; find a seed whose first block alone
        // cannot fill the polynomial and make sure it is still complete
        for nonce in 0..u16::MAX {
            let seed = [nonce as u8; 64];
            let mut block = [0u8; SHAKE256_RATE];
            Shake256Stream::with_nonce(&seed, nonce).squeeze(&mut block);
            let accepted = block
                .iter()
                .flat_map(|&b| [b & 0x0F, b >> 4])
                .filter(|&t| t < 15)
                .count();
            if accepted < N {
                let p = sample_eta(&seed, nonce);
                let mut two_blocks = [0u8; 2 * SHAKE256_RATE];
                Shake256Stream::with_nonce(&seed, nonce).squeeze(&mut two_blocks);
                let expected: Vec<i32> = two_blocks
                    .iter()
                    .flat_map(|&b| [i32::from(b & 0x0F), i32::from(b >> 4)])
                    .filter(|&t| t < 15)
                    .take(N)
                    .map(|t| 2 - t % 5)
                    .collect();
                assert_eq!(p.coeffs.to_vec(), expected);
                return;
            }
        }
        panic!("no short first block found");
    }

    #[test]
    fn gamma1_coefficients_in_range() {
        let p = sample_gamma1(&[3u8; 64], 7);
        assert!(p
            .coeffs
            .iter()
            .all(|&c| -(1 << 19) < c && c <= 1 << 19));
    }

    #[test]
    fn mask_nonces_wrap() {
        let seed = [5u8; 64];
        let y = expand_mask::<7>(&seed, 9362);
        // 7 · 9362 = 65534, so component 2 wraps to nonce 0
        assert_eq!(y.polys[2].coeffs, sample_gamma1(&seed, 0).coeffs);
        assert_eq!(y.polys[1].coeffs, sample_gamma1(&seed, 65535).coeffs);
    }

    #[test]
    fn challenge_has_tau_signed_ones() {
        for seed in 0u8..8 {
            let c = sample_challenge(&[seed; 64], 60);
            let nonzero: Vec<_> = c.coeffs.iter().filter(|&&x| x != 0).collect();
            assert_eq!(nonzero.len(), 60);
            assert!(nonzero.iter().all(|&&x| x == 1 || x == -1));
        }
    }

    #[test]
    fn challenge_uses_whole_c_tilde() {
        let mut a = [0u8; 64];
        let b = a;
        a[63] = 1;
        assert_ne!(sample_challenge(&a, 60).coeffs, sample_challenge(&b, 60).coeffs);
    }
}
