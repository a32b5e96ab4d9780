//! Power2Round, Decompose, MakeHint and UseHint for gamma2 = (q-1)/32.

use crate::params::common::D;
use crate::reduce::Q;
use subtle::{Choice, ConstantTimeEq};

/// Low-order rounding range.
pub const GAMMA2: i32 = (Q - 1) / 32;

/// Number of distinct high-bit values, 16, so w1 packs into a nibble.
const W1_MASK: i32 = 15;

/// Splits a canonical `a` into `(a1, a0)` with `a = a1 · 2^13 + a0` and
/// `a0 ∈ (-2^12, 2^12]`.
#[inline]
pub const fn power2round(a: i32) -> (i32, i32) {
    let a1 = (a + (1 << (D - 1)) - 1) >> D;
    (a1, a - (a1 << D))
}

/// Splits a canonical `a` into `(a1, a0)` with `a ≡ a1 · 2·GAMMA2 + a0`,
/// `a0 ∈ (-GAMMA2, GAMMA2]` and `a1 ∈ [0, 15]`.
///
/// When `a` sits within GAMMA2 of q the high part wraps to 0 and `a0`
/// absorbs the difference, so `a0` can be -GAMMA2 in that case only.
#[inline]
pub const fn decompose(a: i32) -> (i32, i32) {
    // a1 = round(a / 2·GAMMA2) via 2^-7 then multiply-shift by 1025 / 2^22
    let mut a1 = (a + 127) >> 7;
    a1 = (a1 * 1025 + (1 << 21)) >> 22;
    a1 &= W1_MASK;

    let mut a0 = a - a1 * 2 * GAMMA2;
    a0 -= (((Q - 1) / 2 - a0) >> 31) & Q;
    (a1, a0)
}

/// Returns 1 if adding the low part `a0` to the high part `a1` carries into
/// a different high value, 0 otherwise.
///
/// Runs in constant time: during signing `a0` depends on the secret key.
#[inline]
pub fn make_hint(a0: i32, a1: i32) -> i32 {
    let above = Choice::from((((GAMMA2 - a0) >> 31) & 1) as u8);
    let below = Choice::from((((a0 + GAMMA2) >> 31) & 1) as u8);
    let on_edge = a0.ct_eq(&-GAMMA2) & !a1.ct_eq(&0);
    i32::from((above | below | on_edge).unwrap_u8())
}

/// Corrects the high bits of `a` using a hint bit.
#[inline]
pub const fn use_hint(a: i32, hint: i32) -> i32 {
    let (a1, a0) = decompose(a);
    if hint == 0 {
        a1
    } else if a0 > 0 {
        (a1 + 1) & W1_MASK
    } else {
        (a1 - 1) & W1_MASK
    }
}
