//! Arithmetic in Z_q for q = 8380417 = 2^23 - 2^13 + 1.

/// The prime modulus.
pub const Q: i32 = 8_380_417;

/// q^(-1) mod 2^32.
pub const QINV: i32 = 58_728_449;

/// 2^64 mod q, used to move a value into Montgomery form.
#[cfg(test)]
pub const MONT_R2: i64 = 2_365_951;

/// Montgomery reduction: returns r ≡ a · 2^(-32) (mod q).
///
/// Input: |a| ≤ 2^31 · q. Output: |r| < q.
#[inline]
pub const fn montgomery_reduce(a: i64) -> i32 {
    let t = (a as i32).wrapping_mul(QINV);
    ((a - (t as i64) * (Q as i64)) >> 32) as i32
}

/// a · b · 2^(-32) mod q.
#[inline]
pub const fn montgomery_mul(a: i32, b: i32) -> i32 {
    montgomery_reduce((a as i64) * (b as i64))
}

/// a · 2^32 mod q.
#[cfg(test)]
pub const fn to_mont(a: i32) -> i32 {
    montgomery_reduce((a as i64) * MONT_R2)
}

/// Approximate centered reduction.
///
/// Rounds a / 2^23 to the nearest integer and subtracts that multiple of q.
/// For a ≤ 2^31 - 2^22 - 1 the result lies in [-6283009, 6283007] and is
/// congruent to a.
#[inline]
pub const fn reduce32(a: i32) -> i32 {
    let t = (a + (1 << 22)) >> 23;
    a - t * Q
}

/// Adds q when a is negative.
#[inline]
pub const fn caddq(a: i32) -> i32 {
    a + ((a >> 31) & Q)
}

/// Fully reduces to the canonical representative in [0, q).
#[inline]
pub const fn freeze(a: i32) -> i32 {
    caddq(reduce32(a))
}
