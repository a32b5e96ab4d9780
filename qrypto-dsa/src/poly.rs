//! Polynomials in R_q = Z_q[X] / (X^256 + 1).

use crate::ntt;
use crate::params::common::N;
use crate::reduce::{caddq, freeze, reduce32, Q};
use crate::rounding;
use subtle::{Choice, ConstantTimeLess};
use zeroize::Zeroize;

/// Largest bound the norm check accepts; above it the centered magnitude is
/// no longer meaningful after a single reduction.
const MAX_NORM_BOUND: i32 = (Q - 1) / 8;

/// A polynomial with 256 signed coefficients.
#[derive(Clone, Zeroize)]
pub struct Poly {
    /// Coefficients, not necessarily reduced.
    pub coeffs: [i32; N],
}

impl Default for Poly {
    fn default() -> Self {
        Self::zero()
    }
}

impl core::fmt::Debug for Poly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Poly").finish_non_exhaustive()
    }
}

impl Poly {
    /// The zero polynomial.
    #[inline]
    pub const fn zero() -> Self {
        Self { coeffs: [0; N] }
    }

    /// Applies [`reduce32`] to every coefficient.
    pub fn reduce(&mut self) {
        for c in &mut self.coeffs {
            *c = reduce32(*c);
        }
    }

    /// Adds q to every negative coefficient.
    pub fn caddq(&mut self) {
        for c in &mut self.coeffs {
            *c = caddq(*c);
        }
    }

    /// Maps every coefficient to [0, q).
    pub fn freeze(&mut self) {
        for c in &mut self.coeffs {
            *c = freeze(*c);
        }
    }

    /// Forward NTT in place.
    pub fn ntt(&mut self) {
        ntt::ntt(&mut self.coeffs);
    }

    /// Inverse NTT in place, leaving a factor of 2^32.
    pub fn inv_ntt(&mut self) {
        ntt::inv_ntt(&mut self.coeffs);
    }

    /// self += other, without reduction.
    pub fn add_assign(&mut self, other: &Self) {
        for (a, b) in self.coeffs.iter_mut().zip(&other.coeffs) {
            *a += b;
        }
    }

    /// self -= other, without reduction.
    pub fn sub_assign(&mut self, other: &Self) {
        for (a, b) in self.coeffs.iter_mut().zip(&other.coeffs) {
            *a -= b;
        }
    }

    /// Montgomery product of two NTT-domain polynomials.
    #[must_use]
    pub fn pointwise(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        ntt::pointwise(&mut r.coeffs, &self.coeffs, &other.coeffs);
        r
    }

    /// self += a ∘ b, Montgomery-reduced per product.
    pub fn pointwise_acc(&mut self, a: &Self, b: &Self) {
        ntt::pointwise_acc(&mut self.coeffs, &a.coeffs, &b.coeffs);
    }

    /// Multiplies every coefficient by 2^13.
    pub fn shift_left(&mut self) {
        for c in &mut self.coeffs {
            *c <<= crate::params::common::D;
        }
    }

    /// Returns `true` when every coefficient has centered magnitude below
    /// `bound`.
    ///
    /// Coefficients may be in any form [`reduce32`] produces. Bounds that are
    /// non-positive or exceed (q-1)/8 always fail. Runs in time independent
    /// of the coefficients.
    #[cfg(test)]
    pub fn check_norm(&self, bound: i32) -> bool {
        bool::from(self.norm_below(bound))
    }

    /// Norm check that stays in the `Choice` domain.
    pub(crate) fn norm_below(&self, bound: i32) -> Choice {
        if bound <= 0 || bound > MAX_NORM_BOUND {
            return Choice::from(0u8);
        }

        let bound = bound as u32;
        let mut ok = Choice::from(1u8);
        for &c in &self.coeffs {
            let r = freeze(c);
            // -1 when r sits in the upper half and stands for r - q
            let upper = ((Q - 1) / 2 - r) >> 31;
            let magnitude = r ^ (upper & (r ^ (Q - r)));
            ok &= (magnitude as u32).ct_lt(&bound);
        }
        ok
    }

    /// Splits every canonical coefficient with Power2Round; returns
    /// `(high, low)`.
    pub fn power2round(&self) -> (Self, Self) {
        let mut high = Self::zero();
        let mut low = Self::zero();
        for i in 0..N {
            (high.coeffs[i], low.coeffs[i]) = rounding::power2round(self.coeffs[i]);
        }
        (high, low)
    }

    /// Splits every canonical coefficient with Decompose; returns
    /// `(high, low)`.
    pub fn decompose(&self) -> (Self, Self) {
        let mut high = Self::zero();
        let mut low = Self::zero();
        for i in 0..N {
            (high.coeffs[i], low.coeffs[i]) = rounding::decompose(self.coeffs[i]);
        }
        (high, low)
    }

    /// Computes the hint polynomial for low parts `a0` and high parts `a1`,
    /// returning it with its number of set coefficients.
    pub fn make_hint(a0: &Self, a1: &Self) -> (Self, usize) {
        let mut hint = Self::zero();
        let mut count = 0;
        for i in 0..N {
            let h = rounding::make_hint(a0.coeffs[i], a1.coeffs[i]);
            hint.coeffs[i] = h;
            count += h as usize;
        }
        (hint, count)
    }

    /// Replaces every coefficient with its hint-corrected high bits.
    pub fn use_hint(&mut self, hint: &Self) {
        for (c, &h) in self.coeffs.iter_mut().zip(&hint.coeffs) {
            *c = rounding::use_hint(*c, h);
        }
    }
}
