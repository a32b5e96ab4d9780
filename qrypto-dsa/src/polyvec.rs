//! Vectors of polynomials and the public matrix A.

use crate::poly::Poly;
use subtle::Choice;
use zeroize::Zeroize;

/// A vector of `M` polynomials.
#[derive(Clone, Zeroize)]
pub struct PolyVec<const M: usize> {
    /// Components.
    pub polys: [Poly; M],
}

/// Length-K vector (t, w, s2, hints).
pub type PolyVecK<const K: usize> = PolyVec<K>;

/// Length-L vector (s1, y, z).
pub type PolyVecL<const L: usize> = PolyVec<L>;

impl<const M: usize> Default for PolyVec<M> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const M: usize> PolyVec<M> {
    /// The zero vector.
    pub fn zero() -> Self {
        Self {
            polys: core::array::from_fn(|_| Poly::zero()),
        }
    }

    /// Forward NTT on every component.
    pub fn ntt(&mut self) {
        self.polys.iter_mut().for_each(Poly::ntt);
    }

    /// Inverse NTT on every component.
    pub fn inv_ntt(&mut self) {
        self.polys.iter_mut().for_each(Poly::inv_ntt);
    }

    /// [`Poly::reduce`] on every component.
    pub fn reduce(&mut self) {
        self.polys.iter_mut().for_each(Poly::reduce);
    }

    /// [`Poly::caddq`] on every component.
    pub fn caddq(&mut self) {
        self.polys.iter_mut().for_each(Poly::caddq);
    }

    /// [`Poly::freeze`] on every component.
    pub fn freeze(&mut self) {
        self.polys.iter_mut().for_each(Poly::freeze);
    }

    /// Component-wise addition in place.
    pub fn add_assign(&mut self, other: &Self) {
        for (a, b) in self.polys.iter_mut().zip(&other.polys) {
            a.add_assign(b);
        }
    }

    /// Component-wise subtraction in place.
    pub fn sub_assign(&mut self, other: &Self) {
        for (a, b) in self.polys.iter_mut().zip(&other.polys) {
            a.sub_assign(b);
        }
    }

    /// Multiplies every component by the NTT-domain polynomial `c`.
    #[must_use]
    pub fn scale(&self, c: &Poly) -> Self {
        Self {
            polys: core::array::from_fn(|i| c.pointwise(&self.polys[i])),
        }
    }

    /// [`Poly::shift_left`] on every component.
    pub fn shift_left(&mut self) {
        self.polys.iter_mut().for_each(Poly::shift_left);
    }

    /// `true` when every coefficient of every component is below `bound`.
    ///
    /// Does not stop at the first failing component.
    pub fn check_norm(&self, bound: i32) -> bool {
        let mut ok = Choice::from(1u8);
        for p in &self.polys {
            ok &= p.norm_below(bound);
        }
        bool::from(ok)
    }

    /// Power2Round on every component; returns `(high, low)`.
    pub fn power2round(&self) -> (Self, Self) {
        let mut high = Self::zero();
        let mut low = Self::zero();
        for i in 0..M {
            (high.polys[i], low.polys[i]) = self.polys[i].power2round();
        }
        (high, low)
    }

    /// Decompose on every component; returns `(high, low)`.
    pub fn decompose(&self) -> (Self, Self) {
        let mut high = Self::zero();
        let mut low = Self::zero();
        for i in 0..M {
            (high.polys[i], low.polys[i]) = self.polys[i].decompose();
        }
        (high, low)
    }

    /// Hint vector for low parts `a0` and high parts `a1`, with the total
    /// number of set bits.
    pub fn make_hint(a0: &Self, a1: &Self) -> (Self, usize) {
        let mut hint = Self::zero();
        let mut total = 0;
        for i in 0..M {
            let (h, n) = Poly::make_hint(&a0.polys[i], &a1.polys[i]);
            hint.polys[i] = h;
            total += n;
        }
        (hint, total)
    }

    /// Replaces every coefficient with its hint-corrected high bits.
    pub fn use_hint(&mut self, hint: &Self) {
        for (p, h) in self.polys.iter_mut().zip(&hint.polys) {
            p.use_hint(h);
        }
    }
}

/// The K × L matrix A, held in the NTT domain.
#[derive(Clone)]
pub struct Matrix<const K: usize, const L: usize> {
    /// Rows of A.
    pub rows: [PolyVecL<L>; K],
}

impl<const K: usize, const L: usize> Matrix<K, L> {
    /// The zero matrix.
    pub fn zero() -> Self {
        Self {
            rows: core::array::from_fn(|_| PolyVecL::zero()),
        }
    }

    /// A · v for an NTT-domain `v`. The result stays in the NTT domain and is
    /// not reduced.
    pub fn mul_vec(&self, v: &PolyVecL<L>) -> PolyVecK<K> {
        let mut t = PolyVecK::zero();
        for (out, row) in t.polys.iter_mut().zip(&self.rows) {
            for (a, b) in row.polys.iter().zip(&v.polys) {
                out.pointwise_acc(a, b);
            }
        }
        t
    }
}
