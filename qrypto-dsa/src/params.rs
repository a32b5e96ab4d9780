//! Parameter sets.
//!
//! Both families share the level-5 lattice shape (K = 8, L = 7) and differ in
//! how seeds are derived, whether a context string is bound, and the width of
//! the challenge hash.

use crate::reduce::Q;

/// Constants shared by every parameter set.
pub mod common {
    /// Ring dimension.
    pub const N: usize = 256;

    /// Bits dropped from t by Power2Round.
    pub const D: u32 = 13;

    /// Size of rho, key and the key-generation seed.
    pub const SEED_BYTES: usize = 32;

    /// Size of rhoPrime and mu.
    pub const CRH_BYTES: usize = 64;

    /// Size of tr = H(pk).
    pub const TR_BYTES: usize = 64;

    /// Size of the per-signature randomness mixed into rhoPrime.
    pub const RND_BYTES: usize = 32;

    /// Longest context string a length byte can describe.
    pub const MAX_CONTEXT_BYTES: usize = 255;

    /// Packed t1 polynomial (10 bits per coefficient).
    pub const POLY_T1_PACKED_BYTES: usize = 320;
    /// Packed t0 polynomial (13 bits per coefficient).
    pub const POLY_T0_PACKED_BYTES: usize = 416;
    /// Packed s1/s2 polynomial for eta = 2 (3 bits per coefficient).
    pub const POLY_ETA_PACKED_BYTES: usize = 96;
    /// Packed z polynomial for gamma1 = 2^19 (20 bits per coefficient).
    pub const POLY_Z_PACKED_BYTES: usize = 640;
    /// Packed w1 polynomial for gamma2 = (q-1)/32 (4 bits per coefficient).
    pub const POLY_W1_PACKED_BYTES: usize = 128;

    /// Rejection loop iteration cap.
    pub const MAX_SIGN_ATTEMPTS: u32 = 10_000;
}

use common::{
    POLY_ETA_PACKED_BYTES, POLY_T0_PACKED_BYTES, POLY_T1_PACKED_BYTES, POLY_Z_PACKED_BYTES,
    SEED_BYTES, TR_BYTES,
};

mod sealed {
    pub trait Sealed {}
}

pub(crate) use sealed::Sealed;

/// Compile-time configuration of one signature family.
///
/// Implemented by [`crate::MlDsa87`] and [`crate::Dilithium5`]; sealed.
pub trait ParameterSet: Sealed {
    /// Display name.
    const NAME: &'static str;

    /// Rows of A.
    const K: usize;
    /// Columns of A.
    const L: usize;
    /// Secret coefficient bound.
    const ETA: usize;
    /// Number of ±1 coefficients in the challenge.
    const TAU: usize;
    /// TAU · ETA.
    const BETA: i32;
    /// Mask range for y.
    const GAMMA1: i32;
    /// Low-order rounding range.
    const GAMMA2: i32;
    /// Maximum number of hint bits.
    const OMEGA: usize;
    /// Length of the challenge hash ctilde.
    const C_TILDE_BYTES: usize;

    /// Whether key generation absorbs `[K, L]` after the seed.
    const KEYGEN_DOMAIN_SEPARATION: bool;
    /// Whether rhoPrime is H(key ‖ rnd ‖ mu). Otherwise it is H(key ‖ mu), or
    /// 64 fresh random bytes when signing is randomized.
    const HEDGED_RND: bool;
    /// Whether mu binds a length-prefixed context string.
    const CONTEXT: bool;
    /// Context bound when the caller supplies none.
    const DEFAULT_CONTEXT: &'static [u8];

    /// Encoded public key size.
    const PK_BYTES: usize = SEED_BYTES + Self::K * POLY_T1_PACKED_BYTES;
    /// Encoded secret key size.
    const SK_BYTES: usize = 2 * SEED_BYTES
        + TR_BYTES
        + (Self::L + Self::K) * POLY_ETA_PACKED_BYTES
        + Self::K * POLY_T0_PACKED_BYTES;
    /// Encoded signature size.
    const SIG_BYTES: usize =
        Self::C_TILDE_BYTES + Self::L * POLY_Z_PACKED_BYTES + Self::OMEGA + Self::K;
}

/// Level-5 lattice constants used by both families.
pub mod level5 {
    use super::Q;

    /// Rows of A.
    pub const K: usize = 8;
    /// Columns of A.
    pub const L: usize = 7;
    /// Secret coefficient bound.
    pub const ETA: usize = 2;
    /// Challenge weight.
    pub const TAU: usize = 60;
    /// TAU · ETA.
    pub const BETA: i32 = 120;
    /// 2^19.
    pub const GAMMA1: i32 = 1 << 19;
    /// (q - 1) / 32.
    pub const GAMMA2: i32 = (Q - 1) / 32;
    /// Maximum number of hint bits.
    pub const OMEGA: usize = 75;
}

/// Compile-time agreement between a parameter set and the vector shapes an
/// engine routine was instantiated with.
pub(crate) struct Shape<P, const K: usize, const L: usize>(core::marker::PhantomData<P>);

impl<P: ParameterSet, const K: usize, const L: usize> Shape<P, K, L> {
    pub(crate) const CHECK: () = {
        assert!(P::K == K && P::L == L, "vector shape does not match parameter set");
        assert!(P::ETA == 2, "only eta = 2 packing is implemented");
        assert!(P::GAMMA1 == 1 << 19, "only gamma1 = 2^19 packing is implemented");
        assert!(P::GAMMA2 == (Q - 1) / 32, "only gamma2 = (q-1)/32 rounding is implemented");
        assert!(P::BETA == (P::TAU * P::ETA) as i32);
        assert!(P::OMEGA < 256 && P::TAU <= 64);
        assert!(P::C_TILDE_BYTES >= 32 && P::C_TILDE_BYTES <= 64);
    };
}
