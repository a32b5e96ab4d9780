//! Key generation, signing and verification, generic over a
//! [`ParameterSet`] and its vector shapes.
//!
//! Callers size the output buffers from the parameter set; every routine
//! here works on byte slices and never allocates.

use crate::hash::{
    challenge_hash, hash_public_key, message_representative, resolve_context, shake256,
};
use crate::packing::{
    pack_public_key, pack_secret_key, pack_signature, unpack_public_key, unpack_secret_key,
    unpack_signature, SecretKeyParts, SignatureParts,
};
use crate::params::common::{CRH_BYTES, MAX_SIGN_ATTEMPTS, RND_BYTES, SEED_BYTES};
use crate::params::{ParameterSet, Shape};
use crate::polyvec::{PolyVecK, PolyVecL};
use crate::sample::{expand_mask, expand_matrix, expand_secrets, sample_challenge};
use qrypto_core::{Error, Result};
use rand_core::CryptoRng;
use subtle::ConstantTimeEq;
use tracing::{debug, trace, warn};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Largest challenge hash across parameter sets.
const MAX_C_TILDE_BYTES: usize = 64;

/// Number of leading random bytes that must not all be zero.
const RANDOMNESS_CHECK_BYTES: usize = 16;

/// Fills `out` from `rng`, rejecting a draw whose first 16 bytes are all
/// zero.
pub fn fill_random(rng: &mut dyn CryptoRng, out: &mut [u8]) -> Result<()> {
    rng.fill_bytes(out);
    let head = &out[..out.len().min(RANDOMNESS_CHECK_BYTES)];
    let zeros = [0u8; RANDOMNESS_CHECK_BYTES];
    if bool::from(head.ct_eq(&zeros[..head.len()])) {
        warn!("random number generator returned an all-zero block");
        return Err(Error::InsufficientRandomness);
    }
    Ok(())
}

/// Derives a key pair from a 32-byte seed into `pk` and `sk`.
///
/// `pk` and `sk` must be exactly `P::PK_BYTES` and `P::SK_BYTES` long.
pub fn keygen_internal<P: ParameterSet, const K: usize, const L: usize>(
    seed: &[u8; SEED_BYTES],
    pk: &mut [u8],
    sk: &mut [u8],
) {
    let () = Shape::<P, K, L>::CHECK;
    debug_assert_eq!(pk.len(), P::PK_BYTES);
    debug_assert_eq!(sk.len(), P::SK_BYTES);

    // rho ‖ rhoPrime ‖ key
    let mut expanded = Zeroizing::new([0u8; 2 * SEED_BYTES + CRH_BYTES]);
    if P::KEYGEN_DOMAIN_SEPARATION {
        shake256(&[seed, &[K as u8, L as u8]], &mut expanded[..]);
    } else {
        shake256(&[seed], &mut expanded[..]);
    }
    let (rho, rest) = expanded.split_at(SEED_BYTES);
    let (rho_prime, key) = rest.split_at(CRH_BYTES);

    let a = expand_matrix::<K, L>(rho);
    let (s1, s2) = expand_secrets::<K, L>(rho_prime);

    let mut s1_hat = s1.clone();
    s1_hat.ntt();
    let mut t = a.mul_vec(&s1_hat);
    t.reduce();
    t.inv_ntt();
    t.add_assign(&s2);
    t.freeze();
    let (t1, t0) = t.power2round();

    pack_public_key(rho, &t1, pk);

    let mut parts = SecretKeyParts {
        rho: [0u8; SEED_BYTES],
        key: [0u8; SEED_BYTES],
        tr: hash_public_key(pk),
        s1,
        s2,
        t0,
    };
    parts.rho.copy_from_slice(rho);
    parts.key.copy_from_slice(key);
    pack_secret_key(&parts, sk);

    s1_hat.zeroize();
    t.zeroize();
}

/// Per-attempt secrets, cleared whenever an attempt ends.
#[derive(Zeroize, ZeroizeOnDrop)]
struct Attempt<const K: usize, const L: usize> {
    y: PolyVecL<L>,
    z: PolyVecL<L>,
    w0: PolyVecK<K>,
    cs2: PolyVecK<K>,
    ct0: PolyVecK<K>,
}

/// Signs `message` with an encoded secret key, writing `P::SIG_BYTES` bytes
/// into `sig`.
///
/// `rng` selects randomized signing; `None` is deterministic. `context`
/// follows [`resolve_context`].
///
/// # Errors
///
/// Wrong secret key length, a context the family cannot bind, an all-zero
/// random draw, or no acceptable candidate within the iteration cap.
pub fn sign_internal<P: ParameterSet, const K: usize, const L: usize>(
    sk: &[u8],
    message: &[u8],
    context: Option<&[u8]>,
    rng: Option<&mut dyn CryptoRng>,
    sig: &mut [u8],
) -> Result<()> {
    let () = Shape::<P, K, L>::CHECK;
    if sk.len() != P::SK_BYTES {
        return Err(Error::InvalidKeyLength {
            expected: P::SK_BYTES,
            actual: sk.len(),
        });
    }
    debug_assert_eq!(sig.len(), P::SIG_BYTES);
    let context = resolve_context::<P>(context)?;

    let mut secret = unpack_secret_key::<K, L>(sk);
    let mu = message_representative::<P>(&secret.tr, context, message);

    let mut rho_prime = Zeroizing::new([0u8; CRH_BYTES]);
    if P::HEDGED_RND {
        let mut rnd = Zeroizing::new([0u8; RND_BYTES]);
        if let Some(rng) = rng {
            fill_random(rng, &mut rnd[..])?;
        }
        shake256(&[&secret.key, &rnd[..], &mu], &mut rho_prime[..]);
    } else if let Some(rng) = rng {
        fill_random(rng, &mut rho_prime[..])?;
    } else {
        shake256(&[&secret.key, &mu], &mut rho_prime[..]);
    }

    let a = expand_matrix::<K, L>(&secret.rho);
    secret.s1.ntt();
    secret.s2.ntt();
    secret.t0.ntt();

    let mut c_tilde = [0u8; MAX_C_TILDE_BYTES];
    let c_tilde = &mut c_tilde[..P::C_TILDE_BYTES];

    for kappa in 0..MAX_SIGN_ATTEMPTS {
        let mut attempt = Attempt::<K, L> {
            y: expand_mask::<L>(&rho_prime[..], kappa as u16),
            z: PolyVecL::zero(),
            w0: PolyVecK::zero(),
            cs2: PolyVecK::zero(),
            ct0: PolyVecK::zero(),
        };

        let mut y_hat = attempt.y.clone();
        y_hat.ntt();
        let mut w = a.mul_vec(&y_hat);
        y_hat.zeroize();
        w.reduce();
        w.inv_ntt();
        w.caddq();
        let (w1, w0) = w.decompose();
        attempt.w0 = w0;
        w.zeroize();

        challenge_hash(&mu, &w1, c_tilde);
        let mut c = sample_challenge(c_tilde, P::TAU);
        c.ntt();

        attempt.z = secret.s1.scale(&c);
        attempt.z.inv_ntt();
        attempt.z.add_assign(&attempt.y);
        attempt.z.reduce();
        if !attempt.z.check_norm(P::GAMMA1 - P::BETA) {
            trace!(attempt = kappa, "rejected: z out of range");
            continue;
        }

        attempt.cs2 = secret.s2.scale(&c);
        attempt.cs2.inv_ntt();
        attempt.w0.sub_assign(&attempt.cs2);
        attempt.w0.reduce();
        if !attempt.w0.check_norm(P::GAMMA2 - P::BETA) {
            trace!(attempt = kappa, "rejected: low bits out of range");
            continue;
        }

        attempt.ct0 = secret.t0.scale(&c);
        attempt.ct0.inv_ntt();
        attempt.ct0.reduce();
        if !attempt.ct0.check_norm(P::GAMMA2) {
            trace!(attempt = kappa, "rejected: c·t0 out of range");
            continue;
        }

        attempt.w0.add_assign(&attempt.ct0);
        let (h, hints) = PolyVecK::<K>::make_hint(&attempt.w0, &w1);
        if hints > P::OMEGA {
            trace!(attempt = kappa, hints, "rejected: too many hints");
            continue;
        }

        pack_signature(c_tilde, &attempt.z, &h, P::OMEGA, sig);
        debug!(algorithm = P::NAME, attempts = kappa + 1, "signature produced");
        return Ok(());
    }

    warn!(
        algorithm = P::NAME,
        attempts = MAX_SIGN_ATTEMPTS,
        "signing gave up at the iteration cap"
    );
    Err(Error::SigningFailed)
}

/// Checks `sig` on `message` under an encoded public key.
///
/// Never fails loudly: wrong lengths, a context the family cannot bind, and
/// malformed encodings all answer `false`. The final challenge comparison
/// runs in constant time.
pub fn verify_internal<P: ParameterSet, const K: usize, const L: usize>(
    pk: &[u8],
    message: &[u8],
    context: Option<&[u8]>,
    sig: &[u8],
) -> bool {
    let () = Shape::<P, K, L>::CHECK;
    if pk.len() != P::PK_BYTES {
        debug!(expected = P::PK_BYTES, actual = pk.len(), "verify: public key length");
        return false;
    }
    if sig.len() != P::SIG_BYTES {
        debug!(expected = P::SIG_BYTES, actual = sig.len(), "verify: signature length");
        return false;
    }
    let Ok(context) = resolve_context::<P>(context) else {
        debug!("verify: unusable context");
        return false;
    };
    let Some(SignatureParts { c_tilde, mut z, h }) =
        unpack_signature::<K, L>(sig, P::C_TILDE_BYTES, P::OMEGA)
    else {
        debug!("verify: malformed hint encoding");
        return false;
    };
    if !z.check_norm(P::GAMMA1 - P::BETA) {
        debug!("verify: z out of range");
        return false;
    }

    let (rho, mut t1) = unpack_public_key::<K>(pk);
    let tr = hash_public_key(pk);
    let mu = message_representative::<P>(&tr, context, message);

    let mut c = sample_challenge(c_tilde, P::TAU);
    c.ntt();

    let a = expand_matrix::<K, L>(&rho);
    z.ntt();
    let mut w = a.mul_vec(&z);

    t1.shift_left();
    t1.ntt();
    w.sub_assign(&t1.scale(&c));
    w.reduce();
    w.inv_ntt();
    w.caddq();
    w.use_hint(&h);

    let mut expected = [0u8; MAX_C_TILDE_BYTES];
    let expected = &mut expected[..P::C_TILDE_BYTES];
    challenge_hash(&mu, &w, expected);

    let valid = bool::from(c_tilde.ct_eq(expected));
    if !valid {
        debug!("verify: challenge mismatch");
    }
    valid
}
