//! Nonce-reuse private-key recovery
//!
//! The SM2 signing equation s = (1 + d)⁻¹ · (k - r·d) mod n is linear in
//! the secret key d and the nonce k. Two signatures produced with the same
//! nonce on distinct messages therefore pin d down in closed form:
//!
//! ```text
//! d = (s1 - s2) · (s2 + r2 - s1 - r1)⁻¹ mod n
//! ```
//!
//! The attacker needs nothing beyond the two (r, s) pairs - the signer is
//! a black box and no curve point beyond the public parameters is touched.
//! The message digests e1, e2 play no role in the algebra; they are only
//! useful to cross-check that a recovered key is consistent with the
//! claimed nonce reuse.

use gmcrypt_algorithms::ec::{Curve, FieldElement, SCALAR_SIZE};
use gmcrypt_algorithms::error::Error as PrimitiveError;

use crate::error::{Error, Result};
use crate::sm2::{compute_z, message_digest, Sm2SecretKey, Sm2Signature};

/// Sign with a caller-supplied nonce instead of a fresh random draw.
///
/// This deliberately reproduces a broken signer: calling it twice with the
/// same nonce on different messages hands the secret key to anyone holding
/// both signatures, as [`recover_private_key`] demonstrates. The
/// degenerate draws that random signing retries (r = 0, r + k = n, s = 0)
/// fail here instead, since there is nothing to redraw.
pub fn sign_with_fixed_nonce(
    curve: &Curve,
    secret_key: &Sm2SecretKey,
    message: &[u8],
    user_id: &[u8],
    nonce: &[u8; SCALAR_SIZE],
) -> Result<Sm2Signature> {
    let ord = curve.order();

    let k = FieldElement::from_bytes(nonce);
    if k.is_zero() || !ord.contains(&k) {
        return Err(Error::Primitive(PrimitiveError::param(
            "SM2 nonce",
            "nonce out of range [1, n-1]",
        )));
    }

    let z = compute_z(curve, user_id, &secret_key.public_key())?;
    let e = message_digest(curve, &z, message)?;

    let p1 = curve.scalar_mult(&k, curve.generator())?;
    let x1 = match p1.coordinates() {
        Some((x, _)) => ord.reduce(x),
        None => return Err(Error::SigningFailed("nonce point is the identity")),
    };

    let r = ord.add(&e, &x1);
    if r.is_zero() || ord.add(&r, &k).is_zero() {
        return Err(Error::SigningFailed("fixed nonce produced a degenerate r"));
    }

    let d = FieldElement::from_bytes(&secret_key.d);
    let inv_one_d = ord.inv(&ord.add(&FieldElement::one(), &d))?;
    let s = ord.mul(&inv_one_d, &ord.sub(&k, &ord.mul(&r, &d)));
    if s.is_zero() {
        return Err(Error::SigningFailed("fixed nonce produced s = 0"));
    }

    Ok(Sm2Signature {
        r: r.to_bytes(),
        s: s.to_bytes(),
    })
}

/// Recover the secret key from two signatures known to share a nonce.
///
/// `digests` optionally carries the big-endian message digests e1, e2 that
/// went into the two r values. The recovery formula does not need them;
/// when present, the recovered key is cross-checked by deriving the nonce
/// it implies and regenerating both r values through it. A mismatch
/// reports [`Error::NonceMismatch`] instead of silently returning a wrong
/// key.
///
/// Fails with [`Error::DegenerateAttackInput`] when
/// (s2 + r2 - s1 - r1) mod n = 0: such a pair carries no information about
/// d through this formula.
pub fn recover_private_key(
    curve: &Curve,
    first: &Sm2Signature,
    second: &Sm2Signature,
    digests: Option<(&[u8; 32], &[u8; 32])>,
) -> Result<[u8; SCALAR_SIZE]> {
    let ord = curve.order();
    let r1 = ord.reduce_bytes(&first.r);
    let s1 = ord.reduce_bytes(&first.s);
    let r2 = ord.reduce_bytes(&second.r);
    let s2 = ord.reduce_bytes(&second.s);

    let numerator = ord.sub(&s1, &s2);
    let denominator = ord.sub(&ord.add(&s2, &r2), &ord.add(&s1, &r1));
    if denominator.is_zero() {
        return Err(Error::DegenerateAttackInput);
    }

    let d = ord.mul(&numerator, &ord.inv(&denominator)?);

    if let Some((e1, e2)) = digests {
        // k = s + (s + r)·d inverts the signing equation; both signatures
        // must reproduce their r through the same nonce point
        let k = ord.add(&s1, &ord.mul(&ord.add(&s1, &r1), &d));
        let k_g = curve.scalar_mult(&k, curve.generator())?;
        let x1 = match k_g.coordinates() {
            Some((x, _)) => ord.reduce(x),
            None => return Err(Error::NonceMismatch),
        };
        if ord.add(&ord.reduce_bytes(e1), &x1) != r1 || ord.add(&ord.reduce_bytes(e2), &x1) != r2 {
            return Err(Error::NonceMismatch);
        }
    }

    Ok(d.to_bytes())
}

/// Recover the nonce behind a signature given the secret key:
/// k = s + (s + r)·d mod n, the inverse of the signing equation.
pub fn recover_nonce(
    curve: &Curve,
    signature: &Sm2Signature,
    d_bytes: &[u8; SCALAR_SIZE],
) -> [u8; SCALAR_SIZE] {
    let ord = curve.order();
    let r = ord.reduce_bytes(&signature.r);
    let s = ord.reduce_bytes(&signature.s);
    let d = ord.reduce_bytes(d_bytes);
    ord.add(&s, &ord.mul(&ord.add(&s, &r), &d)).to_bytes()
}
