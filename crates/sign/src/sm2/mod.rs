//! SM2 digital signatures
//!
//! This module implements the elliptic-curve signature scheme of
//! GB/T 32918.2-2016 over the domain parameters supplied by the caller.
//!
//! Signing binds the message to an identity string through the Z digest:
//! Z = H(ENTL ‖ ID ‖ a ‖ b ‖ Gx ‖ Gy ‖ Qx ‖ Qy), and the message digest is
//! e = H(Z ‖ M). The signature equation differs from ECDSA:
//!
//! 1. Draw a fresh k in [1, n-1]; (x1, _) = k·G
//! 2. r = (e + x1) mod n; retry if r = 0 or r + k = n
//! 3. s = (1 + d)⁻¹ · (k - r·d) mod n; retry if s = 0
//!
//! Verification computes t = (r + s) mod n, P = s·G + t·Q, and accepts iff
//! (e + P.x) mod n = r.

use gmcrypt_algorithms::ec::{
    sm2_curve, Curve, FieldElement, Point, POINT_COORDINATES_SIZE, SCALAR_SIZE,
};
use gmcrypt_algorithms::error::{validate, Error as PrimitiveError};
use gmcrypt_algorithms::hash::{HashFunction, Sm3};
use gmcrypt_algorithms::types::Digest;
use gmcrypt_api::{Error as ApiError, Signature as SignatureTrait};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::error::{Error, Result};

pub mod recovery;

/// Identity string used when the caller does not supply one; the default
/// entity identifier from the SM2 standard's examples.
pub const DEFAULT_USER_ID: &[u8] = b"1234567812345678";

/// Maximum rejection-sampling attempts while signing.
///
/// Each retry fires only for r = 0, r + k = n, or s = 0, so a second
/// iteration is already a once-in-a-lifetime event; the cap turns a broken
/// RNG into an error instead of a spin.
const MAX_SIGN_ATTEMPTS: usize = 64;

/// SM2 signature scheme over the standard curve and default identity
///
/// The inherent API on [`Sm2Key`] threads explicit domain parameters and
/// identity strings; this marker type binds both to their standard values
/// for use through the [`gmcrypt_api::Signature`] trait.
pub struct Sm2;

/// SM2 public key: raw affine coordinates x ‖ y, 32 big-endian bytes each
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sm2PublicKey(pub [u8; POINT_COORDINATES_SIZE]);

impl AsRef<[u8]> for Sm2PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// SM2 secret key
///
/// Holds the secret scalar d together with a copy of the public point
/// Q = d·G. The identity digest binds both sides, so signing needs the
/// public half as well. Zeroized on drop.
#[derive(Clone)]
pub struct Sm2SecretKey {
    d: [u8; SCALAR_SIZE],
    q: [u8; POINT_COORDINATES_SIZE],
}

impl Zeroize for Sm2SecretKey {
    fn zeroize(&mut self) {
        self.d.zeroize();
        self.q.zeroize();
    }
}

impl Drop for Sm2SecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Sm2SecretKey {
    /// Secret scalar as big-endian bytes
    pub fn to_bytes(&self) -> [u8; SCALAR_SIZE] {
        self.d
    }

    /// The public key bound to this secret key
    pub fn public_key(&self) -> Sm2PublicKey {
        Sm2PublicKey(self.q)
    }
}

/// SM2 signature: the pair (r, s), each an integer in [1, n-1] stored as
/// 32 big-endian bytes.
///
/// No wire encoding is mandated for the pair itself; callers choose their
/// own serialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sm2Signature {
    /// r component
    pub r: [u8; SCALAR_SIZE],
    /// s component
    pub s: [u8; SCALAR_SIZE],
}

/// An SM2 key object: always carries the public point, optionally the
/// secret scalar.
///
/// [`generate`](Sm2Key::generate) and
/// [`from_secret_bytes`](Sm2Key::from_secret_bytes) yield a key holding
/// (d, Q); [`from_public_bytes`](Sm2Key::from_public_bytes) yields a
/// verification-only key holding just Q. Signing with the latter fails
/// with [`Error::MissingPrivateKey`].
#[derive(Clone)]
pub struct Sm2Key {
    public: Sm2PublicKey,
    secret: Option<Sm2SecretKey>,
}

impl Sm2Key {
    /// Generate a fresh keypair: d uniform in [1, n-1], Q = d·G
    pub fn generate<R: CryptoRng + RngCore>(curve: &Curve, rng: &mut R) -> Result<Self> {
        let (d, q) = curve.generate_keypair(rng)?;
        let q_bytes = serialize_public_point(&q)?;
        Ok(Sm2Key {
            public: Sm2PublicKey(q_bytes),
            secret: Some(Sm2SecretKey {
                d: d.to_bytes(),
                q: q_bytes,
            }),
        })
    }

    /// Build a verification-only key from raw public coordinates,
    /// validating that they name a point on the curve
    pub fn from_public_bytes(curve: &Curve, bytes: &[u8; POINT_COORDINATES_SIZE]) -> Result<Self> {
        let (x, y) = split_coordinates(bytes);
        curve.point_from_bytes(&x, &y)?;
        Ok(Sm2Key {
            public: Sm2PublicKey(*bytes),
            secret: None,
        })
    }

    /// Rebuild a full key from a raw secret scalar, deriving Q = d·G
    pub fn from_secret_bytes(curve: &Curve, d_bytes: &[u8; SCALAR_SIZE]) -> Result<Self> {
        let d = FieldElement::from_bytes(d_bytes);
        if d.is_zero() || !curve.order().contains(&d) {
            return Err(Error::Primitive(PrimitiveError::param(
                "SM2 secret key",
                "scalar out of range [1, n-1]",
            )));
        }
        let q = curve.scalar_mult(&d, curve.generator())?;
        let q_bytes = serialize_public_point(&q)?;
        Ok(Sm2Key {
            public: Sm2PublicKey(q_bytes),
            secret: Some(Sm2SecretKey {
                d: d.to_bytes(),
                q: q_bytes,
            }),
        })
    }

    /// The public key
    pub fn public_key(&self) -> &Sm2PublicKey {
        &self.public
    }

    /// The secret key, if this object holds one
    pub fn secret_key(&self) -> Option<&Sm2SecretKey> {
        self.secret.as_ref()
    }

    /// Sign `message` under the default identity
    pub fn sign<R: CryptoRng + RngCore>(
        &self,
        curve: &Curve,
        message: &[u8],
        rng: &mut R,
    ) -> Result<Sm2Signature> {
        self.sign_with_id(curve, message, DEFAULT_USER_ID, rng)
    }

    /// Sign `message` bound to an explicit identity string
    pub fn sign_with_id<R: CryptoRng + RngCore>(
        &self,
        curve: &Curve,
        message: &[u8],
        user_id: &[u8],
        rng: &mut R,
    ) -> Result<Sm2Signature> {
        let secret = self.secret.as_ref().ok_or(Error::MissingPrivateKey)?;
        let ord = curve.order();

        let z = compute_z(curve, user_id, &self.public)?;
        let e = message_digest(curve, &z, message)?;

        let d = FieldElement::from_bytes(&secret.d);
        let one = FieldElement::one();
        // (1 + d)⁻¹ exists unless d = n - 1; that key cannot sign and the
        // failure surfaces as an InvalidInverse invariant violation
        let inv_one_d = ord.inv(&ord.add(&one, &d))?;

        for _ in 0..MAX_SIGN_ATTEMPTS {
            let k = curve.generate_scalar(rng)?;
            let p1 = curve.scalar_mult(&k, curve.generator())?;
            let x1 = match p1.coordinates() {
                Some((x, _)) => ord.reduce(x),
                None => continue,
            };

            let r = ord.add(&e, &x1);
            if r.is_zero() || ord.add(&r, &k).is_zero() {
                continue;
            }

            let s = ord.mul(&inv_one_d, &ord.sub(&k, &ord.mul(&r, &d)));
            if s.is_zero() {
                continue;
            }

            return Ok(Sm2Signature {
                r: r.to_bytes(),
                s: s.to_bytes(),
            });
        }

        Err(Error::SigningFailed("rejection sampling cap exceeded"))
    }

    /// Verify a signature on `message` under the default identity
    pub fn verify(&self, curve: &Curve, message: &[u8], signature: &Sm2Signature) -> bool {
        self.verify_with_id(curve, message, DEFAULT_USER_ID, signature)
    }

    /// Verify a signature bound to an explicit identity string
    pub fn verify_with_id(
        &self,
        curve: &Curve,
        message: &[u8],
        user_id: &[u8],
        signature: &Sm2Signature,
    ) -> bool {
        verify_with_id(curve, &self.public, message, user_id, signature)
    }
}

/// Verify `signature` over `message` for the holder of `public_key`.
///
/// Invalid signatures and malformed input alike are ordinary `false`
/// outcomes at this boundary, never panics or errors.
pub fn verify_with_id(
    curve: &Curve,
    public_key: &Sm2PublicKey,
    message: &[u8],
    user_id: &[u8],
    signature: &Sm2Signature,
) -> bool {
    verify_inner(curve, public_key, message, user_id, signature).unwrap_or(false)
}

fn verify_inner(
    curve: &Curve,
    public_key: &Sm2PublicKey,
    message: &[u8],
    user_id: &[u8],
    signature: &Sm2Signature,
) -> Result<bool> {
    let ord = curve.order();

    // r and s must lie in [1, n-1]
    let r = FieldElement::from_bytes(&signature.r);
    let s = FieldElement::from_bytes(&signature.s);
    if r.is_zero() || s.is_zero() || !ord.contains(&r) || !ord.contains(&s) {
        return Ok(false);
    }

    // An off-curve public key can never verify anything
    let (x_bytes, y_bytes) = split_coordinates(&public_key.0);
    let q = match curve.point_from_bytes(&x_bytes, &y_bytes) {
        Ok(point) => point,
        Err(_) => return Ok(false),
    };

    let z = compute_z(curve, user_id, public_key)?;
    let e = message_digest(curve, &z, message)?;

    let t = ord.add(&r, &s);
    if t.is_zero() {
        return Ok(false);
    }

    // P = s·G + t·Q
    let s_g = curve.scalar_mult(&s, curve.generator())?;
    let t_q = curve.scalar_mult(&t, &q)?;
    let p = curve.add(&s_g, &t_q)?;
    let x1 = match p.coordinates() {
        Some((x, _)) => ord.reduce(x),
        None => return Ok(false),
    };

    Ok(ord.add(&e, &x1) == r)
}

/// Compute the identity-binding digest
/// Z = H(ENTL ‖ ID ‖ a ‖ b ‖ Gx ‖ Gy ‖ Qx ‖ Qy).
///
/// ENTL is the 16-bit big-endian bit length of the identity string, so
/// identities must be shorter than 8192 bytes. Signer and verifier must
/// agree on both the identity and the public key or verification will
/// legitimately fail.
pub fn compute_z(curve: &Curve, user_id: &[u8], public_key: &Sm2PublicKey) -> Result<Digest<32>> {
    validate::max_length("SM2 user id", user_id.len(), 8191)?;
    let entl = ((user_id.len() * 8) as u16).to_be_bytes();

    let (g_x, g_y) = curve
        .generator()
        .coordinates()
        .ok_or(Error::Primitive(PrimitiveError::param(
            "Curve",
            "generator cannot be the identity",
        )))?;

    let mut hasher = Sm3::new();
    hasher.update(&entl)?;
    hasher.update(user_id)?;
    hasher.update(&curve.coefficient_a().to_bytes())?;
    hasher.update(&curve.coefficient_b().to_bytes())?;
    hasher.update(&g_x.to_bytes())?;
    hasher.update(&g_y.to_bytes())?;
    hasher.update(&public_key.0)?;
    Ok(hasher.finalize()?)
}

/// e = H(Z ‖ M) as an integer mod n
fn message_digest(curve: &Curve, z: &Digest<32>, message: &[u8]) -> Result<FieldElement> {
    let mut hasher = Sm3::new();
    hasher.update(z.as_ref())?;
    hasher.update(message)?;
    let digest = hasher.finalize()?;
    Ok(curve.order().reduce_bytes(digest.as_bytes()))
}

fn split_coordinates(bytes: &[u8; POINT_COORDINATES_SIZE]) -> ([u8; 32], [u8; 32]) {
    let mut x = [0u8; 32];
    let mut y = [0u8; 32];
    x.copy_from_slice(&bytes[..32]);
    y.copy_from_slice(&bytes[32..]);
    (x, y)
}

fn serialize_public_point(q: &Point) -> Result<[u8; POINT_COORDINATES_SIZE]> {
    q.serialize_coordinates()
        .ok_or(Error::Primitive(PrimitiveError::Processing {
            operation: "SM2 keygen",
            details: "public point is the identity",
        }))
}

impl SignatureTrait for Sm2 {
    type PublicKey = Sm2PublicKey;
    type SecretKey = Sm2SecretKey;
    type SignatureData = Sm2Signature;

    fn name() -> &'static str {
        "SM2-SM3"
    }

    fn keypair<R: CryptoRng + RngCore>(
        rng: &mut R,
    ) -> gmcrypt_api::Result<(Self::PublicKey, Self::SecretKey)> {
        let curve = sm2_curve();
        let key = Sm2Key::generate(&curve, rng).map_err(ApiError::from)?;
        match key.secret {
            Some(secret) => Ok((key.public, secret)),
            None => Err(ApiError::InvalidKey {
                context: "SM2-SM3 keypair",
                message: "generated key is missing its secret half".to_string(),
            }),
        }
    }

    fn sign<R: CryptoRng + RngCore>(
        message: &[u8],
        secret_key: &Self::SecretKey,
        rng: &mut R,
    ) -> gmcrypt_api::Result<Self::SignatureData> {
        let curve = sm2_curve();
        let key = Sm2Key {
            public: secret_key.public_key(),
            secret: Some(secret_key.clone()),
        };
        key.sign(&curve, message, rng).map_err(ApiError::from)
    }

    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> gmcrypt_api::Result<()> {
        let curve = sm2_curve();
        if verify_with_id(&curve, public_key, message, DEFAULT_USER_ID, signature) {
            Ok(())
        } else {
            Err(ApiError::InvalidSignature {
                context: "SM2-SM3 verify",
                message: "signature verification failed".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests;
