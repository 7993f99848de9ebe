//! SM2 public-key encryption
//!
//! This module implements the elliptic-curve encryption scheme of
//! GB/T 32918.4-2016 with a single-hash key derivation: the keystream is
//! one SM3 call over the shared point, t = H(x2 ‖ y2), giving at most 32
//! keystream bytes.
//!
//! Ciphertext wire layout: `C1 (64 bytes: x ‖ y) ‖ C3 (32-byte tag) ‖ C2`,
//! where C2 is the keystream-XORed plaintext and C3 = H(x2 ‖ M ‖ y2).
//!
//! The XOR truncates to the shorter operand, so plaintexts beyond 32 bytes
//! lose their tail in C2 while C3 still covers the full message - such
//! ciphertexts cannot decrypt. Tests pin this ceiling; widening it would
//! require an extensible KDF and would change the wire format.

use gmcrypt_algorithms::ec::{
    sm2_curve, Curve, FieldElement, FIELD_ELEMENT_SIZE, POINT_COORDINATES_SIZE, SCALAR_SIZE,
};
use gmcrypt_algorithms::error::Error as PrimitiveError;
use gmcrypt_algorithms::hash::{HashFunction, Sm3};
use gmcrypt_algorithms::types::Digest;
use gmcrypt_api::{Error as ApiError, Pke as PkeTrait};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// C1: two raw 32-byte big-endian coordinates
const C1_SIZE: usize = POINT_COORDINATES_SIZE;

/// C3: one SM3 digest
const C3_SIZE: usize = 32;

/// SM2 public-key encryption over the standard curve
///
/// The inherent API threads explicit domain parameters; this marker type
/// binds the scheme to the standard curve for use through the
/// [`gmcrypt_api::Pke`] trait.
pub struct Sm2Pke;

/// Public key for SM2 encryption: raw affine coordinates x ‖ y
#[derive(Clone, Debug)]
pub struct Sm2PkePublicKey([u8; POINT_COORDINATES_SIZE]);

impl Sm2PkePublicKey {
    /// Accept raw coordinates after validating them against the curve
    pub fn from_bytes(curve: &Curve, bytes: &[u8; POINT_COORDINATES_SIZE]) -> Result<Self> {
        let (x, y) = split_coordinates(bytes);
        curve.point_from_bytes(&x, &y)?;
        Ok(Sm2PkePublicKey(*bytes))
    }

    /// Raw coordinates x ‖ y
    pub fn to_bytes(&self) -> [u8; POINT_COORDINATES_SIZE] {
        self.0
    }
}

impl AsRef<[u8]> for Sm2PkePublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Secret key for SM2 encryption: the raw scalar d, zeroized on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Sm2PkeSecretKey([u8; SCALAR_SIZE]);

impl Sm2PkeSecretKey {
    /// Accept a raw scalar after checking it lies in [1, n-1]
    pub fn from_bytes(curve: &Curve, bytes: &[u8; SCALAR_SIZE]) -> Result<Self> {
        let d = FieldElement::from_bytes(bytes);
        if d.is_zero() || !curve.order().contains(&d) {
            return Err(Error::Primitive(PrimitiveError::param(
                "SM2 PKE secret key",
                "scalar out of range [1, n-1]",
            )));
        }
        Ok(Sm2PkeSecretKey(*bytes))
    }

    /// Raw scalar bytes
    pub fn to_bytes(&self) -> [u8; SCALAR_SIZE] {
        self.0
    }
}

impl AsRef<[u8]> for Sm2PkeSecretKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// An SM2 encryption key object: always carries the public point,
/// optionally the secret scalar.
///
/// Decrypting with a key built from
/// [`from_public_bytes`](Sm2PkeKey::from_public_bytes) fails with
/// [`Error::MissingPrivateKey`].
#[derive(Clone)]
pub struct Sm2PkeKey {
    public: Sm2PkePublicKey,
    secret: Option<Sm2PkeSecretKey>,
}

impl Sm2PkeKey {
    /// Generate a fresh keypair
    pub fn generate<R: CryptoRng + RngCore>(curve: &Curve, rng: &mut R) -> Result<Self> {
        let (public, secret) = generate_keypair(curve, rng)?;
        Ok(Sm2PkeKey {
            public,
            secret: Some(secret),
        })
    }

    /// Build an encryption-only key from raw public coordinates
    pub fn from_public_bytes(curve: &Curve, bytes: &[u8; POINT_COORDINATES_SIZE]) -> Result<Self> {
        Ok(Sm2PkeKey {
            public: Sm2PkePublicKey::from_bytes(curve, bytes)?,
            secret: None,
        })
    }

    /// Rebuild a full key from a raw secret scalar, deriving Q = d·G
    pub fn from_secret_bytes(curve: &Curve, bytes: &[u8; SCALAR_SIZE]) -> Result<Self> {
        let secret = Sm2PkeSecretKey::from_bytes(curve, bytes)?;
        let d = FieldElement::from_bytes(&secret.0);
        let q = curve.scalar_mult(&d, curve.generator())?;
        let q_bytes = q
            .serialize_coordinates()
            .ok_or(Error::Primitive(PrimitiveError::Processing {
                operation: "SM2 PKE keygen",
                details: "public point is the identity",
            }))?;
        Ok(Sm2PkeKey {
            public: Sm2PkePublicKey(q_bytes),
            secret: Some(secret),
        })
    }

    /// The public key
    pub fn public_key(&self) -> &Sm2PkePublicKey {
        &self.public
    }

    /// The secret key, if this object holds one
    pub fn secret_key(&self) -> Option<&Sm2PkeSecretKey> {
        self.secret.as_ref()
    }

    /// Encrypt to this key's public point
    pub fn encrypt<R: CryptoRng + RngCore>(
        &self,
        curve: &Curve,
        plaintext: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        encrypt(curve, &self.public, plaintext, rng)
    }

    /// Decrypt with this key's secret scalar
    pub fn decrypt(&self, curve: &Curve, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let secret = self.secret.as_ref().ok_or(Error::MissingPrivateKey)?;
        decrypt(curve, secret, ciphertext)
    }
}

/// Generate an SM2 encryption keypair: d uniform in [1, n-1], Q = d·G
pub fn generate_keypair<R: CryptoRng + RngCore>(
    curve: &Curve,
    rng: &mut R,
) -> Result<(Sm2PkePublicKey, Sm2PkeSecretKey)> {
    let (d, q) = curve.generate_keypair(rng)?;
    let q_bytes = q
        .serialize_coordinates()
        .ok_or(Error::Primitive(PrimitiveError::Processing {
            operation: "SM2 PKE keygen",
            details: "public point is the identity",
        }))?;
    Ok((
        Sm2PkePublicKey(q_bytes),
        Sm2PkeSecretKey(d.to_bytes()),
    ))
}

/// Encrypt `plaintext` to the holder of `public_key`.
///
/// Output is C1 ‖ C3 ‖ C2. A fresh ephemeral scalar is drawn per call;
/// the rejection loop lives inside the scalar draw, since no r/s-style
/// rejection applies to encryption. At most 32 bytes of plaintext are
/// carried by the single-hash keystream.
pub fn encrypt<R: CryptoRng + RngCore>(
    curve: &Curve,
    public_key: &Sm2PkePublicKey,
    plaintext: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>> {
    let (qx, qy) = split_coordinates(&public_key.0);
    let q = curve.point_from_bytes(&qx, &qy)?;

    let k = curve.generate_scalar(rng)?;

    // C1 = k·G, transmitted in the clear
    let c1 = curve.scalar_mult(&k, curve.generator())?;
    let c1_bytes = c1
        .serialize_coordinates()
        .ok_or(Error::EncryptionFailed("ephemeral point is the identity"))?;

    // (x2, y2) = k·Q is the shared secret
    let shared = curve.scalar_mult(&k, &q)?;
    let (x2, y2) = shared
        .coordinates()
        .ok_or(Error::EncryptionFailed("shared point is the identity"))?;
    let mut x2_bytes = x2.to_bytes();
    let mut y2_bytes = y2.to_bytes();

    let keystream = derive_keystream(&x2_bytes, &y2_bytes)?;
    let c2 = xor_keystream(plaintext, keystream.as_ref());
    let c3 = integrity_tag(&x2_bytes, plaintext, &y2_bytes)?;

    x2_bytes.zeroize();
    y2_bytes.zeroize();

    let mut out = Vec::with_capacity(C1_SIZE + C3_SIZE + c2.len());
    out.extend_from_slice(&c1_bytes);
    out.extend_from_slice(c3.as_ref());
    out.extend_from_slice(&c2);
    Ok(out)
}

/// Decrypt a C1 ‖ C3 ‖ C2 ciphertext.
///
/// Rejects ciphertexts too short to carry C1 and C3, C1 points that fail
/// the curve equation, and tags that do not match the recovered plaintext.
pub fn decrypt(
    curve: &Curve,
    secret_key: &Sm2PkeSecretKey,
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    if ciphertext.len() < C1_SIZE + C3_SIZE {
        return Err(Error::InvalidCiphertextFormat(
            "ciphertext shorter than C1 ‖ C3",
        ));
    }
    let (c1, rest) = ciphertext.split_at(C1_SIZE);
    let (c3, c2) = rest.split_at(C3_SIZE);

    let mut c1_array = [0u8; C1_SIZE];
    c1_array.copy_from_slice(c1);
    let (x1, y1) = split_coordinates(&c1_array);
    let c1_point = curve.point_from_bytes(&x1, &y1)?;

    // (x2, y2) = d·C1 recovers the shared secret
    let d = FieldElement::from_bytes(&secret_key.0);
    let shared = curve.scalar_mult(&d, &c1_point)?;
    let (x2, y2) = shared
        .coordinates()
        .ok_or(Error::DecryptionFailed("shared point is the identity"))?;
    let mut x2_bytes = x2.to_bytes();
    let mut y2_bytes = y2.to_bytes();

    let keystream = derive_keystream(&x2_bytes, &y2_bytes)?;
    let plaintext = xor_keystream(c2, keystream.as_ref());

    let expected_tag = integrity_tag(&x2_bytes, &plaintext, &y2_bytes)?;
    x2_bytes.zeroize();
    y2_bytes.zeroize();

    let received_tag = Digest::<C3_SIZE>::from_slice(c3)?;
    if !expected_tag.ct_eq(&received_tag) {
        return Err(Error::IntegrityCheckFailed);
    }

    Ok(plaintext)
}

/// Keystream t = H(x2 ‖ y2): a single hash call, 32 bytes
fn derive_keystream(
    x2: &[u8; FIELD_ELEMENT_SIZE],
    y2: &[u8; FIELD_ELEMENT_SIZE],
) -> Result<Digest<C3_SIZE>> {
    let mut hasher = Sm3::new();
    hasher.update(x2)?;
    hasher.update(y2)?;
    Ok(hasher.finalize()?)
}

/// Integrity tag C3 = H(x2 ‖ M ‖ y2)
fn integrity_tag(
    x2: &[u8; FIELD_ELEMENT_SIZE],
    message: &[u8],
    y2: &[u8; FIELD_ELEMENT_SIZE],
) -> Result<Digest<C3_SIZE>> {
    let mut hasher = Sm3::new();
    hasher.update(x2)?;
    hasher.update(message)?;
    hasher.update(y2)?;
    Ok(hasher.finalize()?)
}

/// Byte-wise XOR truncated to the shorter operand
fn xor_keystream(data: &[u8], keystream: &[u8]) -> Vec<u8> {
    data.iter()
        .zip(keystream.iter())
        .map(|(d, k)| d ^ k)
        .collect()
}

fn split_coordinates(bytes: &[u8; POINT_COORDINATES_SIZE]) -> ([u8; 32], [u8; 32]) {
    let mut x = [0u8; 32];
    let mut y = [0u8; 32];
    x.copy_from_slice(&bytes[..32]);
    y.copy_from_slice(&bytes[32..]);
    (x, y)
}

impl PkeTrait for Sm2Pke {
    type PublicKey = Sm2PkePublicKey;
    type SecretKey = Sm2PkeSecretKey;
    type Ciphertext = Vec<u8>;

    fn name() -> &'static str {
        "SM2-PKE-SM3"
    }

    fn keypair<R: CryptoRng + RngCore>(
        rng: &mut R,
    ) -> gmcrypt_api::Result<(Self::PublicKey, Self::SecretKey)> {
        let curve = sm2_curve();
        generate_keypair(&curve, rng).map_err(ApiError::from)
    }

    fn encrypt<R: RngCore + CryptoRng>(
        pk_recipient: &Self::PublicKey,
        plaintext: &[u8],
        rng: &mut R,
    ) -> gmcrypt_api::Result<Self::Ciphertext> {
        let curve = sm2_curve();
        encrypt(&curve, pk_recipient, plaintext, rng).map_err(ApiError::from)
    }

    fn decrypt(
        sk_recipient: &Self::SecretKey,
        ciphertext: &Self::Ciphertext,
    ) -> gmcrypt_api::Result<Vec<u8>> {
        let curve = sm2_curve();
        decrypt(&curve, sk_recipient, ciphertext).map_err(ApiError::from)
    }
}

#[cfg(test)]
mod tests;
