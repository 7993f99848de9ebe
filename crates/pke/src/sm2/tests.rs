use super::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Secret scalar used by the known-answer tests: the big-endian value of
/// a fixed 31-byte seed, plus one
const KAT_SECRET_HEX: &str = "00546869732069732061207665727920736563726574206b65795f3132333436";

/// A ciphertext for b"plaintext" produced under the KAT secret's public
/// key with a fixed ephemeral scalar
const KAT_CIPHERTEXT_HEX: &str = "0ea9906237d33d5c4472b35194f85bf424f259660f268598fb2d373ab1bbec5f1995ba59e8e8786e3168ff5108a7f79dfb6a2345bbd978548f01a51aa766814590fa8e22821533b51f514e0cfbf1e142b3fbd8b6ce375a0d87ccc0676f5f52da783cfab5c03eaf493e";

fn kat_key(curve: &Curve) -> Sm2PkeKey {
    let mut d = [0u8; 32];
    d.copy_from_slice(&hex::decode(KAT_SECRET_HEX).unwrap());
    Sm2PkeKey::from_secret_bytes(curve, &d).unwrap()
}

#[test]
fn test_known_answer_decrypt() {
    let curve = sm2_curve();
    let key = kat_key(&curve);
    let ciphertext = hex::decode(KAT_CIPHERTEXT_HEX).unwrap();

    let plaintext = key.decrypt(&curve, &ciphertext).unwrap();
    assert_eq!(plaintext, b"plaintext");
}

#[test]
fn test_encrypt_decrypt_roundtrip() {
    let curve = sm2_curve();
    let mut rng = ChaCha20Rng::seed_from_u64(21);
    let key = Sm2PkeKey::generate(&curve, &mut rng).unwrap();

    for message in [
        &b""[..],
        &b"x"[..],
        &b"plaintext"[..],
        &b"exactly thirty-two bytes long !!"[..],
    ] {
        let ciphertext = key.encrypt(&curve, message, &mut rng).unwrap();
        assert_eq!(ciphertext.len(), 64 + 32 + message.len());
        let decrypted = key.decrypt(&curve, &ciphertext).unwrap();
        assert_eq!(decrypted, message);
    }
}

#[test]
fn test_fresh_scalar_per_encryption() {
    let curve = sm2_curve();
    let mut rng = ChaCha20Rng::seed_from_u64(22);
    let key = Sm2PkeKey::generate(&curve, &mut rng).unwrap();

    let c1 = key.encrypt(&curve, b"same message", &mut rng).unwrap();
    let c2 = key.encrypt(&curve, b"same message", &mut rng).unwrap();
    // Fresh k means fresh C1 and keystream every call
    assert_ne!(c1, c2);
}

#[test]
fn test_keystream_ceiling_pinned() {
    // The single-hash keystream carries at most 32 bytes: C2 is truncated
    // while C3 covers the full plaintext, so longer messages cannot
    // round-trip. This behavior is deliberate.
    let curve = sm2_curve();
    let mut rng = ChaCha20Rng::seed_from_u64(23);
    let key = Sm2PkeKey::generate(&curve, &mut rng).unwrap();

    let long_message = [0x55u8; 40];
    let ciphertext = key.encrypt(&curve, &long_message, &mut rng).unwrap();
    // C2 was truncated to the 32-byte keystream
    assert_eq!(ciphertext.len(), 64 + 32 + 32);

    let result = key.decrypt(&curve, &ciphertext);
    assert!(matches!(result, Err(Error::IntegrityCheckFailed)));
}

#[test]
fn test_tampered_c1_rejected() {
    let curve = sm2_curve();
    let key = kat_key(&curve);
    let mut ciphertext = hex::decode(KAT_CIPHERTEXT_HEX).unwrap();

    // Perturbing a C1 coordinate byte knocks the point off the curve
    ciphertext[40] ^= 0x01;
    let result = key.decrypt(&curve, &ciphertext);
    assert!(matches!(
        result,
        Err(Error::Primitive(PrimitiveError::PointNotOnCurve { .. }))
    ));
}

#[test]
fn test_tampered_tag_rejected() {
    let curve = sm2_curve();
    let key = kat_key(&curve);
    let mut ciphertext = hex::decode(KAT_CIPHERTEXT_HEX).unwrap();

    // C3 occupies bytes 64..96
    ciphertext[70] ^= 0x01;
    let result = key.decrypt(&curve, &ciphertext);
    assert!(matches!(result, Err(Error::IntegrityCheckFailed)));
}

#[test]
fn test_tampered_payload_rejected() {
    let curve = sm2_curve();
    let key = kat_key(&curve);
    let mut ciphertext = hex::decode(KAT_CIPHERTEXT_HEX).unwrap();

    // C2 begins at byte 96
    ciphertext[96] ^= 0x01;
    let result = key.decrypt(&curve, &ciphertext);
    assert!(matches!(result, Err(Error::IntegrityCheckFailed)));
}

#[test]
fn test_truncated_ciphertext_rejected() {
    let curve = sm2_curve();
    let key = kat_key(&curve);

    let result = key.decrypt(&curve, &[0u8; 95]);
    assert!(matches!(result, Err(Error::InvalidCiphertextFormat(_))));
}

#[test]
fn test_missing_private_key() {
    let curve = sm2_curve();
    let key = kat_key(&curve);
    let public_only = Sm2PkeKey::from_public_bytes(&curve, &key.public_key().to_bytes()).unwrap();

    assert!(public_only.secret_key().is_none());
    let ciphertext = hex::decode(KAT_CIPHERTEXT_HEX).unwrap();
    let result = public_only.decrypt(&curve, &ciphertext);
    assert!(matches!(result, Err(Error::MissingPrivateKey)));
}

#[test]
fn test_public_key_validation() {
    let curve = sm2_curve();
    let key = kat_key(&curve);
    let mut bytes = key.public_key().to_bytes();
    bytes[10] ^= 0xFF;
    assert!(Sm2PkePublicKey::from_bytes(&curve, &bytes).is_err());
}

#[test]
fn test_pke_trait_roundtrip() {
    let mut rng = ChaCha20Rng::seed_from_u64(24);
    let (public_key, secret_key) = Sm2Pke::keypair(&mut rng).unwrap();

    let ciphertext = Sm2Pke::encrypt(&public_key, b"trait-level message", &mut rng).unwrap();
    let plaintext = Sm2Pke::decrypt(&secret_key, &ciphertext).unwrap();
    assert_eq!(plaintext, b"trait-level message");
    assert_eq!(Sm2Pke::name(), "SM2-PKE-SM3");
}
