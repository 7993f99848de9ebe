use super::recovery::{recover_nonce, recover_private_key, sign_with_fixed_nonce};
use super::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn bytes32(hex_str: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&hex::decode(hex_str).unwrap());
    out
}

/// Derive a scalar in [1, n-1] from a short ASCII seed: the seed's
/// big-endian integer value modulo (n-1), plus one. The seeds used here
/// are 31 bytes, far below n, so the reduction is a no-op.
fn scalar_from_seed(curve: &Curve, seed: &[u8]) -> [u8; 32] {
    assert!(seed.len() < 32);
    let mut padded = [0u8; 32];
    padded[32 - seed.len()..].copy_from_slice(seed);
    curve
        .order()
        .add(
            &curve.order().reduce_bytes(&padded),
            &FieldElement::one(),
        )
        .to_bytes()
}

/// The fixed victim key used by the known-answer tests
fn victim_key(curve: &Curve) -> Sm2Key {
    let d = scalar_from_seed(curve, b"This is a very secret key_12345");
    Sm2Key::from_secret_bytes(curve, &d).unwrap()
}

/// The fixed nonce shared by the known-answer and attack tests
fn fixed_nonce(curve: &Curve) -> [u8; 32] {
    scalar_from_seed(curve, b"A bad random number generator!!")
}

#[test]
fn test_public_key_derivation_vector() {
    let curve = sm2_curve();
    let key = victim_key(&curve);
    assert_eq!(
        key.public_key().0[..32],
        bytes32("bfd3d6d90cee0e190f2acc278f17cdb49a2e184938d8aef1fc813da656a45d5e")
    );
    assert_eq!(
        key.public_key().0[32..],
        bytes32("bcd497c1ac64df3ff9e5d9990fc01ceb03f57104c4d9a16319074d11660e0bf6")
    );
}

#[test]
fn test_z_digest_vector() {
    let curve = sm2_curve();
    let key = victim_key(&curve);
    let z = compute_z(&curve, DEFAULT_USER_ID, key.public_key()).unwrap();
    assert_eq!(
        z.to_hex(),
        "9a7a1b0520a33ead412497078635dff1753b682cc0879f43d073ae6355abdc51"
    );
}

#[test]
fn test_fixed_nonce_signature_vector() {
    let curve = sm2_curve();
    let key = victim_key(&curve);
    let k = fixed_nonce(&curve);

    let sig = sign_with_fixed_nonce(
        &curve,
        key.secret_key().unwrap(),
        b"plaintext",
        DEFAULT_USER_ID,
        &k,
    )
    .unwrap();

    assert_eq!(
        sig.r,
        bytes32("47bd4f842d594b6c934163e82d11e30a6f3973a591047799d233bae43439a7d9")
    );
    assert_eq!(
        sig.s,
        bytes32("a856e1d3b047ae9a68f39352135c96cad12e24009697e7504726b2d8a1e78b4b")
    );

    // The deterministic signature verifies like any other
    assert!(key.verify(&curve, b"plaintext", &sig));
}

#[test]
fn test_sign_verify_roundtrip() {
    let curve = sm2_curve();
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let key = Sm2Key::generate(&curve, &mut rng).unwrap();

    let message = b"an ordinary message";
    let sig = key.sign(&curve, message, &mut rng).unwrap();
    assert!(key.verify(&curve, message, &sig));

    // A verification-only copy of the key agrees
    let verifier = Sm2Key::from_public_bytes(&curve, &key.public_key().0).unwrap();
    assert!(verifier.verify(&curve, message, &sig));
}

#[test]
fn test_sign_verify_custom_identity() {
    let curve = sm2_curve();
    let mut rng = ChaCha20Rng::seed_from_u64(2);
    let key = Sm2Key::generate(&curve, &mut rng).unwrap();

    let message = b"identity-bound message";
    let sig = key
        .sign_with_id(&curve, message, b"alice@example.com", &mut rng)
        .unwrap();

    assert!(key.verify_with_id(&curve, message, b"alice@example.com", &sig));
    // The same signature under another identity must not verify
    assert!(!key.verify_with_id(&curve, message, b"bob@example.com", &sig));
    assert!(!key.verify(&curve, message, &sig));
}

#[test]
fn test_tampered_message_rejected() {
    let curve = sm2_curve();
    let key = victim_key(&curve);
    let k = fixed_nonce(&curve);
    let sig = sign_with_fixed_nonce(
        &curve,
        key.secret_key().unwrap(),
        b"plaintext",
        DEFAULT_USER_ID,
        &k,
    )
    .unwrap();

    // Flip one byte of the message: "plaintext" -> "plaintexu"
    assert!(!key.verify(&curve, b"plaintexu", &sig));
    // Or drop a byte
    assert!(!key.verify(&curve, b"plaintex", &sig));
}

#[test]
fn test_tampered_signature_rejected() {
    let curve = sm2_curve();
    let key = victim_key(&curve);
    let k = fixed_nonce(&curve);
    let sig = sign_with_fixed_nonce(
        &curve,
        key.secret_key().unwrap(),
        b"plaintext",
        DEFAULT_USER_ID,
        &k,
    )
    .unwrap();

    let mut bad_r = sig.clone();
    bad_r.r[31] ^= 0x01;
    assert!(!key.verify(&curve, b"plaintext", &bad_r));

    let mut bad_s = sig.clone();
    bad_s.s[0] ^= 0x80;
    assert!(!key.verify(&curve, b"plaintext", &bad_s));
}

#[test]
fn test_out_of_range_components_rejected() {
    let curve = sm2_curve();
    let key = victim_key(&curve);
    let k = fixed_nonce(&curve);
    let sig = sign_with_fixed_nonce(
        &curve,
        key.secret_key().unwrap(),
        b"plaintext",
        DEFAULT_USER_ID,
        &k,
    )
    .unwrap();

    // r = 0
    let zeroed_r = Sm2Signature {
        r: [0u8; 32],
        s: sig.s,
    };
    assert!(!key.verify(&curve, b"plaintext", &zeroed_r));

    // s = n is outside [1, n-1]
    let oversized_s = Sm2Signature {
        r: sig.r,
        s: curve.order().value().to_bytes(),
    };
    assert!(!key.verify(&curve, b"plaintext", &oversized_s));
}

#[test]
fn test_wrong_public_key_rejected() {
    let curve = sm2_curve();
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let key = Sm2Key::generate(&curve, &mut rng).unwrap();
    let other = Sm2Key::generate(&curve, &mut rng).unwrap();

    let sig = key.sign(&curve, b"message", &mut rng).unwrap();
    assert!(!other.verify(&curve, b"message", &sig));
}

#[test]
fn test_missing_private_key() {
    let curve = sm2_curve();
    let key = victim_key(&curve);
    let public_only = Sm2Key::from_public_bytes(&curve, &key.public_key().0).unwrap();

    assert!(public_only.secret_key().is_none());
    let mut rng = ChaCha20Rng::seed_from_u64(4);
    let result = public_only.sign(&curve, b"message", &mut rng);
    assert!(matches!(result, Err(Error::MissingPrivateKey)));
}

#[test]
fn test_from_public_bytes_rejects_off_curve() {
    let curve = sm2_curve();
    let key = victim_key(&curve);
    let mut bytes = key.public_key().0;
    bytes[40] ^= 0xFF;
    assert!(Sm2Key::from_public_bytes(&curve, &bytes).is_err());
}

#[test]
fn test_overlong_identity_rejected() {
    let curve = sm2_curve();
    let key = victim_key(&curve);
    let long_id = vec![b'x'; 8192];
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let result = key.sign_with_id(&curve, b"message", &long_id, &mut rng);
    assert!(matches!(
        result,
        Err(Error::Primitive(PrimitiveError::Length { .. }))
    ));
}

#[test]
fn test_signature_trait_roundtrip() {
    let mut rng = ChaCha20Rng::seed_from_u64(6);
    let (public_key, secret_key) = Sm2::keypair(&mut rng).unwrap();

    let sig = Sm2::sign(b"trait-level message", &secret_key, &mut rng).unwrap();
    assert!(Sm2::verify(b"trait-level message", &sig, &public_key).is_ok());
    assert!(Sm2::verify(b"another message", &sig, &public_key).is_err());
    assert_eq!(Sm2::name(), "SM2-SM3");
}

// -- nonce-reuse recovery --------------------------------------------------

const MESSAGE_1: &[u8] = b"Transaction details: send 10 BTC to Alice.";
const MESSAGE_2: &[u8] = b"Transaction details: send 1000 BTC to Bob.";
const ATTACKER_ID: &[u8] = b"attacker@example.com";

#[test]
fn test_nonce_reuse_recovers_private_key() {
    let curve = sm2_curve();
    let key = victim_key(&curve);
    let secret = key.secret_key().unwrap();
    let k = fixed_nonce(&curve);

    let sig1 = sign_with_fixed_nonce(&curve, secret, MESSAGE_1, ATTACKER_ID, &k).unwrap();
    let sig2 = sign_with_fixed_nonce(&curve, secret, MESSAGE_2, ATTACKER_ID, &k).unwrap();

    // The two faulty signatures, pinned
    assert_eq!(
        sig1.r,
        bytes32("abb948a4ed2ba6e0967a075c5cdd22ccb9134f21704158e303dbb7ca56acdc33")
    );
    assert_eq!(
        sig1.s,
        bytes32("0580cc6024f5048d116091c2941246da807ff033c6052b7cc08f7370ac355b3d")
    );
    assert_eq!(
        sig2.r,
        bytes32("60f01b70a5f93e831eb214c185071ad54049e7d744fe2475914f63706851aa95")
    );
    assert_eq!(
        sig2.s,
        bytes32("4369e2a9b407c44f02c237418259f5700045813105166b6a33d8c6e2dcf47d4e")
    );

    let recovered = recover_private_key(&curve, &sig1, &sig2, None).unwrap();
    assert_eq!(recovered, secret.to_bytes());
}

#[test]
fn test_recovery_with_digest_cross_check() {
    let curve = sm2_curve();
    let key = victim_key(&curve);
    let secret = key.secret_key().unwrap();
    let k = fixed_nonce(&curve);

    let sig1 = sign_with_fixed_nonce(&curve, secret, MESSAGE_1, ATTACKER_ID, &k).unwrap();
    let sig2 = sign_with_fixed_nonce(&curve, secret, MESSAGE_2, ATTACKER_ID, &k).unwrap();

    // The attacker recomputes e1, e2 from public data
    let z = compute_z(&curve, ATTACKER_ID, key.public_key()).unwrap();
    let e1 = {
        let mut hasher = Sm3::new();
        hasher.update(z.as_ref()).unwrap();
        hasher.update(MESSAGE_1).unwrap();
        hasher.finalize().unwrap()
    };
    let e2 = {
        let mut hasher = Sm3::new();
        hasher.update(z.as_ref()).unwrap();
        hasher.update(MESSAGE_2).unwrap();
        hasher.finalize().unwrap()
    };

    let recovered =
        recover_private_key(&curve, &sig1, &sig2, Some((e1.as_bytes(), e2.as_bytes()))).unwrap();
    assert_eq!(recovered, secret.to_bytes());
}

#[test]
fn test_recovery_degenerate_input() {
    let curve = sm2_curve();
    let key = victim_key(&curve);
    let k = fixed_nonce(&curve);
    let sig = sign_with_fixed_nonce(
        &curve,
        key.secret_key().unwrap(),
        MESSAGE_1,
        ATTACKER_ID,
        &k,
    )
    .unwrap();

    // Identical signatures make the denominator vanish
    let result = recover_private_key(&curve, &sig, &sig.clone(), None);
    assert!(matches!(result, Err(Error::DegenerateAttackInput)));
}

#[test]
fn test_recovery_cross_check_detects_distinct_nonces() {
    let curve = sm2_curve();
    let key = victim_key(&curve);
    let secret = key.secret_key().unwrap();

    // Two different nonces: the formula yields garbage, and the digests
    // expose it
    let k1 = fixed_nonce(&curve);
    let k2 = scalar_from_seed(&curve, b"Another equally bad nonce 12345");
    let sig1 = sign_with_fixed_nonce(&curve, secret, MESSAGE_1, ATTACKER_ID, &k1).unwrap();
    let sig2 = sign_with_fixed_nonce(&curve, secret, MESSAGE_2, ATTACKER_ID, &k2).unwrap();

    let z = compute_z(&curve, ATTACKER_ID, key.public_key()).unwrap();
    let mut hasher = Sm3::new();
    hasher.update(z.as_ref()).unwrap();
    hasher.update(MESSAGE_1).unwrap();
    let e1 = hasher.finalize().unwrap();
    let mut hasher = Sm3::new();
    hasher.update(z.as_ref()).unwrap();
    hasher.update(MESSAGE_2).unwrap();
    let e2 = hasher.finalize().unwrap();

    let result = recover_private_key(&curve, &sig1, &sig2, Some((e1.as_bytes(), e2.as_bytes())));
    assert!(matches!(result, Err(Error::NonceMismatch)));
}

#[test]
fn test_recover_nonce_inverts_signing() {
    let curve = sm2_curve();
    let key = victim_key(&curve);
    let secret = key.secret_key().unwrap();
    let k = fixed_nonce(&curve);

    let sig = sign_with_fixed_nonce(&curve, secret, MESSAGE_1, ATTACKER_ID, &k).unwrap();
    let recovered_k = recover_nonce(&curve, &sig, &secret.to_bytes());
    assert_eq!(recovered_k, k);
}

#[test]
fn test_fixed_nonce_rejects_bad_nonce() {
    let curve = sm2_curve();
    let key = victim_key(&curve);
    let secret = key.secret_key().unwrap();

    let result = sign_with_fixed_nonce(&curve, secret, MESSAGE_1, ATTACKER_ID, &[0u8; 32]);
    assert!(result.is_err());

    let n_bytes = curve.order().value().to_bytes();
    let result = sign_with_fixed_nonce(&curve, secret, MESSAGE_1, ATTACKER_ID, &n_bytes);
    assert!(result.is_err());
}
