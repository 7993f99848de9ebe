//! End-to-end exercises across the gmcrypt crates: one key, every scheme.

use gmcrypt_algorithms::ec::{sm2_curve, Curve};
use gmcrypt_algorithms::hash::{HashFunction, Sm3};
use gmcrypt_pke::sm2 as pke;
use gmcrypt_sign::sm2::{compute_z, Sm2Key};
use gmcrypt_sign::{recover_private_key, sign_with_fixed_nonce};
use gmcrypt_tests::scalar_from_seed;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// One secret scalar drives both the signature and encryption schemes.
#[test]
fn shared_key_signs_and_decrypts() {
    let curve = sm2_curve();
    let mut rng = ChaCha20Rng::seed_from_u64(100);

    let signing_key = Sm2Key::generate(&curve, &mut rng).unwrap();
    let d = signing_key.secret_key().unwrap().to_bytes();

    // Rebuild the same key for encryption
    let pke_key = pke::Sm2PkeKey::from_secret_bytes(&curve, &d).unwrap();
    assert_eq!(
        pke_key.public_key().to_bytes(),
        signing_key.public_key().0,
        "both schemes must derive the same public point"
    );

    let message = b"signed, then encrypted";
    let signature = signing_key.sign(&curve, message, &mut rng).unwrap();
    assert!(signing_key.verify(&curve, message, &signature));

    let ciphertext = pke_key.encrypt(&curve, message, &mut rng).unwrap();
    assert_eq!(pke_key.decrypt(&curve, &ciphertext).unwrap(), message);
}

/// The full published attack scenario: a victim key and nonce derived from
/// fixed seeds, two signed transactions, closed-form key recovery, and the
/// stolen key decrypting the victim's mail.
#[test]
fn nonce_reuse_attack_end_to_end() {
    let curve = sm2_curve();

    let d = scalar_from_seed(&curve, b"This is a very secret key_12345");
    let victim = Sm2Key::from_secret_bytes(&curve, &d).unwrap();
    let secret = victim.secret_key().unwrap();
    let reused_k = scalar_from_seed(&curve, b"A bad random number generator!!");

    let user_id: &[u8] = b"attacker@example.com";
    let message1: &[u8] = b"Transaction details: send 10 BTC to Alice.";
    let message2: &[u8] = b"Transaction details: send 1000 BTC to Bob.";

    let sig1 = sign_with_fixed_nonce(&curve, secret, message1, user_id, &reused_k).unwrap();
    let sig2 = sign_with_fixed_nonce(&curve, secret, message2, user_id, &reused_k).unwrap();

    // Both signatures verify on their own; nothing looks wrong from outside
    assert!(victim.verify_with_id(&curve, message1, user_id, &sig1));
    assert!(victim.verify_with_id(&curve, message2, user_id, &sig2));

    // The attacker works from public data alone
    let z = compute_z(&curve, user_id, victim.public_key()).unwrap();
    let digest = |message: &[u8]| {
        let mut hasher = Sm3::new();
        hasher.update(z.as_ref()).unwrap();
        hasher.update(message).unwrap();
        hasher.finalize().unwrap()
    };
    let e1 = digest(message1);
    let e2 = digest(message2);

    let stolen =
        recover_private_key(&curve, &sig1, &sig2, Some((e1.as_bytes(), e2.as_bytes()))).unwrap();
    assert_eq!(stolen, d);

    // The stolen key decrypts traffic addressed to the victim
    let mut rng = ChaCha20Rng::seed_from_u64(101);
    let victim_pke = pke::Sm2PkeKey::from_public_bytes(&curve, &victim.public_key().0).unwrap();
    let ciphertext = victim_pke
        .encrypt(&curve, b"for the victim's eyes only", &mut rng)
        .unwrap();

    let attacker_key = pke::Sm2PkeKey::from_secret_bytes(&curve, &stolen).unwrap();
    assert_eq!(
        attacker_key.decrypt(&curve, &ciphertext).unwrap(),
        b"for the victim's eyes only"
    );
}

/// Every scheme works unchanged over an alternate parameter set.
#[test]
fn schemes_run_on_alternate_curve() {
    let curve = Curve::new(&gmcrypt_params::sm2::SECP256K1).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(102);

    let key = Sm2Key::generate(&curve, &mut rng).unwrap();
    let signature = key.sign(&curve, b"cross-curve message", &mut rng).unwrap();
    assert!(key.verify(&curve, b"cross-curve message", &signature));
    assert!(!key.verify(&curve, b"another message", &signature));

    let pke_key = pke::Sm2PkeKey::generate(&curve, &mut rng).unwrap();
    let ciphertext = pke_key.encrypt(&curve, b"cross-curve secret", &mut rng).unwrap();
    assert_eq!(
        pke_key.decrypt(&curve, &ciphertext).unwrap(),
        b"cross-curve secret"
    );
}

/// Keys generated under one parameter set are rejected by another: the
/// public point of an SM2 key is (overwhelmingly) not on secp256k1.
#[test]
fn keys_do_not_cross_parameter_sets() {
    let sm2 = sm2_curve();
    let k256 = Curve::new(&gmcrypt_params::sm2::SECP256K1).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(103);

    let key = Sm2Key::generate(&sm2, &mut rng).unwrap();
    assert!(Sm2Key::from_public_bytes(&k256, &key.public_key().0).is_err());
}
