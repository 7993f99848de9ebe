//! Demonstration: recovering an SM2 private key from two signatures that
//! reused a nonce.
//!
//! A victim signs two transactions with a "random" nonce that is anything
//! but. The attacker, holding only the two public signatures, solves the
//! signing equation for the secret key.

use gmcrypt_algorithms::ec::{sm2_curve, FieldElement};
use gmcrypt_algorithms::hash::{HashFunction, Sm3};
use gmcrypt_sign::sm2::{compute_z, Sm2Key};
use gmcrypt_sign::{recover_private_key, sign_with_fixed_nonce};

const USER_ID: &[u8] = b"attacker@example.com";

fn scalar_from_seed(curve: &gmcrypt_algorithms::ec::Curve, seed: &[u8]) -> [u8; 32] {
    let mut padded = [0u8; 32];
    padded[32 - seed.len()..].copy_from_slice(seed);
    curve
        .order()
        .add(&curve.order().reduce_bytes(&padded), &FieldElement::one())
        .to_bytes()
}

fn main() {
    let curve = sm2_curve();

    // The victim's key, derived from a fixed seed for reproducibility
    let d = scalar_from_seed(&curve, b"This is a very secret key_12345");
    let victim = Sm2Key::from_secret_bytes(&curve, &d).unwrap();
    println!("victim private key d: {}", hex::encode(d));

    let message1: &[u8] = b"Transaction details: send 10 BTC to Alice.";
    let message2: &[u8] = b"Transaction details: send 1000 BTC to Bob.";

    // A broken RNG hands out the same k twice
    let reused_k = scalar_from_seed(&curve, b"A bad random number generator!!");
    println!("reused nonce k:       {}", hex::encode(reused_k));

    let secret = victim.secret_key().unwrap();
    let sig1 = sign_with_fixed_nonce(&curve, secret, message1, USER_ID, &reused_k).unwrap();
    let sig2 = sign_with_fixed_nonce(&curve, secret, message2, USER_ID, &reused_k).unwrap();
    println!("signature 1: r = {}", hex::encode(sig1.r));
    println!("             s = {}", hex::encode(sig1.s));
    println!("signature 2: r = {}", hex::encode(sig2.r));
    println!("             s = {}", hex::encode(sig2.s));

    // The attacker recomputes the message digests from public data only
    let z = compute_z(&curve, USER_ID, victim.public_key()).unwrap();
    let digest = |message: &[u8]| {
        let mut hasher = Sm3::new();
        hasher.update(z.as_ref()).unwrap();
        hasher.update(message).unwrap();
        hasher.finalize().unwrap()
    };
    let e1 = digest(message1);
    let e2 = digest(message2);

    let recovered =
        recover_private_key(&curve, &sig1, &sig2, Some((e1.as_bytes(), e2.as_bytes()))).unwrap();
    println!("recovered key:        {}", hex::encode(recovered));

    assert_eq!(recovered, d);
    println!("attack succeeded: recovered key matches the victim's");
}
