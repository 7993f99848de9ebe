//! Shared helpers for the gmcrypt integration suites

use gmcrypt_algorithms::ec::{Curve, FieldElement};

/// Derive a scalar in [1, n-1] from a short ASCII seed: the seed's
/// big-endian integer value modulo (n-1), plus one. Seeds shorter than 32
/// bytes sit far below n, so the reduction is a no-op for the fixtures
/// used here.
pub fn scalar_from_seed(curve: &Curve, seed: &[u8]) -> [u8; 32] {
    assert!(seed.len() < 32, "fixture seeds are short by construction");
    let mut padded = [0u8; 32];
    padded[32 - seed.len()..].copy_from_slice(seed);
    curve
        .order()
        .add(&curve.order().reduce_bytes(&padded), &FieldElement::one())
        .to_bytes()
}
