//! Elliptic curve primitives over short Weierstrass curves
//!
//! This module implements affine curve arithmetic over explicit domain
//! parameters. The curve equation is y² = x³ + ax + b over the prime field
//! F_p, with a base point G generating a subgroup of prime order n.
//!
//! Unlike a hardened implementation, nothing here is constant time: scalar
//! multiplication is plain least-significant-bit-first double-and-add, and
//! field inversion is the branchy binary extended Euclidean algorithm. The
//! contract of this module is bit-exact correctness, which is what the
//! signature, encryption, and key-recovery layers above it need.

mod curve;
mod field;
mod modulus;
mod point;

pub use curve::Curve;
pub use field::FieldElement;
pub use modulus::Modulus;
pub use point::Point;

use gmcrypt_params::sm2::SM2_P256;

/// Size of a field element in bytes (32 bytes = 256 bits)
pub const FIELD_ELEMENT_SIZE: usize = 32;

/// Size of a scalar in bytes (32 bytes = 256 bits)
pub const SCALAR_SIZE: usize = 32;

/// Size of a serialized point: two raw 32-byte big-endian coordinates
pub const POINT_COORDINATES_SIZE: usize = 2 * FIELD_ELEMENT_SIZE;

/// Build the standard SM2 curve
///
/// Returns the group defined by the recommended parameters of
/// GB/T 32918.5-2017.
pub fn sm2_curve() -> Curve {
    Curve::new(&SM2_P256).expect("standard curve parameters must be valid")
}
