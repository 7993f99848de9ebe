//! Cryptographic primitives for the gmcrypt library
//!
//! This crate implements the building blocks consumed by the scheme crates:
//!
//! - [`ec`]: modular big-integer arithmetic, affine Weierstrass curve
//!   points, the group law, and scalar multiplication over explicit domain
//!   parameters
//! - [`hash`]: the SM3 hash function
//! - [`types`]: fixed-size digest type
//!
//! All arithmetic is the textbook, branchy formulation. It is meant for
//! correctness testing and cryptanalysis teaching, not for protecting real
//! data: the branch sequence of the group law and the inversion loop leaks
//! the operands through timing.

pub mod ec;
pub mod error;
pub mod hash;
pub mod types;

pub use error::{Error, Result};
