//! # gmcrypt
//!
//! A pure Rust implementation of the SM2 elliptic-curve signature and
//! public-key encryption schemes with their companion SM3 hash function,
//! together with a nonce-reuse private-key recovery attack.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! gmcrypt = "0.1"
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`gmcrypt-api`]: Trait surface and error types
//! - [`gmcrypt-params`]: Domain parameters (SM2 recommended curve, secp256k1)
//! - [`gmcrypt-algorithms`]: Field/order arithmetic, curve group, SM3
//! - [`gmcrypt-sign`]: SM2 signatures and the nonce-reuse recovery attack
//! - [`gmcrypt-pke`]: SM2 public-key encryption
//!
//! ## Security
//!
//! This workspace exists for correctness testing and cryptanalysis teaching.
//! The arithmetic is the branchy textbook formulation and leaks timing; do
//! not use it to protect real data.

pub use gmcrypt_api as api;
pub use gmcrypt_params as params;

pub use gmcrypt_algorithms as algorithms;
pub use gmcrypt_pke as pke;
pub use gmcrypt_sign as sign;

/// Common imports for gmcrypt users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    // Re-export core traits
    pub use crate::api::{Pke, Signature};

    // Hash primitive and digest type
    pub use crate::algorithms::hash::{HashFunction, Sm3};
    pub use crate::algorithms::types::Digest;

    // Curve group and domain parameters
    pub use crate::algorithms::ec::{sm2_curve, Curve, Point};
    pub use crate::params::sm2::SM2_P256;

    // Schemes
    pub use crate::pke::sm2::Sm2Pke;
    pub use crate::sign::sm2::{Sm2, Sm2Key, Sm2Signature};
}
