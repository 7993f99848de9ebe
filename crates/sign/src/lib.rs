//! Digital Signature Schemes
//!
//! This crate implements the SM2 elliptic-curve signature scheme together
//! with the classic cryptanalytic attack against it: closed-form recovery
//! of the secret key from two signatures that reused an ephemeral nonce.

pub mod error;
pub mod sm2;

pub use sm2::recovery::{recover_nonce, recover_private_key, sign_with_fixed_nonce};
pub use sm2::{Sm2, Sm2Key, Sm2PublicKey, Sm2SecretKey, Sm2Signature};
