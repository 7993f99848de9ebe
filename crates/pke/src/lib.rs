//! Public Key Encryption schemes
//!
//! This crate implements SM2 public-key encryption: an elliptic-curve
//! scheme whose keystream and integrity tag are both derived from the SM3
//! hash of an ephemeral shared point.

pub mod error;
pub mod sm2;

pub use sm2::{Sm2Pke, Sm2PkeKey, Sm2PkePublicKey, Sm2PkeSecretKey};
