//! Common types for cryptographic primitives

mod digest;

pub use digest::Digest;
