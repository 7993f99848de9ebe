//! Trait definitions for the gmcrypt API surface

pub mod pke;
pub mod signature;

pub use pke::Pke;
pub use signature::Signature;
