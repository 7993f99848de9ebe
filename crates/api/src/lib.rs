//! Public API traits and types for the gmcrypt library
//!
//! This crate provides the public API surface for the gmcrypt workspace:
//! trait definitions for signature and public-key encryption schemes, and
//! the error types shared by every member crate.

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result};

// Re-export all traits from the traits module
pub use traits::{Pke, Signature};
