//! Domain parameter constants for the gmcrypt library
//!
//! Every value in this crate is plain data: fixed, named constants for the
//! curves and hash functions implemented by `gmcrypt-algorithms`. Parameters
//! are configuration, not runtime input - they are passed explicitly into the
//! algorithm crates so that tests can run against alternate parameter sets in
//! parallel.

pub mod sm2;
pub mod utils;
