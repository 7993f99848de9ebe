//! Digital signature traits for gmcrypt
//!
//! This module defines the trait that all signature algorithms must implement.
//! The design prioritizes security by not requiring mutable access to secret keys.

use crate::Result;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// Core trait for digital signature algorithms
///
/// This trait defines the minimal interface that all signature algorithms
/// must implement. Secret keys are opaque types that cannot be directly
/// manipulated as bytes; use explicit serialization methods if needed.
///
/// All randomness is supplied by the caller. Schemes drawing ephemeral
/// nonces (such as SM2) take the RNG at signing time, which keeps the
/// implementation deterministic and testable under seeded generators.
pub trait Signature {
    /// Public key type for this algorithm
    type PublicKey: Clone;

    /// Secret key type - must be zeroizable but not byte-accessible
    type SecretKey: Zeroize + Clone;

    /// Signature data type
    type SignatureData: Clone;

    /// Returns the name of this signature algorithm
    fn name() -> &'static str;

    /// Generate a new key pair using the provided RNG
    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> Result<(Self::PublicKey, Self::SecretKey)>;

    /// Sign a message with the given secret key
    ///
    /// The RNG supplies the ephemeral nonce for randomized schemes. It must
    /// be cryptographically secure: nonce reuse across two signatures leaks
    /// the secret key (see the recovery module of `gmcrypt-sign`).
    fn sign<R: CryptoRng + RngCore>(
        message: &[u8],
        secret_key: &Self::SecretKey,
        rng: &mut R,
    ) -> Result<Self::SignatureData>;

    /// Verify a signature against a message and public key
    ///
    /// Returns `Err` both for invalid signatures and for malformed input;
    /// callers that only need a yes/no answer can treat the two alike.
    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> Result<()>;
}
