//! Error handling for signature operations.

use core::fmt;

use gmcrypt_algorithms::error::Error as PrimitiveError;
use gmcrypt_api::Error as CoreError;

/// Error type for signature operations.
#[derive(Debug)]
pub enum Error {
    /// Error bubbled up from the primitive layer
    Primitive(PrimitiveError),
    /// Signing was requested on a verification-only key
    MissingPrivateKey,
    /// The key-recovery denominator (s2 + r2 - s1 - r1) vanished mod n;
    /// this signature pair does not admit recovery
    DegenerateAttackInput,
    /// The cross-check digests show the two signatures never shared a nonce
    NonceMismatch,
    /// Internal signing failure
    SigningFailed(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Primitive(e) => write!(f, "Signature primitive error: {}", e),
            Error::MissingPrivateKey => write!(f, "Private key is not available"),
            Error::DegenerateAttackInput => {
                write!(f, "Signature pair does not admit key recovery")
            }
            Error::NonceMismatch => write!(f, "Signatures do not share a nonce"),
            Error::SigningFailed(reason) => write!(f, "Signing failed: {}", reason),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Primitive(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PrimitiveError> for Error {
    fn from(err: PrimitiveError) -> Self {
        Error::Primitive(err)
    }
}

// Conversion from signature Error to API Error
impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Primitive(e) => e.into(),
            Error::MissingPrivateKey => CoreError::InvalidKey {
                context: "SM2",
                message: "private key is not available".to_string(),
            },
            Error::DegenerateAttackInput => CoreError::InvalidParameter {
                context: "SM2 key recovery",
                message: "signature pair does not admit key recovery".to_string(),
            },
            Error::NonceMismatch => CoreError::InvalidSignature {
                context: "SM2 key recovery",
                message: "signatures do not share a nonce".to_string(),
            },
            Error::SigningFailed(reason) => CoreError::Other {
                context: "SM2 sign",
                message: reason.to_string(),
            },
        }
    }
}

/// Result type for signature operations.
pub type Result<T> = core::result::Result<T, Error>;
