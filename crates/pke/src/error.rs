//! Error handling for PKE operations.

use core::fmt;

use gmcrypt_algorithms::error::Error as PrimitiveError;
use gmcrypt_api::Error as CoreError;

/// Error type for PKE operations.
#[derive(Debug)]
pub enum Error {
    /// Error bubbled up from the primitive layer
    Primitive(PrimitiveError),
    /// Decryption was requested on an encryption-only key
    MissingPrivateKey,
    /// The ciphertext does not parse into C1 ‖ C3 ‖ C2
    InvalidCiphertextFormat(&'static str),
    /// Encryption failed
    EncryptionFailed(&'static str),
    /// Decryption failed
    DecryptionFailed(&'static str),
    /// The recomputed C3 tag does not match the ciphertext's
    IntegrityCheckFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Primitive(e) => write!(f, "PKE primitive error: {}", e),
            Error::MissingPrivateKey => write!(f, "Private key is not available"),
            Error::InvalidCiphertextFormat(reason) => {
                write!(f, "Invalid PKE ciphertext format: {}", reason)
            }
            Error::EncryptionFailed(reason) => write!(f, "PKE encryption failed: {}", reason),
            Error::DecryptionFailed(reason) => write!(f, "PKE decryption failed: {}", reason),
            Error::IntegrityCheckFailed => write!(f, "PKE ciphertext integrity check failed"),
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

// Conversion from PKE Error to API Error
impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Primitive(e) => e.into(),
            Error::MissingPrivateKey => CoreError::InvalidKey {
                context: "SM2 PKE",
                message: "private key is not available".to_string(),
            },
            Error::InvalidCiphertextFormat(reason) => CoreError::InvalidCiphertext {
                context: "SM2 PKE",
                message: reason.to_string(),
            },
            Error::EncryptionFailed(reason) => CoreError::Other {
                context: "SM2 PKE encryption",
                message: reason.to_string(),
            },
            Error::DecryptionFailed(reason) => CoreError::DecryptionFailed {
                context: "SM2 PKE decryption",
                message: reason.to_string(),
            },
            Error::IntegrityCheckFailed => CoreError::AuthenticationFailed {
                context: "SM2 PKE decryption",
                message: "C3 tag mismatch".to_string(),
            },
        }
    }
}

/// Result type for PKE operations.
pub type Result<T> = core::result::Result<T, Error>;
