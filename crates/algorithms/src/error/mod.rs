//! Error handling for cryptographic primitives

use core::fmt;

use gmcrypt_api::Error as CoreError;

pub mod validate;

/// The error type for cryptographic primitives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Parameter validation error
    Parameter {
        /// Name of the invalid parameter
        name: &'static str,
        /// Reason why the parameter is invalid
        reason: &'static str,
    },

    /// Length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Attempted modular inversion of zero or of an element sharing a
    /// factor with the modulus
    ///
    /// Outside the sanctioned rejection-sampling loops this is an invariant
    /// violation: well-formed keys and points never produce it.
    InvalidInverse {
        /// Context where the inversion was attempted
        context: &'static str,
    },

    /// A supplied point does not satisfy the curve equation
    PointNotOnCurve {
        /// Context where the point was rejected
        context: &'static str,
    },

    /// Processing error during a cryptographic operation
    Processing {
        /// Operation that failed
        operation: &'static str,
        /// Additional details about the failure
        details: &'static str,
    },
}

impl Error {
    /// Shorthand to create a Parameter error
    pub fn param(name: &'static str, reason: &'static str) -> Self {
        Error::Parameter { name, reason }
    }
}

/// Result type for cryptographic primitives operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Error::InvalidInverse { context } => {
                write!(f, "Invalid inverse: {}", context)
            }
            Error::PointNotOnCurve { context } => {
                write!(f, "Point not on curve: {}", context)
            }
            Error::Processing { operation, details } => {
                write!(f, "Processing error in {}: {}", operation, details)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Parameter { name, reason } => CoreError::InvalidParameter {
                context: name,
                message: reason.to_string(),
            },
            Error::Length {
                context,
                expected,
                actual,
            } => CoreError::InvalidLength {
                context,
                expected,
                actual,
            },
            Error::InvalidInverse { context } => CoreError::InvalidParameter {
                context: "modular inverse",
                message: context.to_string(),
            },
            Error::PointNotOnCurve { context } => CoreError::InvalidParameter {
                context: "curve point",
                message: context.to_string(),
            },
            Error::Processing { operation, details } => CoreError::Other {
                context: operation,
                message: details.to_string(),
            },
        }
    }
}
