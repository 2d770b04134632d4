//! Error types for skm
//!
//! One error enum covers every failure a command can surface. Validation
//! errors for PINs live next to the `Pin` model and convert via `#[from]`.

use std::fmt;

use thiserror::Error;

use crate::model::{Permission, PinError};

/// Result type alias for skm operations
pub type SkmResult<T> = Result<T, SkmError>;

/// What a failed lookup was looking for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// A device path given on the command line
    DevicePath(String),
    /// A base64url credential id given on the command line
    CredentialId(String),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::DevicePath(path) => write!(f, "device not found at path: {path}"),
            Lookup::CredentialId(id) => write!(f, "credential not found with ID: {id}"),
        }
    }
}

/// Top-level error type for all skm operations
#[derive(Error, Debug)]
pub enum SkmError {
    /// An explicit device path or credential id matched nothing
    #[error("{0}")]
    NotFound(Lookup),

    /// Enumeration returned no security keys
    #[error("no security keys found")]
    NoDevices,

    /// A PIN failed validation (too short, too long, confirmation mismatch)
    #[error("{0}")]
    Validation(#[from] PinError),

    /// A credential id given on the command line is not valid base64url
    #[error("failed to decode credential ID {id}: {reason}")]
    InvalidCredentialId { id: String, reason: String },

    /// The device rejected the PIN or the token
    #[error("authentication failed: {reason}")]
    AuthenticationFailure { reason: String },

    /// A token was presented for an operation outside its scope
    #[error("authorization token is scoped to {granted}, not {required}")]
    PermissionDenied {
        required: Permission,
        granted: Permission,
    },

    /// `pin set` on a device that already has a PIN
    #[error("PIN is already set, use 'skm pin change' to update it")]
    PinAlreadySet,

    /// `pin change` on a device without a PIN
    #[error("PIN is not set, use 'skm pin set' to set it")]
    PinNotSet,

    /// The user aborted a prompt
    #[error("canceled")]
    UserCancelled,

    /// The device backend cannot perform this operation at all
    #[error("{operation} is not supported by this device backend")]
    Unsupported { operation: &'static str },

    /// Any failure reported by the device collaborator
    #[error("{context}: {reason}")]
    DeviceIo { context: String, reason: String },

    /// Reading keys from or drawing to the terminal failed
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl SkmError {
    /// Wrap a collaborator failure with the operation that caused it
    pub fn device_io(context: impl Into<String>, reason: impl fmt::Display) -> Self {
        SkmError::DeviceIo {
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, SkmError::UserCancelled)
    }
}
