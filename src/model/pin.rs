use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

/// A security key PIN. The buffer is wiped on drop and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(Zeroizing<String>);

impl Pin {
    /// Minimum length of a new PIN, in characters
    pub const MIN_LENGTH: usize = 4;

    /// Maximum length of a PIN, in UTF-8 bytes
    pub const MAX_BYTES: usize = 63;

    /// A PIN that is about to be written to a device
    pub fn new(pin: impl Into<String>) -> Result<Self, PinError> {
        let pin = Zeroizing::new(pin.into());
        Self::validate(&pin)?;
        Ok(Self(pin))
    }

    /// A PIN the device already knows. Only emptiness is checked here, the
    /// device is the judge of correctness.
    pub fn current(pin: impl Into<String>) -> Result<Self, PinError> {
        let pin = Zeroizing::new(pin.into());
        if pin.is_empty() {
            return Err(PinError::Empty);
        }
        Ok(Self(pin))
    }

    pub fn validate(pin: &str) -> Result<(), PinError> {
        if pin.chars().count() < Self::MIN_LENGTH {
            return Err(PinError::TooShort);
        }
        if pin.len() > Self::MAX_BYTES {
            return Err(PinError::TooLong);
        }
        Ok(())
    }

    /// Check a re-typed confirmation against this PIN
    pub fn confirm(&self, confirmation: &str) -> Result<(), PinError> {
        if self.as_str() == confirmation {
            Ok(())
        } else {
            Err(PinError::Mismatch)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pin([REDACTED])")
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinError {
    #[error("PIN must not be empty")]
    Empty,

    #[error("PIN must be at least {min} characters long", min = Pin::MIN_LENGTH)]
    TooShort,

    #[error("PIN must be at most {max} bytes long", max = Pin::MAX_BYTES)]
    TooLong,

    #[error("PINs do not match")]
    Mismatch,
}
