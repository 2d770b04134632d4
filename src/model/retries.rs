/// Shown above a PIN prompt when one wrong PIN would lock the device
pub const LAST_ATTEMPT_WARNING: &str =
    "Warning: This is your LAST attempt before the device is locked.";

/// Remaining verification attempts as reported by a device.
///
/// `None` means the device did not (or could not) report the count. A device
/// without built-in user verification reports no UV count at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryCounts {
    pub pin: Option<u32>,
    pub uv: Option<u32>,
}

impl RetryCounts {
    pub fn new(pin: Option<u32>, uv: Option<u32>) -> Self {
        Self { pin, uv }
    }

    pub fn has_uv(&self) -> bool {
        self.uv.is_some()
    }

    /// Warning to show before asking for the PIN, if any
    pub fn warning(&self) -> Option<&'static str> {
        pin_warning(self.pin)
    }
}

/// The last-attempt warning applies to exactly one remaining PIN try
pub fn pin_warning(pin_retries: Option<u32>) -> Option<&'static str> {
    match pin_retries {
        Some(1) => Some(LAST_ATTEMPT_WARNING),
        _ => None,
    }
}
