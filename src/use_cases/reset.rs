use tracing::info;

use super::open_device;
use crate::error::{SkmError, SkmResult};
use crate::ports::{ConfirmRequest, DeviceHost, Prompter, Session};

pub const RESET_TITLE: &str = "Are you absolutely sure?";
pub const RESET_DESCRIPTION: &str = "This will PERMANENTLY delete all credentials and reset the PIN. \
     Most keys require physical touch after this command is sent.";
pub const TOUCH_HINT: &str = "Performing reset. Please touch your security key if it starts blinking.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The user answered no; the device was not touched
    Declined,
    Completed,
}

/// Factory reset, after confirmation unless `assume_yes`.
///
/// A backend that cannot reset is refused before the user is asked.
pub fn reset<H, P>(
    host: &H,
    device_path: Option<&str>,
    assume_yes: bool,
    prompter: &mut P,
) -> SkmResult<ResetOutcome>
where
    H: DeviceHost,
    P: Prompter,
{
    let mut session = open_device(host, device_path, prompter)?;
    if !session.supports_reset() {
        return Err(SkmError::Unsupported { operation: "factory reset" });
    }

    let confirmed = assume_yes
        || prompter
            .confirm(ConfirmRequest::new(RESET_TITLE, RESET_DESCRIPTION))?
            .submitted()?;
    if !confirmed {
        return Ok(ResetOutcome::Declined);
    }

    prompter.status(TOUCH_HINT);
    session.reset()?;
    info!(path = %session.path(), "device reset");
    Ok(ResetOutcome::Completed)
}
