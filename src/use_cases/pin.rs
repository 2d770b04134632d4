use tracing::info;

use super::{open_device, prompt_current_pin, read_new_pin, CommandTarget, CURRENT_PIN_TITLE};
use crate::error::{SkmError, SkmResult};
use crate::model::Pin;
use crate::ports::{DeviceHost, Prompter, Session};

/// Set the first PIN on a device that has none
///
/// # Errors
///
/// Returns `PinAlreadySet` without prompting when the device has a PIN
pub fn set_pin<H, P>(
    host: &H,
    device_path: Option<&str>,
    new_pin: Option<Pin>,
    prompter: &mut P,
) -> SkmResult<()>
where
    H: DeviceHost,
    P: Prompter,
{
    let mut session = open_device(host, device_path, prompter)?;
    if session.info()?.has_client_pin() {
        return Err(SkmError::PinAlreadySet);
    }

    let new_pin = match new_pin {
        Some(pin) => pin,
        None => read_new_pin(prompter)?,
    };
    session.set_pin(&new_pin)?;
    info!(path = %session.path(), "PIN set");
    Ok(())
}

/// Replace the PIN of a device.
///
/// `target.pin` is the current PIN; when absent it is prompted for, with the
/// last-attempt warning when it applies.
pub fn change_pin<H, P>(
    host: &H,
    target: &CommandTarget,
    new_pin: Option<Pin>,
    prompter: &mut P,
) -> SkmResult<()>
where
    H: DeviceHost,
    P: Prompter,
{
    let mut session = open_device(host, target.device_path(), prompter)?;
    if !session.info()?.has_client_pin() {
        return Err(SkmError::PinNotSet);
    }

    let current = match &target.pin {
        Some(pin) => pin.clone(),
        None => prompt_current_pin(&mut *session, prompter, CURRENT_PIN_TITLE)?,
    };
    let new_pin = match new_pin {
        Some(pin) => pin,
        None => read_new_pin(prompter)?,
    };

    session.change_pin(&current, &new_pin)?;
    info!(path = %session.path(), "PIN changed");
    Ok(())
}
