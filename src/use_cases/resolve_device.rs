//! Device resolution
//!
//! Turns an optional `--device-path` into one concrete device, asking the
//! user to pick when nothing was given.

use tracing::debug;

use crate::error::{Lookup, SkmError, SkmResult};
use crate::model::DeviceDescriptor;
use crate::ports::{DeviceHost, Prompter, SessionGuard};

pub const SELECT_DEVICE_TITLE: &str = "Select a security key:";

/// Pick the device a command runs against.
///
/// An explicit path must match an enumerated device exactly and never
/// prompts. Without one, the user chooses from `devices` under `title`.
///
/// # Errors
///
/// - `NotFound` if `explicit` matches no device
/// - `NoDevices` if nothing is connected and no path was given
/// - `UserCancelled` if the selection prompt is aborted
pub fn resolve_device<'a, P: Prompter>(
    explicit: Option<&str>,
    devices: &'a [DeviceDescriptor],
    title: &str,
    prompter: &mut P,
) -> SkmResult<&'a DeviceDescriptor> {
    if let Some(path) = explicit {
        return devices
            .iter()
            .find(|d| d.path == path)
            .ok_or_else(|| SkmError::NotFound(Lookup::DevicePath(path.to_string())));
    }

    if devices.is_empty() {
        return Err(SkmError::NoDevices);
    }

    let device = prompter.select(title, devices)?.submitted()?;
    debug!(path = %device.path, "device selected");
    Ok(device)
}

/// Enumerate, resolve and open in one step
pub fn open_device<H, P>(
    host: &H,
    explicit: Option<&str>,
    prompter: &mut P,
) -> SkmResult<SessionGuard<H::Session>>
where
    H: DeviceHost,
    P: Prompter,
{
    let devices = host.enumerate()?;
    let device = resolve_device(explicit, &devices, SELECT_DEVICE_TITLE, prompter)?;
    SessionGuard::open(host, device)
}
