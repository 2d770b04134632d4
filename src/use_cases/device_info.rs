//! Device listing and detailed device information

use tracing::warn;

use super::resolve_device;
use crate::error::{SkmError, SkmResult};
use crate::model::{DeviceDescriptor, DeviceInfo, RetryCounts};
use crate::ports::{DeviceHost, Prompter, Session, SessionGuard};

pub const SELECT_INFO_DEVICE_TITLE: &str = "Select a security key to view its information:";

/// Every connected security key, in enumeration order
pub fn list_devices<H: DeviceHost>(host: &H) -> SkmResult<Vec<DeviceDescriptor>> {
    host.enumerate()
}

/// What `info` shows for one device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceReport {
    pub device: DeviceDescriptor,
    pub info: DeviceInfo,
    pub retries: RetryCounts,
}

#[derive(Debug)]
pub enum InfoEntry {
    Report(DeviceReport),
    /// The device could not be read; other devices are still reported
    Failed {
        device: DeviceDescriptor,
        error: SkmError,
    },
}

/// Which devices `info` covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoScope<'a> {
    /// One device, by path or chosen interactively
    One(Option<&'a str>),
    All,
}

/// Read device information.
///
/// Returns an empty list when nothing is connected. With
/// [`InfoScope::All`], a device that cannot be read becomes an
/// [`InfoEntry::Failed`] instead of failing the command.
pub fn device_info<H, P>(host: &H, scope: InfoScope<'_>, prompter: &mut P) -> SkmResult<Vec<InfoEntry>>
where
    H: DeviceHost,
    P: Prompter,
{
    let devices = host.enumerate()?;
    if devices.is_empty() {
        return Ok(Vec::new());
    }

    match scope {
        InfoScope::One(path) => {
            let device = resolve_device(path, &devices, SELECT_INFO_DEVICE_TITLE, prompter)?;
            Ok(vec![InfoEntry::Report(read_report(host, device)?)])
        }
        InfoScope::All => Ok(devices
            .into_iter()
            .map(|device| match read_report(host, &device) {
                Ok(report) => InfoEntry::Report(report),
                Err(error) => {
                    warn!(path = %device.path, "failed to read device: {error}");
                    InfoEntry::Failed { device, error }
                }
            })
            .collect()),
    }
}

/// Remaining PIN attempts and, when the device has built-in UV, UV attempts
pub fn pin_retries<H, P>(host: &H, device_path: Option<&str>, prompter: &mut P) -> SkmResult<RetryCounts>
where
    H: DeviceHost,
    P: Prompter,
{
    let mut session = super::open_device(host, device_path, prompter)?;
    let pin = session.pin_retries()?;
    let uv = session.uv_retries().ok();
    Ok(RetryCounts::new(Some(pin), uv))
}

fn read_report<H: DeviceHost>(host: &H, device: &DeviceDescriptor) -> SkmResult<DeviceReport> {
    let mut session = SessionGuard::open(host, device)?;
    let info = session.info()?;
    let pin = session
        .pin_retries()
        .inspect_err(|e| warn!("could not read PIN retries: {e}"))
        .ok();
    // devices without built-in UV reject the query
    let uv = session.uv_retries().ok();

    Ok(DeviceReport {
        device: device.clone(),
        info,
        retries: RetryCounts::new(pin, uv),
    })
}
