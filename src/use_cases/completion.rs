//! Values offered by shell completion
//!
//! Completion runs without a terminal, so nothing here prompts. A device
//! that cannot be reached simply yields no candidates at the call site.

use super::{collect_credentials, list_devices};
use crate::error::{Lookup, SkmError, SkmResult};
use crate::model::{Permission, Pin};
use crate::ports::{DeviceHost, Session, SessionGuard};

/// A credential id with the text shells show next to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialCandidate {
    pub id: String,
    /// `user (relying party)`
    pub description: String,
}

/// Paths of connected devices starting with `prefix`
pub fn device_path_candidates<H: DeviceHost>(host: &H, prefix: &str) -> SkmResult<Vec<String>> {
    Ok(list_devices(host)?
        .into_iter()
        .map(|d| d.path)
        .filter(|path| path.starts_with(prefix))
        .collect())
}

/// Base64url ids of the credentials on the device at `device_path` that
/// start with `prefix`
pub fn credential_id_candidates<H: DeviceHost>(
    host: &H,
    device_path: &str,
    pin: &Pin,
    prefix: &str,
) -> SkmResult<Vec<CredentialCandidate>> {
    let devices = list_devices(host)?;
    let device = devices
        .iter()
        .find(|d| d.path == device_path)
        .ok_or_else(|| SkmError::NotFound(Lookup::DevicePath(device_path.to_string())))?;

    let mut session = SessionGuard::open(host, device)?;
    let token = session.token_using_pin(pin, Permission::CredentialManagement, None)?;

    Ok(collect_credentials(&mut *session, &token)?
        .into_iter()
        .map(|record| CredentialCandidate {
            id: record.credential_id.to_base64(),
            description: format!("{} ({})", record.user.name, record.rp.label()),
        })
        .filter(|candidate| candidate.id.starts_with(prefix))
        .collect())
}
