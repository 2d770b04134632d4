//! Discoverable credential listing and deletion

use tracing::{debug, info};

use super::{open_device, CommandTarget};
use crate::error::{Lookup, SkmError, SkmResult};
use crate::model::{AuthToken, CredentialId, CredentialRecord, Permission};
use crate::ports::{DeviceHost, Prompter, Session};

pub const SELECT_CREDENTIAL_TITLE: &str = "Select a credential to delete:";

/// Flatten RP enumeration and per-RP credential enumeration into one list.
///
/// Order is RP order, then credential order within each RP. Any enumeration
/// error aborts the whole listing.
pub fn collect_credentials<S>(session: &mut S, token: &AuthToken) -> SkmResult<Vec<CredentialRecord>>
where
    S: Session + ?Sized,
{
    let rps = session.enumerate_rps(token).collect::<SkmResult<Vec<_>>>()?;
    debug!(count = rps.len(), "relying parties enumerated");

    let mut records = Vec::new();
    for entry in &rps {
        for credential in session.enumerate_credentials(token, &entry.rp_id_hash) {
            records.push(CredentialRecord::new(entry.rp.clone(), credential?));
        }
    }
    Ok(records)
}

/// Every discoverable credential on the target device
pub fn list_credentials<H, P>(
    host: &H,
    target: &CommandTarget,
    prompter: &mut P,
) -> SkmResult<Vec<CredentialRecord>>
where
    H: DeviceHost,
    P: Prompter,
{
    let mut session = open_device(host, target.device_path(), prompter)?;
    let token = super::acquire_token(
        target.pin.as_ref(),
        &mut *session,
        Permission::CredentialManagement,
        prompter,
    )?;
    collect_credentials(&mut *session, &token)
}

/// Delete one credential, chosen by base64url id or interactively.
///
/// Returns `None` when the device stores no credentials at all.
///
/// # Errors
///
/// - `InvalidCredentialId` if `credential_id` is not base64url; checked
///   before the device is touched
/// - `NotFound` if no stored credential has that id
pub fn delete_credential<H, P>(
    host: &H,
    target: &CommandTarget,
    credential_id: Option<&str>,
    prompter: &mut P,
) -> SkmResult<Option<CredentialRecord>>
where
    H: DeviceHost,
    P: Prompter,
{
    let wanted = credential_id
        .map(|encoded| CredentialId::from_base64(encoded).map(|id| (encoded, id)))
        .transpose()?;

    let mut session = open_device(host, target.device_path(), prompter)?;
    let token = super::acquire_token(
        target.pin.as_ref(),
        &mut *session,
        Permission::CredentialManagement,
        prompter,
    )?;

    let records = collect_credentials(&mut *session, &token)?;
    if records.is_empty() {
        return Ok(None);
    }

    let record = match wanted {
        Some((encoded, id)) => records
            .iter()
            .find(|r| r.credential_id == id)
            .ok_or_else(|| SkmError::NotFound(Lookup::CredentialId(encoded.to_string())))?,
        None => prompter.select(SELECT_CREDENTIAL_TITLE, &records)?.submitted()?,
    };

    session.delete_credential(&token, &record.credential_id)?;
    info!(rp = %record.rp.id, "credential deleted");
    Ok(Some(record.clone()))
}
