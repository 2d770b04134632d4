use tracing::info;

use super::{acquire_token, open_device, CommandTarget};
use crate::error::SkmResult;
use crate::model::Permission;
use crate::ports::{DeviceHost, Prompter, Session};

/// Flip the alwaysUv option
pub fn toggle_always_uv<H, P>(host: &H, target: &CommandTarget, prompter: &mut P) -> SkmResult<()>
where
    H: DeviceHost,
    P: Prompter,
{
    let mut session = open_device(host, target.device_path(), prompter)?;
    let token = acquire_token(
        target.pin.as_ref(),
        &mut *session,
        Permission::AuthenticatorConfiguration,
        prompter,
    )?;
    session.toggle_always_uv(&token)?;
    info!(path = %session.path(), "always UV toggled");
    Ok(())
}

pub fn enable_enterprise_attestation<H, P>(
    host: &H,
    target: &CommandTarget,
    prompter: &mut P,
) -> SkmResult<()>
where
    H: DeviceHost,
    P: Prompter,
{
    let mut session = open_device(host, target.device_path(), prompter)?;
    let token = acquire_token(
        target.pin.as_ref(),
        &mut *session,
        Permission::AuthenticatorConfiguration,
        prompter,
    )?;
    session.enable_enterprise_attestation(&token)?;
    info!(path = %session.path(), "enterprise attestation enabled");
    Ok(())
}
