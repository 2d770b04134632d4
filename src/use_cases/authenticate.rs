//! PIN acquisition and token exchange

use tracing::{debug, warn};

use crate::error::SkmResult;
use crate::model::{AuthToken, Permission, Pin};
use crate::ports::{Prompter, SecretRequest, Session};

pub const ENTER_PIN_TITLE: &str = "Enter PIN";
pub const CURRENT_PIN_TITLE: &str = "Enter Current PIN";
pub const NEW_PIN_TITLE: &str = "Enter New PIN";
pub const CONFIRM_PIN_TITLE: &str = "Confirm New PIN";

/// Exchange a PIN for a token scoped to `permission`.
///
/// Uses `explicit` when given, otherwise asks for the PIN. A rejected PIN is
/// reported as `AuthenticationFailure`; nothing is retried here.
pub fn acquire_token<S, P>(
    explicit: Option<&Pin>,
    session: &mut S,
    permission: Permission,
    prompter: &mut P,
) -> SkmResult<AuthToken>
where
    S: Session + ?Sized,
    P: Prompter,
{
    let prompted;
    let pin = match explicit {
        Some(pin) => pin,
        None => {
            prompted = prompt_current_pin(session, prompter, ENTER_PIN_TITLE)?;
            &prompted
        }
    };

    let token = session.token_using_pin(pin, permission, None)?;
    debug!(%permission, "token acquired");
    Ok(token)
}

/// Ask for the PIN the device already has, warning on the last attempt.
///
/// The retry count is best effort; when the device cannot report it the
/// prompt shows no warning.
pub fn prompt_current_pin<S, P>(session: &mut S, prompter: &mut P, title: &str) -> SkmResult<Pin>
where
    S: Session + ?Sized,
    P: Prompter,
{
    let retries = session
        .pin_retries()
        .inspect_err(|e| warn!("could not read PIN retries: {e}"))
        .ok();

    let value = prompter
        .secret(SecretRequest::new(title).retries(retries))?
        .submitted()?;
    Ok(Pin::current(value.as_str())?)
}

/// Ask for a new PIN twice.
///
/// The first entry must be a valid PIN, the second must repeat it. Both
/// checks run inline in the prompt and again on the submitted values.
pub fn read_new_pin<P: Prompter>(prompter: &mut P) -> SkmResult<Pin> {
    let first = prompter
        .secret(
            SecretRequest::new(NEW_PIN_TITLE)
                .validate(|value| Pin::validate(value).map_err(|e| e.to_string())),
        )?
        .submitted()?;
    let pin = Pin::new(first.as_str())?;

    let confirmation = prompter
        .secret(SecretRequest::new(CONFIRM_PIN_TITLE).validate(|value| {
            pin.confirm(value).map_err(|e| e.to_string())
        }))?
        .submitted()?;
    pin.confirm(&confirmation)?;

    Ok(pin)
}
