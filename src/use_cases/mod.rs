//! Use cases (orchestration)
//!
//! One function per command. Each follows the same pipeline: resolve the
//! device, open a session, authenticate when needed, run the operation and
//! hand the result back for rendering. Sessions are closed by
//! [`SessionGuard`](crate::ports::SessionGuard) on every path.

mod authenticate;
mod completion;
mod config;
mod credentials;
mod device_info;
mod pin;
mod reset;
mod resolve_device;

pub use authenticate::{
    acquire_token, prompt_current_pin, read_new_pin, CONFIRM_PIN_TITLE, CURRENT_PIN_TITLE,
    ENTER_PIN_TITLE, NEW_PIN_TITLE,
};
pub use completion::{credential_id_candidates, device_path_candidates, CredentialCandidate};
pub use config::{enable_enterprise_attestation, toggle_always_uv};
pub use credentials::{
    collect_credentials, delete_credential, list_credentials, SELECT_CREDENTIAL_TITLE,
};
pub use device_info::{
    device_info, list_devices, pin_retries, DeviceReport, InfoEntry, InfoScope,
    SELECT_INFO_DEVICE_TITLE,
};
pub use pin::{change_pin, set_pin};
pub use reset::{reset, ResetOutcome, RESET_DESCRIPTION, RESET_TITLE, TOUCH_HINT};
pub use resolve_device::{open_device, resolve_device, SELECT_DEVICE_TITLE};

use crate::model::Pin;

/// Device and PIN supplied up front, bypassing the prompts
#[derive(Debug, Clone, Default)]
pub struct CommandTarget {
    pub device_path: Option<String>,
    pub pin: Option<Pin>,
}

impl CommandTarget {
    pub fn new(device_path: Option<String>, pin: Option<Pin>) -> Self {
        Self { device_path, pin }
    }

    pub fn device_path(&self) -> Option<&str> {
        self.device_path.as_deref()
    }
}
