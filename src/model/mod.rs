//! Domain types
//!
//! Newtypes and snapshots shared by the ports, the prompts and the use cases.

mod credential;
mod device;
mod info;
mod permission;
mod pin;
mod retries;
mod token;

pub use credential::{
    CredentialId, CredentialRecord, RelyingParty, RpEntry, StoredCredential, UserEntity,
};
pub use device::DeviceDescriptor;
pub use info::DeviceInfo;
pub use permission::Permission;
pub use pin::{Pin, PinError};
pub use retries::{pin_warning, RetryCounts, LAST_ATTEMPT_WARNING};
pub use token::AuthToken;
