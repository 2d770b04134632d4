//! Ports (traits) the core depends on
//!
//! The device side ([`DeviceHost`], [`Session`]) is the authenticator
//! protocol collaborator; the user side ([`Prompter`]) is the interactive
//! front end. Use cases only see these traits, never concrete adapters.

mod device_host;
mod prompter;
mod session;

pub use device_host::DeviceHost;
pub use prompter::{ConfirmRequest, Outcome, Prompter, SecretRequest, TableRow, Validator};
pub use session::{Lazy, Session, SessionGuard};
