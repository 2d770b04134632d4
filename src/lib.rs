//! skm: manage FIDO2 security keys from the terminal
//!
//! The crate is laid out as ports and adapters. [`ports`] holds the traits
//! the core depends on (device host, session, prompter), [`adapters`] the
//! implementations, [`use_cases`] one orchestration function per command,
//! [`tui`] the interactive prompts and [`views`] the plain-text output.

pub mod adapters;
pub mod error;
pub mod model;
pub mod ports;
pub mod tui;
pub mod use_cases;
pub mod views;

// Re-export commonly used types
pub use error::{SkmError, SkmResult};
