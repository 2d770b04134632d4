//! Adapters - concrete implementations of ports (traits)

#[cfg(feature = "hid")]
mod hid;
mod unavailable;

#[cfg(test)]
pub mod fake_device;
#[cfg(test)]
pub mod scripted_prompter;

#[cfg(feature = "hid")]
pub use hid::{HidHost, HidSession};
pub use unavailable::{NoSession, UnavailableHost};

/// The device host this build talks to
#[cfg(feature = "hid")]
pub fn default_host() -> HidHost {
    HidHost::new()
}

/// The device host this build talks to
#[cfg(not(feature = "hid"))]
pub fn default_host() -> UnavailableHost {
    UnavailableHost
}
