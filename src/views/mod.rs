//! Plain-text rendering of command results

mod device_info;
mod rows;
mod table;

pub use device_info::render_device_info;
pub use rows::credential_cells;
pub use table::render_table;

use crate::model::{CredentialRecord, DeviceDescriptor};
use crate::ports::TableRow;

/// Table of connected security keys, framed by blank lines
pub fn render_devices(devices: &[DeviceDescriptor]) -> String {
    let table = render_table(DeviceDescriptor::HEADERS, devices.iter().map(|d| d.cells()));
    format!("\n{table}\n")
}

/// Table of discoverable credentials with full ids
pub fn render_credentials(credentials: &[CredentialRecord]) -> String {
    render_table(CredentialRecord::HEADERS, credentials.iter().map(credential_cells))
}
