//! Table projections of devices and credentials

use crate::model::{CredentialRecord, DeviceDescriptor};
use crate::ports::TableRow;

/// Longest credential id shown in full in the selection table
const ID_PREVIEW_CHARS: usize = 20;

impl TableRow for DeviceDescriptor {
    const HEADERS: &'static [&'static str] = &["PATH", "PRODUCT", "MANUFACTURER", "SERIAL"];
    const WIDTHS: &'static [u16] = &[20, 30, 40, 20];

    fn cells(&self) -> Vec<String> {
        vec![
            self.path.clone(),
            self.product.clone(),
            self.manufacturer.clone(),
            self.serial_number.clone(),
        ]
    }
}

impl TableRow for CredentialRecord {
    const HEADERS: &'static [&'static str] = &["RP", "USER", "DISPLAY NAME", "CREDENTIAL ID"];
    const WIDTHS: &'static [u16] = &[20, 20, 20, 20];

    fn cells(&self) -> Vec<String> {
        let mut cells = credential_cells(self);
        if let Some(id) = cells.last_mut() {
            *id = truncate(id, ID_PREVIEW_CHARS);
        }
        cells
    }
}

/// Cells of a credential with the full base64url id
pub fn credential_cells(record: &CredentialRecord) -> Vec<String> {
    vec![
        record.rp.label().to_string(),
        record.user.name.clone(),
        record.user.display_name.clone(),
        record.credential_id.to_base64(),
    ]
}

/// Shorten to `max` characters, the last three replaced by an ellipsis
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max - 3).collect();
    short.push_str("...");
    short
}
