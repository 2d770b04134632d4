use std::fmt::Write;

use crate::model::{DeviceDescriptor, DeviceInfo, RetryCounts};

const LABEL_WIDTH: usize = 20;
const OPTION_WIDTH: usize = 25;

/// Detailed report of one security key
pub fn render_device_info(
    device: &DeviceDescriptor,
    info: &DeviceInfo,
    retries: RetryCounts,
) -> String {
    let mut out = String::from("Security Key Information\n\n");

    row(&mut out, "Product:", &device.product);
    row(&mut out, "Manufacturer:", &device.manufacturer);
    row(&mut out, "Serial:", &device.serial_number);
    row(&mut out, "Path:", &device.path);
    row(&mut out, "AAGUID:", &info.aaguid_string());

    row(&mut out, "PIN Retries:", &count(retries.pin));
    if retries.has_uv() {
        row(&mut out, "UV Retries:", &count(retries.uv));
    }

    row(&mut out, "Versions:", &info.versions.join(", "));
    row(&mut out, "Extensions:", &info.extensions.join(", "));

    if let Some(size) = info.max_msg_size.filter(|s| *s > 0) {
        row(&mut out, "Max Msg Size:", &format!("{size} bytes"));
    }
    if !info.pin_uv_protocols.is_empty() {
        let protocols: Vec<String> = info.pin_uv_protocols.iter().map(u32::to_string).collect();
        row(&mut out, "PIN/UV Protocols:", &protocols.join(", "));
    }

    if !info.options.is_empty() {
        out.push_str("\nOptions:\n");
        for (name, enabled) in &info.options {
            let label = format!("{name}:");
            let state = if *enabled { "✔ enabled" } else { "✘ disabled" };
            let _ = writeln!(out, "  {label:<width$}{state}", width = OPTION_WIDTH - 2);
        }
    }

    out
}

fn row(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{label:<LABEL_WIDTH$}{value}");
}

fn count(retries: Option<u32>) -> String {
    retries.map_or_else(|| "unknown".to_string(), |n| n.to_string())
}
