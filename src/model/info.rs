use std::collections::BTreeMap;

/// Capabilities reported by authenticatorGetInfo
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceInfo {
    pub aaguid: Vec<u8>,
    pub versions: Vec<String>,
    pub extensions: Vec<String>,
    /// Option name to enabled flag, ordered by name for stable output
    pub options: BTreeMap<String, bool>,
    pub max_msg_size: Option<u32>,
    pub pin_uv_protocols: Vec<u32>,
}

impl DeviceInfo {
    pub const CLIENT_PIN: &'static str = "clientPin";

    pub fn option(&self, name: &str) -> Option<bool> {
        self.options.get(name).copied()
    }

    /// Whether a PIN has been set on the device
    pub fn has_client_pin(&self) -> bool {
        self.option(Self::CLIENT_PIN).unwrap_or(false)
    }

    /// AAGUID in the usual 8-4-4-4-12 form, raw hex if it is not 16 bytes
    pub fn aaguid_string(&self) -> String {
        let hex = hex::encode(&self.aaguid);
        if self.aaguid.len() != 16 {
            return hex;
        }
        format!(
            "{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        )
    }
}
