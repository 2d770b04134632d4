/// Snapshot of one connected security key, as reported by enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceDescriptor {
    /// Platform path of the device, unique among connected devices
    pub path: String,
    pub product: String,
    pub manufacturer: String,
    pub serial_number: String,
}

impl DeviceDescriptor {
    pub fn new(
        path: impl Into<String>,
        product: impl Into<String>,
        manufacturer: impl Into<String>,
        serial_number: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            product: product.into(),
            manufacturer: manufacturer.into(),
            serial_number: serial_number.into(),
        }
    }
}
