use super::Session;
use crate::error::SkmResult;
use crate::model::DeviceDescriptor;

/// Capability to discover security keys and open sessions to them
pub trait DeviceHost {
    /// The session handle returned by [`DeviceHost::open`]
    type Session: Session;

    /// List every connected security key, in platform order
    fn enumerate(&self) -> SkmResult<Vec<DeviceDescriptor>>;

    /// Open a session to one enumerated device
    ///
    /// # Errors
    ///
    /// Returns `SkmError::DeviceIo` if the device vanished or cannot be opened
    fn open(&self, device: &DeviceDescriptor) -> SkmResult<Self::Session>;
}
