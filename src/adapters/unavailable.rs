use crate::error::{SkmError, SkmResult};
use crate::model::{
    AuthToken, CredentialId, DeviceDescriptor, DeviceInfo, Permission, Pin, RpEntry,
    StoredCredential,
};
use crate::ports::{DeviceHost, Lazy, Session};

const REASON: &str = "built without HID support; rebuild with --features hid";

/// Host used when no transport is compiled in. Enumeration always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableHost;

impl DeviceHost for UnavailableHost {
    type Session = NoSession;

    fn enumerate(&self) -> SkmResult<Vec<DeviceDescriptor>> {
        Err(SkmError::device_io("enumerate devices", REASON))
    }

    fn open(&self, device: &DeviceDescriptor) -> SkmResult<NoSession> {
        Err(SkmError::device_io(format!("open {}", device.path), REASON))
    }
}

/// A session that can never exist
#[derive(Debug)]
pub enum NoSession {}

impl Session for NoSession {
    fn info(&mut self) -> SkmResult<DeviceInfo> {
        match *self {}
    }

    fn pin_retries(&mut self) -> SkmResult<u32> {
        match *self {}
    }

    fn uv_retries(&mut self) -> SkmResult<u32> {
        match *self {}
    }

    fn token_using_pin(&mut self, _: &Pin, _: Permission, _: Option<&str>) -> SkmResult<AuthToken> {
        match *self {}
    }

    fn set_pin(&mut self, _: &Pin) -> SkmResult<()> {
        match *self {}
    }

    fn change_pin(&mut self, _: &Pin, _: &Pin) -> SkmResult<()> {
        match *self {}
    }

    fn enumerate_rps<'a>(&'a mut self, _: &'a AuthToken) -> Lazy<'a, RpEntry> {
        match *self {}
    }

    fn enumerate_credentials<'a>(
        &'a mut self,
        _: &'a AuthToken,
        _: &'a [u8],
    ) -> Lazy<'a, StoredCredential> {
        match *self {}
    }

    fn delete_credential(&mut self, _: &AuthToken, _: &CredentialId) -> SkmResult<()> {
        match *self {}
    }

    fn reset(&mut self) -> SkmResult<()> {
        match *self {}
    }

    fn toggle_always_uv(&mut self, _: &AuthToken) -> SkmResult<()> {
        match *self {}
    }

    fn enable_enterprise_attestation(&mut self, _: &AuthToken) -> SkmResult<()> {
        match *self {}
    }

    fn close(&mut self) -> SkmResult<()> {
        match *self {}
    }
}
