use std::ops::{Deref, DerefMut};

use tracing::{debug, warn};

use super::DeviceHost;
use crate::error::SkmResult;
use crate::model::{
    AuthToken, CredentialId, DeviceDescriptor, DeviceInfo, Permission, Pin, RpEntry,
    StoredCredential,
};

/// Lazily produced sequence where each item may fail on its own
pub type Lazy<'a, T> = Box<dyn Iterator<Item = SkmResult<T>> + 'a>;

/// An opened connection to one security key.
///
/// Every call is synchronous and blocks until the device answers.
pub trait Session {
    /// authenticatorGetInfo
    fn info(&mut self) -> SkmResult<DeviceInfo>;

    fn pin_retries(&mut self) -> SkmResult<u32>;

    /// Fails when the device has no built-in user verification
    fn uv_retries(&mut self) -> SkmResult<u32>;

    /// Exchange a PIN for a token scoped to `permission`
    ///
    /// # Errors
    ///
    /// Returns `SkmError::AuthenticationFailure` when the PIN is wrong
    fn token_using_pin(
        &mut self,
        pin: &Pin,
        permission: Permission,
        rp_id: Option<&str>,
    ) -> SkmResult<AuthToken>;

    fn set_pin(&mut self, new_pin: &Pin) -> SkmResult<()>;

    fn change_pin(&mut self, current: &Pin, new_pin: &Pin) -> SkmResult<()>;

    fn enumerate_rps<'a>(&'a mut self, token: &'a AuthToken) -> Lazy<'a, RpEntry>;

    fn enumerate_credentials<'a>(
        &'a mut self,
        token: &'a AuthToken,
        rp_id_hash: &'a [u8],
    ) -> Lazy<'a, StoredCredential>;

    fn delete_credential(&mut self, token: &AuthToken, id: &CredentialId) -> SkmResult<()>;

    /// Factory reset. Most keys demand a touch shortly after power-up.
    fn reset(&mut self) -> SkmResult<()>;

    /// Whether [`Session::reset`] can succeed on this backend at all
    fn supports_reset(&self) -> bool {
        true
    }

    fn toggle_always_uv(&mut self, token: &AuthToken) -> SkmResult<()>;

    fn enable_enterprise_attestation(&mut self, token: &AuthToken) -> SkmResult<()>;

    fn close(&mut self) -> SkmResult<()>;
}

/// Owns a session for the length of one command and closes it on drop,
/// whichever way the command ends.
pub struct SessionGuard<S: Session> {
    session: S,
    path: String,
}

impl<S: Session> SessionGuard<S> {
    pub fn open<H>(host: &H, device: &DeviceDescriptor) -> SkmResult<Self>
    where
        H: DeviceHost<Session = S>,
    {
        let session = host.open(device)?;
        debug!(path = %device.path, "session opened");
        Ok(Self {
            session,
            path: device.path.clone(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl<S: Session> Deref for SessionGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.session
    }
}

impl<S: Session> DerefMut for SessionGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.session
    }
}

impl<S: Session> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        match self.session.close() {
            Ok(()) => debug!(path = %self.path, "session closed"),
            Err(e) => warn!(path = %self.path, error = %e, "failed to close session"),
        }
    }
}
