//! USB HID transport backed by `ctap-hid-fido2`.
//!
//! The library derives a fresh pinUvAuthToken inside every privileged call,
//! so the [`AuthToken`] handed out here carries the PIN itself. The PIN is
//! checked against the device when the token is issued.

use ctap_hid_fido2::{
    fidokey::FidoKeyHid, get_fidokey_devices, public_key_credential_descriptor::PublicKeyCredentialDescriptor,
    FidoKeyHidFactory, HidInfo, HidParam, LibCfg,
};
use tracing::{debug, info};

use crate::error::{SkmError, SkmResult};
use crate::model::{
    AuthToken, CredentialId, DeviceDescriptor, DeviceInfo, Permission, Pin, RelyingParty,
    RpEntry, StoredCredential, UserEntity,
};
use crate::ports::{DeviceHost, Lazy, Session};

fn device_path(info: &HidInfo) -> String {
    match &info.param {
        HidParam::Path(path) => path.clone(),
        HidParam::VidPid { vid, pid } => format!("{vid:04x}:{pid:04x}"),
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HidHost;

impl HidHost {
    pub fn new() -> Self {
        Self
    }
}

impl DeviceHost for HidHost {
    type Session = HidSession;

    fn enumerate(&self) -> SkmResult<Vec<DeviceDescriptor>> {
        let devices: Vec<DeviceDescriptor> = get_fidokey_devices()
            .iter()
            .map(|d| DeviceDescriptor::new(device_path(d), &d.product_string, &d.info, ""))
            .collect();
        debug!(count = devices.len(), "enumerated HID devices");
        Ok(devices)
    }

    fn open(&self, device: &DeviceDescriptor) -> SkmResult<HidSession> {
        let param = get_fidokey_devices()
            .into_iter()
            .find(|d| device_path(d) == device.path)
            .map(|d| d.param)
            .ok_or_else(|| SkmError::device_io(format!("open {}", device.path), "device vanished"))?;

        let key = FidoKeyHidFactory::create_by_params(&vec![param], &LibCfg::init())
            .map_err(|e| SkmError::device_io(format!("open {}", device.path), e))?;
        info!(path = %device.path, "connected to security key");
        Ok(HidSession { key })
    }
}

pub struct HidSession {
    key: FidoKeyHid,
}

/// The PIN a token was issued for
fn token_pin(token: &AuthToken) -> SkmResult<&str> {
    std::str::from_utf8(token.secret()).map_err(|e| SkmError::AuthenticationFailure {
        reason: e.to_string(),
    })
}

fn lazy_error<'a, T: 'a>(e: SkmError) -> Lazy<'a, T> {
    Box::new(std::iter::once(Err(e)))
}

impl Session for HidSession {
    fn info(&mut self) -> SkmResult<DeviceInfo> {
        let info = self
            .key
            .get_info()
            .map_err(|e| SkmError::device_io("get info", e))?;
        Ok(DeviceInfo {
            aaguid: info.aaguid,
            versions: info.versions,
            extensions: info.extensions,
            options: info.options.into_iter().collect(),
            max_msg_size: u32::try_from(info.max_msg_size).ok(),
            pin_uv_protocols: info.pin_uv_auth_protocols,
        })
    }

    fn pin_retries(&mut self) -> SkmResult<u32> {
        let retries = self
            .key
            .get_pin_retries()
            .map_err(|e| SkmError::device_io("get PIN retries", e))?;
        u32::try_from(retries).map_err(|e| SkmError::device_io("get PIN retries", e))
    }

    fn uv_retries(&mut self) -> SkmResult<u32> {
        let retries = self
            .key
            .get_uv_retries()
            .map_err(|e| SkmError::device_io("get UV retries", e))?;
        u32::try_from(retries).map_err(|e| SkmError::device_io("get UV retries", e))
    }

    fn token_using_pin(
        &mut self,
        pin: &Pin,
        permission: Permission,
        _rp_id: Option<&str>,
    ) -> SkmResult<AuthToken> {
        self.key
            .get_pin_token(pin.as_str())
            .map_err(|e| SkmError::AuthenticationFailure {
                reason: e.to_string(),
            })?;
        debug!(%permission, "PIN accepted");
        Ok(AuthToken::new(permission, pin.as_str().as_bytes().to_vec()))
    }

    fn set_pin(&mut self, new_pin: &Pin) -> SkmResult<()> {
        self.key
            .set_new_pin(new_pin.as_str())
            .map_err(|e| SkmError::device_io("set PIN", e))
    }

    fn change_pin(&mut self, current: &Pin, new_pin: &Pin) -> SkmResult<()> {
        self.key
            .change_pin(current.as_str(), new_pin.as_str())
            .map_err(|e| SkmError::device_io("change PIN", e))
    }

    fn enumerate_rps<'a>(&'a mut self, token: &'a AuthToken) -> Lazy<'a, RpEntry> {
        let pin = match token
            .require(Permission::CredentialManagement)
            .and_then(|()| token_pin(token))
        {
            Ok(pin) => pin,
            Err(e) => return lazy_error(e),
        };
        match self.key.credential_management_get_rps(Some(pin)) {
            Ok(rps) => Box::new(rps.into_iter().map(|rp| {
                let entity = rp.public_key_credential_rp_entity;
                Ok(RpEntry {
                    rp: RelyingParty {
                        id: entity.id,
                        name: Some(entity.name).filter(|n| !n.is_empty()),
                    },
                    rp_id_hash: rp.rpid_hash,
                })
            })),
            Err(e) => lazy_error(SkmError::device_io("enumerate RPs", e)),
        }
    }

    fn enumerate_credentials<'a>(
        &'a mut self,
        token: &'a AuthToken,
        rp_id_hash: &'a [u8],
    ) -> Lazy<'a, StoredCredential> {
        let pin = match token
            .require(Permission::CredentialManagement)
            .and_then(|()| token_pin(token))
        {
            Ok(pin) => pin,
            Err(e) => return lazy_error(e),
        };
        match self
            .key
            .credential_management_get_credentials(Some(pin), Some(rp_id_hash.to_vec()))
        {
            Ok(credentials) => Box::new(credentials.into_iter().map(|c| {
                let user = c.public_key_credential_user_entity;
                Ok(StoredCredential {
                    user: UserEntity {
                        id: user.id,
                        name: user.name,
                        display_name: user.display_name,
                    },
                    credential_id: CredentialId::new(c.public_key_credential_descriptor.id),
                })
            })),
            Err(e) => lazy_error(SkmError::device_io("enumerate credentials", e)),
        }
    }

    fn delete_credential(&mut self, token: &AuthToken, id: &CredentialId) -> SkmResult<()> {
        token.require(Permission::CredentialManagement)?;
        let descriptor = PublicKeyCredentialDescriptor {
            id: id.as_bytes().to_vec(),
            ctype: "public-key".to_string(),
        };
        self.key
            .credential_management_delete_credential(Some(token_pin(token)?), descriptor)
            .map_err(|e| SkmError::device_io("delete credential", e))
    }

    // ctap-hid-fido2 exposes no authenticatorReset
    fn reset(&mut self) -> SkmResult<()> {
        Err(SkmError::Unsupported { operation: "factory reset" })
    }

    fn supports_reset(&self) -> bool {
        false
    }

    fn toggle_always_uv(&mut self, token: &AuthToken) -> SkmResult<()> {
        token.require(Permission::AuthenticatorConfiguration)?;
        self.key
            .config_toggle_always_uv(Some(token_pin(token)?))
            .map_err(|e| SkmError::device_io("toggle always UV", e))
    }

    fn enable_enterprise_attestation(&mut self, token: &AuthToken) -> SkmResult<()> {
        token.require(Permission::AuthenticatorConfiguration)?;
        self.key
            .enable_enterprise_attestation(Some(token_pin(token)?))
            .map_err(|e| SkmError::device_io("enable enterprise attestation", e))
    }

    fn close(&mut self) -> SkmResult<()> {
        // the HID handle is released when the session is dropped
        Ok(())
    }
}
