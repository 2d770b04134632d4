//! In-memory security keys for tests.
//!
//! Host and sessions share one state, so a test keeps a handle to the host
//! and inspects the call journal after the code under test has consumed its
//! session.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{SkmError, SkmResult};
use crate::model::{
    AuthToken, CredentialId, DeviceDescriptor, DeviceInfo, Permission, Pin, RelyingParty,
    RpEntry, StoredCredential, UserEntity,
};
use crate::ports::{DeviceHost, Lazy, Session};

pub const DEFAULT_RETRIES: u32 = 8;

/// One call made through the ports, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCall {
    Enumerate,
    Open(String),
    Info,
    PinRetries,
    UvRetries,
    Token(Permission),
    SetPin,
    ChangePin,
    EnumerateRps,
    EnumerateCredentials(String),
    DeleteCredential(CredentialId),
    Reset,
    ToggleAlwaysUv,
    EnableEnterpriseAttestation,
    Close,
}

impl DeviceCall {
    /// Calls that change what is stored on the key
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            DeviceCall::SetPin
                | DeviceCall::ChangePin
                | DeviceCall::DeleteCredential(_)
                | DeviceCall::Reset
                | DeviceCall::ToggleAlwaysUv
                | DeviceCall::EnableEnterpriseAttestation
        )
    }
}

/// Injected failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    Enumerate,
    Open(String),
    Info,
    PinRetries,
    /// RP enumeration fails after yielding the first RP
    Rps,
    /// Credential enumeration fails for this RP id
    Credentials(String),
    /// The backend has no factory reset
    ResetUnsupported,
    Close,
}

#[derive(Debug)]
struct FakeState {
    devices: Vec<DeviceDescriptor>,
    pin: Option<String>,
    pin_retries: u32,
    uv_retries: Option<u32>,
    info: DeviceInfo,
    rps: Vec<(RelyingParty, Vec<StoredCredential>)>,
    faults: Vec<Fault>,
    calls: Vec<DeviceCall>,
}

impl FakeState {
    fn record(&mut self, call: DeviceCall) {
        self.calls.push(call);
    }

    fn has(&self, fault: &Fault) -> bool {
        self.faults.contains(fault)
    }

    fn check_pin(&mut self, pin: &Pin) -> SkmResult<()> {
        match &self.pin {
            None => Err(SkmError::AuthenticationFailure {
                reason: "PIN not set".to_string(),
            }),
            Some(stored) if stored == pin.as_str() => {
                self.pin_retries = DEFAULT_RETRIES;
                Ok(())
            }
            Some(_) => {
                self.pin_retries = self.pin_retries.saturating_sub(1);
                Err(SkmError::AuthenticationFailure {
                    reason: "PIN invalid".to_string(),
                })
            }
        }
    }
}

/// A host with any number of identical fake keys
#[derive(Debug, Clone)]
pub struct FakeHost {
    state: Rc<RefCell<FakeState>>,
}

impl FakeHost {
    pub fn new() -> Self {
        let state = FakeState {
            devices: Vec::new(),
            pin: None,
            pin_retries: DEFAULT_RETRIES,
            uv_retries: None,
            info: DeviceInfo {
                aaguid: vec![0xfa; 16],
                versions: vec!["FIDO_2_0".into(), "FIDO_2_1".into()],
                options: [(DeviceInfo::CLIENT_PIN.to_string(), false)].into_iter().collect(),
                ..DeviceInfo::default()
            },
            rps: Vec::new(),
            faults: Vec::new(),
            calls: Vec::new(),
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn with_device(self, path: &str) -> Self {
        {
            let mut state = self.state.borrow_mut();
            let serial = format!("SN{:04}", state.devices.len());
            state
                .devices
                .push(DeviceDescriptor::new(path, "Fake Key", "Acme", serial));
        }
        self
    }

    pub fn with_pin(self, pin: &str) -> Self {
        {
            let mut state = self.state.borrow_mut();
            state.pin = Some(pin.to_string());
            state.info.options.insert(DeviceInfo::CLIENT_PIN.to_string(), true);
        }
        self
    }

    pub fn with_pin_retries(self, retries: u32) -> Self {
        self.state.borrow_mut().pin_retries = retries;
        self
    }

    pub fn with_uv(self, retries: u32) -> Self {
        self.state.borrow_mut().uv_retries = Some(retries);
        self
    }

    /// Store credentials under `rp_id`, given as `(user name, credential id)`
    pub fn with_credentials(self, rp_id: &str, credentials: &[(&str, &[u8])]) -> Self {
        let rp = RelyingParty {
            id: rp_id.to_string(),
            name: None,
        };
        let stored = credentials
            .iter()
            .map(|(user, id)| StoredCredential {
                user: UserEntity {
                    id: user.as_bytes().to_vec(),
                    name: user.to_string(),
                    display_name: user.to_uppercase(),
                },
                credential_id: CredentialId::new(id.to_vec()),
            })
            .collect();
        self.state.borrow_mut().rps.push((rp, stored));
        self
    }

    pub fn failing(self, fault: Fault) -> Self {
        self.state.borrow_mut().faults.push(fault);
        self
    }

    pub fn calls(&self) -> Vec<DeviceCall> {
        self.state.borrow().calls.clone()
    }

    pub fn mutating_calls(&self) -> Vec<DeviceCall> {
        self.calls().into_iter().filter(DeviceCall::is_mutating).collect()
    }

    pub fn count(&self, call: &DeviceCall) -> usize {
        self.state.borrow().calls.iter().filter(|c| *c == call).count()
    }

    /// Every open was matched by a close
    pub fn all_closed(&self) -> bool {
        let calls = self.state.borrow();
        let opened = calls.calls.iter().filter(|c| matches!(c, DeviceCall::Open(_))).count();
        opened == calls.calls.iter().filter(|c| **c == DeviceCall::Close).count()
    }

    pub fn pin(&self) -> Option<String> {
        self.state.borrow().pin.clone()
    }

    pub fn option(&self, name: &str) -> Option<bool> {
        self.state.borrow().info.option(name)
    }

    pub fn credential_ids(&self) -> Vec<CredentialId> {
        self.state
            .borrow()
            .rps
            .iter()
            .flat_map(|(_, creds)| creds.iter().map(|c| c.credential_id.clone()))
            .collect()
    }

    pub fn device(&self, index: usize) -> DeviceDescriptor {
        self.state.borrow().devices[index].clone()
    }
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceHost for FakeHost {
    type Session = FakeSession;

    fn enumerate(&self) -> SkmResult<Vec<DeviceDescriptor>> {
        let mut state = self.state.borrow_mut();
        state.record(DeviceCall::Enumerate);
        if state.has(&Fault::Enumerate) {
            return Err(SkmError::device_io("enumerate devices", "HID subsystem unavailable"));
        }
        Ok(state.devices.clone())
    }

    fn open(&self, device: &DeviceDescriptor) -> SkmResult<FakeSession> {
        let mut state = self.state.borrow_mut();
        if state.has(&Fault::Open(device.path.clone())) {
            return Err(SkmError::device_io(
                format!("open {}", device.path),
                "permission denied",
            ));
        }
        state.record(DeviceCall::Open(device.path.clone()));
        Ok(FakeSession {
            state: Rc::clone(&self.state),
        })
    }
}

#[derive(Debug)]
pub struct FakeSession {
    state: Rc<RefCell<FakeState>>,
}

impl FakeSession {
    fn state(&self) -> std::cell::RefMut<'_, FakeState> {
        self.state.borrow_mut()
    }
}

fn rp_hash(rp: &RelyingParty) -> Vec<u8> {
    rp.id.as_bytes().to_vec()
}

impl Session for FakeSession {
    fn info(&mut self) -> SkmResult<DeviceInfo> {
        let mut state = self.state();
        state.record(DeviceCall::Info);
        if state.has(&Fault::Info) {
            return Err(SkmError::device_io("get info", "timeout"));
        }
        Ok(state.info.clone())
    }

    fn pin_retries(&mut self) -> SkmResult<u32> {
        let mut state = self.state();
        state.record(DeviceCall::PinRetries);
        if state.has(&Fault::PinRetries) {
            return Err(SkmError::device_io("get PIN retries", "timeout"));
        }
        Ok(state.pin_retries)
    }

    fn uv_retries(&mut self) -> SkmResult<u32> {
        let mut state = self.state();
        state.record(DeviceCall::UvRetries);
        state
            .uv_retries
            .ok_or_else(|| SkmError::device_io("get UV retries", "not supported"))
    }

    fn token_using_pin(
        &mut self,
        pin: &Pin,
        permission: Permission,
        _rp_id: Option<&str>,
    ) -> SkmResult<AuthToken> {
        let mut state = self.state();
        state.record(DeviceCall::Token(permission));
        state.check_pin(pin)?;
        Ok(AuthToken::new(permission, vec![permission.bits(); 32]))
    }

    fn set_pin(&mut self, new_pin: &Pin) -> SkmResult<()> {
        let mut state = self.state();
        state.record(DeviceCall::SetPin);
        if state.pin.is_some() {
            return Err(SkmError::device_io("set PIN", "PIN already set"));
        }
        state.pin = Some(new_pin.as_str().to_string());
        state.info.options.insert(DeviceInfo::CLIENT_PIN.to_string(), true);
        Ok(())
    }

    fn change_pin(&mut self, current: &Pin, new_pin: &Pin) -> SkmResult<()> {
        let mut state = self.state();
        state.record(DeviceCall::ChangePin);
        state.check_pin(current)?;
        state.pin = Some(new_pin.as_str().to_string());
        Ok(())
    }

    fn enumerate_rps<'a>(&'a mut self, token: &'a AuthToken) -> Lazy<'a, RpEntry> {
        let mut state = self.state();
        state.record(DeviceCall::EnumerateRps);
        if let Err(e) = token.require(Permission::CredentialManagement) {
            return Box::new(std::iter::once(Err(e)));
        }

        let mut items: Vec<SkmResult<RpEntry>> = state
            .rps
            .iter()
            .map(|(rp, _)| {
                Ok(RpEntry {
                    rp: rp.clone(),
                    rp_id_hash: rp_hash(rp),
                })
            })
            .collect();
        if state.has(&Fault::Rps) {
            items.truncate(1);
            items.push(Err(SkmError::device_io("enumerate RPs", "unexpected CBOR")));
        }
        Box::new(items.into_iter())
    }

    fn enumerate_credentials<'a>(
        &'a mut self,
        token: &'a AuthToken,
        rp_id_hash: &'a [u8],
    ) -> Lazy<'a, StoredCredential> {
        let mut state = self.state();
        let rp_id = String::from_utf8_lossy(rp_id_hash).into_owned();
        state.record(DeviceCall::EnumerateCredentials(rp_id.clone()));
        if let Err(e) = token.require(Permission::CredentialManagement) {
            return Box::new(std::iter::once(Err(e)));
        }
        if state.has(&Fault::Credentials(rp_id)) {
            return Box::new(std::iter::once(Err(SkmError::device_io(
                "enumerate credentials",
                "unexpected CBOR",
            ))));
        }

        let items: Vec<SkmResult<StoredCredential>> = state
            .rps
            .iter()
            .filter(|(rp, _)| rp_hash(rp) == rp_id_hash)
            .flat_map(|(_, creds)| creds.iter().cloned().map(Ok))
            .collect();
        Box::new(items.into_iter())
    }

    fn delete_credential(&mut self, token: &AuthToken, id: &CredentialId) -> SkmResult<()> {
        let mut state = self.state();
        state.record(DeviceCall::DeleteCredential(id.clone()));
        token.require(Permission::CredentialManagement)?;

        let mut removed = false;
        for (_, creds) in state.rps.iter_mut() {
            let before = creds.len();
            creds.retain(|c| &c.credential_id != id);
            removed |= creds.len() != before;
        }
        state.rps.retain(|(_, creds)| !creds.is_empty());

        if removed {
            Ok(())
        } else {
            Err(SkmError::device_io("delete credential", "no such credential"))
        }
    }

    fn reset(&mut self) -> SkmResult<()> {
        let mut state = self.state();
        state.record(DeviceCall::Reset);
        if state.has(&Fault::ResetUnsupported) {
            return Err(SkmError::Unsupported { operation: "factory reset" });
        }
        state.pin = None;
        state.pin_retries = DEFAULT_RETRIES;
        state.rps.clear();
        state.info.options.insert(DeviceInfo::CLIENT_PIN.to_string(), false);
        Ok(())
    }

    fn supports_reset(&self) -> bool {
        !self.state.borrow().has(&Fault::ResetUnsupported)
    }

    fn toggle_always_uv(&mut self, token: &AuthToken) -> SkmResult<()> {
        let mut state = self.state();
        state.record(DeviceCall::ToggleAlwaysUv);
        token.require(Permission::AuthenticatorConfiguration)?;
        let enabled = state.info.option("alwaysUv").unwrap_or(false);
        state.info.options.insert("alwaysUv".to_string(), !enabled);
        Ok(())
    }

    fn enable_enterprise_attestation(&mut self, token: &AuthToken) -> SkmResult<()> {
        let mut state = self.state();
        state.record(DeviceCall::EnableEnterpriseAttestation);
        token.require(Permission::AuthenticatorConfiguration)?;
        state.info.options.insert("ep".to_string(), true);
        Ok(())
    }

    fn close(&mut self) -> SkmResult<()> {
        let mut state = self.state();
        state.record(DeviceCall::Close);
        if state.has(&Fault::Close) {
            return Err(SkmError::device_io("close", "device gone"));
        }
        Ok(())
    }
}
