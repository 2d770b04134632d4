use std::fmt;

/// Permission a PIN/UV auth token is scoped to.
///
/// Discriminants are the CTAP 2.1 permission bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Permission {
    CredentialManagement = 0x04,
    AuthenticatorConfiguration = 0x20,
}

impl Permission {
    pub fn bits(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Permission::CredentialManagement => "credential management",
            Permission::AuthenticatorConfiguration => "authenticator configuration",
        };
        f.write_str(name)
    }
}
