use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use crate::error::{SkmError, SkmResult};

/// Relying party a credential is registered to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelyingParty {
    pub id: String,
    pub name: Option<String>,
}

impl RelyingParty {
    /// Human label: the name when the device stored one, the id otherwise
    pub fn label(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.id,
        }
    }
}

/// User account a credential belongs to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserEntity {
    pub id: Vec<u8>,
    pub name: String,
    pub display_name: String,
}

/// Raw credential id bytes. Shown and parsed as unpadded base64url.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CredentialId(Vec<u8>);

impl CredentialId {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn from_base64(encoded: &str) -> SkmResult<Self> {
        URL_SAFE_NO_PAD
            .decode(encoded)
            .map(Self)
            .map_err(|e| SkmError::InvalidCredentialId {
                id: encoded.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn to_base64(&self) -> String {
        URL_SAFE_NO_PAD.encode(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// One relying party as yielded by RP enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpEntry {
    pub rp: RelyingParty,
    /// SHA-256 of the RP id, the key for per-RP credential enumeration
    pub rp_id_hash: Vec<u8>,
}

/// One credential as yielded by per-RP credential enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    pub user: UserEntity,
    pub credential_id: CredentialId,
}

/// A resident credential joined with the relying party it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub rp: RelyingParty,
    pub user: UserEntity,
    pub credential_id: CredentialId,
}

impl CredentialRecord {
    pub fn new(rp: RelyingParty, credential: StoredCredential) -> Self {
        Self {
            rp,
            user: credential.user,
            credential_id: credential.credential_id,
        }
    }
}
