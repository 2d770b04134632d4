use std::fmt;

use zeroize::Zeroizing;

use super::Permission;
use crate::error::{SkmError, SkmResult};

/// A PIN/UV auth token issued by a device for one permission.
///
/// Not `Clone`. A token lives for one command invocation and is wiped on
/// drop.
pub struct AuthToken {
    permission: Permission,
    secret: Zeroizing<Vec<u8>>,
}

impl AuthToken {
    pub fn new(permission: Permission, secret: Vec<u8>) -> Self {
        Self {
            permission,
            secret: Zeroizing::new(secret),
        }
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    /// Raw token bytes, for the collaborator only
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Fail unless this token was issued for `required`
    pub fn require(&self, required: Permission) -> SkmResult<()> {
        if self.permission == required {
            Ok(())
        } else {
            Err(SkmError::PermissionDenied {
                required,
                granted: self.permission,
            })
        }
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("permission", &self.permission)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
