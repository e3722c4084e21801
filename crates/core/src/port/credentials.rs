// Credential Provider Port
//
// The core treats authentication as an opaque bearer-token accessor.
// Transports attach the token when present and invalidate it on an
// authentication failure so the caller can force reauthentication.

use std::sync::RwLock;

/// Opaque credential accessor
pub trait CredentialProvider: Send + Sync {
    /// Current bearer token, if any
    fn bearer_token(&self) -> Option<String>;

    /// Drop the stored credential (called on authentication failure)
    fn invalidate(&self);
}

/// In-memory token store (production default; the session lives only as
/// long as the process)
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().expect("token lock poisoned") = Some(token.into());
    }
}

impl CredentialProvider for MemoryTokenStore {
    fn bearer_token(&self) -> Option<String> {
        self.token.read().expect("token lock poisoned").clone()
    }

    fn invalidate(&self) {
        self.token.write().expect("token lock poisoned").take();
    }
}
