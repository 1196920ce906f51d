//! Persisted "current principal" slot.
//!
//! The principal is kept as JSON under [`PRINCIPAL_KEY`], next to a flag under
//! [`AUTHENTICATED_KEY`]. Backend failures are logged and otherwise treated as
//! an empty session.

pub mod error;
pub mod persistence;
pub mod storage;

use {
    crate::{models::Principal, session::storage::KeyValueStore},
    std::sync::Arc,
    tracing::{debug, error, warn},
};

pub const PRINCIPAL_KEY: &str = "wafr.session.principal";
pub const AUTHENTICATED_KEY: &str = "wafr.session.authenticated";

#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        SessionStore { backend }
    }

    pub fn set(&self, principal: &Principal) {
        let encoded = match serde_json::to_string(principal) {
            Ok(encoded) => encoded,
            Err(e) => {
                error!("Failed to encode session principal: {e}");
                return;
            }
        };

        if let Err(e) = self.backend.set(PRINCIPAL_KEY, &encoded) {
            error!("Failed to save session principal: {e}");
        }
        if let Err(e) = self.backend.set(AUTHENTICATED_KEY, "true") {
            error!("Failed to save session flag: {e}");
        }
    }

    /// The stored principal, or `None` if absent or unreadable.
    pub fn get(&self) -> Option<Principal> {
        let raw = match self.backend.get(PRINCIPAL_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                error!("Failed to read session principal: {e}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(principal) => Some(principal),
            Err(e) => {
                warn!("Discarding unreadable session principal: {e}");
                None
            }
        }
    }

    /// Whether the last persisted transition was a sign-in.
    pub fn is_authenticated(&self) -> bool {
        match self.backend.get(AUTHENTICATED_KEY) {
            Ok(flag) => flag.as_deref() == Some("true"),
            Err(e) => {
                error!("Failed to read session flag: {e}");
                false
            }
        }
    }

    pub fn clear(&self) {
        for key in [PRINCIPAL_KEY, AUTHENTICATED_KEY] {
            if let Err(e) = self.backend.remove(key) {
                error!("Failed to remove session slot {key}: {e}");
            }
        }
        debug!("Session cleared");
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::session::{error::StorageError, storage::MemoryKeyValueStore},
    };

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::FailedToAcquireStorageLock)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::FailedToAcquireStorageLock)
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::FailedToAcquireStorageLock)
        }
    }

    fn principal() -> Principal {
        Principal {
            id: "mock-user-1".to_string(),
            email: "admin@wafr.com".to_string(),
            display_name: "Admin User".to_string(),
            avatar_url: None,
            provider: None,
        }
    }

    #[test]
    fn test_set_get_clear() {
        let store = SessionStore::new(Arc::new(MemoryKeyValueStore::default()));
        assert!(store.get().is_none());
        assert!(!store.is_authenticated());

        store.set(&principal());
        store.set(&principal());
        assert_eq!(store.get(), Some(principal()));
        assert!(store.is_authenticated());

        store.clear();
        assert!(store.get().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_corrupt_principal_reads_as_none() {
        let backend = Arc::new(MemoryKeyValueStore::default());
        backend.set(PRINCIPAL_KEY, "{not json").unwrap();
        backend.set(AUTHENTICATED_KEY, "true").unwrap();

        let store = SessionStore::new(backend);
        assert!(store.get().is_none());
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_backend_failures_are_swallowed() {
        let store = SessionStore::new(Arc::new(BrokenStore));

        store.set(&principal());
        store.clear();
        assert!(store.get().is_none());
        assert!(!store.is_authenticated());
    }
}
