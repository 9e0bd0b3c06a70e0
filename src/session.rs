//! Session collaborator: the process-wide slot remembering the last request id.
//!
//! The gateway flow spans two calls: a send that yields a request id, then a
//! status check or revoke that needs it back. Where that id lives between
//! calls belongs to the host (a web session, a cache, a test fixture), so it
//! is modeled as a trait the host injects rather than ambient global state.

use std::collections::HashMap;
use std::sync::Mutex;

/// Key under which the client stores the most recent request id.
pub const REQUEST_ID_KEY: &str = "gateway_request_id";

/// A keyed slot store with host-defined lifetime.
///
/// `set(key, None)` clears the slot. Implementations decide their own
/// concurrency guarantees; the client only requires that reads observe
/// completed writes within one logical session.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: Option<String>);
}

#[derive(Debug, Default)]
/// In-memory [`SessionStore`] for tests and single-process hosts.
///
/// Share one instance (behind an `Arc`) across the clients of a logical
/// session to get the process-wide behavior.
pub struct MemorySessionStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: Option<String>) {
        let Ok(mut slots) = self.slots.lock() else {
            return;
        };
        match value {
            Some(value) => {
                slots.insert(key.to_owned(), value);
            }
            None => {
                slots.remove(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn set_get_and_clear() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get(REQUEST_ID_KEY), None);

        store.set(REQUEST_ID_KEY, Some("req-1".to_owned()));
        assert_eq!(store.get(REQUEST_ID_KEY).as_deref(), Some("req-1"));

        store.set(REQUEST_ID_KEY, Some("req-2".to_owned()));
        assert_eq!(store.get(REQUEST_ID_KEY).as_deref(), Some("req-2"));

        store.set(REQUEST_ID_KEY, None);
        assert_eq!(store.get(REQUEST_ID_KEY), None);
    }

    #[test]
    fn shared_handles_observe_each_other() {
        let store = Arc::new(MemorySessionStore::new());
        let other = Arc::clone(&store);

        store.set(REQUEST_ID_KEY, Some("req-1".to_owned()));
        assert_eq!(other.get(REQUEST_ID_KEY).as_deref(), Some("req-1"));
    }

    #[test]
    fn keys_are_independent() {
        let store = MemorySessionStore::new();
        store.set("a", Some("1".to_owned()));
        store.set("b", Some("2".to_owned()));
        store.set("a", None);

        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b").as_deref(), Some("2"));
    }
}
