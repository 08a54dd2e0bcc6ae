//! Session-scoped key-value storage
//!
//! The host environment is injected through [`SessionStore`] instead of being
//! probed at runtime. Contexts without a session (server rendering, CLI tools,
//! tests) use [`NullSessionStore`].

use crate::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Read access to the host's session-scoped storage
pub trait SessionStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Whether a host session context backs this store
    fn is_available(&self) -> bool {
        true
    }
}

/// Store for contexts that have no session
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullSessionStore;

impl SessionStore for NullSessionStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// In-process session store
///
/// Clones share the same entries, so a host can keep one handle for writing
/// while another is handed to [`AuthState`](crate::AuthState).
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.borrow_mut().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries.borrow_mut().remove(key)
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemorySessionStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let store = Self::new();
        for (key, value) in iter {
            store.insert(key, value);
        }
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

// Mock implementation for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub SessionStore {}

        impl SessionStore for SessionStore {
            fn get(&self, key: &str) -> Result<Option<String>>;
            fn is_available(&self) -> bool;
        }
    }
}
