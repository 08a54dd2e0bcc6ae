//! `window.sessionStorage` access

use authflag_core::{AuthConfig, NullSessionStore, Result, SessionStore, StorageError};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Session store backed by the browser's `sessionStorage`
#[derive(Clone, Debug)]
pub struct BrowserSessionStore {
    storage: Storage,
}

impl BrowserSessionStore {
    /// Open the current window's session storage
    pub fn from_window() -> Result<Self> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        let storage = window
            .session_storage()
            .map_err(js_error)?
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }

    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Persist the flag so it survives a reload
    ///
    /// `false` removes the key rather than storing `"false"`.
    pub fn set_flag(&self, authenticated: bool) -> Result<()> {
        if authenticated {
            self.storage
                .set_item(AuthConfig::AUTH_FLAG_KEY, AuthConfig::AUTHENTICATED_VALUE)
                .map_err(js_error)
        } else {
            self.clear_flag()
        }
    }

    pub fn clear_flag(&self) -> Result<()> {
        self.storage
            .remove_item(AuthConfig::AUTH_FLAG_KEY)
            .map_err(js_error)
    }
}

impl SessionStore for BrowserSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(js_error)
    }
}

fn js_error(value: JsValue) -> StorageError {
    StorageError::access(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// Pick the session store for the current host
///
/// Returns the browser store when a window with session storage exists and
/// [`NullSessionStore`] everywhere else (native builds, workers, storage
/// disabled by the user agent).
pub fn detect_session_store() -> Box<dyn SessionStore> {
    #[cfg(target_arch = "wasm32")]
    {
        match BrowserSessionStore::from_window() {
            Ok(store) => return Box::new(store),
            Err(e) => tracing::debug!(error = %e, "Session storage not available"),
        }
    }

    Box::new(NullSessionStore)
}

#[cfg(not(target_arch = "wasm32"))]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_host_has_no_session() {
        assert!(!detect_session_store().is_available());
    }
}

#[cfg(target_arch = "wasm32")]
#[cfg(test)]
mod wasm_tests {
    use super::*;
    use authflag_core::AuthState;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_flag_round_trips_through_session_storage() {
        let store = BrowserSessionStore::from_window().unwrap();
        store.set_flag(true).unwrap();
        assert!(AuthState::from_store(&store).get());

        store.set_flag(false).unwrap();
        assert_eq!(store.get(AuthConfig::AUTH_FLAG_KEY).unwrap(), None);
        assert!(!AuthState::from_store(&store).get());
    }

    #[wasm_bindgen_test]
    fn test_detected_store_is_available_in_browser() {
        assert!(detect_session_store().is_available());
    }
}
