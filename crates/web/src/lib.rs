//! Browser integration for the session-backed authentication flag

pub mod context;
pub mod storage;

pub use authflag_core::{AuthConfig, AuthState, StorageError, Subscription};
pub use context::{use_auth_state, use_is_authenticated, AuthProvider, AuthProviderProps};
pub use storage::{detect_session_store, BrowserSessionStore};
