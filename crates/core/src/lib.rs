//! Session-backed authentication flag

pub mod config;
pub mod error;
pub mod state;
pub mod store;

pub use config::AuthConfig;
pub use error::{Result, StorageError};
pub use state::{AuthState, Subscription};
pub use store::{MemorySessionStore, NullSessionStore, SessionStore};
