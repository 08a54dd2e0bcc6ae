//! Session storage errors

/// Standard result type for storage reads
pub type Result<T> = std::result::Result<T, StorageError>;

/// Failures reported by a [`SessionStore`](crate::SessionStore)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Session storage is unavailable")]
    Unavailable,

    #[error("Session storage access failed: {message}")]
    Access { message: String },
}

impl StorageError {
    pub fn access(message: impl Into<String>) -> Self {
        Self::Access {
            message: message.into(),
        }
    }
}
