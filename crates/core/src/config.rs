//! Session flag configuration

/// Authentication flag configuration
pub struct AuthConfig;

impl AuthConfig {
    /// Session storage key holding the flag
    pub const AUTH_FLAG_KEY: &'static str = "isAuthenticated";

    /// The only stored value that counts as authenticated
    pub const AUTHENTICATED_VALUE: &'static str = "true";
}
