//! Unified error handling for the storefront.
//!
//! Each service defines its own `thiserror` enum; `AppError` rolls them up
//! for callers that drive the whole app. Nothing here is fatal to a running
//! page: flows report errors through their view ports and keep going.

use thiserror::Error;

use crate::config::ConfigError;
use crate::flows::auth::AuthError;
use crate::flows::profile::ProfileError;
use crate::storage::StorageError;
use crate::stores::cart::CartError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Persistence read or write failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Login attempt rejected.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Cart mutation rejected.
    #[error("cart error: {0}")]
    Cart(#[from] CartError),

    /// Profile operation failed.
    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "auth error: invalid email or password");

        let err = AppError::from(StorageError::Unavailable);
        assert_eq!(err.to_string(), "storage error: storage is unavailable");
    }
}
