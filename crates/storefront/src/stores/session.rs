//! Session store.
//!
//! Two session-scoped keys: a `"true"` login sentinel and the raw email.
//! This is a simulated session, not authentication; see the auth flow.

use tienda_core::Email;

use crate::models::AuthState;
use crate::storage::{Storage, StorageError, keys};

/// Reads and writes the logged-in flag and email.
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: Storage,
}

impl SessionStore {
    /// Create a store over the given storage.
    #[must_use]
    pub const fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Whether a session flag is present.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.storage
            .session()
            .get(keys::USER_LOGGED_IN)
            .is_some_and(|v| v == "true")
    }

    /// The stored email, if any.
    #[must_use]
    pub fn email(&self) -> Option<String> {
        self.storage.session().get(keys::USER_EMAIL)
    }

    /// The current auth state derived from storage.
    #[must_use]
    pub fn state(&self) -> AuthState {
        if self.is_logged_in() {
            AuthState::LoggedIn {
                email: self.email(),
            }
        } else {
            AuthState::LoggedOut
        }
    }

    /// Record a successful login.
    ///
    /// # Errors
    ///
    /// Returns the storage error if either key cannot be written. A partial
    /// write leaves a flag without an email, which the rest of the app
    /// tolerates (the greeting falls back to a generic label).
    pub fn login(&self, email: &Email) -> Result<(), StorageError> {
        self.storage.session().set(keys::USER_LOGGED_IN, "true")?;
        self.storage
            .session()
            .set(keys::USER_EMAIL, email.as_str())
    }

    /// Clear the session. Email goes with it; the avatar, which lives in
    /// durable storage, deliberately does not.
    pub fn logout(&self) {
        self.storage.session().remove(keys::USER_LOGGED_IN);
        self.storage.session().remove(keys::USER_EMAIL);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_then_logout() {
        let store = SessionStore::new(Storage::in_memory());
        assert!(!store.is_logged_in());
        assert_eq!(store.state(), AuthState::LoggedOut);

        let email = Email::parse("ana@example.com").unwrap();
        store.login(&email).unwrap();
        assert!(store.is_logged_in());
        assert_eq!(
            store.state(),
            AuthState::LoggedIn {
                email: Some("ana@example.com".to_owned())
            }
        );

        store.logout();
        assert!(!store.is_logged_in());
        assert!(store.email().is_none());
    }

    #[test]
    fn test_stale_flag_value_is_logged_out() {
        let storage = Storage::in_memory();
        storage.session().set(keys::USER_LOGGED_IN, "yes").unwrap();
        let store = SessionStore::new(storage);
        assert!(!store.is_logged_in());
    }
}
