//! Auth flow: the two-state login/logout controller.
//!
//! This is a simulated login, not authentication. The only checks are a
//! non-empty email containing `@` and a non-empty password; every failure
//! surfaces the same generic error. Keep it that way: making the stub look
//! like real credential verification would be worse than the simulation.

use std::rc::Rc;

use tienda_core::Email;

use crate::models::AuthState;
use crate::storage::StorageError;
use crate::stores::SessionStore;
use crate::views::{AuthAction, AuthAffordance, AuthPort};

/// Generic message for any failed login attempt. Deliberately the same for
/// bad format and "bad credentials".
pub const LOGIN_ERROR_MESSAGE: &str = "Email o contraseña no válidos.";

/// Errors from the auth flow.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The simulated validation rejected the attempt.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The session keys could not be written.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Login/logout controller over the session store.
pub struct AuthFlow {
    session: SessionStore,
    port: Option<Rc<dyn AuthPort>>,
}

impl AuthFlow {
    /// Create the flow.
    #[must_use]
    pub fn new(session: SessionStore, port: Option<Rc<dyn AuthPort>>) -> Self {
        Self { session, port }
    }

    /// The current auth state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.session.state()
    }

    /// Recompute the auth affordance from the current state and re-apply it.
    ///
    /// Called at startup and after every transition; the label, style, and
    /// click action must always match the state.
    pub fn refresh(&self) {
        let affordance = affordance_for(&self.state());
        match &self.port {
            Some(port) => port.apply(&affordance),
            None => tracing::warn!("no auth port bound, skipping auth control update"),
        }
    }

    /// Open the login modal (the logged-out click action).
    pub fn open_login(&self) {
        if let Some(port) = &self.port {
            port.show_login_modal();
        }
    }

    /// Close the login modal without logging in.
    pub fn close_login(&self) {
        if let Some(port) = &self.port {
            port.hide_login_modal();
        }
    }

    /// Attempt a login.
    ///
    /// On success the session keys are written, the modal closes, and the
    /// affordance flips to logged-in. On any failure the state stays
    /// `LoggedOut` and the generic error shows in the modal.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] for a rejected attempt,
    /// [`AuthError::Storage`] if the session keys cannot be written.
    pub fn submit_login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let parsed = Email::parse(email);
        let (Ok(email), false) = (parsed, password.is_empty()) else {
            tracing::error!("login attempt rejected (simulated check)");
            self.show_error();
            return Err(AuthError::InvalidCredentials);
        };

        if let Err(e) = self.session.login(&email) {
            tracing::error!(error = %e, "failed to write session");
            self.show_error();
            return Err(e.into());
        }

        if let Some(port) = &self.port {
            port.hide_login_modal();
        }
        self.refresh();
        Ok(())
    }

    /// Log out: clear the session and flip the affordance back.
    pub fn logout(&self) {
        self.session.logout();
        self.refresh();
        tracing::info!("user logged out");
    }

    fn show_error(&self) {
        if let Some(port) = &self.port {
            port.show_login_error(LOGIN_ERROR_MESSAGE);
        }
    }
}

/// The affordance matching an auth state.
fn affordance_for(state: &AuthState) -> AuthAffordance {
    match state {
        AuthState::LoggedOut => AuthAffordance {
            label: "Login".to_owned(),
            logged_in: false,
            action: AuthAction::OpenLogin,
        },
        AuthState::LoggedIn { .. } => AuthAffordance {
            label: format!("Hola, {}", state.display_name()),
            logged_in: true,
            action: AuthAction::Logout,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    fn flow() -> AuthFlow {
        AuthFlow::new(SessionStore::new(Storage::in_memory()), None)
    }

    #[test]
    fn test_login_success_transitions_to_logged_in() {
        let flow = flow();
        flow.submit_login("a@b.com", "x").unwrap();
        assert_eq!(
            flow.state(),
            AuthState::LoggedIn {
                email: Some("a@b.com".to_owned())
            }
        );
    }

    #[test]
    fn test_empty_password_stays_logged_out() {
        let flow = flow();
        let err = flow.submit_login("a@b.com", "").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(flow.state(), AuthState::LoggedOut);
    }

    #[test]
    fn test_bad_email_stays_logged_out() {
        let flow = flow();
        assert!(flow.submit_login("not-an-email", "pw").is_err());
        assert!(flow.submit_login("", "pw").is_err());
        assert_eq!(flow.state(), AuthState::LoggedOut);
    }

    #[test]
    fn test_logout_clears_session() {
        let flow = flow();
        flow.submit_login("a@b.com", "x").unwrap();
        flow.logout();
        assert_eq!(flow.state(), AuthState::LoggedOut);
    }

    #[test]
    fn test_affordances() {
        let logged_out = affordance_for(&AuthState::LoggedOut);
        assert_eq!(logged_out.label, "Login");
        assert_eq!(logged_out.action, AuthAction::OpenLogin);
        assert!(!logged_out.logged_in);

        let logged_in = affordance_for(&AuthState::LoggedIn {
            email: Some("ana@example.com".to_owned()),
        });
        assert_eq!(logged_in.label, "Hola, ana");
        assert_eq!(logged_in.action, AuthAction::Logout);
        assert!(logged_in.logged_in);
    }
}
