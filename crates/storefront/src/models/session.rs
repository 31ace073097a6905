//! Session state.
//!
//! The login here is a simulation: a session is two session-scoped keys, not
//! a credential. `AuthState` is what the auth flow derives from them.

/// Fallback greeting name when the session has a login flag but no email.
pub const FALLBACK_USER_LABEL: &str = "Usuario";

/// The two states of the auth flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// No session flag present.
    LoggedOut,
    /// Session flag present.
    LoggedIn {
        /// Raw email from session storage. Normally present, but an absent
        /// value is tolerated and rendered with a fallback label.
        email: Option<String>,
    },
}

impl AuthState {
    /// Whether the state is `LoggedIn`.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }

    /// The name shown in the logged-in greeting: the part of the email
    /// before the `@`, or a fallback label.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::LoggedIn { email: Some(email) } => {
                email.split('@').next().unwrap_or(FALLBACK_USER_LABEL)
            }
            Self::LoggedIn { email: None } => FALLBACK_USER_LABEL,
            Self::LoggedOut => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_uses_local_part() {
        let state = AuthState::LoggedIn {
            email: Some("ana@example.com".to_owned()),
        };
        assert_eq!(state.display_name(), "ana");
    }

    #[test]
    fn test_display_name_fallback() {
        let state = AuthState::LoggedIn { email: None };
        assert_eq!(state.display_name(), FALLBACK_USER_LABEL);
        assert_eq!(AuthState::LoggedOut.display_name(), "");
    }
}
