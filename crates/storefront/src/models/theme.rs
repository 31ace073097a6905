//! Theme preference.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Light or dark presentation theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// The default when neither a persisted value nor an OS preference exists.
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The persisted string form (`"light"` / `"dark"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse the persisted form. Unknown values yield `None` so a corrupt
    /// preference falls back rather than erroring.
    #[must_use]
    pub fn from_persisted(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_roundtrip() {
        assert_eq!(Theme::from_persisted("light"), Some(Theme::Light));
        assert_eq!(Theme::from_persisted("dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_persisted("sepia"), None);
        assert_eq!(Theme::Dark.as_str(), "dark");
    }

    #[test]
    fn test_toggled_twice_is_identity() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.toggled().toggled(), theme);
        }
    }
}
