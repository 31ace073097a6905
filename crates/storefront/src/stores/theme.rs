//! Theme preference store.

use crate::models::Theme;
use crate::storage::{Storage, StorageError, keys};

/// Reads and writes the single persisted theme preference.
///
/// The OS-level preference is sampled once at startup and used only as a
/// read-time fallback; it is never written back unless the user toggles.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    storage: Storage,
    os_preference: Option<Theme>,
}

impl ThemeStore {
    /// Create a store. `os_preference` is the OS-level preference, if the
    /// host environment exposes one.
    #[must_use]
    pub const fn new(storage: Storage, os_preference: Option<Theme>) -> Self {
        Self {
            storage,
            os_preference,
        }
    }

    /// The effective preference: persisted value if present, else the OS
    /// preference, else light.
    #[must_use]
    pub fn preference(&self) -> Theme {
        self.storage
            .durable()
            .get(keys::THEME)
            .and_then(|raw| Theme::from_persisted(&raw))
            .or(self.os_preference)
            .unwrap_or_default()
    }

    /// Persist a preference.
    ///
    /// # Errors
    ///
    /// Returns the storage error on a failed write; callers degrade to
    /// in-memory-only behavior for the rest of the session.
    pub fn set_preference(&self, theme: Theme) -> Result<(), StorageError> {
        self.storage.durable().set(keys::THEME, theme.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_chain() {
        let storage = Storage::in_memory();

        // nothing persisted, no OS preference -> light
        let store = ThemeStore::new(storage.clone(), None);
        assert_eq!(store.preference(), Theme::Light);

        // nothing persisted, OS prefers dark -> dark
        let store = ThemeStore::new(storage.clone(), Some(Theme::Dark));
        assert_eq!(store.preference(), Theme::Dark);

        // persisted value wins over the OS preference
        store.set_preference(Theme::Light).unwrap();
        assert_eq!(store.preference(), Theme::Light);
    }

    #[test]
    fn test_os_fallback_not_written_back() {
        let storage = Storage::in_memory();
        let store = ThemeStore::new(storage.clone(), Some(Theme::Dark));
        let _ = store.preference();
        assert!(storage.durable().get(keys::THEME).is_none());
    }

    #[test]
    fn test_corrupt_value_falls_back() {
        let storage = Storage::in_memory();
        storage.durable().set(keys::THEME, "sepia").unwrap();
        let store = ThemeStore::new(storage, Some(Theme::Dark));
        assert_eq!(store.preference(), Theme::Dark);
    }
}
