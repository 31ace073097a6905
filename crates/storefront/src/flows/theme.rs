//! Theme flow: applies the preference and handles the toggle control.

use std::cell::Cell;
use std::rc::Rc;

use crate::models::Theme;
use crate::stores::ThemeStore;
use crate::views::ThemePort;

/// Applies the theme at startup and flips it on toggle.
///
/// Keeps the currently applied value in memory so that a failed preference
/// write degrades to in-memory-only behavior for the session instead of
/// breaking the toggle.
pub struct ThemeFlow {
    store: ThemeStore,
    port: Option<Rc<dyn ThemePort>>,
    current: Cell<Theme>,
}

impl ThemeFlow {
    /// Create the flow. Call [`Self::initialize`] at startup.
    #[must_use]
    pub fn new(store: ThemeStore, port: Option<Rc<dyn ThemePort>>) -> Self {
        Self {
            store,
            port,
            current: Cell::new(Theme::Light),
        }
    }

    /// Apply the effective preference to the page.
    pub fn initialize(&self) {
        let theme = self.store.preference();
        self.current.set(theme);
        self.apply(theme);
    }

    /// The currently applied theme.
    #[must_use]
    pub fn current(&self) -> Theme {
        self.current.get()
    }

    /// Toggle between light and dark, persisting the new preference.
    pub fn toggle(&self) {
        self.set_preference(self.current.get().toggled());
    }

    /// Apply and persist a specific preference.
    ///
    /// A failed write is logged and otherwise ignored; the theme still
    /// applies for the rest of the session.
    pub fn set_preference(&self, theme: Theme) {
        self.current.set(theme);
        self.apply(theme);
        if let Err(e) = self.store.set_preference(theme) {
            tracing::warn!(error = %e, "theme preference not persisted");
        }
    }

    fn apply(&self, theme: Theme) {
        match &self.port {
            Some(port) => port.apply(theme),
            None => tracing::warn!("no theme port bound, skipping theme application"),
        }
    }
}
