//! Key-value persistence.
//!
//! The page persists everything as strings under well-known keys, split into
//! two independent scopes:
//!
//! - **durable** - survives restarts (theme, cart snapshot, avatar)
//! - **session** - lives for one browsing session (login flag, email)
//!
//! Each key is rewritten independently; no two keys need to be consistent
//! with each other at the same instant, so there is no multi-key atomicity.

mod file;
mod memory;

use std::rc::Rc;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Persisted key names.
///
/// These are stable identifiers shared with any pre-existing data, so they
/// keep the original camelCase spelling.
pub mod keys {
    /// Durable: `"light"` or `"dark"`.
    pub const THEME: &str = "theme";

    /// Durable: JSON array of cart items, rewritten whole on every mutation.
    pub const SHOPPING_CART: &str = "shoppingCart";

    /// Durable: avatar image as a base64 data URL. Deliberately not cleared
    /// on logout; the avatar belongs to the device, not the session.
    pub const PROFILE_PIC: &str = "userProfilePic";

    /// Session: `"true"` sentinel while logged in.
    pub const USER_LOGGED_IN: &str = "userLoggedIn";

    /// Session: raw email string, present only while logged in.
    pub const USER_EMAIL: &str = "userEmail";
}

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing store cannot accept writes at all.
    #[error("storage is unavailable")]
    Unavailable,

    /// Writing a key to the backing store failed.
    #[error("failed to write key {key}: {source}")]
    Write {
        /// The key being written.
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A value could not be encoded for storage.
    #[error("failed to encode value for key {key}: {source}")]
    Encode {
        /// The key being written.
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A string key-value store.
///
/// Methods take `&self`; implementations use interior mutability. The app is
/// single-threaded by construction, so there is never more than one writer.
pub trait KeyValue {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing store rejects the write. The
    /// caller's in-memory state must remain valid regardless.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

/// The two storage scopes handed to stores and flows.
///
/// Cheaply cloneable; clones share the same underlying scopes.
#[derive(Clone)]
pub struct Storage {
    durable: Rc<dyn KeyValue>,
    session: Rc<dyn KeyValue>,
}

impl Storage {
    /// Build storage from explicit backing stores.
    #[must_use]
    pub fn new(durable: Rc<dyn KeyValue>, session: Rc<dyn KeyValue>) -> Self {
        Self { durable, session }
    }

    /// Both scopes in memory. Used by tests and as a degraded fallback when
    /// no durable backing is available.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStore::new()), Rc::new(MemoryStore::new()))
    }

    /// The durable scope (theme, cart, avatar).
    #[must_use]
    pub fn durable(&self) -> &dyn KeyValue {
        self.durable.as_ref()
    }

    /// The session scope (login flag, email).
    #[must_use]
    pub fn session(&self) -> &dyn KeyValue {
        self.session.as_ref()
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}
