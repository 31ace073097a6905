//! State stores layered on [`crate::storage`].
//!
//! Stores own persistence and invariants; they know nothing about views.
//! The flows in [`crate::flows`] sit on top of them.

pub mod cart;
pub mod session;
pub mod theme;

pub use cart::{CartError, CartStore};
pub use session::SessionStore;
pub use theme::ThemeStore;
