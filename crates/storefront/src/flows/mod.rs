//! UI flow controllers.
//!
//! One controller per feature, layered on the stores and talking only to
//! the view ports in [`crate::views`]. Flow methods are the event callbacks
//! a view adapter wires to its controls.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod profile;
pub mod theme;

pub use auth::{AuthError, AuthFlow};
pub use cart::CartFlow;
pub use checkout::CheckoutFlow;
pub use profile::{AvatarUpload, ProfileError, ProfileFlow};
pub use theme::ThemeFlow;
