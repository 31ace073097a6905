//! Domain models for the storefront.

pub mod cart;
pub mod session;
pub mod theme;

pub use cart::{CartItem, CartTotals, Product};
pub use session::AuthState;
pub use theme::Theme;
