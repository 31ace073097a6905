//! View ports and view models.
//!
//! Flows never touch a document. Each flow declares the port it needs here;
//! a view adapter (HTML bindings, a TUI, the demo console, test fakes)
//! implements the ports and hands them to [`Bindings`] once at startup.
//!
//! Every port is optional: a page that lacks the corresponding elements
//! simply leaves the port unbound and the feature is skipped with a log
//! line, per the graceful-degradation contract.

use std::rc::Rc;

use tienda_core::ProductId;

use crate::models::Theme;

/// Empty-cart placeholder shown in the cart panel.
pub const EMPTY_CART_MESSAGE: &str = "Tu carrito está vacío.";

/// Empty-cart placeholder shown on the checkout page.
pub const EMPTY_CHECKOUT_MESSAGE: &str = "No hay artículos en tu carrito para procesar.";

/// Applies the presentation theme (e.g. a `dark-mode` class on the body).
pub trait ThemePort {
    /// Apply a theme to the page.
    fn apply(&self, theme: Theme);
}

/// Which way the auth control currently points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    /// Clicking it opens the login modal.
    OpenLogin,
    /// Clicking it logs out.
    Logout,
}

/// Everything the auth control must show for one state: label, style class,
/// and the action a click performs. Recomputed and re-applied after every
/// transition, not just at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthAffordance {
    /// Button label (`"Login"` or a greeting).
    pub label: String,
    /// Whether the logged-in styling applies.
    pub logged_in: bool,
    /// What a click should do.
    pub action: AuthAction,
}

/// The auth control and login modal.
pub trait AuthPort {
    /// Update the auth control to match a new state.
    fn apply(&self, affordance: &AuthAffordance);

    /// Show the login modal, with any previous error hidden.
    fn show_login_modal(&self);

    /// Hide the login modal.
    fn hide_login_modal(&self);

    /// Surface a login validation failure.
    fn show_login_error(&self, message: &str);
}

/// One rendered cart line. The port must wire its increment, decrement, and
/// remove controls back to the cart flow using `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    /// Correlation id for the line's controls.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price, two decimals.
    pub unit_price: String,
    /// Quantity in the cart.
    pub quantity: u32,
    /// Image URL (placeholder already substituted).
    pub image: String,
}

/// The whole cart panel: lines (or a placeholder), the trigger badge count,
/// and the running total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPanelView {
    /// Rendered lines; empty means show `placeholder`.
    pub lines: Vec<CartLineView>,
    /// Placeholder message, present only when `lines` is empty.
    pub placeholder: Option<String>,
    /// Sum of quantities, for the trigger badge.
    pub count: u32,
    /// Cart total, two decimals.
    pub total: String,
    /// Whether the cart trigger should look active (any line present).
    pub trigger_active: bool,
}

/// The cart sidebar, its backdrop, and the cart trigger.
pub trait CartPanelPort {
    /// Replace the rendered panel contents.
    fn render(&self, view: &CartPanelView);

    /// Show or hide the panel and its backdrop together.
    fn set_visible(&self, visible: bool);

    /// Whether the panel is currently shown. Drives `toggle`.
    fn is_visible(&self) -> bool;
}

/// One line of the checkout summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLineView {
    /// Display name.
    pub name: String,
    /// Quantity purchased.
    pub quantity: u32,
    /// Price times quantity, two decimals.
    pub line_total: String,
    /// Image URL (placeholder already substituted).
    pub image: String,
}

/// The checkout summary: lines (or a placeholder) plus the three totals,
/// all formatted with exactly two decimals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutView {
    /// Rendered lines; empty means show `placeholder`.
    pub lines: Vec<CheckoutLineView>,
    /// Placeholder message, present only when `lines` is empty.
    pub placeholder: Option<String>,
    /// Sum of line totals.
    pub subtotal: String,
    /// Subtotal times the tax rate.
    pub tax: String,
    /// Subtotal plus tax.
    pub total: String,
}

/// The checkout page display regions.
pub trait CheckoutPort {
    /// Render the computed summary.
    fn render(&self, view: &CheckoutView);
}

/// Outcome message of a DNI validation, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DniFeedback {
    /// Whether to style the message as valid.
    pub valid: bool,
    /// User-facing message text.
    pub text: String,
}

/// The profile panel: email, avatar, DNI validator, and the page redirect
/// used by the login gate.
pub trait ProfilePort {
    /// Show the session email (or a fallback label).
    fn show_email(&self, email: &str);

    /// Update the displayed avatar with a data URL.
    fn show_avatar(&self, data_url: &str);

    /// Show the result of a DNI validation.
    fn show_dni_feedback(&self, feedback: &DniFeedback);

    /// Surface a user-visible warning (rejected avatar, failed save).
    fn warn(&self, message: &str);

    /// Leave the profile page (gate failed or the user logged out).
    fn redirect_to_home(&self);
}

/// The view-binding layer, built once at startup.
///
/// Each field is the port for one feature; `None` means the page has no
/// elements for that feature and it is skipped.
#[derive(Default, Clone)]
pub struct Bindings {
    /// Theme application target.
    pub theme: Option<Rc<dyn ThemePort>>,
    /// Auth control and login modal.
    pub auth: Option<Rc<dyn AuthPort>>,
    /// Cart trigger, panel, and backdrop.
    pub cart: Option<Rc<dyn CartPanelPort>>,
    /// Checkout summary regions.
    pub checkout: Option<Rc<dyn CheckoutPort>>,
    /// Profile panel.
    pub profile: Option<Rc<dyn ProfilePort>>,
}

impl std::fmt::Debug for Bindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bindings")
            .field("theme", &self.theme.is_some())
            .field("auth", &self.auth.is_some())
            .field("cart", &self.cart.is_some())
            .field("checkout", &self.checkout.is_some())
            .field("profile", &self.profile.is_some())
            .finish()
    }
}
