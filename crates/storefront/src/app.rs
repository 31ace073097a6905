//! The page-session controller.
//!
//! Owns the stores and flows for one page load. Construction wires every
//! component to its view port; [`App::start`] is the single startup hook
//! the view adapter calls once its bindings exist. Everything afterwards is
//! user-triggered through the flow methods.

use std::rc::Rc;

use crate::config::StorefrontConfig;
use crate::flows::{AuthFlow, CartFlow, CheckoutFlow, ProfileFlow, ThemeFlow};
use crate::models::Theme;
use crate::storage::Storage;
use crate::stores::{CartStore, SessionStore, ThemeStore};
use crate::views::Bindings;

/// One page session: stores constructed once, flows wired to their ports.
pub struct App {
    theme: ThemeFlow,
    auth: Rc<AuthFlow>,
    cart_store: Rc<CartStore>,
    cart: CartFlow,
    checkout: CheckoutFlow,
    profile: ProfileFlow,
    has_checkout_page: bool,
    has_profile_page: bool,
}

impl App {
    /// Wire up stores and flows.
    ///
    /// `os_theme` is the OS-level theme preference if the host environment
    /// exposes one; it is only a read-time fallback.
    #[must_use]
    pub fn new(
        config: &StorefrontConfig,
        storage: Storage,
        bindings: Bindings,
        os_theme: Option<Theme>,
    ) -> Self {
        let theme = ThemeFlow::new(
            ThemeStore::new(storage.clone(), os_theme),
            bindings.theme,
        );

        let session = SessionStore::new(storage.clone());
        let auth = Rc::new(AuthFlow::new(session.clone(), bindings.auth));

        let cart_store = Rc::new(CartStore::new(storage.clone()));
        let cart = CartFlow::new(
            Rc::clone(&cart_store),
            bindings.cart,
            config.placeholder_image.clone(),
        );

        let has_checkout_page = bindings.checkout.is_some();
        let checkout = CheckoutFlow::new(
            storage.clone(),
            bindings.checkout,
            config.tax_rate,
            config.placeholder_image.clone(),
        );

        let has_profile_page = bindings.profile.is_some();
        let profile = ProfileFlow::new(
            session,
            storage,
            Rc::clone(&auth),
            bindings.profile,
            config.max_avatar_bytes,
        );

        Self {
            theme,
            auth,
            cart_store,
            cart,
            checkout,
            profile,
            has_checkout_page,
            has_profile_page,
        }
    }

    /// The startup hook: apply the theme, hydrate and render the cart,
    /// refresh the auth control, then run page-specific initialization for
    /// whichever page the bindings describe.
    pub fn start(&self) {
        self.theme.initialize();
        self.cart_store.hydrate();
        self.cart.render();
        self.auth.refresh();

        if self.has_checkout_page {
            self.checkout.open();
        }
        if self.has_profile_page {
            self.profile.open();
        }
        tracing::debug!("page session started");
    }

    /// Theme flow (toggle control).
    #[must_use]
    pub const fn theme(&self) -> &ThemeFlow {
        &self.theme
    }

    /// Auth flow (login/logout callbacks).
    #[must_use]
    pub fn auth(&self) -> &AuthFlow {
        &*self.auth
    }

    /// Cart flow (panel and mutation callbacks).
    #[must_use]
    pub const fn cart(&self) -> &CartFlow {
        &self.cart
    }

    /// Checkout flow.
    #[must_use]
    pub const fn checkout(&self) -> &CheckoutFlow {
        &self.checkout
    }

    /// Profile flow.
    #[must_use]
    pub const fn profile(&self) -> &ProfileFlow {
        &self.profile
    }
}
