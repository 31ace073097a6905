//! Cart flow: panel visibility and the list-mutation callbacks.

use std::rc::Rc;

use tienda_core::ProductId;

use crate::models::{CartItem, Product};
use crate::storage::StorageError;
use crate::stores::{CartError, CartStore};
use crate::views::{CartLineView, CartPanelPort, CartPanelView, EMPTY_CART_MESSAGE};

/// Sidebar controller and mutation API over the cart store.
pub struct CartFlow {
    store: Rc<CartStore>,
    port: Option<Rc<dyn CartPanelPort>>,
    placeholder_image: String,
}

impl CartFlow {
    /// Create the flow.
    #[must_use]
    pub fn new(
        store: Rc<CartStore>,
        port: Option<Rc<dyn CartPanelPort>>,
        placeholder_image: impl Into<String>,
    ) -> Self {
        Self {
            store,
            port,
            placeholder_image: placeholder_image.into(),
        }
    }

    /// Add one unit of a product, re-render, and open the panel.
    ///
    /// An invalid product is logged and ignored; a failed snapshot write is
    /// reported but the in-memory mutation stands and still renders.
    ///
    /// # Errors
    ///
    /// Propagates [`CartError`] for callers that care; the flow has already
    /// handled the user-facing side either way.
    pub fn add(&self, product: Product) -> Result<(), CartError> {
        match self.store.add(product) {
            Ok(()) => {
                self.render();
                self.show();
                Ok(())
            }
            Err(CartError::InvalidProduct { missing }) => {
                tracing::error!(missing, "ignoring invalid product");
                Err(CartError::InvalidProduct { missing })
            }
            Err(err) => {
                tracing::error!(error = %err, "cart snapshot write failed");
                self.render();
                self.show();
                Err(err)
            }
        }
    }

    /// Increment a line's quantity (the `+` control).
    ///
    /// # Errors
    ///
    /// Returns the storage error if the snapshot rewrite failed.
    pub fn increase(&self, id: &ProductId) -> Result<(), StorageError> {
        self.apply_quantity_change(id, 1)
    }

    /// Decrement a line's quantity (the `-` control). Hitting zero removes
    /// the line.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the snapshot rewrite failed.
    pub fn decrease(&self, id: &ProductId) -> Result<(), StorageError> {
        self.apply_quantity_change(id, -1)
    }

    /// Remove a line unconditionally (the `×` control).
    ///
    /// # Errors
    ///
    /// Returns the storage error if the snapshot rewrite failed.
    pub fn remove_line(&self, id: &ProductId) -> Result<(), StorageError> {
        let result = self.store.remove(id);
        if let Err(e) = &result {
            tracing::error!(error = %e, "cart snapshot write failed");
        }
        self.render();
        result
    }

    /// Show the panel and backdrop.
    pub fn show(&self) {
        if let Some(port) = &self.port {
            port.set_visible(true);
        }
    }

    /// Hide the panel and backdrop.
    pub fn hide(&self) {
        if let Some(port) = &self.port {
            port.set_visible(false);
        }
    }

    /// Flip panel visibility based on its current state.
    pub fn toggle(&self) {
        match &self.port {
            Some(port) => port.set_visible(!port.is_visible()),
            None => tracing::warn!("no cart port bound, cannot toggle panel"),
        }
    }

    /// Re-render the panel, badge count, and total from the store.
    ///
    /// Runs even on pages without a listing region; the port decides which
    /// regions it actually has.
    pub fn render(&self) {
        let Some(port) = &self.port else {
            tracing::warn!("no cart port bound, skipping cart render");
            return;
        };
        port.render(&self.view());
    }

    /// Build the current panel view model.
    #[must_use]
    pub fn view(&self) -> CartPanelView {
        let items = self.store.items();
        let totals = self.store.totals();
        let lines: Vec<CartLineView> = items
            .iter()
            .map(|item| CartLineView {
                id: item.id.clone(),
                name: item.name.clone(),
                unit_price: item.price.to_string(),
                quantity: item.quantity,
                image: resolve_image(item, &self.placeholder_image),
            })
            .collect();

        CartPanelView {
            placeholder: lines
                .is_empty()
                .then(|| EMPTY_CART_MESSAGE.to_owned()),
            trigger_active: !lines.is_empty(),
            lines,
            count: totals.count,
            total: totals.total.to_string(),
        }
    }

    fn apply_quantity_change(&self, id: &ProductId, delta: i32) -> Result<(), StorageError> {
        let result = self.store.change_quantity(id, delta);
        if let Err(e) = &result {
            tracing::error!(error = %e, "cart snapshot write failed");
        }
        self.render();
        result
    }
}

/// An item's image URL, or the placeholder when absent or unparseable.
fn resolve_image(item: &CartItem, placeholder: &str) -> String {
    item.image
        .as_deref()
        .filter(|raw| url::Url::parse(raw).is_ok())
        .map_or_else(|| placeholder.to_owned(), str::to_owned)
}
