//! Checkout summary.
//!
//! A pure read-and-compute view over the persisted cart snapshot at the
//! moment the checkout page opens. There is no live subscription: later cart
//! changes do not update an open summary.

use std::rc::Rc;

use rust_decimal::Decimal;

use crate::models::CartItem;
use crate::storage::Storage;
use crate::stores::cart::read_snapshot;
use crate::views::{CheckoutLineView, CheckoutPort, CheckoutView, EMPTY_CHECKOUT_MESSAGE};

/// Checkout page controller.
pub struct CheckoutFlow {
    storage: Storage,
    port: Option<Rc<dyn CheckoutPort>>,
    tax_rate: Decimal,
    placeholder_image: String,
}

impl CheckoutFlow {
    /// Create the flow.
    #[must_use]
    pub fn new(
        storage: Storage,
        port: Option<Rc<dyn CheckoutPort>>,
        tax_rate: Decimal,
        placeholder_image: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            port,
            tax_rate,
            placeholder_image: placeholder_image.into(),
        }
    }

    /// Read the snapshot, compute the summary, and render it.
    ///
    /// Unlike most features, the checkout cannot degrade: without its
    /// display regions there is nothing to do, so a missing port is an
    /// error-level log and an early return.
    pub fn open(&self) {
        let Some(port) = &self.port else {
            tracing::error!("checkout display regions missing, cannot render summary");
            return;
        };
        let snapshot = read_snapshot(&self.storage);
        port.render(&summarize(&snapshot, self.tax_rate, &self.placeholder_image));
    }
}

/// Compute the checkout view for a cart snapshot.
///
/// `subtotal = Σ price·quantity`, `tax = subtotal · rate`,
/// `total = subtotal + tax`, all displayed with exactly two decimals. An
/// empty snapshot yields `"0.00"` for all three and a placeholder message.
#[must_use]
pub fn summarize(items: &[CartItem], tax_rate: Decimal, placeholder_image: &str) -> CheckoutView {
    let lines: Vec<CheckoutLineView> = items
        .iter()
        .map(|item| CheckoutLineView {
            name: item.name.clone(),
            quantity: item.quantity,
            line_total: item.line_total().to_string(),
            image: item
                .image
                .clone()
                .unwrap_or_else(|| placeholder_image.to_owned()),
        })
        .collect();

    let subtotal: tienda_core::Money = items.iter().map(CartItem::line_total).sum();
    let tax = subtotal.at_rate(tax_rate);
    let total = subtotal + tax;

    CheckoutView {
        placeholder: lines
            .is_empty()
            .then(|| EMPTY_CHECKOUT_MESSAGE.to_owned()),
        lines,
        subtotal: subtotal.to_string(),
        tax: tax.to_string(),
        total: total.to_string(),
    }
}
