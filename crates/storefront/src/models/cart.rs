//! Cart line items and totals.

use serde::{Deserialize, Serialize};

use tienda_core::{Money, ProductId};

/// A product as picked off the page: what the add-to-cart control knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Product identifier, unique within the cart.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Product image URL, if the card had one.
    pub image: Option<String>,
}

impl Product {
    /// Build a product from its parts.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        image: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image,
        }
    }
}

/// One line of the cart.
///
/// Invariant: `quantity >= 1` while the item is present. A line whose
/// quantity would drop to zero is removed, never stored at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier, unique within the cart.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Product image URL, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Units of this product in the cart.
    pub quantity: u32,
}

impl CartItem {
    /// A new line for a product, starting at quantity 1.
    #[must_use]
    pub fn first_of(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
            quantity: 1,
        }
    }

    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }
}

/// Cart-wide totals, recomputed from the full list on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    /// Sum of all line quantities.
    pub count: u32,
    /// Sum of all line totals.
    pub total: Money,
}

impl CartTotals {
    /// Compute totals over a list of items.
    #[must_use]
    pub fn of(items: &[CartItem]) -> Self {
        Self {
            count: items.iter().map(|item| item.quantity).sum(),
            total: items.iter().map(CartItem::line_total).sum(),
        }
    }
}
