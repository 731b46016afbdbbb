//! The shopping cart.
//!
//! A cart belongs to exactly one storefront session. It is never persisted
//! and is thrown away after a successful purchase or a session reset.
//! Quantities are checked against the catalog as it was fetched; live stock
//! is the backend's problem at purchase time.

use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductId, Quantity};
use crate::validation::ValidationError;

/// A product and how many units of it to buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: Quantity,
}

/// Items pending purchase, in the order they were added.
///
/// Adding the same product twice produces two lines; the backend sums them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append an item without any catalog check.
    pub fn add(&mut self, product_id: ProductId, quantity: Quantity) -> CartItem {
        let item = CartItem {
            product_id,
            quantity,
        };
        self.items.push(item);
        item
    }

    /// Append an item for a listed product.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ExceedsStock`] when the units already in
    /// the cart plus `quantity` would exceed the product's listed stock. The
    /// cart is unchanged on error.
    pub fn add_listed(
        &mut self,
        product: &Product,
        quantity: Quantity,
    ) -> Result<CartItem, ValidationError> {
        let in_cart = self.quantity_for(product.id);
        let requested = in_cart.saturating_add(quantity.get());
        if requested > product.stock {
            return Err(ValidationError::ExceedsStock {
                product_id: product.id,
                requested,
                available: product.stock,
            });
        }
        Ok(self.add(product.id, quantity))
    }

    /// Units of `product_id` across all lines.
    #[must_use]
    pub fn quantity_for(&self, product_id: ProductId) -> u32 {
        self.items
            .iter()
            .filter(|item| item.product_id == product_id)
            .fold(0_u32, |acc, item| acc.saturating_add(item.quantity.get()))
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn total_units(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
