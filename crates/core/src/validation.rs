//! Local validation failures.
//!
//! These are raised before any network call is made and are shown to the
//! user as-is, so the `Display` text is user-facing.

use thiserror::Error;

use crate::types::ProductId;

/// A user input that was rejected locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Cart quantities must be at least one.
    #[error("Select a valid quantity! (got {0})")]
    InvalidQuantity(i64),

    /// A purchase needs at least one cart item.
    #[error("Cart is empty!")]
    EmptyCart,

    /// The product is not part of the loaded catalog.
    #[error("Product {0} is not in the catalog")]
    UnknownProduct(ProductId),

    /// The requested quantity is larger than the listed stock.
    #[error("Only {available} unit(s) of product {product_id} in stock (requested {requested})")]
    ExceedsStock {
        /// Product being added.
        product_id: ProductId,
        /// Quantity the user asked for.
        requested: u32,
        /// Stock listed in the last catalog fetch.
        available: u32,
    },

    /// A form field could not be parsed.
    #[error("Invalid value for {field}: {value:?}")]
    InvalidField {
        /// Field name as shown on the form.
        field: &'static str,
        /// Raw input.
        value: String,
    },

    /// A required form field was left blank.
    #[error("{0} is required")]
    MissingField(&'static str),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(ValidationError::EmptyCart.to_string(), "Cart is empty!");
        assert_eq!(
            ValidationError::InvalidField {
                field: "price",
                value: "abc".to_string(),
            }
            .to_string(),
            "Invalid value for price: \"abc\""
        );
    }
}
