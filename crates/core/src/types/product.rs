//! Products as listed by the backend, and the admin product form.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};
use crate::validation::ValidationError;

/// A product in the catalog.
///
/// The client holds a read-only copy per catalog fetch; the backend owns the
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Units in stock at fetch time.
    pub stock: u32,
}

/// Fields sent when creating or updating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: Price,
    pub stock: u32,
}

/// What saving the product form should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductSave {
    /// No hidden id: create a new product.
    Create(ProductDraft),
    /// Hidden id present: update that product.
    Update(ProductId, ProductDraft),
}

/// Raw admin form input, exactly as typed.
///
/// Create and update share one form. The hidden `id` field is filled in when
/// an existing product is being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub id: Option<String>,
    pub name: String,
    pub price: String,
    pub stock: String,
}

impl ProductForm {
    /// Validate the form and decide between create and update.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a blank name, or a non-numeric id,
    /// price, or stock. Negative prices and stock are rejected too.
    pub fn validate(&self) -> Result<ProductSave, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }

        let price = parse_price(&self.price)?;
        let stock = self
            .stock
            .trim()
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidField {
                field: "stock",
                value: self.stock.clone(),
            })?;

        let draft = ProductDraft {
            name: name.to_string(),
            price,
            stock,
        };

        match self.id.as_deref().map(str::trim) {
            None | Some("") => Ok(ProductSave::Create(draft)),
            Some(raw) => {
                let id = raw
                    .parse::<ProductId>()
                    .map_err(|_| ValidationError::InvalidField {
                        field: "id",
                        value: raw.to_string(),
                    })?;
                Ok(ProductSave::Update(id, draft))
            }
        }
    }
}

/// Parse a price typed by a person; a lone comma is read as the decimal
/// separator.
fn parse_price(raw: &str) -> Result<Price, ValidationError> {
    let invalid = || ValidationError::InvalidField {
        field: "price",
        value: raw.to_string(),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("price"));
    }

    let normalized = if trimmed.contains('.') {
        trimmed.to_string()
    } else {
        trimmed.replacen(',', ".", 1)
    };

    let price = Price::parse(&normalized).map_err(|_| invalid())?;
    if price.is_negative() {
        return Err(invalid());
    }
    Ok(price)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(id: Option<&str>, name: &str, price: &str, stock: &str) -> ProductForm {
        ProductForm {
            id: id.map(String::from),
            name: name.to_string(),
            price: price.to_string(),
            stock: stock.to_string(),
        }
    }

    #[test]
    fn test_blank_hidden_id_creates() {
        let save = form(Some(""), "Arroz", "21.90", "10").validate().unwrap();
        let ProductSave::Create(draft) = save else {
            panic!("expected create");
        };
        assert_eq!(draft.name, "Arroz");
        assert_eq!(draft.price.to_fixed(), "21.90");
        assert_eq!(draft.stock, 10);
    }

    #[test]
    fn test_hidden_id_updates() {
        let save = form(Some("7"), "Feijão", "8,5", "3").validate().unwrap();
        let ProductSave::Update(id, draft) = save else {
            panic!("expected update");
        };
        assert_eq!(id, ProductId::new(7));
        assert_eq!(draft.price.to_fixed(), "8.50");
    }

    #[test]
    fn test_non_numeric_fields_rejected() {
        assert!(matches!(
            form(None, "Leite", "cheap", "1").validate(),
            Err(ValidationError::InvalidField { field: "price", .. })
        ));
        assert!(matches!(
            form(None, "Leite", "4.20", "-1").validate(),
            Err(ValidationError::InvalidField { field: "stock", .. })
        ));
        assert!(matches!(
            form(Some("x"), "Leite", "4.20", "1").validate(),
            Err(ValidationError::InvalidField { field: "id", .. })
        ));
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(
            form(None, "  ", "1", "1").validate(),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn test_negative_price_rejected() {
        assert!(form(None, "Café", "-2", "1").validate().is_err());
    }
}
