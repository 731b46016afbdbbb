//! The `buy` command.

use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use quitanda_client::{Prompt, Storefront, StorefrontApi, StorefrontError, view};
use quitanda_core::ProductId;
use thiserror::Error;
use tracing::warn;

use super::CommandError;

/// A `--item ID:QTY` argument.
///
/// The quantity is kept signed so that the session, not the argument
/// parser, decides what counts as a valid quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSpec {
    pub product_id: ProductId,
    pub quantity: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected ID:QTY, got {0:?}")]
pub struct ItemSpecError(String);

impl FromStr for ItemSpec {
    type Err = ItemSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ItemSpecError(s.to_string());
        let (id, quantity) = s.split_once(':').ok_or_else(malformed)?;
        Ok(Self {
            product_id: id.parse().map_err(|_| malformed())?,
            quantity: quantity.trim().parse().map_err(|_| malformed())?,
        })
    }
}

/// Load the catalog, add every item, and submit the cart.
///
/// The receipt is printed as text. With `print`, the printable receipt
/// document is also written to that path.
///
/// # Errors
///
/// Returns an error if an item is rejected, the purchase fails, or output
/// cannot be written. Nothing is submitted if any item is rejected.
pub async fn buy<A, P, W>(
    store: &mut Storefront<A, P>,
    items: &[ItemSpec],
    print: Option<&Path>,
    out: &mut W,
) -> Result<(), CommandError>
where
    A: StorefrontApi,
    P: Prompt,
    W: Write,
{
    if store.load_products().await.is_err() {
        warn!("Catalog unavailable, stock will only be checked by the backend");
    }

    for item in items {
        store.add_to_cart(item.product_id, item.quantity)?;
    }

    let receipt = store.submit_purchase().await?;
    let text = view::receipt_text(&receipt).map_err(StorefrontError::from)?;
    out.write_all(text.as_bytes())?;

    if let Some(path) = print {
        let document = store.print_receipt()?;
        tokio::fs::write(path, document.html.as_bytes()).await?;
        writeln!(out, "Printable receipt written to {}", path.display())?;
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use quitanda_client::RecordingPrompt;
    use quitanda_core::ValidationError;

    use super::*;
    use crate::commands::fake::{Call, FakeApi};

    fn item(id: i32, quantity: i64) -> ItemSpec {
        ItemSpec {
            product_id: ProductId::new(id),
            quantity,
        }
    }

    #[test]
    fn test_parse_item_spec() {
        let spec: ItemSpec = "12:3".parse().unwrap();
        assert_eq!(spec.product_id, ProductId::new(12));
        assert_eq!(spec.quantity, 3);

        let spec: ItemSpec = " 4 : 1 ".parse().unwrap();
        assert_eq!(spec.product_id, ProductId::new(4));
        assert_eq!(spec.quantity, 1);
    }

    #[test]
    fn test_non_positive_quantity_is_left_to_the_session() {
        let spec: ItemSpec = "1:0".parse().unwrap();
        assert_eq!(spec.quantity, 0);
        let spec: ItemSpec = "1:-2".parse().unwrap();
        assert_eq!(spec.quantity, -2);
    }

    #[test]
    fn test_malformed_item_spec() {
        for raw in ["12", "a:1", "1:b", ":", "1:2:3"] {
            assert_eq!(
                raw.parse::<ItemSpec>(),
                Err(ItemSpecError(raw.to_string())),
                "{raw} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_buy_prints_receipt() {
        let api = FakeApi::new();
        let mut store = Storefront::new(&api, RecordingPrompt::accepting());
        let mut out = Vec::new();

        buy(&mut store, &[item(1, 2)], None, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Receipt - 2025-03-01 10:15:00"));
        assert!(text.contains("Arroz 5kg x2 - R$43.80"));
        assert!(text.contains("Total: R$43.80"));
        assert_eq!(api.purchases(), 1);
        assert!(store.cart().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_item_stops_before_purchase() {
        for bad in [item(2, 0), item(9, 1), item(2, 4)] {
            let api = FakeApi::new();
            let mut store = Storefront::new(&api, RecordingPrompt::accepting());
            let mut out = Vec::new();

            let err = buy(&mut store, &[item(1, 1), bad], None, &mut out)
                .await
                .unwrap_err();

            assert!(matches!(
                err,
                CommandError::Storefront(StorefrontError::Validation(_))
            ));
            assert_eq!(api.purchases(), 0, "{bad:?} should not be submitted");
            assert!(out.is_empty());
        }
    }

    #[tokio::test]
    async fn test_zero_quantity_is_reported() {
        let api = FakeApi::new();
        let mut store = Storefront::new(&api, RecordingPrompt::accepting());
        let mut out = Vec::new();

        let err = buy(&mut store, &[item(1, 0)], None, &mut out)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CommandError::Storefront(StorefrontError::Validation(
                ValidationError::InvalidQuantity(0)
            ))
        ));
        assert_eq!(api.calls(), vec![Call::ListProducts]);
    }

    #[tokio::test]
    async fn test_buy_writes_printable_receipt() {
        let api = FakeApi::new();
        let mut store = Storefront::new(&api, RecordingPrompt::accepting());
        let mut out = Vec::new();
        let path = std::env::temp_dir().join(format!(
            "quitanda-receipt-{}.html",
            std::process::id()
        ));

        buy(&mut store, &[item(1, 2)], Some(&path), &mut out)
            .await
            .unwrap();

        let document = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(document.contains("<title>Receipt</title>"));
        assert!(document.contains("Arroz 5kg x2 - R$43.80"));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&format!(
            "Printable receipt written to {}",
            path.display()
        )));
    }

    #[tokio::test]
    async fn test_failed_purchase_writes_nothing() {
        let api = FakeApi::offline();
        let mut store = Storefront::new(&api, RecordingPrompt::accepting());
        let mut out = Vec::new();
        let path = std::env::temp_dir().join(format!(
            "quitanda-unprinted-{}.html",
            std::process::id()
        ));

        assert!(
            buy(&mut store, &[item(1, 1)], Some(&path), &mut out)
                .await
                .is_err()
        );

        assert!(out.is_empty());
        assert!(!path.exists());
        assert_eq!(store.cart().len(), 1);
    }
}
