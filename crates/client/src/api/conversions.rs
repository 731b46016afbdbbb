//! Wire → domain conversions.
//!
//! Every payload is checked here so that a malformed decimal or a negative
//! stock count surfaces as [`ApiError::Contract`] instead of leaking into the
//! session as a nonsense value.

use quitanda_core::{
    CartItem, HistoryEntry, HistoryItem, Price, Product, ProductDraft, ProductId, Receipt,
    ReceiptLine,
};

use super::types::{
    WireCartItem, WireDecimal, WireHistoryEntry, WireHistoryItem, WireProduct,
    WireProductPayload, WireReceipt, WireReceiptLine,
};
use tracing::warn;

use crate::error::ApiError;

// =============================================================================
// Field helpers
// =============================================================================

fn decimal(field: &'static str, value: &WireDecimal) -> Result<Price, ApiError> {
    let text = match value {
        WireDecimal::Text(s) => s.clone(),
        WireDecimal::Number(n) => n.to_string(),
    };
    Price::parse(&text).map_err(|e| ApiError::Contract {
        field,
        detail: format!("{text:?} is not a decimal ({e})"),
    })
}

fn stock(field: &'static str, value: i64) -> Result<u32, ApiError> {
    u32::try_from(value).map_err(|_| ApiError::Contract {
        field,
        detail: format!("{value} is not a valid stock count"),
    })
}

fn line_quantity(field: &'static str, value: i64) -> Result<u32, ApiError> {
    match u32::try_from(value) {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(ApiError::Contract {
            field,
            detail: format!("{value} is not a valid line quantity"),
        }),
    }
}

// =============================================================================
// Responses
// =============================================================================

pub fn convert_product(wire: WireProduct) -> Result<Product, ApiError> {
    Ok(Product {
        id: ProductId::new(wire.id),
        price: decimal("Preco", &wire.price)?,
        stock: stock("Quantidade", wire.stock)?,
        name: wire.name,
    })
}

pub fn convert_products(wire: Vec<WireProduct>) -> Result<Vec<Product>, ApiError> {
    wire.into_iter().map(convert_product).collect()
}

fn convert_receipt_line(wire: WireReceiptLine) -> Result<ReceiptLine, ApiError> {
    Ok(ReceiptLine {
        quantity: line_quantity("itens.Quantidade", wire.quantity)?,
        subtotal: decimal("itens.Subtotal", &wire.subtotal)?,
        product_name: wire.product_name,
    })
}

pub fn convert_receipt(wire: WireReceipt) -> Result<Receipt, ApiError> {
    Ok(Receipt {
        total: decimal("total", &wire.total)?,
        lines: wire
            .lines
            .into_iter()
            .map(convert_receipt_line)
            .collect::<Result<_, _>>()?,
        date: wire.date,
    })
}

fn convert_history_item(wire: WireHistoryItem) -> Result<HistoryItem, ApiError> {
    Ok(HistoryItem {
        quantity: line_quantity("itens.Quantidade", wire.quantity)?,
        product_name: wire.product_name,
    })
}

pub fn convert_history_entry(wire: WireHistoryEntry) -> Result<HistoryEntry, ApiError> {
    Ok(HistoryEntry {
        total: decimal("total", &wire.total)?,
        items: wire
            .items
            .into_iter()
            .map(convert_history_item)
            .collect::<Result<_, _>>()?,
        date: wire.date,
    })
}

/// Convert a history listing. Malformed entries are logged and skipped.
pub fn convert_history(wire: Vec<WireHistoryEntry>) -> Vec<HistoryEntry> {
    wire.into_iter()
        .filter_map(|entry| {
            let date = entry.date.clone();
            convert_history_entry(entry)
                .inspect_err(|e| warn!(error = %e, %date, "Skipping malformed history entry"))
                .ok()
        })
        .collect()
}

// =============================================================================
// Requests
// =============================================================================

impl From<&CartItem> for WireCartItem {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id.as_i32(),
            quantity: item.quantity.get(),
        }
    }
}

impl<'a> From<&'a ProductDraft> for WireProductPayload<'a> {
    fn from(draft: &'a ProductDraft) -> Self {
        Self {
            name: &draft.name,
            price: draft.price,
            stock: draft.stock,
        }
    }
}
