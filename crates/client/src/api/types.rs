//! Wire shapes of the backend's JSON contract.
//!
//! Field names follow the backend (`IdProduto`, `NomeProduto`, ...). These
//! types are never handed to callers; `conversions` validates them into
//! `quitanda_core` types.

use quitanda_core::Price;
use serde::{Deserialize, Serialize};

/// A decimal as the backend sends it: a string for stored prices, a JSON
/// number for computed totals.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireDecimal {
    Text(String),
    Number(serde_json::Number),
}

/// Element of `GET /api/products`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireProduct {
    #[serde(rename = "IdProduto")]
    pub id: i32,
    #[serde(rename = "NomeProduto")]
    pub name: String,
    #[serde(rename = "Preco")]
    pub price: WireDecimal,
    #[serde(rename = "Quantidade")]
    pub stock: i64,
}

/// Body of `POST /api/purchase`.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseRequest {
    pub cart: Vec<WireCartItem>,
}

/// One cart line in a purchase request.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WireCartItem {
    #[serde(rename = "IdProduto")]
    pub product_id: i32,
    #[serde(rename = "Quantidade")]
    pub quantity: u32,
}

/// Successful `POST /api/purchase` response.
#[derive(Debug, Clone, Deserialize)]
pub struct WireReceipt {
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "itens")]
    pub lines: Vec<WireReceiptLine>,
    pub total: WireDecimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireReceiptLine {
    #[serde(rename = "NomeProduto")]
    pub product_name: String,
    #[serde(rename = "Quantidade")]
    pub quantity: i64,
    #[serde(rename = "Subtotal")]
    pub subtotal: WireDecimal,
}

/// Element of `GET /api/history`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireHistoryEntry {
    #[serde(rename = "data")]
    pub date: String,
    pub total: WireDecimal,
    #[serde(rename = "itens")]
    pub items: Vec<WireHistoryItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireHistoryItem {
    #[serde(rename = "NomeProduto")]
    pub product_name: String,
    #[serde(rename = "Quantidade")]
    pub quantity: i64,
}

/// Body of `POST /api/products` and `PUT /api/products/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct WireProductPayload<'a> {
    #[serde(rename = "NomeProduto")]
    pub name: &'a str,
    #[serde(rename = "Preco")]
    pub price: Price,
    #[serde(rename = "Quantidade")]
    pub stock: u32,
}

/// Error body the backend sends with non-success statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
