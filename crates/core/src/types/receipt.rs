//! Purchase receipts and purchase history, both computed by the backend.

use serde::{Deserialize, Serialize};

use super::Price;

/// Backend confirmation of a successful purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Purchase date as formatted by the backend.
    pub date: String,
    pub lines: Vec<ReceiptLine>,
    pub total: Price,
}

/// One purchased product on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub product_name: String,
    pub quantity: u32,
    pub subtotal: Price,
}

impl Receipt {
    /// Total number of units bought.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

/// A past purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: String,
    pub total: Price,
    pub items: Vec<HistoryItem>,
}

/// One product line of a past purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub product_name: String,
    pub quantity: u32,
}

impl HistoryEntry {
    /// Items as one line, e.g. `"Arroz x2, Feijão x1"`.
    #[must_use]
    pub fn items_summary(&self) -> String {
        self.items
            .iter()
            .map(|item| format!("{} x{}", item.product_name, item.quantity))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
