//! In-memory backend for command tests.

#![allow(clippy::unwrap_used)]

use std::sync::Mutex;

use quitanda_client::{ApiError, StorefrontApi};
use quitanda_core::{
    CartItem, HistoryEntry, HistoryItem, Price, Product, ProductDraft, ProductId, Receipt,
    ReceiptLine,
};

/// Backend call, as seen by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListProducts,
    Purchase(Vec<CartItem>),
    History,
    Create(ProductDraft),
    Update(ProductId, ProductDraft),
    Delete(ProductId),
}

/// Two products and one past purchase. When `offline`, every call fails with 503.
///
/// Purchases always answer with the same two-unit receipt.
pub struct FakeApi {
    offline: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub const fn new() -> Self {
        Self {
            offline: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub const fn offline() -> Self {
        Self {
            offline: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn purchases(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Purchase(_)))
            .count()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        if self.offline {
            return Err(ApiError::Status {
                status: 503,
                message: None,
            });
        }
        Ok(())
    }
}

fn catalog() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new(1),
            name: "Arroz 5kg".to_string(),
            price: Price::parse("21.90").unwrap(),
            stock: 5,
        },
        Product {
            id: ProductId::new(2),
            name: "Feijão 1kg".to_string(),
            price: Price::parse("8.50").unwrap(),
            stock: 3,
        },
    ]
}

impl StorefrontApi for FakeApi {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.record(Call::ListProducts)?;
        Ok(catalog())
    }

    async fn submit_purchase(&self, items: &[CartItem]) -> Result<Receipt, ApiError> {
        self.record(Call::Purchase(items.to_vec()))?;
        Ok(Receipt {
            date: "2025-03-01 10:15:00".to_string(),
            lines: vec![ReceiptLine {
                product_name: "Arroz 5kg".to_string(),
                quantity: 2,
                subtotal: Price::parse("43.80").unwrap(),
            }],
            total: Price::parse("43.80").unwrap(),
        })
    }

    async fn list_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        self.record(Call::History)?;
        Ok(vec![HistoryEntry {
            date: "2025-02-28 18:00:00".to_string(),
            total: Price::parse("8.50").unwrap(),
            items: vec![HistoryItem {
                product_name: "Feijão 1kg".to_string(),
                quantity: 1,
            }],
        }])
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<(), ApiError> {
        self.record(Call::Create(draft.clone()))
    }

    async fn update_product(&self, id: ProductId, draft: &ProductDraft) -> Result<(), ApiError> {
        self.record(Call::Update(id, draft.clone()))
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        self.record(Call::Delete(id))
    }
}

