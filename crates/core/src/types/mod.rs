//! Core types for Quitanda.
//!
//! This module provides type-safe wrappers for common storefront concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod quantity;
pub mod receipt;

pub use id::*;
pub use price::Price;
pub use product::{Product, ProductDraft, ProductForm, ProductSave};
pub use quantity::Quantity;
pub use receipt::{HistoryEntry, HistoryItem, Receipt, ReceiptLine};
