//! Backend API access.
//!
//! # Architecture
//!
//! - [`StorefrontApi`] is the seam between the session and the network. The
//!   session is generic over it so tests can swap in a fake backend.
//! - [`HttpStorefrontApi`] implements it with `reqwest` against the JSON
//!   contract described in [`types`].
//! - `conversions` validates wire payloads into `quitanda_core` types.
//!
//! # Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | list products | `GET /api/products` |
//! | purchase | `POST /api/purchase` |
//! | history | `GET /api/history` |
//! | create product | `POST /api/products` |
//! | update product | `PUT /api/products/{id}` |
//! | delete product | `DELETE /api/products/{id}` |

mod conversions;
mod http;
pub mod types;

use std::future::Future;

use quitanda_core::{CartItem, HistoryEntry, Product, ProductDraft, ProductId, Receipt};

pub use http::{HttpStorefrontApi, REQUEST_ID_HEADER};

use crate::error::ApiError;

/// Operations the storefront needs from its backend.
///
/// Requests are independent: nothing here orders or serializes them.
pub trait StorefrontApi {
    /// Fetch the full product catalog.
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    /// Submit the whole cart as one purchase.
    ///
    /// Not idempotent: calling this twice buys twice.
    fn submit_purchase(
        &self,
        items: &[CartItem],
    ) -> impl Future<Output = Result<Receipt, ApiError>> + Send;

    /// Fetch past purchases.
    fn list_history(&self) -> impl Future<Output = Result<Vec<HistoryEntry>, ApiError>> + Send;

    /// Create a product.
    fn create_product(
        &self,
        draft: &ProductDraft,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Replace an existing product's fields.
    fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Delete a product.
    fn delete_product(&self, id: ProductId) -> impl Future<Output = Result<(), ApiError>> + Send;
}

impl<T: StorefrontApi> StorefrontApi for &T {
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send {
        (**self).list_products()
    }

    fn submit_purchase(
        &self,
        items: &[CartItem],
    ) -> impl Future<Output = Result<Receipt, ApiError>> + Send {
        (**self).submit_purchase(items)
    }

    fn list_history(&self) -> impl Future<Output = Result<Vec<HistoryEntry>, ApiError>> + Send {
        (**self).list_history()
    }

    fn create_product(
        &self,
        draft: &ProductDraft,
    ) -> impl Future<Output = Result<(), ApiError>> + Send {
        (**self).create_product(draft)
    }

    fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> impl Future<Output = Result<(), ApiError>> + Send {
        (**self).update_product(id, draft)
    }

    fn delete_product(&self, id: ProductId) -> impl Future<Output = Result<(), ApiError>> + Send {
        (**self).delete_product(id)
    }
}
