//! `reqwest` implementation of [`StorefrontApi`].

use std::sync::Arc;

use quitanda_core::{CartItem, HistoryEntry, Product, ProductDraft, ProductId, Receipt};
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{Span, debug, instrument};
use url::Url;
use uuid::Uuid;

use super::StorefrontApi;
use super::conversions::{convert_history, convert_products, convert_receipt};
use super::types::{
    ErrorBody, PurchaseRequest, WireCartItem, WireHistoryEntry, WireProduct, WireProductPayload,
    WireReceipt,
};
use crate::config::ClientConfig;
use crate::error::ApiError;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest body excerpt written to logs.
const LOG_BODY_LIMIT: usize = 500;

// =============================================================================
// HttpStorefrontApi
// =============================================================================

/// Client for the storefront backend's JSON API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct HttpStorefrontApi {
    inner: Arc<HttpStorefrontApiInner>,
}

struct HttpStorefrontApiInner {
    client: reqwest::Client,
    base_url: Url,
    api_token: Option<SecretString>,
}

impl std::fmt::Debug for HttpStorefrontApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpStorefrontApi")
            .field("base_url", &self.inner.base_url.as_str())
            .field("api_token", &self.inner.api_token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl HttpStorefrontApi {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: Arc::new(HttpStorefrontApiInner {
                client: builder.build()?,
                base_url: config.api_url.clone(),
                api_token: config.api_token.clone(),
            }),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Start a request carrying a fresh request ID and the bearer token.
    ///
    /// The request ID is recorded in the current span so backend logs can
    /// be correlated with ours.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request_id = Uuid::new_v4().to_string();
        Span::current().record("request_id", request_id.as_str());

        let mut builder = self
            .inner
            .client
            .request(method, url)
            .header(REQUEST_ID_HEADER, request_id);
        if let Some(token) = &self.inner.api_token {
            builder = builder.bearer_auth(token.expose_secret());
        }
        builder
    }

    /// Send a request and return the status plus the raw body.
    async fn send(&self, builder: RequestBuilder) -> Result<(StatusCode, String), ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        // Get response body as text first for better error diagnostics
        let body = response.text().await?;
        Ok((status, body))
    }

    /// Require a success status; otherwise build `ApiError::Status`.
    ///
    /// The body excerpt is only logged at debug level. The session reports
    /// the failure once it decides what the user sees.
    fn ensure_success(status: StatusCode, body: &str, what: &str) -> Result<(), ApiError> {
        if status.is_success() {
            return Ok(());
        }
        debug!(
            status = %status,
            body = %excerpt(body),
            "Backend returned non-success status for {what}"
        );
        Err(status_error(status, body))
    }
}

impl StorefrontApi for HttpStorefrontApi {
    #[instrument(skip(self), fields(request_id = tracing::field::Empty))]
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let url = self.endpoint("api/products")?;
        let (status, body) = self.send(self.request(Method::GET, url)).await?;
        Self::ensure_success(status, &body, "products")?;

        let wire: Vec<WireProduct> = parse_json(&body, "products")?;
        let products = convert_products(wire)?;
        debug!(count = products.len(), "Products fetched");
        Ok(products)
    }

    #[instrument(
        skip(self, items),
        fields(request_id = tracing::field::Empty, lines = items.len())
    )]
    async fn submit_purchase(&self, items: &[CartItem]) -> Result<Receipt, ApiError> {
        let url = self.endpoint("api/purchase")?;
        let request = PurchaseRequest {
            cart: items.iter().map(WireCartItem::from).collect(),
        };

        let (status, body) = self
            .send(self.request(Method::POST, url).json(&request))
            .await?;

        // Only a plain 200 means the purchase went through.
        if status != StatusCode::OK {
            debug!(
                status = %status,
                body = %excerpt(&body),
                "Purchase rejected by backend"
            );
            return Err(status_error(status, &body));
        }

        let wire: WireReceipt = parse_json(&body, "purchase receipt")?;
        convert_receipt(wire)
    }

    #[instrument(skip(self), fields(request_id = tracing::field::Empty))]
    async fn list_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        let url = self.endpoint("api/history")?;
        let (status, body) = self.send(self.request(Method::GET, url)).await?;
        if !status.is_success() {
            // History is optional; the caller decides how loud to be.
            return Err(status_error(status, &body));
        }

        let wire: Vec<WireHistoryEntry> = parse_json(&body, "history")?;
        Ok(convert_history(wire))
    }

    #[instrument(skip(self, draft), fields(request_id = tracing::field::Empty, name = %draft.name))]
    async fn create_product(&self, draft: &ProductDraft) -> Result<(), ApiError> {
        let url = self.endpoint("api/products")?;
        let (status, body) = self
            .send(
                self.request(Method::POST, url)
                    .json(&WireProductPayload::from(draft)),
            )
            .await?;
        Self::ensure_success(status, &body, "product create")
    }

    #[instrument(skip(self, draft), fields(request_id = tracing::field::Empty, name = %draft.name))]
    async fn update_product(&self, id: ProductId, draft: &ProductDraft) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("api/products/{id}"))?;
        let (status, body) = self
            .send(
                self.request(Method::PUT, url)
                    .json(&WireProductPayload::from(draft)),
            )
            .await?;
        Self::ensure_success(status, &body, "product update")
    }

    #[instrument(skip(self), fields(request_id = tracing::field::Empty))]
    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("api/products/{id}"))?;
        let (status, body) = self.send(self.request(Method::DELETE, url)).await?;
        Self::ensure_success(status, &body, "product delete")
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn parse_json<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| {
        debug!(
            error = %e,
            body = %excerpt(body),
            "Failed to parse {what} response"
        );
        ApiError::Parse(e)
    })
}

/// Build a status error, keeping the backend's `error` message if it sent one.
fn status_error(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty());
    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(LOG_BODY_LIMIT).collect()
}
