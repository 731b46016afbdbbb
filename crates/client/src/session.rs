//! The storefront session.
//!
//! [`Storefront`] is the view-model for one browsing session: it owns the
//! cart, the last catalog fetch, the last receipt, and the last history
//! listing. Handlers take `&mut self`, so the cart is only ever touched by
//! whoever holds the session. Requests are awaited one at a time and never
//! retried.

use quitanda_core::{
    Cart, CartItem, HistoryEntry, Product, ProductForm, ProductId, ProductSave, Quantity, Receipt,
    ValidationError,
};
use tracing::{debug, error, info, instrument, warn};

use crate::api::StorefrontApi;
use crate::error::{ApiError, Result, StorefrontError};
use crate::prompt::Prompt;
use crate::view::{self, PrintDocument};

/// Shown when the backend rejects a purchase without saying why.
pub const PURCHASE_REJECTED: &str = "Unknown error while completing the purchase.";
/// Shown when a purchase could not be sent or its answer could not be read.
pub const PURCHASE_FAILED: &str = "Error completing the purchase.";
/// Shown when saving a product fails without a backend message.
pub const SAVE_FAILED: &str = "Error saving product.";
/// Shown when deleting a product fails without a backend message.
pub const DELETE_FAILED: &str = "Error deleting product.";

/// State of the product catalog as last fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Catalog {
    /// Nothing fetched yet.
    #[default]
    NotLoaded,
    /// Last fetch succeeded.
    Loaded(Vec<Product>),
    /// Last fetch failed; the error placeholder is shown.
    Unavailable,
}

impl Catalog {
    /// Listed products; empty unless loaded.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        match self {
            Self::Loaded(products) => products,
            Self::NotLoaded | Self::Unavailable => &[],
        }
    }

    /// Look up a listed product.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products().iter().find(|p| p.id == id)
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// One storefront browsing session.
pub struct Storefront<A, P> {
    api: A,
    prompt: P,
    catalog: Catalog,
    cart: Cart,
    receipt: Option<Receipt>,
    receipt_markup: Option<String>,
    history: Option<Vec<HistoryEntry>>,
}

impl<A, P> Storefront<A, P>
where
    A: StorefrontApi,
    P: Prompt,
{
    /// Start an empty session.
    pub const fn new(api: A, prompt: P) -> Self {
        Self {
            api,
            prompt,
            catalog: Catalog::NotLoaded,
            cart: Cart::new(),
            receipt: None,
            receipt_markup: None,
            history: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub const fn prompt(&self) -> &P {
        &self.prompt
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The last successful purchase's receipt.
    pub const fn receipt(&self) -> Option<&Receipt> {
        self.receipt.as_ref()
    }

    /// The last history listing, if any fetch has succeeded.
    pub fn history(&self) -> Option<&[HistoryEntry]> {
        self.history.as_deref()
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetch the catalog, replacing whatever was listed before.
    ///
    /// On failure the catalog becomes [`Catalog::Unavailable`] and the error
    /// is logged. There is no retry.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] that made the fetch fail.
    #[instrument(skip(self))]
    pub async fn load_products(&mut self) -> Result<&[Product]> {
        match self.api.list_products().await {
            Ok(products) => {
                info!(count = products.len(), "Products loaded");
                self.catalog = Catalog::Loaded(products);
                Ok(self.catalog.products())
            }
            Err(e) => {
                error!(error = %e, "Failed to load products");
                self.catalog = Catalog::Unavailable;
                Err(e.into())
            }
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add `quantity` units of a product to the cart. No request is made.
    ///
    /// When the catalog is loaded the product must be listed and the cart's
    /// total for it may not exceed the listed stock.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Validation`] (after alerting the user) if
    /// the quantity is below one or the catalog check fails. The cart is
    /// unchanged on error.
    pub fn add_to_cart(&mut self, id: ProductId, quantity: i64) -> Result<CartItem> {
        match self.try_add(id, quantity) {
            Ok(item) => {
                self.prompt.alert(&format!(
                    "Item (ID: {id}) added to cart! Quantity: {}",
                    item.quantity
                ));
                debug!(cart = ?self.cart.items(), "Cart updated");
                Ok(item)
            }
            Err(e) => {
                self.prompt.alert(&e.to_string());
                Err(e.into())
            }
        }
    }

    fn try_add(
        &mut self,
        id: ProductId,
        quantity: i64,
    ) -> std::result::Result<CartItem, ValidationError> {
        let quantity = Quantity::new(quantity)?;
        match &self.catalog {
            Catalog::Loaded(products) => {
                let product = products
                    .iter()
                    .find(|p| p.id == id)
                    .ok_or(ValidationError::UnknownProduct(id))?;
                self.cart.add_listed(product, quantity)
            }
            Catalog::NotLoaded | Catalog::Unavailable => Ok(self.cart.add(id, quantity)),
        }
    }

    // =========================================================================
    // Purchase
    // =========================================================================

    /// Submit the whole cart as one purchase.
    ///
    /// On success the receipt is stored and rendered, the cart is cleared,
    /// and both the catalog and the history are reloaded once. On failure
    /// the cart is left untouched.
    ///
    /// Not idempotent: resubmitting after an unclear failure may buy twice.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Validation`] for an empty cart (no request
    /// is made) or [`StorefrontError::Api`] when the purchase fails. The user
    /// is alerted in both cases.
    #[instrument(skip(self), fields(lines = self.cart.len()))]
    pub async fn submit_purchase(&mut self) -> Result<Receipt> {
        if self.cart.is_empty() {
            let e = ValidationError::EmptyCart;
            self.prompt.alert(&e.to_string());
            return Err(e.into());
        }

        let receipt = match self.api.submit_purchase(self.cart.items()).await {
            Ok(receipt) => receipt,
            Err(e) => {
                error!(error = %e, "Purchase failed");
                let message = match &e {
                    ApiError::Status { .. } => e.backend_message().unwrap_or(PURCHASE_REJECTED),
                    _ => PURCHASE_FAILED,
                };
                self.prompt.alert(message);
                return Err(e.into());
            }
        };

        info!(
            total = %receipt.total,
            units = receipt.unit_count(),
            "Purchase completed"
        );

        self.receipt_markup = match view::receipt_html(&receipt) {
            Ok(markup) => Some(markup),
            Err(e) => {
                error!(error = %e, "Failed to render receipt");
                None
            }
        };
        self.receipt = Some(receipt.clone());
        self.cart.clear();

        // A failed reload is already shown as the catalog placeholder.
        let _ = self.load_products().await;
        self.load_history().await;

        Ok(receipt)
    }

    /// Build the printable document for the last rendered receipt.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NoReceipt`] if no purchase has completed in
    /// this session, or [`StorefrontError::Render`] if the template fails.
    pub fn print_receipt(&mut self) -> Result<PrintDocument> {
        let Some(markup) = self.receipt_markup.as_deref() else {
            let e = StorefrontError::NoReceipt;
            self.prompt.alert(&e.to_string());
            return Err(e);
        };
        Ok(view::print_document(markup)?)
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Fetch purchase history. Best effort.
    ///
    /// A missing endpoint or any other failure is logged as a warning and
    /// leaves the previous listing in place.
    #[instrument(skip(self))]
    pub async fn load_history(&mut self) -> Option<&[HistoryEntry]> {
        match self.api.list_history().await {
            Ok(entries) => {
                debug!(count = entries.len(), "History loaded");
                self.history = Some(entries);
            }
            Err(ApiError::Status { status, .. }) => {
                warn!(status, "History unavailable");
            }
            Err(e) => {
                warn!(error = %e, "Failed to load history");
            }
        }
        self.history.as_deref()
    }

    // =========================================================================
    // Product administration
    // =========================================================================

    /// Create or update a product from the shared form.
    ///
    /// The hidden id selects update (PUT) over create (POST). On success the
    /// catalog is reloaded.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Validation`] for bad form input (no request
    /// is made) or [`StorefrontError::Api`] if the backend refuses. The user
    /// is alerted in both cases.
    #[instrument(skip(self, form))]
    pub async fn save_product(&mut self, form: &ProductForm) -> Result<ProductSave> {
        let save = match form.validate() {
            Ok(save) => save,
            Err(e) => {
                self.prompt.alert(&e.to_string());
                return Err(e.into());
            }
        };

        let result = match &save {
            ProductSave::Create(draft) => self.api.create_product(draft).await,
            ProductSave::Update(id, draft) => self.api.update_product(*id, draft).await,
        };

        if let Err(e) = result {
            error!(error = %e, "Failed to save product");
            self.prompt.alert(e.backend_message().unwrap_or(SAVE_FAILED));
            return Err(e.into());
        }

        info!(save = ?save, "Product saved");
        let _ = self.load_products().await;
        Ok(save)
    }

    /// Delete a product after the user confirms.
    ///
    /// Returns `Ok(false)` without making a request if the user declines.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Api`] (after alerting) if the backend refuses.
    #[instrument(skip(self))]
    pub async fn delete_product(&mut self, id: ProductId) -> Result<bool> {
        if !self
            .prompt
            .confirm(&format!("Are you sure you want to delete product {id}?"))
        {
            debug!("Delete cancelled");
            return Ok(false);
        }

        if let Err(e) = self.api.delete_product(id).await {
            error!(error = %e, "Failed to delete product");
            self.prompt.alert(e.backend_message().unwrap_or(DELETE_FAILED));
            return Err(e.into());
        }

        info!("Product deleted");
        let _ = self.load_products().await;
        Ok(true)
    }

    // =========================================================================
    // Session lifecycle and rendering
    // =========================================================================

    /// Drop the cart and the last receipt. The catalog and history stay.
    pub fn reset(&mut self) {
        self.cart.clear();
        self.receipt = None;
        self.receipt_markup = None;
    }

    /// The product list region.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn products_html(&self) -> askama::Result<String> {
        view::products_html(&self.catalog)
    }

    /// The receipt region, as rendered after the last purchase.
    pub fn receipt_html(&self) -> Option<&str> {
        self.receipt_markup.as_deref()
    }

    /// The history region.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn history_html(&self) -> askama::Result<String> {
        view::history_html(self.history.as_deref().unwrap_or_default())
    }
}
