//! Product administration against the mock backend.

#![allow(clippy::unwrap_used)]

use quitanda_client::session::{DELETE_FAILED, SAVE_FAILED};
use quitanda_client::{HttpStorefrontApi, RecordingPrompt, Storefront, StorefrontError};
use quitanda_core::{ProductForm, ProductId, ProductSave};
use quitanda_integration_tests::MockBackend;
use rust_decimal::Decimal;

fn storefront(backend: &MockBackend) -> Storefront<HttpStorefrontApi, RecordingPrompt> {
    Storefront::new(backend.api(), RecordingPrompt::accepting())
}

fn form(id: Option<&str>, name: &str, price: &str, stock: &str) -> ProductForm {
    ProductForm {
        id: id.map(String::from),
        name: name.to_string(),
        price: price.to_string(),
        stock: stock.to_string(),
    }
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_posts_and_reloads_catalog() {
    let backend = MockBackend::start().await;
    let mut store = storefront(&backend);

    let save = store
        .save_product(&form(None, "Leite 1L", "4,99", "30"))
        .await
        .unwrap();

    assert!(matches!(save, ProductSave::Create(_)));
    assert_eq!(backend.count("POST", "/api/products"), 1);
    assert_eq!(backend.count("GET", "/api/products"), 1);

    let created = backend.product(4).unwrap();
    assert_eq!(created.name, "Leite 1L");
    assert_eq!(created.price, Decimal::new(499, 2));
    assert_eq!(created.stock, 30);

    let listed = store.catalog().find(ProductId::new(4)).unwrap();
    assert_eq!(listed.price.display(), "R$4.99");
}

#[tokio::test]
async fn test_blank_hidden_id_still_creates() {
    let backend = MockBackend::start().await;
    let mut store = storefront(&backend);

    store
        .save_product(&form(Some("  "), "Açúcar", "5", "12"))
        .await
        .unwrap();

    assert_eq!(backend.count("POST", "/api/products"), 1);
    assert_eq!(backend.product_count(), 4);
}

#[tokio::test]
async fn test_invalid_form_sends_nothing() {
    let backend = MockBackend::start().await;
    let mut store = storefront(&backend);

    for bad in [
        form(None, "", "1.00", "1"),
        form(None, "Sal", "grátis", "1"),
        form(None, "Sal", "-1", "1"),
        form(None, "Sal", "1.00", "muitos"),
    ] {
        assert!(matches!(
            store.save_product(&bad).await,
            Err(StorefrontError::Validation(_))
        ));
    }

    assert!(backend.requests().is_empty());
    assert_eq!(store.prompt().alerts.len(), 4);
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_hidden_id_updates_in_place() {
    let backend = MockBackend::start().await;
    let mut store = storefront(&backend);

    let save = store
        .save_product(&form(Some("2"), "Feijão preto 1kg", "9.25", "7"))
        .await
        .unwrap();

    assert!(matches!(save, ProductSave::Update(id, _) if id == ProductId::new(2)));
    assert_eq!(backend.count("PUT", "/api/products/2"), 1);

    let updated = backend.product(2).unwrap();
    assert_eq!(updated.name, "Feijão preto 1kg");
    assert_eq!(updated.price, Decimal::new(925, 2));
    assert_eq!(updated.stock, 7);
    assert_eq!(backend.product_count(), 3);
}

#[tokio::test]
async fn test_update_of_missing_product_alerts_backend_message() {
    let backend = MockBackend::start().await;
    let mut store = storefront(&backend);

    let err = store
        .save_product(&form(Some("99"), "Fantasma", "1", "1"))
        .await
        .unwrap_err();

    assert!(matches!(err, StorefrontError::Api(ref e) if e.is_not_found()));
    assert_eq!(store.prompt().last_alert(), Some("Produto não encontrado"));
    assert_eq!(backend.count("GET", "/api/products"), 0);
    assert_ne!(store.prompt().last_alert(), Some(SAVE_FAILED));
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_confirmed_delete_removes_product() {
    let backend = MockBackend::start().await;
    let mut store = storefront(&backend);

    assert!(store.delete_product(ProductId::new(3)).await.unwrap());

    assert!(backend.product(3).is_none());
    assert_eq!(store.catalog().products().len(), 2);
    assert_eq!(store.prompt().questions.len(), 1);
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let backend = MockBackend::start().await;
    let mut store = Storefront::new(backend.api(), RecordingPrompt::declining());

    assert!(!store.delete_product(ProductId::new(3)).await.unwrap());

    assert!(backend.requests().is_empty());
    assert!(backend.product(3).is_some());
}

#[tokio::test]
async fn test_delete_of_missing_product_fails() {
    let backend = MockBackend::start().await;
    let mut store = storefront(&backend);

    assert!(store.delete_product(ProductId::new(42)).await.is_err());

    assert_eq!(backend.count("DELETE", "/api/products/42"), 1);
    assert_eq!(backend.count("GET", "/api/products"), 0);
    assert_ne!(store.prompt().last_alert(), Some(DELETE_FAILED));
}
