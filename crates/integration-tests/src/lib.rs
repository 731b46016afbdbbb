//! Integration tests for the Quitanda client.
//!
//! The tests drive a real [`HttpStorefrontApi`] against [`MockBackend`], an
//! in-process axum server that speaks the backend's JSON contract on an
//! ephemeral port.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p quitanda-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_flow` - Catalog, cart, purchase, history, and printing
//! - `product_admin` - Product create, update, and delete

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use quitanda_client::{ClientConfig, HttpStorefrontApi};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde_json::{Value, json};

/// Catalog every [`MockBackend::start`] begins with: name, price, stock.
pub const DEFAULT_PRODUCTS: &[(&str, &str, i64)] = &[
    ("Arroz 5kg", "21.90", 10),
    ("Feijão 1kg", "8.50", 4),
    ("Café 500g", "15.00", 0),
];

// =============================================================================
// State
// =============================================================================

/// A product as the mock backend stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredProduct {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub stock: i64,
}

/// One request as seen by the mock backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub request_id: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Debug, Default)]
struct BackendState {
    products: Vec<StoredProduct>,
    next_id: i32,
    history: Vec<Value>,
    history_missing: bool,
    purchase_failure: Option<(StatusCode, Option<String>)>,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<BackendState>>;

fn lock(state: &Shared) -> MutexGuard<'_, BackendState> {
    state.lock().expect("mock backend state poisoned")
}

// =============================================================================
// MockBackend
// =============================================================================

/// In-process backend listening on `127.0.0.1`.
///
/// The server task lives as long as the test's runtime.
#[derive(Debug, Clone)]
pub struct MockBackend {
    base_url: String,
    state: Shared,
}

impl MockBackend {
    /// Start a backend seeded with [`DEFAULT_PRODUCTS`].
    pub async fn start() -> Self {
        Self::with_products(DEFAULT_PRODUCTS).await
    }

    /// Start a backend seeded with the given `(name, price, stock)` rows.
    /// Ids are assigned from 1 in order.
    ///
    /// # Panics
    ///
    /// Panics if a seed price is not a decimal or no local port is free.
    pub async fn with_products(products: &[(&str, &str, i64)]) -> Self {
        let mut state = BackendState {
            next_id: 1,
            ..BackendState::default()
        };
        for (name, price, stock) in products {
            let id = state.next_id;
            state.next_id += 1;
            state.products.push(StoredProduct {
                id,
                name: (*name).to_string(),
                price: price.parse().expect("seed price must be a decimal"),
                stock: *stock,
            });
        }
        let state = Arc::new(Mutex::new(state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        let app = router(state.clone());
        tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

        Self {
            base_url: format!("http://{addr}/"),
            state,
        }
    }

    /// Base URL with a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Client configuration pointing at this backend.
    #[must_use]
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url).expect("mock backend URL is valid")
    }

    /// An HTTP client for this backend.
    #[must_use]
    pub fn api(&self) -> HttpStorefrontApi {
        HttpStorefrontApi::new(&self.config()).expect("build HTTP client")
    }

    /// Make `GET /api/history` answer 404.
    pub fn set_history_missing(&self, missing: bool) {
        lock(&self.state).history_missing = missing;
    }

    /// Make every purchase fail with `status`. With `message`, the body is
    /// `{"error": message}`; without, the body is empty.
    ///
    /// # Panics
    ///
    /// Panics if `status` is not a valid HTTP status code.
    pub fn fail_purchases(&self, status: u16, message: Option<&str>) {
        let status = StatusCode::from_u16(status).expect("valid status code");
        lock(&self.state).purchase_failure = Some((status, message.map(String::from)));
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state).requests.clone()
    }

    /// Number of requests received for `method path`.
    #[must_use]
    pub fn count(&self, method: &str, path: &str) -> usize {
        lock(&self.state)
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn clear_requests(&self) {
        lock(&self.state).requests.clear();
    }

    #[must_use]
    pub fn product(&self, id: i32) -> Option<StoredProduct> {
        lock(&self.state)
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    #[must_use]
    pub fn product_count(&self) -> usize {
        lock(&self.state).products.len()
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        lock(&self.state).history.len()
    }
}

/// A URL nothing is listening on.
#[must_use]
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let addr: SocketAddr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}/")
}

// =============================================================================
// Routes
// =============================================================================

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            put(update_product).delete(delete_product),
        )
        .route("/api/purchase", post(purchase))
        .route("/api/history", get(history))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let entry = RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        request_id: header(request.headers(), "x-request-id"),
        authorization: header(request.headers(), "authorization"),
    };
    lock(&state).requests.push(entry);
    next.run(request).await
}

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn number(amount: Decimal) -> Value {
    amount
        .round_dp(2)
        .to_f64()
        .map_or(Value::Null, Value::from)
}

async fn list_products(State(state): State<Shared>) -> Json<Vec<Value>> {
    let products = lock(&state)
        .products
        .iter()
        .map(|p| {
            json!({
                "IdProduto": p.id,
                "NomeProduto": p.name,
                "Preco": format!("{:.2}", p.price),
                "Quantidade": p.stock,
            })
        })
        .collect();
    Json(products)
}

/// Validate a create/update body into `(name, price, stock)`.
fn product_fields(body: &Value) -> Result<(String, Decimal, i64), String> {
    let name = body
        .get("NomeProduto")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or("NomeProduto é obrigatório")?;
    let price = match body.get("Preco") {
        Some(Value::String(s)) => s.parse::<Decimal>().ok(),
        Some(Value::Number(n)) => n.to_string().parse::<Decimal>().ok(),
        _ => None,
    }
    .filter(|p| !p.is_sign_negative())
    .ok_or("Preco inválido")?;
    let stock = body
        .get("Quantidade")
        .and_then(Value::as_i64)
        .filter(|q| *q >= 0)
        .ok_or("Quantidade inválida")?;
    Ok((name.to_string(), price, stock))
}

async fn create_product(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let (name, price, stock) = match product_fields(&body) {
        Ok(fields) => fields,
        Err(message) => return error(StatusCode::BAD_REQUEST, message),
    };

    let mut state = lock(&state);
    let id = state.next_id;
    state.next_id += 1;
    state.products.push(StoredProduct {
        id,
        name,
        price,
        stock,
    });
    (
        StatusCode::CREATED,
        Json(json!({ "message": "Produto criado", "IdProduto": id })),
    )
        .into_response()
}

async fn update_product(
    State(state): State<Shared>,
    Path(id): Path<i32>,
    Json(body): Json<Value>,
) -> Response {
    let (name, price, stock) = match product_fields(&body) {
        Ok(fields) => fields,
        Err(message) => return error(StatusCode::BAD_REQUEST, message),
    };

    let mut state = lock(&state);
    let Some(product) = state.products.iter_mut().find(|p| p.id == id) else {
        return error(StatusCode::NOT_FOUND, "Produto não encontrado");
    };
    product.name = name;
    product.price = price;
    product.stock = stock;
    Json(json!({ "message": "Produto atualizado" })).into_response()
}

async fn delete_product(State(state): State<Shared>, Path(id): Path<i32>) -> Response {
    let mut state = lock(&state);
    let before = state.products.len();
    state.products.retain(|p| p.id != id);
    if state.products.len() == before {
        return error(StatusCode::NOT_FOUND, "Produto não encontrado");
    }
    Json(json!({ "message": "Produto removido" })).into_response()
}

#[derive(Debug, Deserialize)]
struct PurchaseBody {
    #[serde(default)]
    cart: Vec<PurchaseLine>,
}

#[derive(Debug, Deserialize)]
struct PurchaseLine {
    #[serde(rename = "IdProduto")]
    id: i32,
    #[serde(rename = "Quantidade")]
    quantity: i64,
}

async fn purchase(State(state): State<Shared>, Json(body): Json<PurchaseBody>) -> Response {
    let mut state = lock(&state);

    if let Some((status, message)) = state.purchase_failure.clone() {
        return match message {
            Some(message) => error(status, message),
            None => status.into_response(),
        };
    }
    if body.cart.is_empty() {
        return error(StatusCode::BAD_REQUEST, "Carrinho vazio");
    }

    // Repeated lines for one product are summed, first-seen order kept.
    let mut wanted: Vec<(i32, i64)> = Vec::new();
    for line in &body.cart {
        if line.quantity < 1 {
            return error(StatusCode::BAD_REQUEST, "Quantidade inválida");
        }
        match wanted.iter_mut().find(|(id, _)| *id == line.id) {
            Some((_, quantity)) => *quantity += line.quantity,
            None => wanted.push((line.id, line.quantity)),
        }
    }

    for (id, quantity) in &wanted {
        let Some(product) = state.products.iter().find(|p| p.id == *id) else {
            return error(
                StatusCode::NOT_FOUND,
                format!("Produto {id} não encontrado"),
            );
        };
        if product.stock < *quantity {
            return error(
                StatusCode::BAD_REQUEST,
                format!("Estoque insuficiente para {}", product.name),
            );
        }
    }

    let date = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let mut total = Decimal::ZERO;
    let mut lines = Vec::new();
    let mut items = Vec::new();
    for (id, quantity) in wanted {
        let Some(product) = state.products.iter_mut().find(|p| p.id == id) else {
            continue;
        };
        product.stock -= quantity;
        let subtotal = product.price * Decimal::from(quantity);
        total += subtotal;
        lines.push(json!({
            "NomeProduto": product.name,
            "Quantidade": quantity,
            "Subtotal": format!("{subtotal:.2}"),
        }));
        items.push(json!({ "NomeProduto": product.name, "Quantidade": quantity }));
    }

    state.history.push(json!({
        "data": date,
        "total": number(total),
        "itens": items,
    }));

    Json(json!({ "data": date, "itens": lines, "total": number(total) })).into_response()
}

async fn history(State(state): State<Shared>) -> Response {
    let state = lock(&state);
    if state.history_missing {
        return error(StatusCode::NOT_FOUND, "Histórico não encontrado");
    }
    Json(state.history.clone()).into_response()
}
