//! In-process mock of the storefront backend.
//!
//! Serves the REST routes the client uses on `127.0.0.1:0`, keeps cart and
//! wishlist state in memory, counts every request by `METHOD /path`, and can
//! be told to fail specific routes.

#![allow(dead_code)]

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use tinytotrend::models::Role;
use tinytotrend::session::{Session, SessionContext};
use tinytotrend::ApiClient;

pub const PASSWORD: &str = "secret";

#[derive(Default)]
pub struct MockState {
    hits: Mutex<HashMap<String, usize>>,
    auth: Mutex<Vec<(String, Option<String>)>>,
    failing: Mutex<HashMap<String, StatusCode>>,
    pub products: Mutex<Vec<Value>>,
    /// (item id, product id, quantity)
    pub cart: Mutex<Vec<(i64, i64, i64)>>,
    /// (item id, product id)
    pub wishlist: Mutex<Vec<(i64, i64)>>,
    pub verify_success: Mutex<bool>,
    next_id: AtomicI64,
}

impl MockState {
    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 100
    }

    fn product(&self, id: i64) -> Option<Value> {
        self.products
            .lock()
            .iter()
            .find(|p| p["id"].as_i64() == Some(id))
            .cloned()
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        Self::with_products(0).await
    }

    pub async fn with_products(count: i64) -> Self {
        let state = Arc::new(MockState::default());
        *state.products.lock() = (1..=count).map(product_json).collect();
        *state.verify_success.lock() = true;

        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .route("/api/products", get(list_products))
            .route("/api/products/:id", get(get_product))
            .route("/api/cart", get(get_cart).post(add_to_cart))
            .route("/api/cart/:id", put(update_cart).delete(remove_cart))
            .route("/api/wishlist", get(get_wishlist).post(add_to_wishlist))
            .route("/api/wishlist/:id", delete(remove_wishlist))
            .route("/api/orders/user", get(user_orders))
            .route("/api/orders/create-payment-order", post(create_payment_order))
            .route("/api/orders/verify-payment", post(verify_payment))
            .route("/api/admin/products", get(admin_products).post(admin_create_product))
            .route(
                "/api/admin/products/:id",
                get(get_product)
                    .put(admin_update_product)
                    .delete(admin_delete_product),
            )
            .route("/api/admin/users", get(admin_users))
            .route("/api/admin/orders", get(admin_orders))
            .route("/api/admin/stats", get(admin_stats))
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
        }
    }

    /// Requests seen for `"GET /api/cart"` style keys.
    pub fn hits(&self, key: &str) -> usize {
        self.state.hits.lock().get(key).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.state.hits.lock().values().sum()
    }

    /// Authorization header of every request, in order.
    pub fn auth_headers(&self) -> Vec<(String, Option<String>)> {
        self.state.auth.lock().clone()
    }

    /// Make a route answer 500 with an error body.
    pub fn fail(&self, key: &str) {
        self.fail_with(key, StatusCode::INTERNAL_SERVER_ERROR);
    }

    pub fn fail_with(&self, key: &str, status: StatusCode) {
        self.state.failing.lock().insert(key.to_string(), status);
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::with_client(&self.base_url, reqwest::Client::new(), SessionContext::in_memory())
    }

    /// Client whose session already holds a token for `role`.
    pub fn logged_in_client(&self, role: Role) -> ApiClient {
        let session = SessionContext::in_memory();
        session
            .save(&Session {
                token: format!("token-{}", role.as_str().to_lowercase()),
                user_id: Some("1".to_string()),
                user_name: Some("Asha".to_string()),
                role,
                email: Some("asha@example.com".to_string()),
            })
            .unwrap();
        ApiClient::with_client(&self.base_url, reqwest::Client::new(), session)
    }
}

pub fn product_json(id: i64) -> Value {
    json!({
        "id": id,
        "name": format!("Cotton Shirt {}", id),
        "description": "Soft cotton",
        "category": "KIDS",
        "price": 100.0 * id as f64,
        "stockQty": 10,
        "genderTag": "BOYS",
        "imageUrl": null,
        "createdAt": "2024-05-01T10:00:00"
    })
}

async fn record(State(state): State<Arc<MockState>>, request: Request, next: Next) -> Response {
    let key = format!("{} {}", request.method(), request.uri().path());
    let auth = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    *state.hits.lock().entry(key.clone()).or_insert(0) += 1;
    state.auth.lock().push((key.clone(), auth));

    let failure = state.failing.lock().get(&key).copied();
    if let Some(status) = failure {
        return (status, Json(json!({ "error": "Simulated failure" }))).into_response();
    }
    next.run(request).await
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Unauthorized" })),
    )
        .into_response()
}

fn has_bearer(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("Bearer "))
        .unwrap_or(false)
}

async fn login(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if body["password"].as_str() != Some(PASSWORD) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid email or password" })),
        )
            .into_response();
    }
    let role = if email.starts_with("admin") { "ADMIN" } else { "USER" };
    Json(json!({
        "token": format!("token-{}", email),
        "userId": 7,
        "name": "Asha",
        "email": email,
        "role": role
    }))
    .into_response()
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"].as_str() == Some("taken@example.com") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Email already registered" })),
        )
            .into_response();
    }
    Json(json!({ "message": "User registered successfully", "userId": 8 })).into_response()
}

async fn list_products(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    let size: usize = params.get("size").and_then(|s| s.parse().ok()).unwrap_or(12);
    let search = params.get("search").map(|s| s.to_lowercase());

    let matching: Vec<Value> = state
        .products
        .lock()
        .iter()
        .filter(|p| match &search {
            Some(term) => p["name"]
                .as_str()
                .map(|n| n.to_lowercase().contains(term))
                .unwrap_or(false),
            None => true,
        })
        .cloned()
        .collect();

    let total = matching.len();
    let content: Vec<Value> = matching.into_iter().skip(page * size).take(size).collect();
    let total_pages = if size == 0 { 0 } else { total.div_ceil(size) };
    Json(json!({
        "content": content,
        "page": page,
        "size": size,
        "totalElements": total,
        "totalPages": total_pages,
        "last": (page + 1) * size >= total,
        "first": page == 0
    }))
}

async fn get_product(State(state): State<Arc<MockState>>, Path(id): Path<i64>) -> Response {
    match state.product(id) {
        Some(product) => Json(product).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Product not found" })),
        )
            .into_response(),
    }
}

fn cart_json(state: &MockState) -> Value {
    let items: Vec<Value> = state
        .cart
        .lock()
        .iter()
        .map(|(id, product_id, quantity)| {
            json!({
                "id": id,
                "product": state.product(*product_id).unwrap_or_else(|| product_json(*product_id)),
                "quantity": quantity
            })
        })
        .collect();
    Value::Array(items)
}

async fn get_cart(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !has_bearer(&headers) {
        return unauthorized();
    }
    Json(cart_json(&state)).into_response()
}

async fn add_to_cart(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !has_bearer(&headers) {
        return unauthorized();
    }
    let product_id = body["productId"].as_i64().unwrap_or_default();
    let quantity = body["quantity"].as_i64().unwrap_or(1);
    let id = state.next_id();
    state.cart.lock().push((id, product_id, quantity));
    Json(json!({ "message": "Added to cart" })).into_response()
}

async fn update_cart(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if !has_bearer(&headers) {
        return unauthorized();
    }
    let quantity = body["quantity"].as_i64().unwrap_or_default();
    let mut cart = state.cart.lock();
    match cart.iter_mut().find(|(item_id, _, _)| *item_id == id) {
        Some(item) => {
            item.2 = quantity;
            Json(json!({ "message": "Cart updated" })).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Cart item not found" })),
        )
            .into_response(),
    }
}

async fn remove_cart(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if !has_bearer(&headers) {
        return unauthorized();
    }
    state.cart.lock().retain(|(item_id, _, _)| *item_id != id);
    Json(json!({ "message": "Removed" })).into_response()
}

async fn get_wishlist(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !has_bearer(&headers) {
        return unauthorized();
    }
    let items: Vec<Value> = state
        .wishlist
        .lock()
        .iter()
        .map(|(id, product_id)| {
            json!({
                "id": id,
                "product": state.product(*product_id).unwrap_or_else(|| product_json(*product_id))
            })
        })
        .collect();
    Json(Value::Array(items)).into_response()
}

async fn add_to_wishlist(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !has_bearer(&headers) {
        return unauthorized();
    }
    let product_id = body["productId"].as_i64().unwrap_or_default();
    let id = state.next_id();
    state.wishlist.lock().push((id, product_id));
    Json(json!({ "message": "Added to wishlist" })).into_response()
}

async fn remove_wishlist(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if !has_bearer(&headers) {
        return unauthorized();
    }
    state.wishlist.lock().retain(|(item_id, _)| *item_id != id);
    StatusCode::NO_CONTENT.into_response()
}

fn order_json(id: i64, total: f64, payment_status: Option<&str>) -> Value {
    json!({
        "id": id,
        "user": { "id": 1, "name": "Asha", "email": "asha@example.com" },
        "items": [{ "id": 1, "product": product_json(1), "quantity": 1, "priceAtTime": total }],
        "totalAmount": total,
        "status": "CONFIRMED",
        "paymentStatus": payment_status,
        "paymentId": null,
        "createdAt": "2024-05-01T10:00:00"
    })
}

async fn user_orders(headers: HeaderMap) -> Response {
    if !has_bearer(&headers) {
        return unauthorized();
    }
    Json(json!([order_json(1, 499.0, Some("PAID"))])).into_response()
}

async fn create_payment_order(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !has_bearer(&headers) {
        return unauthorized();
    }
    if body["shippingAddress"].as_str().unwrap_or_default().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Shipping address is required" })),
        )
            .into_response();
    }
    Json(json!({
        "orderId": 42,
        "razorpayOrderId": "order_mock42",
        "amount": 49900,
        "currency": "INR",
        "key": "rzp_test_key"
    }))
    .into_response()
}

async fn verify_payment(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    let ok = *state.verify_success.lock() && body["orderId"].as_str() == Some("42");
    if ok {
        Json(json!({ "success": true, "message": "Payment verified" })).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": "Invalid signature" })),
        )
            .into_response()
    }
}

async fn admin_products(State(state): State<Arc<MockState>>) -> Json<Value> {
    Json(Value::Array(state.products.lock().clone()))
}

async fn admin_create_product(
    State(state): State<Arc<MockState>>,
    Json(mut body): Json<Value>,
) -> Response {
    if body["name"].as_str().unwrap_or_default().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Name is required" })),
        )
            .into_response();
    }
    body["id"] = json!(state.next_id());
    state.products.lock().push(body.clone());
    Json(json!({ "message": "Product created", "product": body })).into_response()
}

async fn admin_update_product(
    State(state): State<Arc<MockState>>,
    Path(id): Path<i64>,
    Json(mut body): Json<Value>,
) -> Response {
    body["id"] = json!(id);
    let mut products = state.products.lock();
    match products.iter_mut().find(|p| p["id"].as_i64() == Some(id)) {
        Some(product) => {
            *product = body.clone();
            Json(json!({ "message": "Product updated", "product": body })).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Product not found" })),
        )
            .into_response(),
    }
}

async fn admin_delete_product(State(state): State<Arc<MockState>>, Path(id): Path<i64>) -> StatusCode {
    state.products.lock().retain(|p| p["id"].as_i64() != Some(id));
    StatusCode::OK
}

async fn admin_users() -> Json<Value> {
    Json(json!([
        { "id": 1, "name": "Asha", "email": "asha@example.com", "role": "USER", "createdAt": null },
        { "id": 2, "name": "Admin", "email": "admin@example.com", "role": "ADMIN", "createdAt": null }
    ]))
}

async fn admin_orders() -> Json<Value> {
    Json(json!([
        order_json(1, 499.0, Some("PAID")),
        order_json(2, 1000.5, None)
    ]))
}

async fn admin_stats() -> Json<Value> {
    Json(json!({
        "totalProducts": 40,
        "totalUsers": 12,
        "totalOrders": 9,
        "totalRevenue": 15999.5,
        "pendingOrders": 2,
        "lowStockProducts": 3
    }))
}
