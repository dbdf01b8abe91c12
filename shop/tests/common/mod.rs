//! In-process stand-in for the fakestore catalog API
#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone, Default)]
pub struct FakeStore {
    hits: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl FakeStore {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Answer every request with 503 while set
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn record(&self) -> Option<Response> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        self.failing
            .load(Ordering::SeqCst)
            .then(|| StatusCode::SERVICE_UNAVAILABLE.into_response())
    }
}

pub fn products() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 109.95,
            "description": "Your perfect pack for everyday use and walks in the forest.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }),
        json!({
            "id": 2,
            "title": "Mens Casual Premium Slim Fit T-Shirts",
            "price": 22.3,
            "description": "Slim-fitting style, contrast raglan long sleeve.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/71-3HjGNDUL._AC_SY879._SX._UX._SY._UY_.jpg",
            "rating": { "rate": 4.1, "count": 259 }
        }),
        json!({
            "id": 5,
            "title": "John Hardy Women's Legends Naga Bracelet",
            "price": 695,
            "description": "From our Legends Collection.",
            "category": "jewelery",
            "image": "https://fakestoreapi.com/img/71pWzhdJNwL._AC_UL640_QL65_ML3_.jpg",
            "rating": { "rate": 4.6, "count": 400 }
        }),
        json!({
            "id": 9,
            "title": "WD 2TB Elements Portable External Hard Drive - USB 3.0",
            "price": 64,
            "description": "USB 3.0 and USB 2.0 compatibility.",
            "category": "electronics",
            "image": "https://fakestoreapi.com/img/61IBBVJvSDL._AC_SY879_.jpg",
            "rating": { "rate": 3.3, "count": 203 }
        }),
    ]
}

async fn all_products(State(store): State<FakeStore>) -> Response {
    if let Some(failure) = store.record() {
        return failure;
    }
    Json(products()).into_response()
}

async fn product_by_id(State(store): State<FakeStore>, Path(id): Path<u64>) -> Response {
    if let Some(failure) = store.record() {
        return failure;
    }
    // fakestore answers unknown ids with 200 and an empty body
    match products().into_iter().find(|p| p["id"] == json!(id)) {
        Some(product) => Json(product).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

async fn by_category(State(store): State<FakeStore>, Path(category): Path<String>) -> Response {
    if let Some(failure) = store.record() {
        return failure;
    }
    let matching: Vec<Value> = products()
        .into_iter()
        .filter(|p| p["category"] == json!(category))
        .collect();
    Json(matching).into_response()
}

async fn categories(State(store): State<FakeStore>) -> Response {
    if let Some(failure) = store.record() {
        return failure;
    }
    Json(json!(["electronics", "jewelery", "men's clothing", "women's clothing"])).into_response()
}

/// Serve the fake catalog on an ephemeral port; returns its base URL
pub async fn spawn_fake_store() -> (String, FakeStore) {
    let store = FakeStore::default();
    let app = Router::new()
        .route("/products", get(all_products))
        .route("/products/categories", get(categories))
        .route("/products/category/:category", get(by_category))
        .route("/products/:id", get(product_by_id))
        .with_state(store.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{}", addr), store)
}
