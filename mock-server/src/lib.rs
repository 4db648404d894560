use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const SUCCESS: i32 = 200;
pub const BUSINESS_ERROR: i32 = 500;

/// Product ids with this prefix fail verification.
pub const DEAD_PREFIX: &str = "dead-";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub product_id: String,
    pub title: String,
    pub shop_name: String,
    pub sale_region: String,
    pub is_valid: u8,
    pub confirm_status: u8,
    pub commission_rate: i64,
    pub commission_amount: f64,
    pub commission_currency: String,
    /// Bumped on every write; lists are ordered by it, newest first.
    #[serde(skip)]
    pub revision: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    fn ok(message: &str, data: Option<T>) -> Json<Self> {
        Json(Self {
            code: SUCCESS,
            message: message.to_string(),
            data,
        })
    }

    fn fail(message: &str) -> Json<Self> {
        warn!("business error: {message}");
        Json(Self {
            code: BUSINESS_ERROR,
            message: message.to_string(),
            data: None,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: u32,
    pub size: u32,
    pub total: u64,
    pub pages: u32,
    pub records: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub is_valid: Option<u8>,
    pub sale_region: Option<String>,
    pub keyword: Option<String>,
    pub confirm_status: Option<u8>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProducts {
    pub product_ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TriggerAck {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    revision: u64,
    products: Vec<Product>,
}

impl Store {
    fn bump(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/TTS/monitor/products", get(list_products))
        .route("/TTS/monitor/products/add", post(add_products))
        .route("/TTS/monitor/products/count", get(count_products))
        .route("/TTS/monitor/products/{product_id}", delete(delete_product))
        .route("/TTS/monitor/products/{product_id}/confirm", post(confirm_product))
        .route("/TTS/monitor/task/trigger", post(trigger_check))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_products(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Json<Envelope<Page<Product>>> {
    let page = params.page.unwrap_or(1).max(1);
    let size = params.size.unwrap_or(20).max(1);
    let store = db.read().await;

    let mut matched: Vec<&Product> = store
        .products
        .iter()
        .filter(|p| params.is_valid.is_none_or(|v| p.is_valid == v))
        .filter(|p| {
            params
                .sale_region
                .as_deref()
                .filter(|r| !r.trim().is_empty())
                .is_none_or(|r| p.sale_region == r)
        })
        .filter(|p| params.confirm_status.is_none_or(|c| p.confirm_status == c))
        .filter(|p| {
            params
                .keyword
                .as_deref()
                .filter(|k| !k.trim().is_empty())
                .is_none_or(|k| p.product_id.contains(k))
        })
        .collect();
    matched.sort_by(|a, b| b.revision.cmp(&a.revision));

    let total = matched.len() as u64;
    let records = matched
        .into_iter()
        .skip((u64::from(page - 1) * u64::from(size)) as usize)
        .take(size as usize)
        .cloned()
        .collect();
    info!("listed products: total {total}, page {page}");

    Envelope::ok(
        "ok",
        Some(Page {
            page,
            size,
            total,
            pages: total.div_ceil(u64::from(size)) as u32,
            records,
        }),
    )
}

async fn add_products(State(db): State<Db>, Json(input): Json<AddProducts>) -> Json<Envelope<u32>> {
    if input.product_ids.is_empty() {
        return Envelope::fail("product id list must not be empty");
    }

    let mut unique: Vec<String> = Vec::new();
    for id in input.product_ids.iter().filter(|id| !id.trim().is_empty()) {
        if !unique.contains(id) {
            unique.push(id.clone());
        }
    }
    if unique.is_empty() {
        return Envelope::fail("no usable product ids");
    }

    let mut store = db.write().await;
    let mut added = 0u32;
    for product_id in unique {
        if store.products.iter().any(|p| p.product_id == product_id) {
            continue;
        }
        store.next_id += 1;
        let id = store.next_id;
        let revision = store.bump();
        store.products.push(Product {
            id,
            title: format!("Product {product_id}"),
            product_id,
            shop_name: "Mock Shop".to_string(),
            sale_region: "IDR".to_string(),
            is_valid: 1,
            confirm_status: 0,
            commission_rate: 100,
            commission_amount: 1.5,
            commission_currency: "USD".to_string(),
            revision,
        });
        added += 1;
    }
    info!("added {added} products");
    Envelope::ok(&format!("added {added} products"), Some(added))
}

async fn delete_product(State(db): State<Db>, Path(product_id): Path<String>) -> Json<Envelope<()>> {
    let mut store = db.write().await;
    let Some(index) = store.products.iter().position(|p| p.product_id == product_id) else {
        return Envelope::fail("product not found");
    };
    let product = &store.products[index];
    if product.is_valid == 0 && product.confirm_status == 0 {
        return Envelope::fail("invalid products must be confirmed before deletion");
    }
    store.products.remove(index);
    info!("deleted product {product_id}");
    Envelope::ok("ok", None)
}

async fn confirm_product(State(db): State<Db>, Path(product_id): Path<String>) -> Json<Envelope<()>> {
    let mut store = db.write().await;
    let revision = store.bump();
    let Some(product) = store.products.iter_mut().find(|p| p.product_id == product_id) else {
        return Envelope::fail("product not found");
    };
    if product.is_valid == 1 {
        return Envelope::fail("valid products need no confirmation");
    }
    if product.confirm_status == 1 {
        warn!("product {product_id} already confirmed");
        return Envelope::ok("ok", None);
    }
    product.confirm_status = 1;
    product.revision = revision;
    info!("confirmed product {product_id}");
    Envelope::ok("ok", None)
}

async fn count_products(State(db): State<Db>) -> Json<Envelope<u64>> {
    let total = db.read().await.products.len() as u64;
    Envelope::ok("ok", Some(total))
}

/// Runs the verification pass inline; the real backend does it in the background.
async fn trigger_check(State(db): State<Db>) -> Json<Envelope<TriggerAck>> {
    let mut store = db.write().await;
    let revision = store.bump();
    let (mut valid, mut invalid) = (0, 0);
    for product in store.products.iter_mut() {
        let status = if product.product_id.starts_with(DEAD_PREFIX) { 0 } else { 1 };
        if status == 1 {
            valid += 1;
        } else {
            invalid += 1;
        }
        if product.is_valid != status {
            product.is_valid = status;
            product.revision = revision;
        }
    }
    info!("verification finished: {valid} valid, {invalid} invalid");
    Envelope::ok(
        "task submitted",
        Some(TriggerAck {
            status: "started".to_string(),
            message: "product verification started".to_string(),
        }),
    )
}
