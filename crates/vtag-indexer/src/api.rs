use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use crate::db::Db;

pub struct AppState {
    pub db: Db,
}

pub type SharedState = Arc<RwLock<AppState>>;

type ApiError = (StatusCode, Json<serde_json::Value>);

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/stats", get(get_stats))
        .route("/v1/product/{batch_id}", get(get_product))
        .route("/v1/serial/{commitment}", get(get_serial))
        .route("/v1/verifications/{commitment}", get(get_verifications))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

// Mirrors the contract's get_product: missing batches are a normal
// `exists = false` response, not a 404.
async fn get_product(
    State(state): State<SharedState>,
    Path(batch_id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    let s = state.read().await;
    match s.db.get_product(batch_id) {
        Ok(Some(p)) => Ok(Json(json!({
            "batch_id": p.batch_id,
            "name": p.name,
            "brand": p.brand,
            "serial_count": p.serial_count,
            "registered_ledger": p.ledger,
            "exists": true,
        }))),
        Ok(None) => Ok(Json(json!({
            "batch_id": batch_id,
            "name": "",
            "brand": "",
            "serial_count": 0,
            "registered_ledger": 0,
            "exists": false,
        }))),
        Err(e) => Err(internal(e)),
    }
}

async fn get_serial(
    State(state): State<SharedState>,
    Path(commitment): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = decode_commitment(&commitment)?;
    let s = state.read().await;
    match s.db.is_serial_verified(&bytes) {
        Ok(verified) => Ok(Json(json!({
            "commitment": hex::encode(bytes),
            "verified": verified,
        }))),
        Err(e) => Err(internal(e)),
    }
}

async fn get_verifications(
    State(state): State<SharedState>,
    Path(commitment): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = decode_commitment(&commitment)?;
    let s = state.read().await;
    match s.db.verifications_for(&bytes) {
        Ok(rows) => {
            let attempts: Vec<serde_json::Value> = rows
                .iter()
                .map(|v| {
                    json!({
                        "batch_id": v.batch_id,
                        "authentic": v.authentic,
                        "caller": v.caller,
                        "ledger": v.ledger,
                    })
                })
                .collect();
            Ok(Json(json!({
                "commitment": hex::encode(bytes),
                "attempts": attempts,
            })))
        }
        Err(e) => Err(internal(e)),
    }
}

async fn get_stats(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    let s = state.read().await;
    match s.db.stats() {
        Ok((total_products, total_verifications)) => Ok(Json(json!({
            "total_products": total_products,
            "total_verifications": total_verifications,
        }))),
        Err(e) => Err(internal(e)),
    }
}

fn decode_commitment(s: &str) -> Result<[u8; 32], ApiError> {
    let bytes = hex::decode(s.strip_prefix("0x").unwrap_or(s)).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid hex" })),
        )
    })?;
    bytes.try_into().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "commitment must be 32 bytes" })),
        )
    })
}

fn internal(e: rusqlite::Error) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
}
