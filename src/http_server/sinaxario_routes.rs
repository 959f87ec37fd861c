//! Sinaxario HTTP Routes
//!
//! - `POST /sinaxario` create a record, `{"result": "<inserted id>"}`
//! - `GET /sinaxario` every record, `{"result": [...]}`
//! - `GET /sinaxario/findby?data=...` one record by exact date

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use crate::model::{InsertedId, Sinaxario};
use crate::service::RecordService;

use super::errors::ApiError;
use super::response::ResultResponse;

// ==================
// Shared State
// ==================

/// State shared across handlers
pub struct SinaxarioState {
    pub service: RecordService,
}

impl SinaxarioState {
    pub fn new(service: RecordService) -> Self {
        Self { service }
    }
}

// ==================
// Request Types
// ==================

/// Raw `findby` query pairs, in request order
pub type QueryPairs = Vec<(String, String)>;

/// First `data` value of the query; absent is the empty string.
/// Repeated `data` parameters are not an error, later ones are ignored.
pub fn date_param(pairs: &[(String, String)]) -> &str {
    pairs
        .iter()
        .find(|(key, _)| key == "data")
        .map(|(_, value)| value.as_str())
        .unwrap_or("")
}

// ==================
// Routes
// ==================

/// Create sinaxario routes
pub fn sinaxario_routes(state: Arc<SinaxarioState>) -> Router {
    Router::new()
        .route("/sinaxario", get(list_handler).post(create_handler))
        .route("/sinaxario/findby", get(find_by_date_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

/// The body is taken as raw bytes so that a bad body is always a 400,
/// whatever its content type.
async fn create_handler(
    State(state): State<Arc<SinaxarioState>>,
    body: Bytes,
) -> Result<Json<ResultResponse<InsertedId>>, ApiError> {
    let inserted = state.service.create(&body).await?;
    Ok(Json(ResultResponse::new(inserted)))
}

async fn list_handler(
    State(state): State<Arc<SinaxarioState>>,
) -> Result<Json<ResultResponse<Vec<Sinaxario>>>, ApiError> {
    let records = state.service.list_all().await?;
    Ok(Json(ResultResponse::new(records)))
}

async fn find_by_date_handler(
    State(state): State<Arc<SinaxarioState>>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Json<Sinaxario>, ApiError> {
    let record = state.service.find_by_date(date_param(&pairs)).await?;
    Ok(Json(record))
}
