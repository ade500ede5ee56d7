use crate::core::search::SearchService;
use crate::core::{SearchRequest, SearchResponse};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::Uri,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

pub mod error;

use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub search: SearchService,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/search", post(search_products))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `POST /search` with `{"query": "..."}`. Older clients send `?query=`
/// with an empty body, which is accepted as well. The URL is only parsed
/// in that case, so a JSON body wins over whatever the query string holds.
async fn search_products(
    State(state): State<AppState>,
    uri: Uri,
    body: Bytes,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = if !body.is_empty() {
        let request: SearchRequest = serde_json::from_slice(&body)
            .map_err(|e| ApiError::InvalidRequest(format!("Invalid request body: {}", e)))?;
        request.query
    } else {
        let Query(params) = Query::<SearchParams>::try_from_uri(&uri)
            .map_err(|e| ApiError::InvalidRequest(format!("Invalid query string: {}", e)))?;
        params
            .query
            .ok_or_else(|| ApiError::InvalidRequest("Missing required field `query`".to_string()))?
    };

    let response = state.search.search(&query).await?;
    Ok(Json(response))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
