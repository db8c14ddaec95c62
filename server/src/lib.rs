use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use plotindex::{Category, DocId, IndexStats, PlotIndex};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_ms: u128,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<String>,
}

#[derive(Serialize)]
pub struct DocResponse {
    pub doc_id: DocId,
    pub line: String,
    pub category: Category,
    pub year: Option<String>,
}

/// The index is immutable once built, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<PlotIndex>,
}

/// Build the index from `plot_file` and wire up the routes.
pub fn build_app(plot_file: &str) -> Result<Router> {
    let index = PlotIndex::build(plot_file)?;
    Ok(router(Arc::new(index)))
}

pub fn router(index: Arc<PlotIndex>) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/stats", get(stats_handler))
        .with_state(AppState { index })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let results: Vec<String> = state
        .index
        .query(&params.q)
        .map_err(|e| {
            tracing::error!(error = %e, query = %params.q, "query failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?
        .into_iter()
        .collect();
    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, hits = results.len(), "search");
    Ok(Json(SearchResponse {
        query: params.q,
        took_ms: elapsed.as_millis(),
        took_s: elapsed.as_secs_f64(),
        total_hits: results.len(),
        results,
    }))
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<DocId>,
) -> Result<Json<DocResponse>, (StatusCode, String)> {
    match state.index.document(doc_id) {
        Some(doc) => Ok(Json(DocResponse {
            doc_id,
            line: doc.line.clone(),
            category: doc.category,
            year: doc.year.clone(),
        })),
        None => Err((StatusCode::NOT_FOUND, format!("document {doc_id} not found"))),
    }
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<IndexStats> {
    Json(state.index.stats())
}
