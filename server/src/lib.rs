use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sift_core::{FsCorpus, Index, QueryLog, SearchHit, StopwordSet};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub corpus_dir: PathBuf,
    pub stopwords: PathBuf,
    pub query_log: PathBuf,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Clone)]
pub struct AppState {
    // Copy-and-swap: readers clone the inner Arc and keep using their
    // snapshot; a rebuild writes a fresh Arc, so no request ever sees a
    // partially built index.
    index: Arc<RwLock<Arc<Index>>>,
    stopwords: Arc<StopwordSet>,
    corpus: FsCorpus,
    query_log: Arc<QueryLog>,
    admin_token: Option<String>,
}

pub fn build_app(config: ServerConfig) -> Result<Router> {
    // Stopwords are fatal at startup; the index build itself only skips bad
    // documents.
    let stopwords = Arc::new(StopwordSet::load(&config.stopwords)?);
    let corpus = FsCorpus::new(&config.corpus_dir);
    let index = Arc::new(Index::build(corpus.clone(), stopwords.clone()));
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    let state = AppState {
        index: Arc::new(RwLock::new(index)),
        stopwords,
        corpus,
        query_log: Arc::new(QueryLog::new(&config.query_log)),
        admin_token,
    };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/*id", get(doc_handler))
        .route("/rebuild", post(rebuild_handler))
        .with_state(state)
        .layer(cors);
    Ok(app)
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let index = state.index.read().clone();
    let results = index.search(&params.q);
    state.query_log.append(&params.q, &results);
    Json(SearchResponse {
        query: params.q,
        took_s: start.elapsed().as_secs_f64(),
        total_hits: results.len(),
        results,
    })
}

/// Serve an original corpus page. Identifier resolution fails closed: any id
/// that would leave the corpus root is a plain 404, never a redirect.
pub async fn doc_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.corpus.read(&id) {
        Ok(html) => (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            html,
        )
            .into_response(),
        Err(err) => {
            tracing::debug!(doc = %id, error = %err, "document request refused");
            (StatusCode::NOT_FOUND, "not found").into_response()
        }
    }
}

/// Rebuild the index from the corpus and swap it in atomically.
async fn rebuild_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let fresh = Arc::new(Index::build(state.corpus.clone(), state.stopwords.clone()));
    let num_docs = fresh.num_docs();
    let num_terms = fresh.num_terms();
    *state.index.write() = fresh;
    tracing::info!(num_docs, num_terms, "index rebuilt");
    Ok(Json(serde_json::json!({
        "num_docs": num_docs,
        "num_terms": num_terms,
    })))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers
        .get("X-ADMIN-TOKEN")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
