//! Corpus search and sampling routes

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::payload::{
    client_error, internal_error, lenient_json, number_field, string_field, string_list_field,
};
use super::state::{GuardedCorpusStore, ServerState};
use crate::corpus::SearchOrder;
use crate::naming::ClientInputError;

pub const DEFAULT_LIMIT: usize = 20;
pub const MAX_LIMIT: usize = 50;

/// Absent, zero or unparsable sizes fall back to the default.
fn resolve_limit(size: Option<i64>) -> usize {
    match size {
        None | Some(0) => DEFAULT_LIMIT,
        Some(size) => size.clamp(1, MAX_LIMIT as i64) as usize,
    }
}

async fn search(State(corpus_store): State<GuardedCorpusStore>, body: Bytes) -> Response {
    let body = lenient_json(&body);
    let query = string_field(&body, "query");
    if query.is_empty() {
        return client_error(ClientInputError::QueryRequired);
    }
    let limit = resolve_limit(number_field(&body, "size"));
    let sources = string_list_field(&body, "sources");

    let rows = tokio::task::spawn_blocking(move || {
        corpus_store.search(&query, limit, &sources, SearchOrder::SubstringFirst)
    })
    .await;

    match rows {
        Ok(Ok(rows)) => Json(json!({ "ok": true, "data": rows })).into_response(),
        Ok(Err(err)) => {
            error!("Search failed: {:#}", err);
            internal_error("search failed")
        }
        Err(err) => {
            error!("Search task failed: {}", err);
            internal_error("search failed")
        }
    }
}

async fn sample(State(corpus_store): State<GuardedCorpusStore>, body: Bytes) -> Response {
    let body = lenient_json(&body);
    let limit = resolve_limit(number_field(&body, "size"));
    let sources = string_list_field(&body, "sources");

    let rows = tokio::task::spawn_blocking(move || corpus_store.sample(limit, &sources)).await;

    match rows {
        Ok(Ok(rows)) => Json(json!({ "ok": true, "data": rows })).into_response(),
        Ok(Err(err)) => {
            error!("Sampling failed: {:#}", err);
            internal_error("sample failed")
        }
        Err(err) => {
            error!("Sampling task failed: {}", err);
            internal_error("sample failed")
        }
    }
}

pub fn make_search_routes(state: ServerState) -> Router {
    Router::new()
        .route("/search", post(search))
        .route("/sample", post(sample))
        .with_state(state)
}
