//! Name generation route

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tracing::{error, info};

use super::metrics::record_generation;
use super::payload::{
    client_error, exact_integer_field, internal_error, lenient_json, number_field, string_field,
    string_list_field,
};
use super::state::{GuardedSelectionAllocator, ServerState};
use crate::naming::GenerationRequest;

async fn generate(State(allocator): State<GuardedSelectionAllocator>, body: Bytes) -> Response {
    let body = lenient_json(&body);
    let request = match GenerationRequest::new(
        &string_field(&body, "surname"),
        string_list_field(&body, "sources"),
        number_field(&body, "size"),
        exact_integer_field(&body, "charCount"),
    ) {
        Ok(request) => request,
        Err(err) => return client_error(err),
    };

    let requested = request.size;
    let outcome = tokio::task::spawn_blocking(move || {
        let mut rng = rand::rng();
        allocator.generate(&request, &mut rng)
    })
    .await;

    match outcome {
        Ok(outcome) => {
            info!(
                "Generated {} of {} names ({} candidates)",
                outcome.cards.len(),
                requested,
                outcome.stats.total_candidates
            );
            record_generation(requested, outcome.cards.len());
            Json(json!({
                "ok": true,
                "data": outcome.cards,
                "stats": outcome.stats,
            }))
            .into_response()
        }
        Err(err) => {
            error!("Generation task failed: {}", err);
            internal_error("generation failed")
        }
    }
}

pub fn make_generate_routes(state: ServerState) -> Router {
    Router::new()
        .route("/generate", post(generate))
        .with_state(state)
}
