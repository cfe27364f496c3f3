//! Translation route. Upstream trouble is reported in the body with a 200.

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tracing::warn;

use super::metrics::record_translation;
use super::payload::{client_error, lenient_json, string_field};
use super::state::{GuardedTranslationClient, ServerState};
use crate::naming::ClientInputError;
use crate::translation::DEFAULT_TARGET_LANGUAGE;

async fn translate(State(translator): State<GuardedTranslationClient>, body: Bytes) -> Response {
    let body = lenient_json(&body);
    let text = string_field(&body, "text");
    if text.is_empty() {
        return client_error(ClientInputError::TextRequired);
    }
    let target = match string_field(&body, "target") {
        target if target.is_empty() => DEFAULT_TARGET_LANGUAGE.to_string(),
        target => target,
    };

    match translator.translate(&text, &target).await {
        Ok(translated) => {
            record_translation("ok");
            Json(json!({ "ok": true, "data": translated })).into_response()
        }
        Err(err) => {
            warn!("Translation to {} failed: {:?}", target, err);
            record_translation("failed");
            Json(json!({ "ok": false, "error": err.to_string() })).into_response()
        }
    }
}

pub fn make_translate_routes(state: ServerState) -> Router {
    Router::new()
        .route("/translate", post(translate))
        .with_state(state)
}
