//! Lenient access to JSON request bodies. A body that is not valid JSON is
//! read as an empty object, so missing input surfaces as the route's own
//! client error.

use axum::{body::Bytes, http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::{json, Map, Value};

use crate::naming::ClientInputError;

pub fn lenient_json(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|_| Value::Object(Map::new()))
}

/// A trimmed string field. Numbers are accepted and rendered.
pub fn string_field(body: &Value, key: &str) -> String {
    match body.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// String items of an array field. Anything else yields an empty list.
pub fn string_list_field(body: &Value, key: &str) -> Vec<String> {
    match body.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// An integer field given as a number or a numeric string. Fractions are
/// truncated.
pub fn number_field(body: &Value, key: &str) -> Option<i64> {
    match body.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64),
        _ => None,
    }
}

/// An integer field given as a number or a numeric string. Values with a
/// fractional part are ignored rather than truncated.
pub fn exact_integer_field(body: &Value, key: &str) -> Option<i64> {
    let value = match body.get(key)? {
        Value::Number(n) => n.as_i64().map(|i| i as f64).or_else(|| n.as_f64()),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (value.is_finite() && value.fract() == 0.0).then_some(value as i64)
}

pub fn client_error(err: ClientInputError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "ok": false, "error": err.to_string() })),
    )
        .into_response()
}

pub fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "ok": false, "error": message })),
    )
        .into_response()
}
