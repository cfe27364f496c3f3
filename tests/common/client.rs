//! HTTP client for end-to-end tests
//!
//! This module wraps reqwest with one method per API route.
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .unwrap_or_else(|e| panic!("POST {} failed: {}", path, e))
    }

    /// POST with an arbitrary raw body, for malformed-input tests
    pub async fn post_raw(&self, path: &str, body: &'static str) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap_or_else(|e| panic!("POST {} failed: {}", path, e))
    }

    // ========================================================================
    // Stats
    // ========================================================================

    /// GET /
    pub async fn get_stats(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Stats request failed")
    }

    // ========================================================================
    // Generation
    // ========================================================================

    /// POST /api/generate
    pub async fn generate(
        &self,
        surname: &str,
        sources: &[&str],
        size: usize,
        char_count: usize,
    ) -> Response {
        self.post_json(
            "/api/generate",
            &json!({
                "surname": surname,
                "sources": sources,
                "size": size,
                "charCount": char_count,
            }),
        )
        .await
    }

    /// POST /api/generate with a caller-built body
    pub async fn generate_with_body(&self, body: Value) -> Response {
        self.post_json("/api/generate", &body).await
    }

    // ========================================================================
    // Corpus
    // ========================================================================

    /// POST /api/search
    pub async fn search(&self, query: &str, size: Option<usize>, sources: &[&str]) -> Response {
        let mut body = json!({ "query": query, "sources": sources });
        if let Some(size) = size {
            body["size"] = json!(size);
        }
        self.post_json("/api/search", &body).await
    }

    /// POST /api/sample
    pub async fn sample(&self, size: usize, sources: &[&str]) -> Response {
        self.post_json("/api/sample", &json!({ "size": size, "sources": sources }))
            .await
    }

    // ========================================================================
    // Translation
    // ========================================================================

    /// POST /api/translate
    pub async fn translate(&self, text: &str, target: Option<&str>) -> Response {
        let mut body = json!({ "text": text });
        if let Some(target) = target {
            body["target"] = json!(target);
        }
        self.post_json("/api/translate", &body).await
    }
}
