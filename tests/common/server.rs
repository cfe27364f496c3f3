//! Test server lifecycle management
//!
//! This module manages spawning and shutting down test HTTP servers.
//! Each test gets an isolated server with its own corpus database and a stub
//! translation upstream.

use super::constants::*;
use super::fixtures::{create_test_corpus, TestCorpus};
use axum::{http::StatusCode, routing::post, Json, Router};
use guchi_name_server::blacklist::BlacklistMatcher;
use guchi_name_server::corpus::{CorpusStore, SqliteCorpusStore};
use guchi_name_server::naming::{NoOpKeywordRanker, PinyinRomanizer, SelectionAllocator};
use guchi_name_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use guchi_name_server::translation::TranslationClient;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Answers like a LibreTranslate instance: the translation is the input
/// wrapped in brackets, and `UPSTREAM_FAILURE_TEXT` gets an error status.
async fn stub_translate(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let text = body["q"].as_str().unwrap_or_default();
    if text == UPSTREAM_FAILURE_TEXT {
        let status = StatusCode::from_u16(UPSTREAM_FAILURE_STATUS).unwrap();
        return (status, Json(json!({ "error": "unavailable" })));
    }
    let target = body["target"].as_str().unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({ "translatedText": format!("[{}] {}", target, text) })),
    )
}

async fn spawn_stub_translator() -> (String, tokio::sync::oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub translator");
    let port = listener.local_addr().unwrap().port();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    let app = Router::new().route("/translate", post(stub_translate));
    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .expect("Stub translator failed");
    });

    (format!("http://127.0.0.1:{}/translate", port), shutdown_tx)
}

/// Test server instance with an isolated corpus
///
/// When dropped, the server gracefully shuts down and temp resources are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// Corpus store for direct database access in tests
    pub corpus_store: Arc<dyn CorpusStore>,

    /// The prepared corpus, kept alive until drop
    pub corpus: TestCorpus,

    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    _translator_shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port
    ///
    /// The corpus is sanitized and imported from the raw fixtures, keyword
    /// ranking is disabled so candidates come from the character scans only,
    /// and translation goes to a local stub.
    ///
    /// # Panics
    ///
    /// Panics if corpus creation, port binding or startup fails.
    pub async fn spawn() -> Self {
        let corpus = create_test_corpus().expect("Failed to create test corpus");

        let corpus_store: Arc<dyn CorpusStore> = Arc::new(
            SqliteCorpusStore::new(corpus.db_path()).expect("Failed to open corpus store"),
        );
        let matcher = Arc::new(
            BlacklistMatcher::load(&corpus.blacklist_path).expect("Failed to load blacklist"),
        );
        let allocator = SelectionAllocator::new(
            corpus_store.clone(),
            matcher,
            Arc::new(NoOpKeywordRanker),
            Arc::new(PinyinRomanizer),
        );

        let (translate_url, translator_shutdown_tx) = spawn_stub_translator().await;
        let translator = TranslationClient::new(&translate_url, Duration::from_secs(2))
            .expect("Failed to build translation client");

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            metrics_port: 0,
            requests_logging_level: RequestsLoggingLevel::None,
            frontend_dir_path: None,
        };
        let app = make_app(config, corpus_store.clone(), allocator, translator)
            .expect("Failed to build app");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            corpus_store,
            corpus,
            _shutdown_tx: Some(shutdown_tx),
            _translator_shutdown_tx: Some(translator_shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the stats endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(tx) = self._translator_shutdown_tx.take() {
            let _ = tx.send(());
        }
        // TempDir cleans up the corpus
    }
}
