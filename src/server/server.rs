use anyhow::{Context, Result};
use std::{future::IntoFuture, sync::Arc, time::Duration};

use tower_http::services::ServeDir;
use tracing::{error, info};

use axum::{
    extract::State,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::metrics::metrics_handler;
use super::{
    log_requests, make_generate_routes, make_search_routes, make_translate_routes, state::*,
    ServerConfig,
};
use crate::corpus::CorpusStore;
use crate::naming::SelectionAllocator;
use crate::translation::TranslationClient;

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub works: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> Response {
    let corpus_store = state.corpus_store.clone();
    let works = match tokio::task::spawn_blocking(move || corpus_store.works_count()).await {
        Ok(Ok(works)) => works,
        Ok(Err(err)) => {
            error!("Failed to count works: {:#}", err);
            0
        }
        Err(err) => {
            error!("Works count task failed: {}", err);
            0
        }
    };
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        works,
    };
    Json(stats).into_response()
}

pub fn make_app(
    config: ServerConfig,
    corpus_store: Arc<dyn CorpusStore>,
    allocator: SelectionAllocator,
    translator: TranslationClient,
) -> Result<Router> {
    let state = ServerState::new(config.clone(), corpus_store, allocator, translator);

    let api_routes: Router = make_generate_routes(state.clone())
        .merge(make_search_routes(state.clone()))
        .merge(make_translate_routes(state.clone()));

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    let app: Router = home_router
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(state.clone(), log_requests));

    Ok(app)
}

fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

pub async fn run_server(
    config: ServerConfig,
    corpus_store: Arc<dyn CorpusStore>,
    allocator: SelectionAllocator,
    translator: TranslationClient,
) -> Result<()> {
    let port = config.port;
    let metrics_port = config.metrics_port;
    let app = make_app(config, corpus_store, allocator, translator)?;

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    let metrics_listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", metrics_port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}", metrics_port))?;

    info!("Ready to serve at port {}!", port);
    info!("Metrics available at port {}!", metrics_port);

    tokio::try_join!(
        axum::serve(listener, app).into_future(),
        axum::serve(metrics_listener, make_metrics_app()).into_future(),
    )?;
    Ok(())
}
