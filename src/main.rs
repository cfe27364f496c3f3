use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use std::{fmt::Debug, path::PathBuf};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use guchi_name_server::blacklist::BlacklistMatcher;
use guchi_name_server::config::{AppConfig, CliConfig, FileConfig};
use guchi_name_server::corpus::{CorpusStore, SqliteCorpusStore};
use guchi_name_server::naming::{default_keyword_ranker, PinyinRomanizer, SelectionAllocator};
use guchi_name_server::server::{self, run_server, RequestsLoggingLevel, ServerConfig};
use guchi_name_server::translation::TranslationClient;

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a TOML config file. Its values override the command line.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Directory holding the corpus database (corpus.db).
    #[clap(long, value_parser = parse_path)]
    pub db_dir: Option<PathBuf>,

    /// JSON array of forbidden words. Defaults to <db-dir>/blacklist.json.
    #[clap(long, value_parser = parse_path)]
    pub blacklist_path: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9091)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// LibreTranslate-compatible endpoint used by /api/translate.
    #[clap(long)]
    pub translate_url: Option<String>,

    /// Timeout in seconds for translation requests.
    #[clap(long)]
    pub translate_timeout_sec: Option<u64>,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            db_dir: self.db_dir.clone(),
            blacklist_path: self.blacklist_path.clone(),
            port: self.port,
            metrics_port: self.metrics_port,
            logging_level: self.logging_level.clone(),
            frontend_dir_path: self.frontend_dir_path.clone(),
            translate_url: self.translate_url.clone(),
            translate_timeout_sec: self.translate_timeout_sec,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let app_config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    info!("Loading blacklist from {:?}...", app_config.blacklist_path);
    let matcher = Arc::new(
        BlacklistMatcher::load(&app_config.blacklist_path)
            .context("The forbidden-word list is required to serve names")?,
    );
    info!("Blacklist holds {} words", matcher.words_count());

    let corpus_db_path = app_config.corpus_db_path();
    info!("Opening SQLite corpus database at {:?}...", corpus_db_path);
    let corpus_store: Arc<dyn CorpusStore> = Arc::new(SqliteCorpusStore::new(&corpus_db_path)?);

    info!("Initializing metrics...");
    server::metrics::init_metrics();
    server::metrics::init_corpus_metrics(&corpus_store.source_counts()?);

    info!("Loading keyword ranker...");
    let allocator = SelectionAllocator::new(
        corpus_store.clone(),
        matcher,
        default_keyword_ranker(),
        Arc::new(PinyinRomanizer),
    )
    .with_keyword_top_k(app_config.generation.keyword_top_k);

    let translator = TranslationClient::new(
        &app_config.translate_url,
        Duration::from_secs(app_config.translate_timeout_sec),
    )?;
    info!("Translation upstream at {}", app_config.translate_url);

    let server_config = ServerConfig {
        requests_logging_level: app_config.logging_level.clone(),
        port: app_config.port,
        metrics_port: app_config.metrics_port,
        frontend_dir_path: app_config.frontend_dir_path.clone(),
    };

    run_server(server_config, corpus_store, allocator, translator).await
}
