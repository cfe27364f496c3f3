mod file_config;

pub use file_config::{FileConfig, GenerationConfig};

use crate::corpus::CORPUS_DB_FILE;
use crate::naming::KEYWORD_TOP_K;
use crate::server::RequestsLoggingLevel;
use crate::translation::{DEFAULT_TRANSLATE_TIMEOUT, DEFAULT_TRANSLATE_URL};
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_dir: Option<PathBuf>,
    pub blacklist_path: Option<PathBuf>,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub translate_url: Option<String>,
    pub translate_timeout_sec: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_dir: PathBuf,
    pub blacklist_path: PathBuf,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub translate_url: String,
    pub translate_timeout_sec: u64,

    pub generation: GenerationSettings,
}

#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub keyword_top_k: usize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            keyword_top_k: KEYWORD_TOP_K,
        }
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_dir = file
            .db_dir
            .map(PathBuf::from)
            .or_else(|| cli.db_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("db_dir must be specified via --db-dir or in config file")
            })?;

        if !db_dir.exists() {
            bail!("Database directory does not exist: {:?}", db_dir);
        }
        if !db_dir.is_dir() {
            bail!("db_dir is not a directory: {:?}", db_dir);
        }

        let blacklist_path = file
            .blacklist_path
            .map(PathBuf::from)
            .or_else(|| cli.blacklist_path.clone())
            .unwrap_or_else(|| db_dir.join("blacklist.json"));

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);
        if port == metrics_port && port != 0 {
            bail!("port and metrics_port must differ (both {})", port);
        }

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let translate_url = file
            .translate_url
            .or_else(|| cli.translate_url.clone())
            .unwrap_or_else(|| DEFAULT_TRANSLATE_URL.to_string());
        let translate_timeout_sec = file
            .translate_timeout_sec
            .or(cli.translate_timeout_sec)
            .unwrap_or(DEFAULT_TRANSLATE_TIMEOUT.as_secs());
        if translate_timeout_sec == 0 {
            bail!("translate_timeout_sec must be positive");
        }

        let generation_file = file.generation.unwrap_or_default();
        let generation = GenerationSettings {
            keyword_top_k: generation_file.keyword_top_k.unwrap_or(KEYWORD_TOP_K),
        };

        Ok(Self {
            db_dir,
            blacklist_path,
            port,
            metrics_port,
            logging_level,
            frontend_dir_path,
            translate_url,
            translate_timeout_sec,
            generation,
        })
    }

    pub fn corpus_db_path(&self) -> PathBuf {
        self.db_dir.join(CORPUS_DB_FILE)
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
