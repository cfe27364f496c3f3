//! Loads sanitized corpus files into the corpus database.

use super::record::{normalize_record, CorpusRecord};
use super::sanitizer::{list_json_files, IngestionError};
use super::store::SqliteCorpusStore;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// (source tag, imported works) per successfully imported file.
    pub sources: Vec<(String, usize)>,
    pub total: usize,
    pub failed_files: usize,
}

fn read_records(path: &Path, source_tag: &str) -> Result<Vec<CorpusRecord>, IngestionError> {
    let raw = std::fs::read_to_string(path).map_err(|source| IngestionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Value = serde_json::from_str(&raw).map_err(|source| IngestionError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let items = match document {
        Value::Array(items) => items,
        other => vec![other],
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match normalize_record(item, source_tag) {
            Ok(record) => records.push(record),
            Err(err) => warn!("Skipping item {} of {:?}: {}", index, path, err),
        }
    }
    Ok(records)
}

/// Imports every `*.json` file of `input_dir` (source tag = file stem), one
/// transaction per file, then rebuilds the full-text index. `on_file` is
/// invoked after each file, successful or not.
pub fn import_dir<F>(store: &SqliteCorpusStore, input_dir: &Path, mut on_file: F) -> Result<ImportReport>
where
    F: FnMut(&str),
{
    let files = list_json_files(input_dir)?;
    info!("Importing {} files from {:?}", files.len(), input_dir);

    let mut report = ImportReport::default();
    for path in files {
        let source_tag = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        match read_records(&path, &source_tag) {
            Ok(records) => {
                let count = store
                    .replace_source_records(&source_tag, &records)
                    .with_context(|| format!("Failed to import {:?}", path))?;
                info!("Imported {}: {}", source_tag, count);
                report.total += count;
                report.sources.push((source_tag.clone(), count));
            }
            Err(err) => {
                error!("{}", err);
                report.failed_files += 1;
            }
        }
        on_file(&source_tag);
    }

    store.rebuild_fts()?;
    info!("Import complete, {} works in total", report.total);
    Ok(report)
}
