//! Offline corpus cleaning.
//!
//! Reads every `*.json` file of an input directory, normalizes the records,
//! drops the ones containing a forbidden word and writes the survivors, with
//! their cleaned text and sentence split, to an output directory using the
//! same file names.

use super::record::{normalize_record, CorpusRecord};
use crate::blacklist::BlacklistMatcher;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

const PUNCTUATION: &[char] = &[
    '，', '。', '！', '？', '、', '；', '（', '）', '“', '”', '‘', '’', '·', ',', '.', '!', '?',
    ';', '(', ')', '"', '\'',
];

const SENTENCE_DELIMITERS: &[char] = &['，', '。', '！', '？', '、', '；'];

/// Variant forms folded to their common form. No target is also a source, so
/// applying the table twice is the same as applying it once.
const VARIANT_CHARS: &[(char, char)] = &[
    ('徠', '来'),
    ('徕', '来'),
    ('峯', '峰'),
    ('羣', '群'),
    ('綫', '线'),
    ('衆', '众'),
    ('裏', '里'),
];

#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{path:?} must hold a JSON array or object, found {found}")]
    UnexpectedShape { path: PathBuf, found: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizedRecord {
    pub original_text: String,
    pub cleaned_text: String,
    pub sentences: Vec<String>,
    pub has_bad_word: bool,
}

/// One line of a sanitized output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizedEntry {
    #[serde(flatten)]
    pub record: CorpusRecord,
    #[serde(flatten)]
    pub sanitized: SanitizedRecord,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FileReport {
    pub file: String,
    pub kept: usize,
    pub removed: usize,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SanitizeReport {
    pub files: Vec<FileReport>,
    pub kept: usize,
    pub removed: usize,
    pub failed_files: usize,
}

/// Strips punctuation, ASCII digits and whitespace, then folds variant
/// characters. Anything else passes through unchanged.
pub fn clean_text(text: &str) -> String {
    text.chars()
        .filter(|c| !PUNCTUATION.contains(c) && !c.is_ascii_digit() && !c.is_whitespace())
        .map(|c| {
            VARIANT_CHARS
                .iter()
                .find(|(variant, _)| *variant == c)
                .map(|(_, common)| *common)
                .unwrap_or(c)
        })
        .collect()
}

pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(SENTENCE_DELIMITERS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct TextSanitizer {
    matcher: Arc<BlacklistMatcher>,
}

impl TextSanitizer {
    pub fn new(matcher: Arc<BlacklistMatcher>) -> Self {
        Self { matcher }
    }

    pub fn sanitize_record(&self, record: &CorpusRecord) -> SanitizedRecord {
        let has_bad_word = record
            .text_fields()
            .iter()
            .any(|field| !self.matcher.is_clean(field));
        SanitizedRecord {
            original_text: record.content.clone(),
            cleaned_text: clean_text(&record.content),
            sentences: split_sentences(&record.content),
            has_bad_word,
        }
    }

    /// Sanitizes the items of one parsed document, returning the kept entries
    /// and the number of removed ones.
    fn sanitize_items(&self, items: &[Value], source_tag: &str) -> (Vec<SanitizedEntry>, usize) {
        let mut kept = Vec::with_capacity(items.len());
        let mut removed = 0;
        for (index, item) in items.iter().enumerate() {
            let record = match normalize_record(item, source_tag) {
                Ok(record) => record,
                Err(err) => {
                    warn!("Skipping item {} of source {}: {}", index, source_tag, err);
                    removed += 1;
                    continue;
                }
            };
            let sanitized = self.sanitize_record(&record);
            if sanitized.has_bad_word {
                debug!("Dropping \"{}\" of {}: forbidden word", record.title, source_tag);
                removed += 1;
                continue;
            }
            kept.push(SanitizedEntry { record, sanitized });
        }
        (kept, removed)
    }

    /// Sanitizes a single file into `output_dir`. An array document always
    /// produces an output file; a single-record document produces one only
    /// when its record is kept.
    pub fn sanitize_file(&self, input: &Path, output_dir: &Path) -> Result<FileReport, IngestionError> {
        let file_name = input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let source_tag = input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let raw = std::fs::read_to_string(input).map_err(|source| IngestionError::Io {
            path: input.to_path_buf(),
            source,
        })?;
        let document: Value = serde_json::from_str(&raw).map_err(|source| IngestionError::Parse {
            path: input.to_path_buf(),
            source,
        })?;

        let (entries, removed, always_write) = match document {
            Value::Array(items) => {
                let (entries, removed) = self.sanitize_items(&items, &source_tag);
                (entries, removed, true)
            }
            object @ Value::Object(_) => {
                let (entries, removed) = self.sanitize_items(std::slice::from_ref(&object), &source_tag);
                (entries, removed, false)
            }
            Value::Null => return Err(unexpected_shape(input, "null")),
            Value::Bool(_) => return Err(unexpected_shape(input, "a boolean")),
            Value::Number(_) => return Err(unexpected_shape(input, "a number")),
            Value::String(_) => return Err(unexpected_shape(input, "a string")),
        };

        if always_write || !entries.is_empty() {
            let output_path = output_dir.join(&file_name);
            let serialized =
                serde_json::to_string_pretty(&entries).map_err(|source| IngestionError::Parse {
                    path: output_path.clone(),
                    source,
                })?;
            std::fs::write(&output_path, serialized).map_err(|source| IngestionError::Io {
                path: output_path.clone(),
                source,
            })?;
        }

        Ok(FileReport {
            file: file_name,
            kept: entries.len(),
            removed,
            error: None,
        })
    }

    /// Sanitizes every `*.json` file directly inside `input_dir`, in file name
    /// order. A file that cannot be parsed is reported and skipped.
    pub fn sanitize_dir(&self, input_dir: &Path, output_dir: &Path) -> Result<SanitizeReport, IngestionError> {
        std::fs::create_dir_all(output_dir).map_err(|source| IngestionError::Io {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let files = list_json_files(input_dir)?;
        info!(
            "Sanitizing {} files from {:?} into {:?} ({} forbidden words)",
            files.len(),
            input_dir,
            output_dir,
            self.matcher.words_count()
        );

        // Files are independent; results come back in file name order.
        let results: Vec<(PathBuf, Result<FileReport, IngestionError>)> = files
            .into_par_iter()
            .map(|path| {
                let result = self.sanitize_file(&path, output_dir);
                (path, result)
            })
            .collect();

        let mut report = SanitizeReport::default();
        for (path, result) in results {
            let file_report = match result {
                Ok(file_report) => file_report,
                Err(err) => {
                    error!("{}", err);
                    report.failed_files += 1;
                    FileReport {
                        file: path
                            .file_name()
                            .map(|n| n.to_string_lossy().to_string())
                            .unwrap_or_default(),
                        error: Some(err.to_string()),
                        ..Default::default()
                    }
                }
            };
            info!(
                "{}: kept={} removed={} error={}",
                file_report.file,
                file_report.kept,
                file_report.removed,
                file_report.error.as_deref().unwrap_or("-")
            );
            report.kept += file_report.kept;
            report.removed += file_report.removed;
            report.files.push(file_report);
        }
        Ok(report)
    }
}

fn unexpected_shape(path: &Path, found: &'static str) -> IngestionError {
    IngestionError::UnexpectedShape {
        path: path.to_path_buf(),
        found,
    }
}

/// Lists the `*.json` files directly inside `dir`, sorted by name.
pub fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>, IngestionError> {
    if !dir.is_dir() {
        return Err(IngestionError::Io {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        });
    }
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}
