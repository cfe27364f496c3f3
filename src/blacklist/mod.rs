//! Forbidden-word matching.
//!
//! A single compiled [`BlacklistMatcher`] is shared by the offline corpus
//! sanitizer and by the online candidate extractor, so a name assembled from
//! characters that were individually accepted at ingestion time is checked
//! again in its combined form.

use regex::Regex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Forbidden word list not found: {0:?}")]
    Missing(PathBuf),

    #[error("Failed to read forbidden word list {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Forbidden word list {path:?} is not valid JSON: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Forbidden word list must be an array of strings ({0})")]
    NotAList(String),

    #[error("Failed to compile forbidden word pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Literal substring matcher over a forbidden-word list.
///
/// Matching is case-sensitive and has no word-boundary requirement: a word
/// embedded in a longer token still matches.
#[derive(Debug, Clone)]
pub struct BlacklistMatcher {
    pattern: Option<Regex>,
    words_count: usize,
}

impl BlacklistMatcher {
    /// Compiles the given words into one alternation. Every word is escaped,
    /// empty words are ignored.
    pub fn compile<S: AsRef<str>>(words: &[S]) -> Result<Self, ConfigError> {
        let escaped: Vec<String> = words
            .iter()
            .map(|w| w.as_ref())
            .filter(|w| !w.is_empty())
            .map(regex::escape)
            .collect();

        if escaped.is_empty() {
            return Ok(Self {
                pattern: None,
                words_count: 0,
            });
        }

        let pattern = Regex::new(&escaped.join("|"))?;
        Ok(Self {
            pattern: Some(pattern),
            words_count: escaped.len(),
        })
    }

    /// Compiles a matcher from an already parsed JSON document, which must be
    /// an array of strings.
    pub fn from_json_value(value: &Value) -> Result<Self, ConfigError> {
        let items = match value {
            Value::Array(items) => items,
            other => return Err(ConfigError::NotAList(format!("found {}", json_kind(other)))),
        };

        let mut words = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                Value::String(word) => words.push(word.as_str()),
                other => {
                    return Err(ConfigError::NotAList(format!(
                        "entry {} is {}",
                        index,
                        json_kind(other)
                    )))
                }
            }
        }
        Self::compile(&words)
    }

    /// Reads and compiles the forbidden-word list stored at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::Missing(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&raw).map_err(|source| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_value(&value)
    }

    /// True iff no forbidden word occurs anywhere in `text`.
    pub fn is_clean(&self, text: &str) -> bool {
        match &self.pattern {
            Some(pattern) => !pattern.is_match(text),
            None => true,
        }
    }

    /// Keeps the clean entries, preserving order.
    pub fn filter_names<I, S>(&self, candidates: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        candidates
            .into_iter()
            .map(Into::into)
            .filter(|name| self.is_clean(name))
            .collect()
    }

    pub fn words_count(&self) -> usize {
        self.words_count
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
