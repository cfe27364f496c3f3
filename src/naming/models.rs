use super::extractor::CandidateLength;
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_SIZE: usize = 12;
pub const MIN_SIZE: usize = 3;
pub const MAX_SIZE: usize = 30;

/// Shown as the verse of a card whose record has no content.
pub const MISSING_VERSE: &str = "原文缺失";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientInputError {
    #[error("surname required")]
    SurnameRequired,
    #[error("query required")]
    QueryRequired,
    #[error("text required")]
    TextRequired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceAttribution {
    pub title: String,
    pub author: String,
    pub dynasty: String,
    pub source_set: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameCard {
    pub name: String,
    pub pronunciation: String,
    pub source: SourceAttribution,
    pub original_verse: String,
    pub meaning: String,
    pub line_cn: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub surname: String,
    pub sources: Vec<String>,
    pub size: usize,
    pub length: CandidateLength,
}

impl GenerationRequest {
    /// Validates the surname and normalizes the size: absent or zero means
    /// the default, anything else is clamped to the allowed range.
    pub fn new(
        surname: &str,
        sources: Vec<String>,
        size: Option<i64>,
        char_count: Option<i64>,
    ) -> Result<Self, ClientInputError> {
        let surname = surname.trim();
        if surname.is_empty() {
            return Err(ClientInputError::SurnameRequired);
        }
        let size = match size {
            None | Some(0) => DEFAULT_SIZE,
            Some(size) => size.clamp(MIN_SIZE as i64, MAX_SIZE as i64) as usize,
        };
        Ok(Self {
            surname: surname.to_string(),
            sources,
            size,
            length: CandidateLength::from_char_count(char_count.unwrap_or(2)),
        })
    }

    /// Accepted cards allowed per source.
    pub fn per_source_target(&self) -> usize {
        self.size.div_ceil(self.sources.len().max(1)).max(1)
    }

    /// Raw acceptances after which generation stops.
    pub fn global_cap(&self) -> usize {
        self.size * 4
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStats {
    pub total_candidates: usize,
    pub selected_count: usize,
    pub unique_count: usize,
    pub sources_used: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub cards: Vec<NameCard>,
    pub stats: GenerationStats,
}
