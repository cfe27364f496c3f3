//! Name generation: candidate extraction, source-balanced selection and
//! meaning synthesis.

mod allocator;
pub mod charset;
mod extractor;
mod keywords;
mod meaning;
mod models;
mod phrases;
mod pronunciation;

pub use allocator::{extract_line, SelectionAllocator, SelectionState, PER_POEM_MAX};
pub use extractor::{CandidateExtractor, CandidateLength, KEYWORD_TOP_K};
pub use keywords::{JiebaKeywordRanker, KeywordRanker, NoOpKeywordRanker};
pub use meaning::{strip_markup, MeaningSynthesizer};
pub use models::{
    ClientInputError, GenerationOutcome, GenerationRequest, GenerationStats, NameCard,
    SourceAttribution, DEFAULT_SIZE, MAX_SIZE, MIN_SIZE, MISSING_VERSE,
};
pub use phrases::{style_for, SourceStyle, CONNECTORS};
pub use pronunciation::{PinyinRomanizer, Romanizer};

/// Keyword ranker used by the binaries: jieba unless the dictionary load is
/// compiled out.
#[cfg(not(feature = "no_keywords"))]
pub fn default_keyword_ranker() -> std::sync::Arc<dyn KeywordRanker> {
    std::sync::Arc::new(JiebaKeywordRanker::new())
}

#[cfg(feature = "no_keywords")]
pub fn default_keyword_ranker() -> std::sync::Arc<dyn KeywordRanker> {
    std::sync::Arc::new(NoOpKeywordRanker)
}
