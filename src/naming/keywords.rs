//! Weighted keyword ranking used by candidate extraction and meaning
//! synthesis.

use anyhow::Result;
use jieba_rs::{Jieba, KeywordExtract, TfIdf};
use tracing::info;

pub trait KeywordRanker: Send + Sync {
    /// Up to `k` tokens of `text`, highest weight first.
    fn top_keywords(&self, text: &str, k: usize) -> Result<Vec<String>>;
}

/// TF-IDF ranking over jieba segmentation with the bundled dictionaries.
pub struct JiebaKeywordRanker {
    jieba: Jieba,
    tfidf: TfIdf,
}

impl JiebaKeywordRanker {
    pub fn new() -> Self {
        let jieba = Jieba::new();
        let tfidf = TfIdf::default();
        info!("Loaded jieba dictionary and TF-IDF table");
        Self { jieba, tfidf }
    }
}

impl Default for JiebaKeywordRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordRanker for JiebaKeywordRanker {
    fn top_keywords(&self, text: &str, k: usize) -> Result<Vec<String>> {
        if text.trim().is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        Ok(self
            .tfidf
            .extract_keywords(&self.jieba, text, k, Vec::new())
            .into_iter()
            .map(|keyword| keyword.keyword)
            .collect())
    }
}

/// Ranker that never returns anything, leaving extraction to the
/// deterministic fallback scans.
pub struct NoOpKeywordRanker;

impl KeywordRanker for NoOpKeywordRanker {
    fn top_keywords(&self, _text: &str, _k: usize) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jieba_ranker_returns_at_most_k_tokens() {
        let ranker = JiebaKeywordRanker::new();
        let keywords = ranker
            .top_keywords("明月几时有，把酒问青天。不知天上宫阙，今夕是何年。", 3)
            .unwrap();
        assert!(!keywords.is_empty());
        assert!(keywords.len() <= 3);
    }

    #[test]
    fn blank_text_yields_nothing() {
        let ranker = JiebaKeywordRanker::new();
        assert!(ranker.top_keywords("  ", 5).unwrap().is_empty());
        assert!(NoOpKeywordRanker.top_keywords("明月", 5).unwrap().is_empty());
    }
}
