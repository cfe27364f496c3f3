//! Candidate extraction from the text of one corpus record.

use super::charset::{is_core_char, is_name_char};
use super::keywords::KeywordRanker;
use crate::blacklist::BlacklistMatcher;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

/// Number of ranked tokens requested per record.
pub const KEYWORD_TOP_K: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateLength {
    One,
    Two,
}

impl CandidateLength {
    /// 1 selects single-character names, anything else two characters.
    pub fn from_char_count(char_count: i64) -> Self {
        if char_count == 1 {
            CandidateLength::One
        } else {
            CandidateLength::Two
        }
    }

    pub fn chars(self) -> usize {
        match self {
            CandidateLength::One => 1,
            CandidateLength::Two => 2,
        }
    }
}

/// One pass of the two-character fallback. `threshold` is checked once, when
/// the pass begins.
struct PairScan {
    offset: usize,
    reverse: bool,
    threshold: Option<usize>,
}

const PAIR_SCANS: [PairScan; 5] = [
    PairScan {
        offset: 1,
        reverse: false,
        threshold: None,
    },
    PairScan {
        offset: 2,
        reverse: false,
        threshold: Some(12),
    },
    PairScan {
        offset: 3,
        reverse: false,
        threshold: Some(15),
    },
    PairScan {
        offset: 4,
        reverse: false,
        threshold: Some(18),
    },
    PairScan {
        offset: 1,
        reverse: true,
        threshold: None,
    },
];

pub struct CandidateExtractor {
    matcher: Arc<BlacklistMatcher>,
    ranker: Arc<dyn KeywordRanker>,
    top_k: usize,
}

impl CandidateExtractor {
    pub fn new(matcher: Arc<BlacklistMatcher>, ranker: Arc<dyn KeywordRanker>) -> Self {
        Self {
            matcher,
            ranker,
            top_k: KEYWORD_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Deduplicated, clean candidates of exactly `length` characters, in
    /// random order.
    pub fn extract<R: Rng + ?Sized>(&self, text: &str, length: CandidateLength, rng: &mut R) -> Vec<String> {
        let mut pool = self.ranked_keywords(text, length);

        let chars: Vec<char> = text.chars().filter(|c| is_name_char(*c)).collect();
        match length {
            CandidateLength::One => {
                for c in &chars {
                    let single = c.to_string();
                    if self.matcher.is_clean(&single) {
                        pool.push(single);
                    }
                }
            }
            CandidateLength::Two => {
                for scan in &PAIR_SCANS {
                    if scan.threshold.is_some_and(|threshold| pool.len() >= threshold) {
                        continue;
                    }
                    self.run_pair_scan(scan, &chars, &mut pool);
                }
            }
        }

        let mut seen = HashSet::new();
        let mut candidates: Vec<String> = pool
            .into_iter()
            .filter(|candidate| seen.insert(candidate.clone()))
            .filter(|candidate| {
                candidate.chars().count() == length.chars() && self.matcher.is_clean(candidate)
            })
            .collect();
        candidates.shuffle(rng);
        candidates
    }

    fn ranked_keywords(&self, text: &str, length: CandidateLength) -> Vec<String> {
        let tokens = match self.ranker.top_keywords(text, self.top_k) {
            Ok(tokens) => tokens,
            Err(err) => {
                warn!("Keyword ranking failed, using fallback scans only: {}", err);
                return Vec::new();
            }
        };
        tokens
            .into_iter()
            .filter(|token| {
                let count = token.chars().count();
                count > 0
                    && count <= length.chars()
                    && token.chars().all(is_core_char)
                    && token.chars().all(is_name_char)
                    && self.matcher.is_clean(token)
            })
            .collect()
    }

    fn run_pair_scan(&self, scan: &PairScan, chars: &[char], pool: &mut Vec<String>) {
        if chars.len() <= scan.offset {
            return;
        }
        let starts: Box<dyn Iterator<Item = usize>> = if scan.reverse {
            Box::new((0..chars.len() - scan.offset).rev())
        } else {
            Box::new(0..chars.len() - scan.offset)
        };
        for i in starts {
            let pair: String = [chars[i], chars[i + scan.offset]].iter().collect();
            if self.matcher.is_clean(&pair) {
                pool.push(pair);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::charset::is_meaningless;
    use crate::naming::keywords::NoOpKeywordRanker;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct FixedRanker(Vec<&'static str>);

    impl KeywordRanker for FixedRanker {
        fn top_keywords(&self, _text: &str, k: usize) -> anyhow::Result<Vec<String>> {
            Ok(self.0.iter().take(k).map(|s| s.to_string()).collect())
        }
    }

    struct FailingRanker;

    impl KeywordRanker for FailingRanker {
        fn top_keywords(&self, _text: &str, _k: usize) -> anyhow::Result<Vec<String>> {
            anyhow::bail!("ranker unavailable")
        }
    }

    fn extractor(words: &[&str], ranker: Arc<dyn KeywordRanker>) -> CandidateExtractor {
        CandidateExtractor::new(Arc::new(BlacklistMatcher::compile(words).unwrap()), ranker)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    const POEM: &str = "清风徐徐，松竹梅兰，嘉树葱茏。之乎者也。";

    #[test]
    fn every_candidate_has_the_requested_shape() {
        let extractor = extractor(&["梅"], Arc::new(FixedRanker(vec!["清风", "松", "嘉树葱"])));
        for length in [CandidateLength::One, CandidateLength::Two] {
            let candidates = extractor.extract(POEM, length, &mut rng());
            assert!(!candidates.is_empty());
            for candidate in &candidates {
                assert_eq!(candidate.chars().count(), length.chars());
                assert!(candidate.chars().all(|c| is_core_char(c) && !is_meaningless(c)));
                assert!(!candidate.contains('梅'));
            }
        }
    }

    #[test]
    fn candidates_are_unique() {
        let extractor = extractor(&[], Arc::new(FixedRanker(vec!["清风", "清风", "松竹"])));
        let candidates = extractor.extract(POEM, CandidateLength::Two, &mut rng());
        let unique: HashSet<&String> = candidates.iter().collect();
        assert_eq!(unique.len(), candidates.len());
    }

    #[test]
    fn keyword_tokens_are_included() {
        let extractor = extractor(&[], Arc::new(FixedRanker(vec!["雅静", "之乎", "ab"])));
        let candidates = extractor.extract("松竹", CandidateLength::Two, &mut rng());
        assert!(candidates.contains(&"雅静".to_string()));
        assert!(!candidates.contains(&"之乎".to_string()));
        assert!(!candidates.contains(&"ab".to_string()));
    }

    #[test]
    fn ranker_failure_falls_back_to_scans() {
        let extractor = extractor(&[], Arc::new(FailingRanker));
        let mut candidates = extractor.extract("松竹梅", CandidateLength::Two, &mut rng());
        candidates.sort();
        // adjacent pairs, the offset-2 pair, reverse scan adds nothing new
        assert_eq!(candidates, vec!["松梅", "松竹", "竹梅"]);
    }

    #[test]
    fn single_char_candidates_skip_forbidden_chars() {
        let extractor = extractor(&["竹"], Arc::new(NoOpKeywordRanker));
        let mut candidates = extractor.extract("松竹梅之", CandidateLength::One, &mut rng());
        candidates.sort();
        assert_eq!(candidates, vec!["松", "梅"]);
    }

    #[test]
    fn wide_scans_are_skipped_once_the_pool_is_large() {
        // 20 distinct name characters give 19 adjacent pairs, above every threshold
        let text = "清雅嘉安明乐宁远诗松竹梅兰菊荷莲桂桃李杏";
        let chars: Vec<char> = text.chars().collect();
        let extractor = extractor(&[], Arc::new(NoOpKeywordRanker));

        let candidates = extractor.extract(text, CandidateLength::Two, &mut rng());
        assert_eq!(candidates.len(), chars.len() - 1);
        let offset_two: String = [chars[0], chars[2]].iter().collect();
        assert!(!candidates.contains(&offset_two));
    }

    #[test]
    fn short_texts_use_every_scan() {
        let extractor = extractor(&[], Arc::new(NoOpKeywordRanker));
        let candidates = extractor.extract("松竹梅兰菊", CandidateLength::Two, &mut rng());
        // 4 adjacent + 3 offset-2 + 2 offset-3 + 1 offset-4
        assert_eq!(candidates.len(), 10);
        assert!(candidates.contains(&"松菊".to_string()));
    }

    #[test]
    fn pairs_are_checked_as_a_whole() {
        let extractor = extractor(&["竹梅"], Arc::new(NoOpKeywordRanker));
        let candidates = extractor.extract("松竹梅", CandidateLength::Two, &mut rng());
        assert!(!candidates.contains(&"竹梅".to_string()));
        assert!(candidates.contains(&"松竹".to_string()));
    }

    #[test]
    fn char_count_maps_to_length() {
        assert_eq!(CandidateLength::from_char_count(1), CandidateLength::One);
        assert_eq!(CandidateLength::from_char_count(2), CandidateLength::Two);
        assert_eq!(CandidateLength::from_char_count(0), CandidateLength::Two);
    }
}
