//! Source-balanced selection of names for one generation request.

use super::extractor::CandidateExtractor;
use super::keywords::KeywordRanker;
use super::meaning::{strip_markup, MeaningSynthesizer};
use super::models::{
    GenerationOutcome, GenerationRequest, GenerationStats, NameCard, SourceAttribution,
    MISSING_VERSE,
};
use super::pronunciation::Romanizer;
use crate::blacklist::BlacklistMatcher;
use crate::corpus::{CorpusRecord, CorpusStore, ANONYMOUS_AUTHOR, UNKNOWN_LABEL};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Accepted names per original work.
pub const PER_POEM_MAX: usize = 1;

const LINE_DELIMITERS: &[char] = &['。', '！', '？', '!', '?', '\n'];

/// Bookkeeping of one request. Never shared between requests.
#[derive(Debug, Default)]
pub struct SelectionState {
    pub source_picked_count: HashMap<String, usize>,
    pub poem_picked_count: HashMap<String, usize>,
    pub picked_name_set: HashSet<String>,
}

impl SelectionState {
    fn source_count(&self, source: &str) -> usize {
        self.source_picked_count.get(source).copied().unwrap_or(0)
    }

    fn poem_count(&self, poem_key: &str) -> usize {
        self.poem_picked_count.get(poem_key).copied().unwrap_or(0)
    }

    fn record_pick(&mut self, source: &str, poem_key: &str, full_name: String) {
        *self.source_picked_count.entry(source.to_string()).or_insert(0) += 1;
        *self.poem_picked_count.entry(poem_key.to_string()).or_insert(0) += 1;
        self.picked_name_set.insert(full_name);
    }
}

/// The verse sentence shown with a card: the first one holding a character
/// of the given name, else the first one, else nothing.
pub fn extract_line(verse: &str, given_name: &str) -> String {
    let text = strip_markup(verse);
    let sentences: Vec<&str> = text
        .split(LINE_DELIMITERS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    sentences
        .iter()
        .find(|sentence| given_name.chars().any(|c| sentence.contains(c)))
        .or_else(|| sentences.first())
        .map(|s| s.to_string())
        .unwrap_or_default()
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

pub struct SelectionAllocator {
    store: Arc<dyn CorpusStore>,
    extractor: CandidateExtractor,
    synthesizer: MeaningSynthesizer,
    romanizer: Arc<dyn Romanizer>,
}

impl SelectionAllocator {
    pub fn new(
        store: Arc<dyn CorpusStore>,
        matcher: Arc<BlacklistMatcher>,
        ranker: Arc<dyn KeywordRanker>,
        romanizer: Arc<dyn Romanizer>,
    ) -> Self {
        Self {
            store,
            extractor: CandidateExtractor::new(matcher, ranker.clone()),
            synthesizer: MeaningSynthesizer::new(ranker),
            romanizer,
        }
    }

    pub fn with_keyword_top_k(mut self, top_k: usize) -> Self {
        self.extractor = self.extractor.with_top_k(top_k);
        self
    }

    fn build_card<R: Rng + ?Sized>(
        &self,
        full_name: String,
        record: &CorpusRecord,
        source: &str,
        rng: &mut R,
    ) -> NameCard {
        let attribution = SourceAttribution {
            title: or_default(&record.title, UNKNOWN_LABEL),
            author: or_default(&record.author, ANONYMOUS_AUTHOR),
            dynasty: or_default(&record.dynasty, UNKNOWN_LABEL),
            source_set: source.to_string(),
        };
        let meaning = self
            .synthesizer
            .synthesize(&full_name, &attribution, &record.content, rng);
        let pronunciation = match self.romanizer.romanize(&full_name) {
            Ok(pronunciation) => pronunciation,
            Err(err) => {
                warn!("Romanization of {} failed: {}", full_name, err);
                full_name.clone()
            }
        };
        NameCard {
            name: full_name,
            pronunciation,
            source: attribution,
            original_verse: or_default(&record.content, MISSING_VERSE),
            meaning,
            line_cn: String::new(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn generate<R: Rng + ?Sized>(&self, request: &GenerationRequest, rng: &mut R) -> GenerationOutcome {
        let per_source_target = request.per_source_target();
        let global_cap = request.global_cap();
        let mut state = SelectionState::default();
        let mut accepted: Vec<NameCard> = Vec::new();

        'sources: for source in &request.sources {
            let mut records = match self.store.records_by_source(source) {
                Ok(records) => records,
                Err(err) => {
                    warn!("Skipping source {}: {:#}", source, err);
                    continue;
                }
            };
            debug!("Loaded {} records from {}", records.len(), source);
            records.shuffle(rng);

            for record in &records {
                if state.source_count(source) >= per_source_target {
                    break;
                }
                let text = record.mining_text();
                if text.is_empty() {
                    continue;
                }

                let mut candidates = self.extractor.extract(text, request.length, rng);
                candidates.shuffle(rng);
                let poem_key = record.poem_key();

                for candidate in candidates {
                    if state.source_count(source) >= per_source_target {
                        break;
                    }
                    if state.poem_count(&poem_key) >= PER_POEM_MAX {
                        break;
                    }
                    let full_name = format!("{}{}", request.surname, candidate);
                    if state.picked_name_set.contains(&full_name) {
                        continue;
                    }

                    let card = self.build_card(full_name.clone(), record, source, rng);
                    accepted.push(card);
                    state.record_pick(source, &poem_key, full_name);

                    if accepted.len() >= global_cap {
                        debug!("Reached the cap of {} accepted names", global_cap);
                        break 'sources;
                    }
                }
            }
        }

        let total_candidates = accepted.len();
        let mut seen = HashSet::new();
        let mut cards: Vec<NameCard> = accepted
            .into_iter()
            .filter(|card| seen.insert(card.name.clone()))
            .collect();
        let unique_count = cards.len();
        cards.truncate(request.size);

        for card in &mut cards {
            let given = card
                .name
                .strip_prefix(request.surname.as_str())
                .unwrap_or(&card.name);
            card.line_cn = extract_line(&card.original_verse, given);
        }

        let sources_used: Vec<String> = request
            .sources
            .iter()
            .filter(|source| cards.iter().any(|card| &card.source.source_set == *source))
            .cloned()
            .collect();
        let mut message = format!("按所选来源生成：{}", request.sources.join("、"));
        if cards.len() < request.size {
            message.push_str(&format!(
                "（候选不足，仅生成 {} / {} 个）",
                cards.len(),
                request.size
            ));
        }

        info!(
            "Generated {} names for surname {} ({} raw, {} unique, sources {:?})",
            cards.len(),
            request.surname,
            total_candidates,
            unique_count,
            request.sources
        );

        GenerationOutcome {
            stats: GenerationStats {
                total_candidates,
                selected_count: cards.len(),
                unique_count,
                sources_used,
                message,
            },
            cards,
        }
    }
}
