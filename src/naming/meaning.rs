//! Descriptive sentences for accepted names.

use super::charset::is_core_char;
use super::keywords::KeywordRanker;
use super::models::SourceAttribution;
use super::phrases::{phrases_for, style_for, CONNECTORS};
use crate::corpus::ANONYMOUS_AUTHOR;
use lazy_static::lazy_static;
use rand::seq::IndexedRandom;
use rand::Rng;
use regex::Regex;
use std::sync::Arc;
use tracing::warn;

const POEM_KEYWORDS_REQUESTED: usize = 6;
const POEM_KEYWORDS_KEPT: usize = 3;
const POEM_KEYWORD_MAX_CHARS: usize = 3;

const TEMPLATES_WITH_PHRASES: usize = 6;
const TEMPLATES_WITHOUT_PHRASES: usize = 5;

lazy_static! {
    static ref MARKUP: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Removes markup tags and collapses whitespace runs into single spaces.
pub fn strip_markup(text: &str) -> String {
    let without_tags = MARKUP.replace_all(text, "");
    WHITESPACE_RUN
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

pub struct MeaningSynthesizer {
    ranker: Arc<dyn KeywordRanker>,
}

impl MeaningSynthesizer {
    pub fn new(ranker: Arc<dyn KeywordRanker>) -> Self {
        Self { ranker }
    }

    /// Up to three short keywords of the origin text. Failures yield nothing.
    fn poem_keywords(&self, origin_text: &str) -> Vec<String> {
        let text = strip_markup(origin_text);
        if text.is_empty() {
            return Vec::new();
        }
        match self.ranker.top_keywords(&text, POEM_KEYWORDS_REQUESTED) {
            Ok(tokens) => tokens
                .into_iter()
                .filter(|token| {
                    let count = token.chars().count();
                    (1..=POEM_KEYWORD_MAX_CHARS).contains(&count) && token.chars().all(is_core_char)
                })
                .take(POEM_KEYWORDS_KEPT)
                .collect(),
            Err(err) => {
                warn!("Keyword ranking for meaning failed: {}", err);
                Vec::new()
            }
        }
    }

    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        name: &str,
        source: &SourceAttribution,
        origin_text: &str,
        rng: &mut R,
    ) -> String {
        let phrases: Vec<&str> = name
            .chars()
            .filter_map(phrases_for)
            .filter_map(|candidates| candidates.choose(rng).copied())
            .collect();

        let style = style_for(&source.source_set);
        let connector_1 = CONNECTORS.choose(rng).copied().unwrap_or("寄托");
        let connector_2 = CONNECTORS.choose(rng).copied().unwrap_or("蕴含");
        let keyword_1 = style.keywords.choose(rng).copied().unwrap_or("风雅");
        let keyword_2 = style.keywords.choose(rng).copied().unwrap_or("清新");
        let author = if source.author.is_empty() {
            ANONYMOUS_AUTHOR
        } else {
            source.author.as_str()
        };
        let title = &source.title;
        let label = style.label;

        if phrases.is_empty() {
            let poem_keywords = self.poem_keywords(origin_text);
            let imagery = if poem_keywords.is_empty() {
                label.to_string()
            } else {
                poem_keywords.join("、")
            };
            return match rng.random_range(0..TEMPLATES_WITHOUT_PHRASES) {
                0 => format!("取意于{author}《{title}》，{label}之美，融入“{imagery}”意象，展现独特气质。"),
                1 => format!("名字映照“{imagery}”的意境，延续《{title}》的神韵，{label}而不失新意。"),
                2 => format!("从《{title}》汲取“{imagery}”之神采，寓意清新而悠远。"),
                3 => format!("承{label}之韵，以“{imagery}”为象，{connector_1}美好祝愿。"),
                _ => format!("源自{author}《{title}》，取“{imagery}”之意象，寓意雅致而悠远。"),
            };
        }

        let joined = phrases.join("、");
        let first = phrases[0];
        let second = phrases.get(1).copied().unwrap_or(first);
        let spelled = name
            .chars()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("、");
        match rng.random_range(0..TEMPLATES_WITH_PHRASES) {
            0 => format!("「{spelled}」字分别寓意{joined}，{label}风格，{connector_1}{first}之志。"),
            1 => format!("源自{author}《{title}》，{label}意境，名字体现{joined}，{connector_2}文化底蕴。"),
            2 => format!("取意{joined}，{label}风格，融合了{keyword_1}与{keyword_2}的意境，寓意深远。"),
            3 => format!("名字{joined}，传承{label}文化精髓，{connector_1}{first}与{second}的美好祝愿。"),
            4 => format!("来自《{title}》的{label}风格，名字寓意{joined}，体现深厚的文学底蕴。"),
            _ => format!("以{joined}为名，{label}风格，象征{first}，承载美好的文化寓意。"),
        }
    }
}
