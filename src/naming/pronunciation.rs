use anyhow::Result;
use pinyin::ToPinyin;

pub trait Romanizer: Send + Sync {
    fn romanize(&self, text: &str) -> Result<String>;
}

/// Tone-marked pinyin, one capitalized syllable per character. Runs of other
/// characters are kept verbatim as their own token.
pub struct PinyinRomanizer;

fn capitalize(syllable: &str) -> String {
    let mut chars = syllable.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Romanizer for PinyinRomanizer {
    fn romanize(&self, text: &str) -> Result<String> {
        let mut tokens: Vec<String> = Vec::new();
        let mut rest = String::new();
        for c in text.chars() {
            match c.to_pinyin() {
                Some(pinyin) => {
                    if !rest.is_empty() {
                        tokens.push(std::mem::take(&mut rest));
                    }
                    tokens.push(capitalize(pinyin.with_tone()));
                }
                None if c.is_whitespace() => {
                    if !rest.is_empty() {
                        tokens.push(std::mem::take(&mut rest));
                    }
                }
                None => rest.push(c),
            }
        }
        if !rest.is_empty() {
            tokens.push(rest);
        }
        Ok(tokens.join(" "))
    }
}
