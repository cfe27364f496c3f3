//! Normalization of heterogeneous corpus JSON into [`CorpusRecord`]s.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Placeholder used on name cards when a record has no title or dynasty.
pub const UNKNOWN_LABEL: &str = "未知";
/// Placeholder used on name cards when a record has no author.
pub const ANONYMOUS_AUTHOR: &str = "佚名";

/// Ordered candidate keys for one logical attribute. The first key holding a
/// non-empty value wins.
pub struct FieldRule {
    pub attribute: &'static str,
    pub keys: &'static [&'static str],
}

pub const TITLE_RULE: FieldRule = FieldRule {
    attribute: "title",
    keys: &["title", "name"],
};
pub const AUTHOR_RULE: FieldRule = FieldRule {
    attribute: "author",
    keys: &["author", "poet", "writer"],
};
pub const DYNASTY_RULE: FieldRule = FieldRule {
    attribute: "dynasty",
    keys: &["dynasty", "era"],
};
pub const GENRE_RULE: FieldRule = FieldRule {
    attribute: "genre",
    keys: &["genre", "form"],
};
pub const CONTENT_RULE: FieldRule = FieldRule {
    attribute: "content",
    keys: &["content", "text", "paragraphs"],
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("record must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusRecord {
    pub title: String,
    pub author: String,
    pub dynasty: String,
    pub genre: String,
    pub source_tag: String,
    pub content: String,
}

impl CorpusRecord {
    /// Identifies the original work inside its source, used to cap picks per
    /// poem.
    pub fn poem_key(&self) -> String {
        format!("{}__{}__{}", self.title, self.author, self.source_tag)
    }

    /// The text candidates are mined from: the content, or the title when a
    /// record carries no content.
    pub fn mining_text(&self) -> &str {
        if self.content.is_empty() {
            &self.title
        } else {
            &self.content
        }
    }

    /// All textual attributes, in the order they are checked for forbidden
    /// words.
    pub fn text_fields(&self) -> [&str; 5] {
        [
            &self.title,
            &self.author,
            &self.dynasty,
            &self.genre,
            &self.content,
        ]
    }
}

impl FieldRule {
    pub fn resolve(&self, object: &Map<String, Value>) -> String {
        self.keys
            .iter()
            .filter_map(|key| object.get(*key))
            .find_map(value_as_text)
            .unwrap_or_default()
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let lines: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if lines.is_empty() {
                None
            } else {
                Some(lines.join("\n"))
            }
        }
        _ => None,
    }
}

/// Builds a record from one raw JSON item. `source_tag` is the collection the
/// item belongs to, normally the stem of its file.
pub fn normalize_record(raw: &Value, source_tag: &str) -> Result<CorpusRecord, NormalizeError> {
    let object = match raw {
        Value::Object(object) => object,
        Value::Null => return Err(NormalizeError::NotAnObject("null")),
        Value::Bool(_) => return Err(NormalizeError::NotAnObject("a boolean")),
        Value::Number(_) => return Err(NormalizeError::NotAnObject("a number")),
        Value::String(_) => return Err(NormalizeError::NotAnObject("a string")),
        Value::Array(_) => return Err(NormalizeError::NotAnObject("an array")),
    };

    Ok(CorpusRecord {
        title: TITLE_RULE.resolve(object),
        author: AUTHOR_RULE.resolve(object),
        dynasty: DYNASTY_RULE.resolve(object),
        genre: GENRE_RULE.resolve(object),
        source_tag: source_tag.to_string(),
        content: CONTENT_RULE.resolve(object),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_fields_by_priority() {
        let raw = json!({
            "name": "静夜思",
            "poet": "李白",
            "writer": "ignored",
            "era": "唐",
            "form": "五言绝句",
            "text": "床前明月光，疑是地上霜。"
        });

        let record = normalize_record(&raw, "tangshi").unwrap();
        assert_eq!(record.title, "静夜思");
        assert_eq!(record.author, "李白");
        assert_eq!(record.dynasty, "唐");
        assert_eq!(record.genre, "五言绝句");
        assert_eq!(record.source_tag, "tangshi");
        assert_eq!(record.content, "床前明月光，疑是地上霜。");
    }

    #[test]
    fn preferred_key_wins_over_fallbacks() {
        let raw = json!({"title": "关雎", "name": "other", "author": "佚名", "poet": "x"});
        let record = normalize_record(&raw, "shijing").unwrap();
        assert_eq!(record.title, "关雎");
        assert_eq!(record.author, "佚名");
    }

    #[test]
    fn empty_values_fall_through_to_next_key() {
        let raw = json!({"title": "", "name": "蒹葭", "content": [], "paragraphs": ["蒹葭苍苍", "白露为霜"]});
        let record = normalize_record(&raw, "shijing").unwrap();
        assert_eq!(record.title, "蒹葭");
        assert_eq!(record.content, "蒹葭苍苍\n白露为霜");
    }

    #[test]
    fn missing_attributes_resolve_to_empty() {
        let record = normalize_record(&json!({}), "gushi").unwrap();
        assert_eq!(record.title, "");
        assert_eq!(record.content, "");
        assert_eq!(record.mining_text(), "");
    }

    #[test]
    fn rejects_non_objects() {
        assert_eq!(
            normalize_record(&json!("text"), "x"),
            Err(NormalizeError::NotAnObject("a string"))
        );
        assert!(normalize_record(&json!([1, 2]), "x").is_err());
    }

    #[test]
    fn poem_key_joins_title_author_and_source() {
        let record = normalize_record(&json!({"title": "春晓", "author": "孟浩然"}), "tangshi").unwrap();
        assert_eq!(record.poem_key(), "春晓__孟浩然__tangshi");
    }
}
