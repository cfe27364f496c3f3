//! The poetic corpus: record normalization, offline sanitization, import and
//! SQLite-backed lookup.

mod importer;
mod record;
mod sanitizer;
mod schema;
mod store;

pub use importer::{import_dir, ImportReport};
pub use record::{normalize_record, CorpusRecord, FieldRule, NormalizeError, ANONYMOUS_AUTHOR, UNKNOWN_LABEL};
pub use sanitizer::{
    clean_text, list_json_files, split_sentences, FileReport, IngestionError, SanitizeReport,
    SanitizedEntry, SanitizedRecord, TextSanitizer,
};
pub use store::{CorpusStore, SearchOrder, SqliteCorpusStore, WorkRow};

/// File name of the corpus database inside a database directory.
pub const CORPUS_DB_FILE: &str = "corpus.db";
