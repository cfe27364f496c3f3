//! SQLite schema of the corpus database.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};

// =============================================================================
// Version 1 - Works and their full-text index
// =============================================================================

const WORKS_TABLE_V1: Table = Table {
    name: "works",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true, default_value = Some("''")),
        sqlite_column!("author", &SqlType::Text, non_null = true, default_value = Some("''")),
        sqlite_column!("dynasty", &SqlType::Text, non_null = true, default_value = Some("''")),
        sqlite_column!("genre", &SqlType::Text, non_null = true, default_value = Some("''")),
        sqlite_column!("source", &SqlType::Text, non_null = true),
        sqlite_column!("content", &SqlType::Text, non_null = true, default_value = Some("''")),
    ],
    indices: &[("idx_works_source", "source")],
};

/// External-content FTS5 index over `works`, repopulated by
/// `SqliteCorpusStore::rebuild_fts`.
pub const WORKS_FTS_SQL: &str = "CREATE VIRTUAL TABLE IF NOT EXISTS works_fts USING fts5(
    title, author, content, content='works', content_rowid='id'
);";

pub const CORPUS_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 1,
    tables: &[WORKS_TABLE_V1],
    extra_sql: WORKS_FTS_SQL,
    migration: None,
}];
