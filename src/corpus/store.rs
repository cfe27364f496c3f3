//! Corpus persistence on SQLite with an FTS5 index.

use super::record::CorpusRecord;
use super::schema::CORPUS_VERSIONED_SCHEMAS;
use crate::sqlite_persistence::BASE_DB_VERSION;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, ToSql};
use serde::Serialize;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, warn};

const LIKE_EXCERPT_LEAD: i64 = 12;
const LIKE_EXCERPT_LEN: i64 = 50;
const SAMPLE_EXCERPT_LEN: i64 = 60;

/// A work as listed by search and sampling, with a short excerpt instead of
/// the full content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub dynasty: String,
    pub genre: String,
    pub source: String,
    pub excerpt: String,
}

/// Which matching strategy a search tries first. The other one is only used
/// when the first yields nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrder {
    SubstringFirst,
    FullTextFirst,
}

pub trait CorpusStore: Send + Sync {
    /// All records of one source, in insertion order.
    fn records_by_source(&self, source_tag: &str) -> Result<Vec<CorpusRecord>>;

    fn search(
        &self,
        query: &str,
        limit: usize,
        sources: &[String],
        order: SearchOrder,
    ) -> Result<Vec<WorkRow>>;

    /// Random works, optionally restricted to some sources.
    fn sample(&self, limit: usize, sources: &[String]) -> Result<Vec<WorkRow>>;

    fn works_count(&self) -> Result<usize>;

    /// Number of works per source, sorted by source name.
    fn source_counts(&self) -> Result<Vec<(String, usize)>>;
}

pub struct SqliteCorpusStore {
    conn: Mutex<Connection>,
}

impl SqliteCorpusStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let path = db_path.as_ref();
        let is_new_db = !path.exists();

        let mut conn = Connection::open(path).context("Failed to open corpus database")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        if is_new_db {
            info!("Creating new corpus database at {:?}", path);
            Self::create_latest(&conn)?;
        } else {
            Self::migrate_if_needed(&mut conn)?;
        }

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn create_latest(conn: &Connection) -> Result<()> {
        CORPUS_VERSIONED_SCHEMAS
            .last()
            .context("No corpus schema defined")?
            .create(conn)
    }

    fn migrate_if_needed(conn: &mut Connection) -> Result<()> {
        let raw_version: i64 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        let db_version = raw_version - BASE_DB_VERSION as i64;
        if db_version < 1 {
            anyhow::bail!(
                "Corpus database version {} is invalid (expected >= 1)",
                db_version
            );
        }

        let schema = CORPUS_VERSIONED_SCHEMAS
            .iter()
            .find(|s| s.version == db_version as usize)
            .with_context(|| format!("Unknown corpus database version {}", db_version))?;
        schema.validate(conn).with_context(|| {
            format!(
                "Corpus database schema validation failed for version {}",
                db_version
            )
        })?;

        let tx = conn.transaction()?;
        let from_version = db_version as usize;
        let mut latest_from = from_version;
        for schema in CORPUS_VERSIONED_SCHEMAS
            .iter()
            .filter(|s| s.version > from_version)
        {
            info!(
                "Running corpus database migration from version {} to {}",
                latest_from, schema.version
            );
            if let Some(migration_fn) = schema.migration {
                migration_fn(&tx).with_context(|| {
                    format!("Failed to run migration to version {}", schema.version)
                })?;
            }
            latest_from = schema.version;
        }
        tx.execute(
            &format!("PRAGMA user_version = {}", BASE_DB_VERSION + latest_from),
            [],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Replaces every work of `source_tag` with `records` in one transaction.
    /// The records' own source tags are ignored.
    pub fn replace_source_records(&self, source_tag: &str, records: &[CorpusRecord]) -> Result<usize> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        let deleted = tx.execute("DELETE FROM works WHERE source = ?1", params![source_tag])?;
        if deleted > 0 {
            debug!("Replacing {} existing works of {}", deleted, source_tag);
        }
        {
            let mut stmt = tx.prepare(
                "INSERT INTO works (title, author, dynasty, genre, source, content)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.title,
                    record.author,
                    record.dynasty,
                    record.genre,
                    source_tag,
                    record.content
                ])?;
            }
        }
        tx.commit()?;
        Ok(records.len())
    }

    /// Repopulates `works_fts` from the current content of `works`.
    pub fn rebuild_fts(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("INSERT INTO works_fts(works_fts) VALUES('rebuild')", [])
            .context("Failed to rebuild full-text index")?;
        Ok(())
    }

    fn source_filter(sources: &[String], column: &str) -> String {
        if sources.is_empty() {
            String::new()
        } else {
            let placeholders = sources.iter().map(|_| "?").collect::<Vec<_>>().join(",");
            format!(" AND {} IN ({})", column, placeholders)
        }
    }

    fn query_rows(conn: &Connection, sql: &str, params: Vec<Box<dyn ToSql>>) -> Result<Vec<WorkRow>> {
        let mut stmt = conn.prepare(sql)?;
        let param_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let rows = stmt
            .query_map(param_refs.as_slice(), |row| {
                Ok(WorkRow {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    author: row.get(2)?,
                    dynasty: row.get(3)?,
                    genre: row.get(4)?,
                    source: row.get(5)?,
                    excerpt: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn search_substring(conn: &Connection, query: &str, limit: usize, sources: &[String]) -> Result<Vec<WorkRow>> {
        let sql = format!(
            "SELECT id, title, author, dynasty, genre, source,
                    substr(content, max(1, instr(content, ?) - {}), {}) AS excerpt
             FROM works
             WHERE (content LIKE ? OR title LIKE ? OR author LIKE ?){}
             LIMIT ?",
            LIKE_EXCERPT_LEAD,
            LIKE_EXCERPT_LEN,
            Self::source_filter(sources, "source")
        );
        let like = format!("%{}%", query);
        let mut params: Vec<Box<dyn ToSql>> = vec![
            Box::new(query.to_string()),
            Box::new(like.clone()),
            Box::new(like.clone()),
            Box::new(like),
        ];
        for source in sources {
            params.push(Box::new(source.clone()));
        }
        params.push(Box::new(limit as i64));
        Self::query_rows(conn, &sql, params)
    }

    fn search_full_text(conn: &Connection, query: &str, limit: usize, sources: &[String]) -> Result<Vec<WorkRow>> {
        let sql = format!(
            "SELECT w.id, w.title, w.author, w.dynasty, w.genre, w.source,
                    snippet(works_fts, 2, '[', ']', '…', 20) AS excerpt
             FROM works_fts
             JOIN works w ON w.id = works_fts.rowid
             WHERE works_fts MATCH ?{}
             LIMIT ?",
            Self::source_filter(sources, "w.source")
        );
        // Quote as a phrase so FTS5 operators in user input are taken literally
        let escaped_query = format!("\"{}\"", query.replace('"', "\"\""));
        let mut params: Vec<Box<dyn ToSql>> = vec![Box::new(escaped_query)];
        for source in sources {
            params.push(Box::new(source.clone()));
        }
        params.push(Box::new(limit as i64));
        Self::query_rows(conn, &sql, params)
    }
}

impl CorpusStore for SqliteCorpusStore {
    fn records_by_source(&self, source_tag: &str) -> Result<Vec<CorpusRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT title, author, dynasty, genre, source, content
             FROM works WHERE source = ?1 ORDER BY id",
        )?;
        let records = stmt
            .query_map(params![source_tag], |row| {
                Ok(CorpusRecord {
                    title: row.get(0)?,
                    author: row.get(1)?,
                    dynasty: row.get(2)?,
                    genre: row.get(3)?,
                    source_tag: row.get(4)?,
                    content: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn search(
        &self,
        query: &str,
        limit: usize,
        sources: &[String],
        order: SearchOrder,
    ) -> Result<Vec<WorkRow>> {
        let conn = self.conn.lock().unwrap();
        let full_text = || match Self::search_full_text(&conn, query, limit, sources) {
            Ok(rows) => rows,
            Err(err) => {
                warn!("Full-text search for {:?} failed: {}", query, err);
                Vec::new()
            }
        };

        match order {
            SearchOrder::SubstringFirst => {
                let rows = Self::search_substring(&conn, query, limit, sources)?;
                if !rows.is_empty() {
                    return Ok(rows);
                }
                Ok(full_text())
            }
            SearchOrder::FullTextFirst => {
                let rows = full_text();
                if !rows.is_empty() {
                    return Ok(rows);
                }
                Self::search_substring(&conn, query, limit, sources)
            }
        }
    }

    fn sample(&self, limit: usize, sources: &[String]) -> Result<Vec<WorkRow>> {
        let conn = self.conn.lock().unwrap();
        let sql = format!(
            "SELECT id, title, author, dynasty, genre, source,
                    substr(content, 1, {}) AS excerpt
             FROM works
             WHERE 1 = 1{}
             ORDER BY random()
             LIMIT ?",
            SAMPLE_EXCERPT_LEN,
            Self::source_filter(sources, "source")
        );
        let mut params: Vec<Box<dyn ToSql>> = sources
            .iter()
            .map(|s| Box::new(s.clone()) as Box<dyn ToSql>)
            .collect();
        params.push(Box::new(limit as i64));
        Self::query_rows(&conn, &sql, params)
    }

    fn works_count(&self) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM works", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn source_counts(&self) -> Result<Vec<(String, usize)>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT source, COUNT(*) FROM works GROUP BY source ORDER BY source")?;
        let counts = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as usize))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(title: &str, author: &str, content: &str) -> CorpusRecord {
        CorpusRecord {
            title: title.to_string(),
            author: author.to_string(),
            dynasty: "唐".to_string(),
            genre: String::new(),
            source_tag: String::new(),
            content: content.to_string(),
        }
    }

    fn populated_store(dir: &TempDir) -> SqliteCorpusStore {
        let store = SqliteCorpusStore::new(dir.path().join("corpus.db")).unwrap();
        store
            .replace_source_records(
                "tangshi",
                &[
                    record("静夜思", "李白", "床前明月光，疑是地上霜。举头望明月，低头思故乡。"),
                    record("春晓", "孟浩然", "春眠不觉晓，处处闻啼鸟。"),
                ],
            )
            .unwrap();
        store
            .replace_source_records("songci", &[record("水调歌头", "苏轼", "明月几时有，把酒问青天。")])
            .unwrap();
        store.rebuild_fts().unwrap();
        store
    }

    #[test]
    fn records_by_source_returns_full_records() {
        let dir = TempDir::new().unwrap();
        let store = populated_store(&dir);

        let records = store.records_by_source("tangshi").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "静夜思");
        assert_eq!(records[0].source_tag, "tangshi");
        assert!(store.records_by_source("missing").unwrap().is_empty());
    }

    #[test]
    fn replacing_a_source_drops_its_previous_works() {
        let dir = TempDir::new().unwrap();
        let store = populated_store(&dir);

        store
            .replace_source_records("tangshi", &[record("登鹳雀楼", "王之涣", "白日依山尽")])
            .unwrap();
        assert_eq!(store.works_count().unwrap(), 2);
        assert_eq!(
            store.source_counts().unwrap(),
            vec![("songci".to_string(), 1), ("tangshi".to_string(), 1)]
        );
    }

    #[test]
    fn substring_search_returns_excerpt_and_honors_sources() {
        let dir = TempDir::new().unwrap();
        let store = populated_store(&dir);

        let rows = store
            .search("明月", 10, &[], SearchOrder::SubstringFirst)
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.excerpt.contains("明月")));

        let rows = store
            .search("明月", 10, &["songci".to_string()], SearchOrder::SubstringFirst)
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].author, "苏轼");
    }

    #[test]
    fn full_text_first_falls_back_to_substring() {
        let dir = TempDir::new().unwrap();
        let store = populated_store(&dir);

        // "啼鸟" sits inside a longer FTS token, only the substring scan finds it
        let rows = store
            .search("啼鸟", 10, &[], SearchOrder::FullTextFirst)
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "春晓");
    }

    #[test]
    fn full_text_matches_whole_tokens() {
        let dir = TempDir::new().unwrap();
        let store = populated_store(&dir);

        let rows = store
            .search("苏轼", 10, &[], SearchOrder::FullTextFirst)
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "水调歌头");
    }

    #[test]
    fn search_without_matches_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = populated_store(&dir);
        let rows = store
            .search("不存在", 10, &[], SearchOrder::SubstringFirst)
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn sample_respects_limit_and_sources() {
        let dir = TempDir::new().unwrap();
        let store = populated_store(&dir);

        assert_eq!(store.sample(1, &[]).unwrap().len(), 1);
        let rows = store.sample(10, &["tangshi".to_string()]).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.source == "tangshi"));
    }

    #[test]
    fn reopening_validates_existing_schema() {
        let dir = TempDir::new().unwrap();
        {
            populated_store(&dir);
        }
        let store = SqliteCorpusStore::new(dir.path().join("corpus.db")).unwrap();
        assert_eq!(store.works_count().unwrap(), 3);
    }
}
