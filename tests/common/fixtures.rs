//! Test fixture creation for the corpus and its databases
//!
//! The raw corpus goes through the same sanitize and import steps as
//! production data, so every server test also covers ingestion.

use super::constants::*;
use anyhow::Result;
use guchi_name_server::blacklist::BlacklistMatcher;
use guchi_name_server::corpus::{
    import_dir, SanitizeReport, SqliteCorpusStore, TextSanitizer, CORPUS_DB_FILE,
};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Paths of a prepared corpus. Dropping `dir` removes everything.
pub struct TestCorpus {
    pub dir: TempDir,
    pub raw_dir: PathBuf,
    pub clean_dir: PathBuf,
    pub db_dir: PathBuf,
    pub blacklist_path: PathBuf,
    pub sanitize_report: SanitizeReport,
}

impl TestCorpus {
    pub fn db_path(&self) -> PathBuf {
        self.db_dir.join(CORPUS_DB_FILE)
    }
}

/// Writes the raw test corpus: three rich sources (one record of tangshi
/// holds a forbidden word), a sparse source and one malformed file.
pub fn write_raw_corpus(raw_dir: &Path) -> Result<()> {
    fs::create_dir_all(raw_dir)?;

    let tangshi = json!([
        {
            "title": "春晓",
            "author": "孟浩然",
            "dynasty": "唐",
            "content": "春眠不觉晓，处处闻啼鸟。夜来风雨声，花落知多少。"
        },
        {
            "title": "登鹳雀楼",
            "author": "王之涣",
            "dynasty": "唐",
            "content": "白日依山尽，黄河入海流。欲穷千里目，更上一层楼。"
        },
        {
            "title": DROPPED_TITLE,
            "author": "无名",
            "content": "清风明月死"
        }
    ]);
    // Alternate keys are resolved by the normalizer.
    let songci = json!([
        {
            "name": KNOWN_TITLE,
            "poet": "苏轼",
            "era": "宋",
            "paragraphs": ["明月几时有，把酒问青天。", "不知天上宫阙，今夕是何年。"]
        },
        {
            "title": "如梦令",
            "author": "李清照",
            "dynasty": "宋",
            "content": "常记溪亭日暮，沉醉不知归路。兴尽晚回舟，误入藕花深处。"
        }
    ]);
    let shijing = json!([
        {
            "title": "关雎",
            "dynasty": "周",
            "text": "关关雎鸠，在河之洲。窈窕淑女，君子好逑。"
        },
        {
            "title": "蒹葭",
            "dynasty": "周",
            "text": "蒹葭苍苍，白露为霜。所谓伊人，在水一方。"
        }
    ]);
    let sparse = json!({ "title": "断章", "content": "风" });

    fs::write(raw_dir.join(format!("{SOURCE_TANGSHI}.json")), tangshi.to_string())?;
    fs::write(raw_dir.join(format!("{SOURCE_SONGCI}.json")), songci.to_string())?;
    fs::write(raw_dir.join(format!("{SOURCE_SHIJING}.json")), shijing.to_string())?;
    fs::write(raw_dir.join(format!("{SOURCE_SPARSE}.json")), sparse.to_string())?;
    fs::write(raw_dir.join(BROKEN_FILE), "{ not json")?;
    Ok(())
}

pub fn write_blacklist(path: &Path) -> Result<()> {
    fs::write(path, serde_json::to_string(BLACKLIST_WORDS)?)?;
    Ok(())
}

/// Creates a sanitized and imported test corpus in a temporary directory.
pub fn create_test_corpus() -> Result<TestCorpus> {
    let dir = TempDir::new()?;
    let raw_dir = dir.path().join("raw");
    let clean_dir = dir.path().join("clean");
    let db_dir = dir.path().join("db");
    let blacklist_path = dir.path().join("blacklist.json");
    fs::create_dir_all(&db_dir)?;

    write_raw_corpus(&raw_dir)?;
    write_blacklist(&blacklist_path)?;

    let matcher = Arc::new(BlacklistMatcher::load(&blacklist_path)?);
    let sanitize_report = TextSanitizer::new(matcher).sanitize_dir(&raw_dir, &clean_dir)?;

    let store = SqliteCorpusStore::new(db_dir.join(CORPUS_DB_FILE))?;
    import_dir(&store, &clean_dir, |_| {})?;

    Ok(TestCorpus {
        dir,
        raw_dir,
        clean_dir,
        db_dir,
        blacklist_path,
        sanitize_report,
    })
}
