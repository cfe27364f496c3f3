//! End-to-end tests for the sanitize and import pipeline

mod common;

use common::*;
use guchi_name_server::blacklist::{BlacklistMatcher, ConfigError};
use guchi_name_server::corpus::{import_dir, CorpusStore, SqliteCorpusStore};
use serde_json::Value;

fn read_clean_file(corpus: &TestCorpus, source: &str) -> Vec<Value> {
    let raw = std::fs::read_to_string(corpus.clean_dir.join(format!("{source}.json"))).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_sanitize_report_counts_kept_removed_and_failed() {
    let corpus = create_test_corpus().unwrap();
    let report = &corpus.sanitize_report;

    assert_eq!(report.kept, TOTAL_WORKS);
    assert_eq!(report.removed, 1);
    assert_eq!(report.failed_files, 1);
    assert_eq!(report.files.len(), 5);

    let broken = report
        .files
        .iter()
        .find(|f| f.file == BROKEN_FILE)
        .expect("broken file should be reported");
    assert!(broken.error.is_some());
    assert_eq!(broken.kept, 0);
    assert!(!corpus.clean_dir.join(BROKEN_FILE).exists());
}

#[test]
fn test_sanitized_files_drop_forbidden_records() {
    let corpus = create_test_corpus().unwrap();

    let tangshi = read_clean_file(&corpus, SOURCE_TANGSHI);
    assert_eq!(tangshi.len(), WORKS_PER_RICH_SOURCE);
    assert!(tangshi.iter().all(|entry| entry["title"] != DROPPED_TITLE));
    assert!(tangshi
        .iter()
        .all(|entry| entry["has_bad_word"] == Value::Bool(false)));

    let first = &tangshi[0];
    assert_eq!(first["title"], "春晓");
    assert_eq!(first["cleaned_text"], "春眠不觉晓处处闻啼鸟夜来风雨声花落知多少");
    assert_eq!(first["sentences"].as_array().unwrap().len(), 4);
}

#[test]
fn test_sanitized_files_use_normalized_keys() {
    let corpus = create_test_corpus().unwrap();

    let songci = read_clean_file(&corpus, SOURCE_SONGCI);
    let known = songci
        .iter()
        .find(|entry| entry["title"] == KNOWN_TITLE)
        .expect("known title should survive");
    assert_eq!(known["author"], "苏轼");
    assert_eq!(known["dynasty"], "宋");
    assert!(known["content"].as_str().unwrap().contains(KNOWN_FRAGMENT));

    // A single-object document is written out as a one-element array.
    let sparse = read_clean_file(&corpus, SOURCE_SPARSE);
    assert_eq!(sparse.len(), 1);
    assert_eq!(sparse[0]["title"], "断章");
}

#[test]
fn test_import_counts_per_source() {
    let corpus = create_test_corpus().unwrap();
    let store = SqliteCorpusStore::new(corpus.db_path()).unwrap();

    assert_eq!(store.works_count().unwrap(), TOTAL_WORKS);
    assert_eq!(
        store.source_counts().unwrap(),
        vec![
            (SOURCE_SHIJING.to_string(), WORKS_PER_RICH_SOURCE),
            (SOURCE_SONGCI.to_string(), WORKS_PER_RICH_SOURCE),
            (SOURCE_SPARSE.to_string(), 1),
            (SOURCE_TANGSHI.to_string(), WORKS_PER_RICH_SOURCE),
        ]
    );
}

#[test]
fn test_reimport_replaces_sources() {
    let corpus = create_test_corpus().unwrap();
    let store = SqliteCorpusStore::new(corpus.db_path()).unwrap();

    let mut visited = Vec::new();
    let report = import_dir(&store, &corpus.clean_dir, |source| {
        visited.push(source.to_string())
    })
    .unwrap();

    assert_eq!(report.total, TOTAL_WORKS);
    assert_eq!(report.failed_files, 0);
    assert_eq!(visited.len(), 4);
    assert_eq!(store.works_count().unwrap(), TOTAL_WORKS);
}

#[test]
fn test_missing_blacklist_is_a_config_error() {
    let corpus = create_test_corpus().unwrap();
    let missing = corpus.dir.path().join("nope.json");

    match BlacklistMatcher::load(&missing) {
        Err(ConfigError::Missing(path)) => assert_eq!(path, missing),
        other => panic!("expected a missing-list error, got {:?}", other),
    }

    let matcher = BlacklistMatcher::load(&corpus.blacklist_path).unwrap();
    assert_eq!(matcher.words_count(), BLACKLIST_WORDS.len());
    assert!(!matcher.is_clean(DROPPED_TITLE));
}
