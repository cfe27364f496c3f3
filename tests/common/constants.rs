//! Shared constants for end-to-end tests
//!
//! When the test corpus changes, update only this file and `fixtures.rs`.

// ============================================================================
// Test Corpus
// ============================================================================

/// Forbidden words used to sanitize the test corpus
pub const BLACKLIST_WORDS: &[&str] = &["凶", "死"];

/// Sources holding two well-formed works each
pub const SOURCE_TANGSHI: &str = "tangshi";
pub const SOURCE_SONGCI: &str = "songci";
pub const SOURCE_SHIJING: &str = "shijing";

/// Source whose only work yields a single candidate character
pub const SOURCE_SPARSE: &str = "sparse";

/// Raw file that is not valid JSON and must be skipped by the sanitizer
pub const BROKEN_FILE: &str = "broken.json";

/// Works per rich source after sanitizing
pub const WORKS_PER_RICH_SOURCE: usize = 2;

/// Works in the imported corpus
pub const TOTAL_WORKS: usize = 7;

/// Title of the tangshi record dropped for holding a forbidden word
pub const DROPPED_TITLE: &str = "凶兆";

/// A title that survives sanitizing
pub const KNOWN_TITLE: &str = "水调歌头";

/// Content fragment of `KNOWN_TITLE`
pub const KNOWN_FRAGMENT: &str = "明月";

pub const SURNAME: &str = "李";

// ============================================================================
// Translation Stub
// ============================================================================

/// Text the stub translator answers with an upstream error
pub const UPSTREAM_FAILURE_TEXT: &str = "故障";

/// Status returned by the stub translator for `UPSTREAM_FAILURE_TEXT`
pub const UPSTREAM_FAILURE_STATUS: u16 = 503;

// ============================================================================
// Timeouts
// ============================================================================

/// Max time to wait for the server to accept requests
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Poll interval while waiting for the server
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;

/// Timeout for individual test requests
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
