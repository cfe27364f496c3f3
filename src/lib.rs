//! Guchi Name Server Library
//!
//! This library exposes the internal modules for the binaries, testing and potential reuse.

pub mod blacklist;
pub mod config;
pub mod corpus;
pub mod naming;
pub mod server;
pub mod sqlite_persistence;
pub mod translation;

// Re-export commonly used types for convenience
pub use blacklist::{BlacklistMatcher, ConfigError};
pub use corpus::{CorpusStore, SqliteCorpusStore};
pub use naming::{GenerationRequest, NameCard, SelectionAllocator};
pub use server::{make_app, run_server, RequestsLoggingLevel};
