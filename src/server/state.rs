use axum::extract::FromRef;

use crate::corpus::CorpusStore;
use crate::naming::SelectionAllocator;
use crate::translation::TranslationClient;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedCorpusStore = Arc<dyn CorpusStore>;
pub type GuardedSelectionAllocator = Arc<SelectionAllocator>;
pub type GuardedTranslationClient = Arc<TranslationClient>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub corpus_store: GuardedCorpusStore,
    pub allocator: GuardedSelectionAllocator,
    pub translator: GuardedTranslationClient,
    pub hash: String,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        corpus_store: GuardedCorpusStore,
        allocator: SelectionAllocator,
        translator: TranslationClient,
    ) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            corpus_store,
            allocator: Arc::new(allocator),
            translator: Arc::new(translator),
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

impl FromRef<ServerState> for GuardedCorpusStore {
    fn from_ref(input: &ServerState) -> Self {
        input.corpus_store.clone()
    }
}

impl FromRef<ServerState> for GuardedSelectionAllocator {
    fn from_ref(input: &ServerState) -> Self {
        input.allocator.clone()
    }
}

impl FromRef<ServerState> for GuardedTranslationClient {
    fn from_ref(input: &ServerState) -> Self {
        input.translator.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
