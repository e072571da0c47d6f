//! `AppContext`: the constructed handles every command handler needs.
//! Built once in `main` via [`crate::bootstrap::init`] and threaded through
//! by shared reference.

use std::sync::Arc;

use hirearc_config::HireConfig;
use hirearc_embed::EmbeddingEngine;
use hirearc_queue::JobQueue;
use hirearc_ratelimit::RateLimiter;
use hirearc_store::VectorStore;

use crate::collaborators::{FileParser, HeuristicStandardizer, InMemoryMetadataStore};

/// This binary's one fixed instantiation of the job queue's generic
/// collaborators (see `collaborators.rs`).
pub type Queue = JobQueue<FileParser, HeuristicStandardizer, InMemoryMetadataStore>;

pub struct AppContext {
    pub config: HireConfig,
    pub store: Arc<VectorStore>,
    pub embed: Arc<EmbeddingEngine>,
    pub metadata: Arc<InMemoryMetadataStore>,
    pub queue: Arc<Queue>,
    pub ratelimit: Arc<RateLimiter>,
}
