//! Builds an [`AppContext`] from scratch: load config, open the store,
//! load the embedding model, and wire the pipeline, queue, and rate
//! limiter around them.

use std::path::PathBuf;
use std::sync::Arc;

use hirearc_config::HireConfig;
use hirearc_embed::EmbeddingEngine;
use hirearc_pipeline::IngestionPipeline;
use hirearc_queue::JobQueue;
use hirearc_ratelimit::RateLimiter;
use hirearc_store::VectorStore;
use tracing::info;

use crate::collaborators::{FileParser, HeuristicStandardizer, InMemoryMetadataStore};
use crate::context::AppContext;
use crate::error::HirearcError;

/// Writes a default `hirearc.toml` in the current directory (the `init`
/// subcommand). Fails if one already exists rather than overwriting it.
pub fn write_default_config() -> anyhow::Result<PathBuf> {
    let path = PathBuf::from("hirearc.toml");
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    let toml = toml::to_string_pretty(&HireConfig::default())?;
    std::fs::write(&path, toml)?;
    Ok(path)
}

fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("hirearc")
        .join("store.duckdb")
}

/// Loads configuration, opens the store, loads the embedding model, and
/// wires the queue and rate limiter. Heavy (loads an ONNX model and opens a
/// DuckDB file) — called once per process, never per command invocation.
pub async fn init() -> Result<AppContext, HirearcError> {
    let config = HireConfig::load()?;

    let store_path = default_store_path();
    if let Some(parent) = store_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            HirearcError::InvalidInput(format!("creating store directory {}: {e}", parent.display()))
        })?;
    }
    info!(path = %store_path.display(), "opening vector store");
    let store = Arc::new(VectorStore::open(&store_path)?);

    let embed = Arc::new(
        tokio::task::spawn_blocking(|| EmbeddingEngine::new(None))
            .await
            .expect("embedding model load task panicked")?,
    );

    let metadata = Arc::new(InMemoryMetadataStore::new());

    let pipeline = Arc::new(IngestionPipeline::new(
        Arc::new(FileParser),
        Arc::new(HeuristicStandardizer),
        Arc::clone(&metadata),
        Arc::clone(&embed),
        Arc::clone(&store),
    ));

    let queue = Arc::new(JobQueue::new(
        pipeline,
        config.queue,
        config.resources,
    ));

    let ratelimit = Arc::new(RateLimiter::new(config.rate_limit.clone(), config.resources.max_global_concurrent));

    Ok(AppContext {
        config,
        store,
        embed,
        metadata,
        queue,
        ratelimit,
    })
}
