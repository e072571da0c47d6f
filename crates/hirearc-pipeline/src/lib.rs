//! # hirearc-pipeline
//!
//! The ingestion pipeline (C4): turns one application submission into a
//! persisted, embedded bundle. Orchestrates three out-of-scope
//! collaborators — a file parser, an LLM-backed standardizer, and a JD
//! metadata store — around this workspace's own [`hirearc_embed`] and
//! [`hirearc_store`] crates. Holds no retry logic of its own; a permanently
//! failed [`process`](pipeline::IngestionPipeline::process) call fails fast
//! with the offending step recorded on the error, leaving retries to the
//! job queue that calls it.

mod error;
mod pipeline;
mod traits;

pub use error::PipelineError;
pub use pipeline::IngestionPipeline;
pub use traits::{JdMeta, MetadataStore, Parser, ParsedDocument, Standardizer};
