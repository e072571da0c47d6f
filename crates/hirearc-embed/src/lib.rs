//! # hirearc-embed
//!
//! Local embedding engine (C1): a single process-wide handle around a
//! `fastembed`-backed ONNX model, producing 768-dimension L2-normalized
//! vectors for skills, responsibilities, experience, and job titles.
//!
//! `fastembed`'s model call is synchronous and CPU/accelerator-bound. This
//! crate exposes a plain blocking API; callers on an async runtime (the
//! ingestion pipeline, the job queue worker pool) are expected to dispatch
//! through `tokio::task::spawn_blocking`.

mod cache;
mod engine;
mod error;
mod similarity;

pub use engine::EmbeddingEngine;
pub use error::EmbedError;
pub use similarity::{cos, cos_matrix, normalize_l2};
