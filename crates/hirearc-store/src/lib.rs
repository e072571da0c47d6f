//! # hirearc-store
//!
//! The vector store adapter (C2): a thin by-id key/value interface over an
//! embedded DuckDB database, split into three logical collections per
//! document — `documents` (raw text and file metadata), `structured` (the
//! standardized info), and `embeddings` (the 32-vector bundle).
//!
//! `DuckDB`'s synchronous API means every method here blocks; callers on an
//! async runtime should dispatch through `tokio::task::spawn_blocking`, the
//! same way they do for `hirearc-embed`.

mod error;
mod retry;
mod schema;
mod store;
mod types;
mod vectors;

pub use error::StoreError;
pub use store::VectorStore;
pub use types::{DocumentRecord, ScrollEntry};
