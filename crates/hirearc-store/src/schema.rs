//! `DuckDB` table DDL for the three by-id collections.
//!
//! Embedding vectors are stored as `DOUBLE[]`/`DOUBLE[][]` array columns —
//! not strings — per the bundle contract's IEEE-754 double requirement.
//!
//! No HNSW index is created on the `embeddings` table. DuckDB's `vss`
//! extension documents HNSW persistence across file-backed database reopens
//! as experimental; for collections in the tens of thousands of documents,
//! brute-force `array_cosine_similarity()` at query time is simpler and
//! correct, and is what the auxiliary `index_vector` column exists for.

// `uploaded_at` is stored as an RFC 3339 string rather than DuckDB's native
// `TIMESTAMP`, to avoid that type's lack of a timezone offset component —
// `chrono::DateTime<Utc>::to_rfc3339`/`parse_from_rfc3339` round-trips
// exactly, which an implicit cast through DuckDB's own parser might not.
pub const CREATE_DOCUMENTS: &str = "
CREATE TABLE IF NOT EXISTS documents (
    id TEXT NOT NULL,
    kind TEXT NOT NULL,
    filename TEXT NOT NULL,
    format TEXT NOT NULL,
    raw_text TEXT NOT NULL,
    uploaded_at TEXT NOT NULL,
    file_uri TEXT,
    mime TEXT,
    PRIMARY KEY (id)
);
";

// `payload` is stored as serialized JSON text rather than DuckDB's native
// `JSON` column type, so this crate doesn't need the `json` extension
// loaded; the standardized-info round-trip only ever needs `serde_json`
// on the Rust side.
pub const CREATE_STRUCTURED: &str = "
CREATE TABLE IF NOT EXISTS structured (
    id TEXT NOT NULL,
    kind TEXT NOT NULL,
    payload TEXT NOT NULL,
    PRIMARY KEY (id)
);
";

pub const CREATE_EMBEDDINGS: &str = "
CREATE TABLE IF NOT EXISTS embeddings (
    id TEXT NOT NULL,
    kind TEXT NOT NULL,
    skill_vectors DOUBLE[][] NOT NULL,
    responsibility_vectors DOUBLE[][] NOT NULL,
    experience_vector DOUBLE[] NOT NULL,
    job_title_vector DOUBLE[] NOT NULL,
    index_vector DOUBLE[] NOT NULL,
    PRIMARY KEY (id)
);
";

pub const CREATE_INDEXES: &str = "
CREATE INDEX IF NOT EXISTS idx_documents_kind ON documents(kind);
CREATE INDEX IF NOT EXISTS idx_structured_kind ON structured(kind);
CREATE INDEX IF NOT EXISTS idx_embeddings_kind ON embeddings(kind);
";
