//! The by-id document/structured/embeddings store over an embedded DuckDB
//! file (or an in-memory database for tests).

use std::path::Path;
use std::sync::Mutex;

use duckdb::{params, Connection};
use hirearc_core::{Bundle, DocumentId, DocumentKind, StandardizedInfo};
use tracing::error;

use crate::error::StoreError;
use crate::retry::{with_retry, RetryConfig};
use crate::schema::{CREATE_DOCUMENTS, CREATE_EMBEDDINGS, CREATE_INDEXES, CREATE_STRUCTURED};
use crate::types::{DocumentRecord, ScrollEntry};
use crate::vectors::{nested_vec_to_sql, parse_flat_list, parse_nested_list, vec_to_sql};

pub struct VectorStore {
    conn: Mutex<Connection>,
    retry: RetryConfig,
}

impl VectorStore {
    /// Open (creating if absent) a file-backed store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// An ephemeral in-memory store, for tests and short-lived tooling.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(CREATE_DOCUMENTS)?;
        conn.execute_batch(CREATE_STRUCTURED)?;
        conn.execute_batch(CREATE_EMBEDDINGS)?;
        conn.execute_batch(CREATE_INDEXES)?;
        Ok(Self {
            conn: Mutex::new(conn),
            retry: RetryConfig::default(),
        })
    }

    // ── documents ────────────────────────────────────────────────────────

    pub fn put_document(
        &self,
        id: DocumentId,
        kind: DocumentKind,
        record: &DocumentRecord,
    ) -> Result<(), StoreError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        with_retry(&self.retry, || {
            conn.execute(
                "INSERT OR REPLACE INTO documents
                 (id, kind, filename, format, raw_text, uploaded_at, file_uri, mime)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    id.to_string(),
                    kind.as_str(),
                    record.filename,
                    record.format,
                    record.raw_text,
                    record.uploaded_at.to_rfc3339(),
                    record.file_uri,
                    record.mime,
                ],
            )
        })?;
        Ok(())
    }

    pub fn get_document(
        &self,
        id: DocumentId,
        kind: DocumentKind,
    ) -> Result<DocumentRecord, StoreError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let row = conn
            .query_row(
                "SELECT filename, format, raw_text, uploaded_at, file_uri, mime
                 FROM documents WHERE id = ?",
                params![id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, Option<String>>(4)?,
                        row.get::<_, Option<String>>(5)?,
                    ))
                },
            )
            .map_err(|_| StoreError::NotFound {
                collection: "documents",
                kind,
                id: id.to_string(),
            })?;

        let uploaded_at = chrono::DateTime::parse_from_rfc3339(&row.3)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .unwrap_or_else(|_| chrono::Utc::now());

        Ok(DocumentRecord {
            filename: row.0,
            format: row.1,
            raw_text: row.2,
            uploaded_at,
            file_uri: row.4,
            mime: row.5,
        })
    }

    // ── structured ───────────────────────────────────────────────────────

    pub fn put_structured(
        &self,
        id: DocumentId,
        kind: DocumentKind,
        info: &StandardizedInfo,
    ) -> Result<(), StoreError> {
        let payload = serde_json::to_string(info)?;
        let conn = self.conn.lock().expect("store mutex poisoned");
        with_retry(&self.retry, || {
            conn.execute(
                "INSERT OR REPLACE INTO structured (id, kind, payload) VALUES (?, ?, ?)",
                params![id.to_string(), kind.as_str(), payload],
            )
        })?;
        Ok(())
    }

    pub fn get_structured(
        &self,
        id: DocumentId,
        kind: DocumentKind,
    ) -> Result<StandardizedInfo, StoreError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let payload: String = conn
            .query_row(
                "SELECT payload FROM structured WHERE id = ?",
                params![id.to_string()],
                |row| row.get(0),
            )
            .map_err(|_| StoreError::NotFound {
                collection: "structured",
                kind,
                id: id.to_string(),
            })?;
        Ok(serde_json::from_str(&payload)?)
    }

    // ── embeddings ───────────────────────────────────────────────────────

    /// Store all 32 vectors of `bundle` under a single record, plus an
    /// auxiliary `index_vector` (the title vector) for collection-level
    /// semantic queries.
    pub fn put_bundle(
        &self,
        id: DocumentId,
        kind: DocumentKind,
        bundle: &Bundle,
    ) -> Result<(), StoreError> {
        bundle.validate().map_err(|e| StoreError::Shape(e.message))?;

        let skill_sql = nested_vec_to_sql(&bundle.skill_vectors);
        let resp_sql = nested_vec_to_sql(&bundle.responsibility_vectors);
        let exp_sql = vec_to_sql(&bundle.experience_vector);
        let title_sql = vec_to_sql(&bundle.job_title_vector);
        let index_sql = title_sql.clone();

        let conn = self.conn.lock().expect("store mutex poisoned");
        with_retry(&self.retry, || {
            conn.execute(
                "INSERT OR REPLACE INTO embeddings
                 (id, kind, skill_vectors, responsibility_vectors, experience_vector,
                  job_title_vector, index_vector)
                 VALUES (?, ?, ?::DOUBLE[][], ?::DOUBLE[][], ?::DOUBLE[], ?::DOUBLE[], ?::DOUBLE[])",
                params![
                    id.to_string(),
                    kind.as_str(),
                    skill_sql,
                    resp_sql,
                    exp_sql,
                    title_sql,
                    index_sql,
                ],
            )
        })?;
        Ok(())
    }

    /// Returns exactly `(20, 10, 1, 1)` vectors in stored order.
    pub fn get_bundle(&self, id: DocumentId, kind: DocumentKind) -> Result<Bundle, StoreError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let row = conn
            .query_row(
                "SELECT skill_vectors::VARCHAR, responsibility_vectors::VARCHAR,
                        experience_vector::VARCHAR, job_title_vector::VARCHAR
                 FROM embeddings WHERE id = ?",
                params![id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .map_err(|_| StoreError::NotFound {
                collection: "embeddings",
                kind,
                id: id.to_string(),
            })?;

        let bundle = Bundle {
            skill_vectors: parse_nested_list(&row.0),
            responsibility_vectors: parse_nested_list(&row.1),
            experience_vector: parse_flat_list(&row.2),
            job_title_vector: parse_flat_list(&row.3),
        };

        bundle
            .validate()
            .map_err(|e| StoreError::Shape(e.message))?;
        Ok(bundle)
    }

    // ── delete / scroll ──────────────────────────────────────────────────

    /// Removes all three records for `id`. Per-collection failures are
    /// logged individually; overall success is reported only if every
    /// collection's delete succeeded.
    pub fn delete(&self, id: DocumentId, kind: DocumentKind) -> Result<(), StoreError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let id_str = id.to_string();
        let mut failed = Vec::new();

        for (collection, sql) in [
            ("documents", "DELETE FROM documents WHERE id = ?"),
            ("structured", "DELETE FROM structured WHERE id = ?"),
            ("embeddings", "DELETE FROM embeddings WHERE id = ?"),
        ] {
            if let Err(e) = conn.execute(sql, params![id_str]) {
                error!(collection, error = %e, "delete failed for {id_str}");
                failed.push(collection);
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(StoreError::PartialDelete {
                kind,
                id: id_str,
                failed,
            })
        }
    }

    /// Lists every document of `kind`, in insertion order, as `(id, filename)`
    /// pairs. Materializes eagerly rather than streaming: `duckdb`'s row
    /// iterator borrows the statement for its lifetime, which doesn't cross
    /// a method boundary cleanly without a dedicated cursor type, and
    /// administrative listing doesn't need to avoid that allocation.
    pub fn scroll(&self, kind: DocumentKind) -> Result<Vec<ScrollEntry>, StoreError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, filename FROM documents WHERE kind = ? ORDER BY uploaded_at",
        )?;
        let rows = stmt
            .query_map(params![kind.as_str()], |row| {
                Ok(ScrollEntry {
                    id: row.get(0)?,
                    kind,
                    summary: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
