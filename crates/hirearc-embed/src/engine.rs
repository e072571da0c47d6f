//! The embedding engine: a process-wide handle around a local ONNX text
//! embedding model, backed by an LRU content-hash cache.

use std::path::PathBuf;
use std::sync::Mutex;

use fastembed::{EmbeddingModel, TextEmbedding, TextInitOptions};
use hirearc_core::consts::{EMBEDDING_DIM, FILLER_RESPONSIBILITY, FILLER_SKILL};
use hirearc_core::{Bundle, StandardizedInfo};
use tracing::{debug, warn};

use crate::cache::{EmbedCache, DEFAULT_CAPACITY};
use crate::error::EmbedError;
use crate::similarity::normalize_l2;

/// Directory fastembed persists downloaded model weights to, analogous to
/// the teacher's `~/.zenith/cache/fastembed/` convention.
fn default_cache_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hirearc")
        .join("cache")
        .join("fastembed")
}

/// Local text embedding engine. The underlying `fastembed::TextEmbedding`
/// requires `&mut self` for every call, so it's held behind a `Mutex` to
/// give the engine a `&self` API that's safe to share across worker tasks.
pub struct EmbeddingEngine {
    model: Mutex<TextEmbedding>,
    cache: EmbedCache,
    dim: usize,
}

impl EmbeddingEngine {
    /// Load the embedding model, downloading it to `cache_dir` (or the
    /// default `~/.hirearc/cache/fastembed/`) on first use.
    ///
    /// Uses `BAAI/bge-base-en-v1.5` (fastembed's `BGEBaseENV15`), the
    /// 768-dimension model matching [`EMBEDDING_DIM`].
    pub fn new(cache_dir: Option<PathBuf>) -> Result<Self, EmbedError> {
        Self::with_capacity(cache_dir, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(cache_dir: Option<PathBuf>, cache_capacity: usize) -> Result<Self, EmbedError> {
        let dir = cache_dir.unwrap_or_else(default_cache_dir);
        let opts = TextInitOptions::new(EmbeddingModel::BGEBaseENV15)
            .with_cache_dir(dir)
            .with_show_download_progress(true);

        let model = TextEmbedding::try_new(opts).map_err(|e| EmbedError::ModelInit(e.to_string()))?;

        Ok(Self {
            model: Mutex::new(model),
            cache: EmbedCache::new(cache_capacity),
            dim: EMBEDDING_DIM,
        })
    }

    /// Embed a single piece of text, substituting nothing: an
    /// empty/whitespace-only `text` is rejected with `ErrEmptyInput`.
    /// Callers that have a filler string for empty inputs (like
    /// [`Self::embed_document`]) should substitute before calling this.
    pub fn embed_text(&self, text: &str) -> Result<Vec<f64>, EmbedError> {
        if text.trim().is_empty() {
            return Err(EmbedError::EmptyInput);
        }
        let mut vectors = self.embed_many_uncached(std::slice::from_ref(&text.to_string()))?;
        Ok(vectors.remove(0))
    }

    /// Embed a batch of non-empty texts, consulting and populating the
    /// cache per-item. Order of `texts` is preserved in the result.
    fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f64>>, EmbedError> {
        let mut results: Vec<Option<Vec<f64>>> = vec![None; texts.len()];
        let mut misses: Vec<(usize, String)> = Vec::new();

        for (i, text) in texts.iter().enumerate() {
            let key = EmbedCache::key_for(text);
            if let Some(cached) = self.cache.get(key) {
                results[i] = Some(cached);
            } else {
                misses.push((i, text.clone()));
            }
        }

        if !misses.is_empty() {
            let miss_texts: Vec<String> = misses.iter().map(|(_, t)| t.clone()).collect();
            let embedded = self.embed_many_uncached(&miss_texts)?;
            for ((i, text), vector) in misses.into_iter().zip(embedded) {
                self.cache.put(EmbedCache::key_for(&text), vector.clone());
                results[i] = Some(vector);
            }
        }

        Ok(results
            .into_iter()
            .map(|v| v.expect("every index populated by either cache hit or fresh embed"))
            .collect())
    }

    /// Call the model directly, bypassing the cache. Normalizes each
    /// returned vector to unit L2 norm and validates its dimension.
    fn embed_many_uncached(&self, texts: &[String]) -> Result<Vec<Vec<f64>>, EmbedError> {
        if texts.is_empty() {
            return Err(EmbedError::EmptyInput);
        }

        let raw = {
            let mut model = self.model.lock().expect("embedding model mutex poisoned");
            model
                .embed(texts.to_vec(), None)
                .map_err(|e| EmbedError::EmbedFailed(e.to_string()))?
        };

        raw.into_iter()
            .map(|v| {
                let mut v: Vec<f64> = v.into_iter().map(f64::from).collect();
                if v.len() != self.dim {
                    return Err(EmbedError::Shape {
                        expected: self.dim,
                        actual: v.len(),
                    });
                }
                normalize_l2(&mut v);
                Ok(v)
            })
            .collect()
    }

    /// Embed a full standardized document into a [`Bundle`]: 20 skill
    /// vectors, 10 responsibility vectors, 1 experience vector, 1 title
    /// vector, substituting filler text for any blank item so the shape is
    /// always `(20, 10, 1, 1)`.
    pub fn embed_document(&self, info: &StandardizedInfo) -> Result<Bundle, EmbedError> {
        let skill_texts: Vec<String> = info
            .skills
            .iter()
            .map(|s| fill_blank(s, FILLER_SKILL))
            .collect();
        let responsibility_texts: Vec<String> = info
            .responsibilities
            .iter()
            .map(|r| fill_blank(r, FILLER_RESPONSIBILITY))
            .collect();
        let experience_text = info.experience_years.to_string();
        let title_text = fill_blank(&info.job_title, "Professional");

        let skill_vectors = self.embed_many(&skill_texts)?;
        let responsibility_vectors = self.embed_many(&responsibility_texts)?;
        let experience_vector = self.embed_many(std::slice::from_ref(&experience_text))?;
        let title_vector = self.embed_many(std::slice::from_ref(&title_text))?;

        debug!(
            skills = skill_vectors.len(),
            responsibilities = responsibility_vectors.len(),
            "embedded document"
        );

        let bundle = Bundle {
            skill_vectors,
            responsibility_vectors,
            experience_vector: experience_vector.into_iter().next().unwrap_or_default(),
            job_title_vector: title_vector.into_iter().next().unwrap_or_default(),
        };

        if let Err(shape_err) = bundle.validate() {
            warn!(error = %shape_err, "embed_document produced a malformed bundle");
            return Err(EmbedError::Shape {
                expected: self.dim,
                actual: 0,
            });
        }

        Ok(bundle)
    }

    #[must_use]
    pub const fn dim(&self) -> usize {
        self.dim
    }

    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

fn fill_blank(s: &str, filler: &str) -> String {
    if s.trim().is_empty() {
        filler.to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_blank_substitutes_only_when_empty() {
        assert_eq!(fill_blank("  ", "filler"), "filler");
        assert_eq!(fill_blank("Rust", "filler"), "Rust");
        assert_eq!(fill_blank("", "filler"), "filler");
    }

    // Model-dependent tests require downloading the BGEBaseENV15 weights on
    // first run and are skipped in environments without model/network
    // access.
    #[test]
    #[ignore = "requires fastembed model download"]
    fn embed_text_is_deterministic() {
        let engine = EmbeddingEngine::new(None).expect("model loads");
        let a = engine.embed_text("Rust systems programming").unwrap();
        let b = engine.embed_text("Rust systems programming").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    #[ignore = "requires fastembed model download"]
    fn embed_document_produces_valid_bundle_shape() {
        use std::collections::BTreeMap;

        let engine = EmbeddingEngine::new(None).expect("model loads");
        let info = StandardizedInfo::new(
            "Backend Engineer",
            5,
            vec!["Rust".to_string(), "PostgreSQL".to_string()],
            vec!["Design APIs".to_string()],
            None,
            BTreeMap::new(),
        );
        let bundle = engine.embed_document(&info).expect("embeds");
        assert!(bundle.validate().is_ok());
    }
}
