//! # hirearc-match
//!
//! The deterministic match engine (C3): given a CV bundle and a JD bundle,
//! computes per-class sub-scores via exact linear assignment, an overall
//! weighted score, and an explanation — with no stored state and no
//! randomness, so identical inputs always produce identical results.

mod assignment;
mod error;
mod explanation;
mod matcher;
mod scoring;
mod similarity;
mod weights;

pub use error::MatchError;
pub use matcher::{match_pair, rank, Candidate};
pub use scoring::{score_class, ClassResult};
pub use similarity::{cos, similarity_matrix};
pub use weights::Weights;
