//! Entity structs for the hirearc data model.
//!
//! All structs derive `Serialize`/`Deserialize` for JSON roundtrip; entities
//! exposed through the CLI additionally derive `JsonSchema`.

mod bundle;
mod job;
mod match_result;
mod standardized;

pub use bundle::Bundle;
pub use job::{ApplicationData, Job, JobError};
pub use match_result::{Assignment, MatchResult, UnmatchedItem};
pub use standardized::{parse_experience_years, StandardizedInfo};
