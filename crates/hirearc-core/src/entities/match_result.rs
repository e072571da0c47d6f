use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A one-to-one pairing produced by the assignment solver, with its
/// similarity value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub jd_index: usize,
    pub cv_index: usize,
    pub similarity: f64,
}

/// A JD-side item (skill or responsibility) whose assigned similarity falls
/// below the reporting threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct UnmatchedItem {
    pub jd_index: usize,
    pub similarity: f64,
}

/// The in-memory result of matching one CV against one JD.
///
/// Never persisted; produced fresh on every `match` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub overall: f64,
    pub skills_score: f64,
    pub responsibilities_score: f64,
    pub title_score: f64,
    pub experience_score: f64,

    pub skill_assignments: Vec<Assignment>,
    pub responsibility_assignments: Vec<Assignment>,

    pub unmatched_jd_skills: Vec<UnmatchedItem>,
    pub unmatched_jd_responsibilities: Vec<UnmatchedItem>,

    /// CV skill indices with no assignment at or above the report threshold
    /// from any JD skill — the CV-side complement of `unmatched_jd_skills`.
    pub extra_cv_skills: Vec<usize>,

    pub explanation: String,

    #[serde(with = "duration_millis")]
    pub processing_time: Duration,
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        (d.as_secs_f64() * 1000.0).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let millis = f64::deserialize(d)?;
        Ok(Duration::from_secs_f64(millis / 1000.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_json() {
        let result = MatchResult {
            overall: 87.5,
            skills_score: 90.0,
            responsibilities_score: 85.0,
            title_score: 100.0,
            experience_score: 80.0,
            skill_assignments: vec![Assignment {
                jd_index: 0,
                cv_index: 3,
                similarity: 0.91,
            }],
            responsibility_assignments: vec![],
            unmatched_jd_skills: vec![UnmatchedItem {
                jd_index: 5,
                similarity: 0.2,
            }],
            unmatched_jd_responsibilities: vec![],
            extra_cv_skills: vec![7],
            explanation: "Strong skills match.".to_string(),
            processing_time: Duration::from_millis(42),
        };

        let json = serde_json::to_string(&result).unwrap();
        let back: MatchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
