//! Match engine and bundle-shape configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct MatchingConfig {
    #[serde(default = "default_weights")]
    pub weights_default: (f64, f64, f64, f64),
    #[serde(default = "default_skill_report_threshold")]
    pub skill_report_threshold: f64,
    #[serde(default = "default_resp_report_threshold")]
    pub resp_report_threshold: f64,
    #[serde(default = "default_embedding_dim")]
    pub embedding_dim: usize,
    #[serde(default = "default_skills_count")]
    pub skills_count: usize,
    #[serde(default = "default_responsibilities_count")]
    pub responsibilities_count: usize,
}

const fn default_weights() -> (f64, f64, f64, f64) {
    (0.80, 0.15, 0.025, 0.025)
}
const fn default_skill_report_threshold() -> f64 {
    0.50
}
const fn default_resp_report_threshold() -> f64 {
    0.45
}
const fn default_embedding_dim() -> usize {
    768
}
const fn default_skills_count() -> usize {
    20
}
const fn default_responsibilities_count() -> usize {
    10
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights_default: default_weights(),
            skill_report_threshold: default_skill_report_threshold(),
            resp_report_threshold: default_resp_report_threshold(),
            embedding_dim: default_embedding_dim(),
            skills_count: default_skills_count(),
            responsibilities_count: default_responsibilities_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_configuration_surface() {
        let c = MatchingConfig::default();
        assert_eq!(c.weights_default, (0.80, 0.15, 0.025, 0.025));
        assert!((c.skill_report_threshold - 0.50).abs() < f64::EPSILON);
        assert!((c.resp_report_threshold - 0.45).abs() < f64::EPSILON);
        assert_eq!(c.embedding_dim, 768);
        assert_eq!(c.skills_count, 20);
        assert_eq!(c.responsibilities_count, 10);
    }
}
