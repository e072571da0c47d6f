use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::consts::{
    DEFAULT_JOB_TITLE, GENERIC_RESPONSIBILITIES, GENERIC_SKILLS, RESPONSIBILITIES_COUNT,
    SKILLS_COUNT,
};

/// The external-LLM-produced record of exactly [`SKILLS_COUNT`] skills and
/// [`RESPONSIBILITIES_COUNT`] responsibilities plus title and experience
/// integer.
///
/// Constructed only via [`StandardizedInfo::new`], which defensively
/// re-normalizes whatever the out-of-scope standardizer collaborator
/// returned: the collaborator's contract already promises exactly 20/10, but
/// the core never trusts that promise blindly.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StandardizedInfo {
    pub job_title: String,
    pub experience_years: u32,
    pub skills: Vec<String>,
    pub responsibilities: Vec<String>,
    pub contact_info: Option<Value>,
    #[serde(default)]
    pub extra: BTreeMap<String, Value>,
}

impl StandardizedInfo {
    /// Build a `StandardizedInfo`, padding/truncating `skills` and
    /// `responsibilities` to their canonical counts and substituting a
    /// default title when empty.
    #[must_use]
    pub fn new(
        job_title: impl Into<String>,
        experience_years: u32,
        skills: Vec<String>,
        responsibilities: Vec<String>,
        contact_info: Option<Value>,
        extra: BTreeMap<String, Value>,
    ) -> Self {
        let job_title = {
            let t = job_title.into();
            if t.trim().is_empty() {
                DEFAULT_JOB_TITLE.to_string()
            } else {
                t
            }
        };

        Self {
            job_title,
            experience_years,
            skills: normalize_len(skills, SKILLS_COUNT, GENERIC_SKILLS),
            responsibilities: normalize_len(
                responsibilities,
                RESPONSIBILITIES_COUNT,
                GENERIC_RESPONSIBILITIES,
            ),
            contact_info,
            extra,
        }
    }
}

/// Pad `items` up to `target_len` by cycling through `filler`, or truncate
/// down to it.
fn normalize_len(mut items: Vec<String>, target_len: usize, filler: &[&str]) -> Vec<String> {
    if items.len() > target_len {
        items.truncate(target_len);
        return items;
    }
    let mut filler_cycle = filler.iter().cycle();
    while items.len() < target_len {
        items.push((*filler_cycle.next().expect("filler list is non-empty")).to_string());
    }
    items
}

/// Parse a free-text experience string into an integer year count.
///
/// Handles exact integers (`"5"`), ranges (`"3-5"` → the lower bound, `3`),
/// and non-numeric text (`"Not specified"` → `0`).
#[must_use]
pub fn parse_experience_years(raw: &str) -> u32 {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u32>() {
        return n;
    }
    if let Some((lower, _upper)) = raw.split_once('-') {
        if let Ok(n) = lower.trim().parse::<u32>() {
            return n;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_skill_lists() {
        let info = StandardizedInfo::new(
            "Engineer",
            5,
            vec!["Rust".to_string()],
            vec![],
            None,
            BTreeMap::new(),
        );
        assert_eq!(info.skills.len(), SKILLS_COUNT);
        assert_eq!(info.responsibilities.len(), RESPONSIBILITIES_COUNT);
        assert_eq!(info.skills[0], "Rust");
        assert_eq!(info.skills[1], GENERIC_SKILLS[0]);
    }

    #[test]
    fn truncates_long_skill_lists() {
        let skills: Vec<String> = (0..30).map(|i| format!("skill-{i}")).collect();
        let info = StandardizedInfo::new("Engineer", 5, skills, vec![], None, BTreeMap::new());
        assert_eq!(info.skills.len(), SKILLS_COUNT);
        assert_eq!(info.skills[19], "skill-19");
    }

    #[test]
    fn blank_title_falls_back_to_default() {
        let info = StandardizedInfo::new("   ", 0, vec![], vec![], None, BTreeMap::new());
        assert_eq!(info.job_title, DEFAULT_JOB_TITLE);
    }

    #[test]
    fn parses_experience_strings() {
        assert_eq!(parse_experience_years("5"), 5);
        assert_eq!(parse_experience_years("3-5"), 3);
        assert_eq!(parse_experience_years("Not specified"), 0);
        assert_eq!(parse_experience_years(""), 0);
    }
}
