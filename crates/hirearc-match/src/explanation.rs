//! Narrative explanation text, banded from the sub-scores.
//!
//! The exact wording is informational only (not part of the testable
//! contract per the matching contract's Explanation section); the banding
//! thresholds are: >=80 / 60-79 / <60 for skills and responsibilities,
//! >=0.8 / 0.6-0.8 / <0.6 for title, and meets/does-not-meet for experience.

pub fn build(
    skills_score: f64,
    responsibilities_score: f64,
    title_cos: f64,
    experience_meets: bool,
) -> String {
    let mut parts = Vec::with_capacity(4);

    parts.push(if skills_score >= 80.0 {
        format!("Excellent skills match ({skills_score:.0}%)")
    } else if skills_score >= 60.0 {
        format!("Good skills match ({skills_score:.0}%)")
    } else {
        format!("Limited skills match ({skills_score:.0}%)")
    });

    parts.push(if responsibilities_score >= 80.0 {
        format!("Excellent responsibility alignment ({responsibilities_score:.0}%)")
    } else if responsibilities_score >= 60.0 {
        format!("Good responsibility alignment ({responsibilities_score:.0}%)")
    } else {
        format!("Limited responsibility alignment ({responsibilities_score:.0}%)")
    });

    parts.push(
        if title_cos >= 0.8 {
            "Job title strongly aligned"
        } else if title_cos >= 0.6 {
            "Job title moderately aligned"
        } else {
            "Job title limited alignment"
        }
        .to_string(),
    );

    parts.push(
        if experience_meets {
            "Experience requirements satisfied"
        } else {
            "Experience requirements may not be fully met"
        }
        .to_string(),
    );

    format!("{}.", parts.join(". "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_each_fragment_independently() {
        let text = build(85.0, 65.0, 0.9, true);
        assert!(text.contains("Excellent skills"));
        assert!(text.contains("Good responsibility"));
        assert!(text.contains("strongly aligned"));
        assert!(text.contains("satisfied"));
    }

    #[test]
    fn low_scores_use_limited_language() {
        let text = build(10.0, 10.0, 0.1, false);
        assert!(text.contains("Limited skills"));
        assert!(text.contains("Limited responsibility"));
        assert!(text.contains("limited alignment"));
        assert!(text.contains("may not be fully met"));
    }
}
