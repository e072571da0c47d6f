//! Sub-score computation: skills, responsibilities, title, experience.

use hirearc_core::{Assignment, UnmatchedItem};

use crate::assignment::solve;
use crate::error::MatchError;
use crate::similarity::similarity_matrix;

/// Result of matching one item class (skills or responsibilities): the
/// `100 * mean(assigned similarity)` sub-score, the one-to-one assignment
/// pairs, the JD items below the report threshold, and the CV-side
/// complement of those same below-threshold pairs.
pub struct ClassResult {
    pub score: f64,
    pub assignments: Vec<Assignment>,
    pub unmatched_jd: Vec<UnmatchedItem>,
    pub extra_cv: Vec<usize>,
}

/// Solve the assignment problem between `jd` and `cv` vector sets and score
/// it. `report_threshold` is the minimum similarity for a pair to count as
/// "matched" for reporting purposes — it never affects the score itself.
pub fn score_class(
    jd: &[Vec<f64>],
    cv: &[Vec<f64>],
    report_threshold: f64,
) -> Result<ClassResult, MatchError> {
    let similarity = similarity_matrix(jd, cv)?;
    let cost: Vec<Vec<f64>> = similarity
        .iter()
        .map(|row| row.iter().map(|&s| -s).collect())
        .collect();
    let cv_for_jd = solve(&cost);

    let mut assignments = Vec::with_capacity(cv_for_jd.len());
    let mut unmatched_jd = Vec::new();
    let mut extra_cv = Vec::new();

    for (jd_index, &cv_index) in cv_for_jd.iter().enumerate() {
        let sim = similarity[jd_index][cv_index];
        assignments.push(Assignment {
            jd_index,
            cv_index,
            similarity: sim,
        });
        if sim < report_threshold {
            unmatched_jd.push(UnmatchedItem {
                jd_index,
                similarity: sim,
            });
            extra_cv.push(cv_index);
        }
    }

    let mean = if assignments.is_empty() {
        0.0
    } else {
        assignments.iter().map(|a| a.similarity).sum::<f64>() / assignments.len() as f64
    };

    Ok(ClassResult {
        score: 100.0 * mean,
        assignments,
        unmatched_jd,
        extra_cv,
    })
}

/// `100 * cos(jd_title, cv_title)`.
pub fn title_score(jd_title: &[f64], cv_title: &[f64]) -> Result<f64, MatchError> {
    Ok(100.0 * crate::similarity::cos(jd_title, cv_title)?)
}

/// Experience banding: `r` is the JD's required years, `c` the CV's.
///
/// - `r == 0` → 75, independent of `c`.
/// - `c >= r` → `min(100, 80 + 5*(c - r))`.
/// - `c < r` → `max(30, 60*c/r)`.
#[must_use]
pub fn experience_score(r: u32, c: u32) -> f64 {
    if r == 0 {
        return 75.0;
    }
    if c >= r {
        (80.0 + 5.0 * f64::from(c - r)).min(100.0)
    } else {
        (60.0 * f64::from(c) / f64::from(r)).max(30.0)
    }
}
