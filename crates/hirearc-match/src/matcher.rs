//! The public match engine entry points: `match_pair` and `rank`.

use std::time::Instant;

use hirearc_core::{Bundle, MatchResult, StandardizedInfo};

use crate::error::MatchError;
use crate::explanation;
use crate::scoring::{experience_score, score_class};
use crate::weights::Weights;

/// A single document's bundle plus the standardized info needed for index
/// labels and the experience integer.
pub struct Candidate<'a> {
    pub bundle: &'a Bundle,
    pub info: &'a StandardizedInfo,
}

/// Match one CV bundle against one JD bundle.
///
/// `raw_weights` is normalized internally via [`Weights::normalize`].
pub fn match_pair(
    jd: &Candidate<'_>,
    cv: &Candidate<'_>,
    raw_weights: (f64, f64, f64, f64),
) -> Result<MatchResult, MatchError> {
    let started = Instant::now();
    let weights = Weights::normalize(raw_weights);

    let skills = score_class(
        &jd.bundle.skill_vectors,
        &cv.bundle.skill_vectors,
        hirearc_core::SKILL_REPORT_THRESHOLD,
    )?;
    let responsibilities = score_class(
        &jd.bundle.responsibility_vectors,
        &cv.bundle.responsibility_vectors,
        hirearc_core::RESP_REPORT_THRESHOLD,
    )?;
    let title_cos = crate::similarity::cos(&jd.bundle.job_title_vector, &cv.bundle.job_title_vector)?;
    let title = 100.0 * title_cos;

    let r = jd.info.experience_years;
    let c = cv.info.experience_years;
    let experience = experience_score(r, c);
    let experience_meets = r == 0 || c >= r;

    let overall = weights.skills * skills.score
        + weights.responsibilities * responsibilities.score
        + weights.title * title
        + weights.experience * experience;

    let explanation = explanation::build(skills.score, responsibilities.score, title_cos, experience_meets);

    Ok(MatchResult {
        overall,
        skills_score: skills.score,
        responsibilities_score: responsibilities.score,
        title_score: title,
        experience_score: experience,
        skill_assignments: skills.assignments,
        responsibility_assignments: responsibilities.assignments,
        unmatched_jd_skills: skills.unmatched_jd,
        unmatched_jd_responsibilities: responsibilities.unmatched_jd,
        extra_cv_skills: skills.extra_cv,
        explanation,
        processing_time: started.elapsed(),
    })
}

/// Rank `cvs` against `jd` by overall score, returning the top `top_k`.
///
/// Each CV is matched independently against the same JD bundle/info — there
/// is no cross-CV information leakage. CVs whose match fails (shape or
/// dimension error) are skipped rather than failing the whole ranking,
/// mirroring the single-pair contract's own per-call failure semantics but
/// applied per-candidate.
pub fn rank<'a>(
    jd: &Candidate<'_>,
    cvs: &[(String, Candidate<'a>)],
    raw_weights: (f64, f64, f64, f64),
    top_k: usize,
) -> Vec<(String, MatchResult)> {
    let mut scored: Vec<(String, MatchResult)> = cvs
        .iter()
        .filter_map(|(id, cv)| match match_pair(jd, cv, raw_weights) {
            Ok(result) => Some((id.clone(), result)),
            Err(err) => {
                tracing::warn!(cv_id = %id, error = %err, "skipping CV in rank: match failed");
                None
            }
        })
        .collect();

    scored.sort_by(|a, b| b.1.overall.partial_cmp(&a.1.overall).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_k);
    scored
}
