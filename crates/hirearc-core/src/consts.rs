//! Glossary constants enumerated in the configuration surface.
//!
//! These are the hard-coded defaults; `hirearc-config` exposes the same
//! values as overridable fields. Keeping them here too means every crate can
//! depend on a shape-correct default without depending on `hirearc-config`.

/// Number of skill vectors in a bundle, and the padded length of `skills`.
pub const SKILLS_COUNT: usize = 20;

/// Number of responsibility vectors in a bundle, and the padded length of
/// `responsibilities`.
pub const RESPONSIBILITIES_COUNT: usize = 10;

/// Dimension of every vector the embedding engine produces.
pub const EMBEDDING_DIM: usize = 768;

/// L2-norm tolerance: every stored vector must have `‖v‖₂ ∈ [1 - EPS, 1 + EPS]`.
pub const NORM_EPSILON: f64 = 1e-6;

/// Default sub-score weights `(skills, responsibilities, title, experience)`.
pub const DEFAULT_WEIGHTS: (f64, f64, f64, f64) = (0.80, 0.15, 0.025, 0.025);

/// Minimum cosine similarity for a skill assignment to be reported as "matched".
pub const SKILL_REPORT_THRESHOLD: f64 = 0.50;

/// Minimum cosine similarity for a responsibility assignment to be reported
/// as "matched".
pub const RESP_REPORT_THRESHOLD: f64 = 0.45;

/// Filler text substituted for an empty/whitespace skill before embedding.
pub const FILLER_SKILL: &str = "General professional skills";

/// Filler text substituted for an empty/whitespace responsibility before
/// embedding.
pub const FILLER_RESPONSIBILITY: &str = "General professional responsibilities";

/// Generic skills cycled in to pad `StandardizedInfo::skills` up to
/// [`SKILLS_COUNT`] when the collaborator supplies fewer.
pub const GENERIC_SKILLS: &[&str] = &[
    "Communication",
    "Teamwork",
    "Problem solving",
    "Time management",
    "Adaptability",
    "Attention to detail",
];

/// Generic responsibilities cycled in to pad
/// `StandardizedInfo::responsibilities` up to [`RESPONSIBILITIES_COUNT`].
pub const GENERIC_RESPONSIBILITIES: &[&str] = &[
    "Collaborate with team members to achieve shared goals",
    "Maintain clear documentation of work performed",
    "Communicate progress and blockers to stakeholders",
];

/// Title used when a document's job title cannot be determined.
pub const DEFAULT_JOB_TITLE: &str = "Professional";

/// Default job retry budget (`job_max_retries`).
pub const DEFAULT_MAX_RETRIES: u32 = 3;
