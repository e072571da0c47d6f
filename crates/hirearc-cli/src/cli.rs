//! Top-level CLI parser: one subcommand per §6 inbound operation, plus
//! `serve` (run the worker pool until interrupted) and `init` (write a
//! default config file).

use clap::{Parser, Subcommand, ValueEnum};
use hirearc_core::Priority;
use hirearc_queue::ControlAction;

/// The `hirearc` binary: local stand-in for the résumé/JD matching core's
/// inbound surface.
#[derive(Debug, Parser)]
#[command(name = "hirearc", version, about = "hirearc - résumé/JD matching core")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json or pretty
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
}

/// Global flags available before or after the subcommand.
#[derive(Clone, Copy, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
}

/// `clap::ValueEnum` mirror of [`Priority`] (orphan rules keep the derive
/// off the core type itself).
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PriorityArg {
    Low,
    Normal,
    High,
    Urgent,
}

impl From<PriorityArg> for Priority {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::Low => Self::Low,
            PriorityArg::Normal => Self::Normal,
            PriorityArg::High => Self::High,
            PriorityArg::Urgent => Self::Urgent,
        }
    }
}

/// `clap::ValueEnum` mirror of [`ControlAction`].
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ControlActionArg {
    Pause,
    Resume,
    ScaleUp,
    ScaleDown,
    ResetCircuitBreaker,
}

impl From<ControlActionArg> for ControlAction {
    fn from(value: ControlActionArg) -> Self {
        match value {
            ControlActionArg::Pause => Self::Pause,
            ControlActionArg::Resume => Self::Resume,
            ControlActionArg::ScaleUp => Self::ScaleUp,
            ControlActionArg::ScaleDown => Self::ScaleDown,
            ControlActionArg::ResetCircuitBreaker => Self::ResetCircuitBreaker,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a default `hirearc.toml` in the current directory.
    Init,

    /// Submit an application (§4.4/§4.5 `submit_application`).
    Submit {
        /// Applicant identity.
        #[arg(long)]
        applicant_id: String,
        /// JD token the application targets.
        #[arg(long)]
        jd_token: String,
        /// Path to the uploaded CV file.
        #[arg(long)]
        cv_file: String,
        /// Priority hint.
        #[arg(long, value_enum)]
        priority: Option<PriorityArg>,
        /// Arbitrary JSON metadata to attach to the job.
        #[arg(long)]
        metadata: Option<String>,
    },

    /// Poll a job's status (`get_application_status`).
    Status {
        /// Job id returned by `submit`.
        job_id: String,
    },

    /// List all known jobs.
    ListJobs,

    /// Score a JD against a CV directly (bypasses the queue entirely).
    /// Each of `--jd`/`--cv` is a stored document's UUID (looked up in the
    /// vector store) or a plain filesystem path (parsed and standardized
    /// ad hoc, without being persisted).
    Match {
        #[arg(long)]
        jd: String,
        #[arg(long)]
        cv: String,
        /// Override the default (skills, responsibilities, title, experience) weights.
        #[arg(long, num_args = 4, value_names = ["SKILLS", "RESP", "TITLE", "EXPERIENCE"])]
        weights: Option<Vec<f64>>,
    },

    /// Operator snapshot (`system_metrics`).
    Metrics,

    /// Operator action (`control`).
    Control {
        #[arg(value_enum)]
        action: ControlActionArg,
    },

    /// Register a JD token with the in-process metadata store so `submit`
    /// can resolve it. A stand-in for the out-of-scope JD management
    /// surface.
    RegisterJd {
        #[arg(long)]
        jd_token: String,
        #[arg(long)]
        jd_file: String,
        #[arg(long, default_value_t = true)]
        accepting: bool,
    },

    /// Start the worker pool and idle, serving the queue until interrupted.
    Serve,
}
