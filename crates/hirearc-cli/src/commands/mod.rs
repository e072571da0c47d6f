//! Command handlers: one module per subcommand, dispatched from `main`.

mod control;
mod match_cmd;
mod metrics;
mod register_jd;
mod serve;
mod status;
mod submit;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;
use crate::error::HirearcError;

pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> Result<(), HirearcError> {
    match command {
        Commands::Init => unreachable!("handled in main before AppContext is built"),
        Commands::Submit {
            applicant_id,
            jd_token,
            cv_file,
            priority,
            metadata,
        } => submit::handle(ctx, flags, applicant_id, jd_token, cv_file, priority, metadata).await,
        Commands::Status { job_id } => status::handle(ctx, flags, &job_id).await,
        Commands::ListJobs => status::handle_list(ctx, flags).await,
        Commands::Match { jd, cv, weights } => match_cmd::handle(ctx, flags, &jd, &cv, weights).await,
        Commands::Metrics => metrics::handle(ctx, flags).await,
        Commands::Control { action } => control::handle(ctx, flags, action).await,
        Commands::RegisterJd {
            jd_token,
            jd_file,
            accepting,
        } => register_jd::handle(ctx, flags, jd_token, jd_file, accepting).await,
        Commands::Serve => serve::handle(ctx).await,
    }
}
