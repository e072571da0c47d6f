use std::str::FromStr;

use hirearc_core::JobId;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::error::HirearcError;
use crate::output;

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags, job_id: &str) -> Result<(), HirearcError> {
    let job_id = JobId::from_str(job_id).map_err(|e| HirearcError::InvalidInput(format!("invalid job id: {e}")))?;
    let view = ctx
        .queue
        .get_status(job_id)
        .await
        .ok_or_else(|| HirearcError::JobNotFound(job_id.to_string()))?;
    output::print(flags, &view);
    Ok(())
}

pub async fn handle_list(ctx: &AppContext, flags: &GlobalFlags) -> Result<(), HirearcError> {
    let views = ctx.queue.list_jobs().await;
    output::print(flags, &views);
    Ok(())
}
