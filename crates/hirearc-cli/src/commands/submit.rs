use hirearc_core::{ApplicationData, JobId};
use serde_json::Value;

use crate::cli::{GlobalFlags, PriorityArg};
use crate::context::AppContext;
use crate::error::HirearcError;
use crate::output;

#[derive(serde::Serialize)]
struct SubmitResponse {
    job_id: JobId,
}

pub async fn handle(
    ctx: &AppContext,
    flags: &GlobalFlags,
    applicant_id: String,
    jd_token: String,
    cv_file: String,
    priority: Option<PriorityArg>,
    metadata: Option<String>,
) -> Result<(), HirearcError> {
    let metadata = match metadata {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| HirearcError::InvalidInput(format!("--metadata is not valid JSON: {e}")))?,
        None => Value::Null,
    };

    let application_data = ApplicationData {
        applicant_id,
        jd_token,
        cv_file_ref: cv_file,
        priority_hint: priority.map(Into::into),
        metadata,
    };

    let job_id = ctx.queue.submit(application_data).await?;
    output::print(flags, &SubmitResponse { job_id });
    Ok(())
}
