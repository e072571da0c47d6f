use crate::cli::{ControlActionArg, GlobalFlags};
use crate::context::AppContext;
use crate::error::HirearcError;
use crate::output;

#[derive(serde::Serialize)]
struct ControlResponse {
    ok: bool,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags, action: ControlActionArg) -> Result<(), HirearcError> {
    ctx.queue.control(action.into()).await?;
    output::print(flags, &ControlResponse { ok: true });
    Ok(())
}
