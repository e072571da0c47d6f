use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::error::HirearcError;
use crate::output;

#[derive(serde::Serialize)]
struct MetricsResponse {
    queue: hirearc_queue::SystemMetrics,
    rate_limit: hirearc_ratelimit::RateLimitStats,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> Result<(), HirearcError> {
    let response = MetricsResponse {
        queue: ctx.queue.system_metrics().await,
        rate_limit: ctx.ratelimit.stats(),
    };
    output::print(flags, &response);
    Ok(())
}
