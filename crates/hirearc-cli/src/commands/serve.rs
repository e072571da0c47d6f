use tracing::info;

use crate::context::AppContext;
use crate::error::HirearcError;

/// Idles with the worker pool already running (spawned in `bootstrap::init`)
/// until interrupted. Used by operators and integration tests that want a
/// long-lived process rather than one-shot CLI calls.
pub async fn handle(ctx: &AppContext) -> Result<(), HirearcError> {
    info!("serving; press ctrl-c to stop");
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("failed to install ctrl-c handler; serving until killed");
        std::future::pending::<()>().await;
    }
    ctx.queue.shutdown(std::time::Duration::from_secs(30)).await;
    Ok(())
}
