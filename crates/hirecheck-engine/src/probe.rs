use crate::runner::RetryPolicy;
use hirecheck_core::FailureCause;
use tracing::{info, warn};

/// Wait for the target to answer HTTP at all, retrying on a fixed
/// delay. Useful before a run when the dev server is still starting.
/// Any HTTP response counts as reachable; only transport-level failures
/// are retried.
pub async fn wait_until_reachable(url: &str, retry: RetryPolicy) -> Result<(), FailureCause> {
    let client = reqwest::Client::new();
    let attempts = retry.attempts.max(1);
    let mut last_error = String::new();

    for attempt in 1..=attempts {
        if attempt > 1 {
            tokio::time::sleep(retry.delay).await;
        }
        match client.get(url).send().await {
            Ok(resp) => {
                info!(url, status = %resp.status(), attempt, "target reachable");
                return Ok(());
            }
            Err(e) => {
                warn!(url, attempt, error = %e, "connection attempt failed");
                last_error = e.to_string();
            }
        }
    }

    Err(FailureCause::Connectivity {
        attempts,
        last_error,
    })
}
