pub mod feedback;
pub mod user;

use std::{future::Future, time::Duration};

use crate::app_error::{AppError, AppResult};

/// Runs an outbound call under `limit`. Dropping the future on timeout cancels the call;
/// side effects it already made (e.g. an inserted row) are left in place.
pub async fn bounded<T>(
    what: &'static str,
    limit: Duration,
    call: impl Future<Output = AppResult<T>>,
) -> AppResult<T> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(dependency = what, timeout_ms = limit.as_millis() as u64, "Outbound call timed out");
            Err(AppError::Timeout(what))
        }
    }
}
