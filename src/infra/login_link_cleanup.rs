use std::{sync::Arc, time::Duration};

use tokio::time::interval;
use tracing::{error, info};

use crate::use_cases::user::AuthUseCases;

const POLL_INTERVAL_SECS: u64 = 3600;

/// Deletes spent and expired login links older than `retention_days`, once an hour.
pub async fn run_login_link_cleanup_loop(auth_use_cases: Arc<AuthUseCases>, retention_days: i64) {
    let mut ticker = interval(Duration::from_secs(POLL_INTERVAL_SECS));
    let retention = chrono::Duration::days(retention_days);

    info!(
        retention_days,
        "Login link cleanup started (polling every {}s)", POLL_INTERVAL_SECS
    );

    loop {
        ticker.tick().await;

        if let Err(e) = auth_use_cases.purge_stale_login_links(retention).await {
            error!(error = ?e, "Failed to purge stale login links");
        }
    }
}
