use async_trait::async_trait;

use crate::{app_error::AppResult, use_cases::feedback::FeedbackNotifier};

/// Notifier used when no Slack webhook is configured: records feedback in the log only.
#[derive(Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl FeedbackNotifier for LogNotifier {
    async fn publish_feedback(&self, user_email: &str, message: &str) -> AppResult<()> {
        tracing::info!(user_email, message, "New feedback");
        Ok(())
    }
}
