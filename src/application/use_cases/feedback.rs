use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::feedback::Feedback,
    use_cases::{bounded, user::AuthenticatedUser},
};

pub const MAX_FEEDBACK_CHARS: usize = 5000;

#[async_trait]
pub trait FeedbackRepo: Send + Sync {
    async fn create(&self, user_id: Uuid, message: &str) -> AppResult<Feedback>;
}

/// Side channel told about new feedback. Delivery is best effort.
#[async_trait]
pub trait FeedbackNotifier: Send + Sync {
    async fn publish_feedback(&self, user_email: &str, message: &str) -> AppResult<()>;
}

#[derive(Clone)]
pub struct FeedbackUseCases {
    repo: Arc<dyn FeedbackRepo>,
    notifier: Arc<dyn FeedbackNotifier>,
    outbound_timeout: Duration,
}

impl FeedbackUseCases {
    pub fn new(
        repo: Arc<dyn FeedbackRepo>,
        notifier: Arc<dyn FeedbackNotifier>,
        outbound_timeout: Duration,
    ) -> Self {
        Self {
            repo,
            notifier,
            outbound_timeout,
        }
    }

    /// Validates and stores the message, then notifies. Notifier failures are logged only.
    #[instrument(skip(self, message), fields(user_id = %user.user_id))]
    pub async fn create_feedback(
        &self,
        user: &AuthenticatedUser,
        message: &str,
    ) -> AppResult<Feedback> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::MessageRequired);
        }
        if message.chars().count() > MAX_FEEDBACK_CHARS {
            return Err(AppError::MessageTooLong {
                max: MAX_FEEDBACK_CHARS,
            });
        }

        let feedback = bounded(
            "storage",
            self.outbound_timeout,
            self.repo.create(user.user_id, message),
        )
        .await?;

        if let Err(err) = bounded(
            "notifier",
            self.outbound_timeout,
            self.notifier.publish_feedback(&user.email, message),
        )
        .await
        {
            tracing::warn!(feedback_id = %feedback.id, error = %err, "Feedback notification failed");
        }

        Ok(feedback)
    }
}
