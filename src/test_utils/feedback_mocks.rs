use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::feedback::Feedback,
    use_cases::feedback::{FeedbackNotifier, FeedbackRepo},
};

#[derive(Default)]
pub struct InMemoryFeedbackRepo {
    rows: Mutex<Vec<Feedback>>,
}

impl InMemoryFeedbackRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Feedback> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedbackRepo for InMemoryFeedbackRepo {
    async fn create(&self, user_id: Uuid, message: &str) -> AppResult<Feedback> {
        let feedback = Feedback {
            id: Uuid::new_v4(),
            user_id,
            message: message.to_string(),
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(feedback.clone());
        Ok(feedback)
    }
}

/// Records `(user_email, message)` pairs.
#[derive(Default)]
pub struct RecordingNotifier {
    published: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<(String, String)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedbackNotifier for RecordingNotifier {
    async fn publish_feedback(&self, user_email: &str, message: &str) -> AppResult<()> {
        self.published
            .lock()
            .unwrap()
            .push((user_email.to_string(), message.to_string()));
        Ok(())
    }
}

pub struct FailingNotifier;

#[async_trait]
impl FeedbackNotifier for FailingNotifier {
    async fn publish_feedback(&self, _user_email: &str, _message: &str) -> AppResult<()> {
        Err(AppError::Internal("webhook returned 500".into()))
    }
}
