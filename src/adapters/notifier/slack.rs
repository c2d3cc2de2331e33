use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::{
    app_error::{AppError, AppResult},
    use_cases::feedback::FeedbackNotifier,
};

/// Posts new feedback to a Slack incoming webhook.
#[derive(Clone)]
pub struct SlackWebhookNotifier {
    client: Client,
    webhook_url: SecretString,
}

impl SlackWebhookNotifier {
    pub fn new(webhook_url: SecretString, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            webhook_url,
        })
    }
}

#[derive(Serialize)]
struct SlackMessage {
    text: String,
}

fn feedback_text(user_email: &str, message: &str) -> String {
    format!("*New feedback* from {user_email}\n>{}", message.replace('\n', "\n>"))
}

#[async_trait]
impl FeedbackNotifier for SlackWebhookNotifier {
    async fn publish_feedback(&self, user_email: &str, message: &str) -> AppResult<()> {
        let body = SlackMessage {
            text: feedback_text(user_email, message),
        };
        // The webhook URL is a credential, so it is stripped from any error.
        self.client
            .post(self.webhook_url.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Internal(e.without_url().to_string()))?
            .error_for_status()
            .map_err(|e| AppError::Internal(e.without_url().to_string()))?;
        Ok(())
    }
}
