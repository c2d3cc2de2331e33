use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::{
    app_error::{AppError, AppResult},
    application::email_templates::{LOGIN_SUBJECT, login_email, login_link_url},
    use_cases::user::EmailSender,
};
use secrecy::ExposeSecret;

#[derive(Clone)]
pub struct MailgunEmailSender {
    client: Client,
    api_key: secrecy::SecretString,
    base_url: Url,
    domain: String,
    from: String,
    link_ttl_minutes: i64,
}

impl MailgunEmailSender {
    pub fn new(
        api_key: secrecy::SecretString,
        base_url: Url,
        domain: String,
        from: String,
        link_ttl_minutes: i64,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url,
            domain,
            from,
            link_ttl_minutes,
        })
    }

    fn messages_endpoint(&self) -> String {
        format!(
            "{}/v3/{}/messages",
            self.base_url.as_str().trim_end_matches('/'),
            self.domain
        )
    }
}

#[derive(Serialize)]
struct MailgunForm<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

#[async_trait]
impl EmailSender for MailgunEmailSender {
    async fn send_login_email(
        &self,
        to: &str,
        deeplink_base_url: &Url,
        raw_token: &str,
    ) -> AppResult<()> {
        if to.is_empty() {
            return Err(AppError::EmailSendFailed("recipient is required".into()));
        }
        if raw_token.is_empty() {
            return Err(AppError::EmailSendFailed("token is required".into()));
        }

        let link = login_link_url(deeplink_base_url, raw_token);
        let (text, html) = login_email(&link, self.link_ttl_minutes);
        let form = MailgunForm {
            from: &self.from,
            to,
            subject: LOGIN_SUBJECT,
            text: &text,
            html: &html,
        };

        let response = self
            .client
            .post(self.messages_endpoint())
            .basic_auth("api", Some(self.api_key.expose_secret()))
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::EmailSendFailed(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::EmailSendFailed(format!(
                "mailgun responded {status}: {body}"
            )));
        }
        Ok(())
    }
}
