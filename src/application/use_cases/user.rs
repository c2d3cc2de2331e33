use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::Serialize;
use tracing::instrument;
use url::Url;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        jwt,
        tokens::{generate_token, hash_token},
        validators::{is_valid_email, normalize_email},
    },
    domain::entities::user::User,
    use_cases::bounded,
};

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Lookup-or-create on the normalized email. Concurrent calls converge on one row.
    async fn upsert_by_email(&self, email: &str) -> AppResult<Uuid>;
    async fn create_login_link(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;
    /// Marks the link used in one atomic step and returns its owner.
    /// Unknown, used and expired links all fail with `InvalidOrExpiredToken`.
    async fn consume_login_link(&self, token_hash: &str) -> AppResult<Uuid>;
    /// Fails with `UserNotFound` when absent.
    async fn get_email_by_id(&self, user_id: Uuid) -> AppResult<String>;
    /// Deletes used or expired links created more than `retention` ago. Returns the number removed.
    async fn purge_login_links(&self, retention: chrono::Duration) -> AppResult<u64>;
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_login_email(
        &self,
        to: &str,
        deeplink_base_url: &Url,
        raw_token: &str,
    ) -> AppResult<()>;
}

/// Identity resolved from a valid session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedLogin {
    pub access_token: String,
    pub user: User,
}

#[derive(Clone, Debug)]
pub struct AuthSettings {
    pub magic_link_ttl: chrono::Duration,
    pub session_ttl: time::Duration,
    pub outbound_timeout: std::time::Duration,
}

#[derive(Clone)]
pub struct AuthUseCases {
    repo: Arc<dyn UserRepo>,
    email: Arc<dyn EmailSender>,
    deeplink_base_url: Url,
    jwt_secret: SecretString,
    settings: AuthSettings,
}

impl AuthUseCases {
    pub fn new(
        repo: Arc<dyn UserRepo>,
        email: Arc<dyn EmailSender>,
        deeplink_base_url: Url,
        jwt_secret: SecretString,
        settings: AuthSettings,
    ) -> Self {
        Self {
            repo,
            email,
            deeplink_base_url,
            jwt_secret,
            settings,
        }
    }

    /// Upserts the user, stores a hashed expiring link and mails the raw token.
    /// A failed delivery leaves the stored link behind to expire unused.
    #[instrument(skip(self))]
    pub async fn request_login_link(&self, email: &str) -> AppResult<()> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(AppError::EmailRequired);
        }
        if !is_valid_email(&email) {
            return Err(AppError::InvalidEmail);
        }

        let limit = self.settings.outbound_timeout;
        let user_id = bounded("storage", limit, self.repo.upsert_by_email(&email)).await?;

        let raw = generate_token()?;
        let token_hash = hash_token(&raw);
        let expires_at = Utc::now() + self.settings.magic_link_ttl;
        bounded(
            "storage",
            limit,
            self.repo.create_login_link(user_id, &token_hash, expires_at),
        )
        .await?;

        if let Err(err) = bounded(
            "email gateway",
            limit,
            self.email
                .send_login_email(&email, &self.deeplink_base_url, &raw),
        )
        .await
        {
            tracing::error!(%user_id, error = %err, "Login email delivery failed");
            return Err(match err {
                AppError::EmailSendFailed(msg) => AppError::EmailSendFailed(msg),
                other => AppError::EmailSendFailed(other.to_string()),
            });
        }

        tracing::info!(%user_id, %expires_at, "Login link issued");
        Ok(())
    }

    /// Consumes the link behind `raw_token` and mints a session for its owner.
    #[instrument(skip_all)]
    pub async fn verify_login_link(&self, raw_token: &str) -> AppResult<VerifiedLogin> {
        if raw_token.is_empty() {
            return Err(AppError::InvalidOrExpiredToken);
        }

        let limit = self.settings.outbound_timeout;
        let token_hash = hash_token(raw_token);
        let user_id = bounded(
            "storage",
            limit,
            self.repo.consume_login_link(&token_hash),
        )
        .await?;

        let email = bounded("storage", limit, self.repo.get_email_by_id(user_id)).await?;

        let access_token = jwt::issue_session(
            user_id,
            &email,
            &self.jwt_secret,
            self.settings.session_ttl,
        )?;

        tracing::info!(%user_id, "Login link consumed, session issued");
        Ok(VerifiedLogin {
            access_token,
            user: User { id: user_id, email },
        })
    }

    /// Resolves the caller behind a bearer session token.
    pub fn authenticate(&self, token: &str) -> AppResult<AuthenticatedUser> {
        let claims = jwt::verify_session(token, &self.jwt_secret)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|e| AppError::InvalidToken(format!("bad subject: {e}")))?;
        Ok(AuthenticatedUser {
            user_id,
            email: claims.email,
        })
    }

    #[instrument(skip(self))]
    pub async fn purge_stale_login_links(&self, retention: chrono::Duration) -> AppResult<u64> {
        let removed = bounded(
            "storage",
            self.settings.outbound_timeout,
            self.repo.purge_login_links(retention),
        )
        .await?;
        if removed > 0 {
            tracing::info!(removed, "Purged stale login links");
        }
        Ok(removed)
    }
}
