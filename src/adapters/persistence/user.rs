use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::validators::normalize_email,
    use_cases::user::UserRepo,
};

#[async_trait]
impl UserRepo for PostgresPersistence {
    async fn upsert_by_email(&self, email: &str) -> AppResult<Uuid> {
        let email = normalize_email(email);
        // The no-op update makes RETURNING yield the existing row on conflict.
        let id: Uuid = sqlx::query_scalar(
            r#"
                INSERT INTO users (id, email)
                VALUES ($1, $2)
                ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
                RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&email)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(id)
    }

    async fn create_login_link(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO login_links (id, user_id, token_hash, expires_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(())
    }

    async fn consume_login_link(&self, token_hash: &str) -> AppResult<Uuid> {
        // Single conditional UPDATE: Postgres row locking guarantees one winner per link.
        let user_id: Option<Uuid> = sqlx::query_scalar(
            r#"
                UPDATE login_links
                SET used_at = now()
                WHERE token_hash = $1
                  AND used_at IS NULL
                  AND expires_at > now()
                RETURNING user_id
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        user_id.ok_or(AppError::InvalidOrExpiredToken)
    }

    async fn get_email_by_id(&self, user_id: Uuid) -> AppResult<String> {
        let email: Option<String> = sqlx::query_scalar("SELECT email FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;
        email.ok_or(AppError::UserNotFound)
    }

    async fn purge_login_links(&self, retention: chrono::Duration) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
                DELETE FROM login_links
                WHERE created_at < now() - make_interval(secs => $1)
                  AND (used_at IS NOT NULL OR expires_at <= now())
            "#,
        )
        .bind(retention.num_seconds() as f64)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(result.rows_affected())
    }
}
