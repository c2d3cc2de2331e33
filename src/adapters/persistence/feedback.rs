use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::feedback::Feedback,
    use_cases::feedback::FeedbackRepo,
};

// Feedback row as stored in the db.
#[derive(sqlx::FromRow, Debug)]
pub struct FeedbackDb {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<FeedbackDb> for Feedback {
    fn from(row: FeedbackDb) -> Self {
        Feedback {
            id: row.id,
            user_id: row.user_id,
            message: row.message,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl FeedbackRepo for PostgresPersistence {
    async fn create(&self, user_id: Uuid, message: &str) -> AppResult<Feedback> {
        let row = sqlx::query_as::<_, FeedbackDb>(
            r#"
                INSERT INTO feedback (id, user_id, message)
                VALUES ($1, $2, $3)
                RETURNING id, user_id, message, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(message)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row.into())
    }
}
