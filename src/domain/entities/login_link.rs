use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A pending or spent one-time login link. Rows are never deleted on consumption;
/// `used_at` is set exactly once.
#[derive(Debug, Clone)]
pub struct LoginLink {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl LoginLink {
    pub fn is_consumable(&self, now: DateTime<Utc>) -> bool {
        self.used_at.is_none() && self.expires_at > now
    }

    /// Spent or expired links older than `cutoff` can be purged.
    pub fn is_purgeable(&self, now: DateTime<Utc>, cutoff: DateTime<Utc>) -> bool {
        !self.is_consumable(now) && self.created_at < cutoff
    }
}
