//! In-memory mocks for the login link flow.

use std::{
    collections::HashMap,
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::email_templates::login_link_url,
    domain::entities::login_link::LoginLink,
    use_cases::user::{EmailSender, UserRepo},
};

// ============================================================================
// InMemoryUserRepo
// ============================================================================

#[derive(Default)]
struct UserStore {
    users: HashMap<Uuid, String>,
    links: Vec<LoginLink>,
}

/// In-memory `UserRepo`. All mutations happen under one lock, so consume is atomic
/// the same way the single-statement UPDATE is in Postgres.
///
/// The repo keeps its own clock; `advance_clock` moves it forward to simulate expiry.
#[derive(Default)]
pub struct InMemoryUserRepo {
    store: Mutex<UserStore>,
    clock_offset: Mutex<chrono::Duration>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_clock(&self, by: chrono::Duration) {
        *self.clock_offset.lock().unwrap() += by;
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now() + *self.clock_offset.lock().unwrap()
    }

    pub fn user_emails(&self) -> Vec<String> {
        let mut emails: Vec<String> = self.store.lock().unwrap().users.values().cloned().collect();
        emails.sort();
        emails
    }

    /// Links in creation order.
    pub fn login_links(&self) -> Vec<LoginLink> {
        self.store.lock().unwrap().links.clone()
    }

    /// Drops every user while keeping their links, to simulate a vanished owner.
    pub fn remove_users(&self) {
        self.store.lock().unwrap().users.clear();
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn upsert_by_email(&self, email: &str) -> AppResult<Uuid> {
        let mut store = self.store.lock().unwrap();
        if let Some((id, _)) = store.users.iter().find(|(_, e)| e.as_str() == email) {
            return Ok(*id);
        }
        let id = Uuid::new_v4();
        store.users.insert(id, email.to_string());
        Ok(id)
    }

    async fn create_login_link(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let created_at = self.now();
        let mut store = self.store.lock().unwrap();
        if store.links.iter().any(|l| l.token_hash == token_hash) {
            return Err(AppError::Database("duplicate token hash".into()));
        }
        store.links.push(LoginLink {
            id: Uuid::new_v4(),
            user_id,
            token_hash: token_hash.to_string(),
            expires_at,
            used_at: None,
            created_at,
        });
        Ok(())
    }

    async fn consume_login_link(&self, token_hash: &str) -> AppResult<Uuid> {
        let now = self.now();
        let mut store = self.store.lock().unwrap();
        let link = store
            .links
            .iter_mut()
            .find(|l| l.token_hash == token_hash && l.is_consumable(now))
            .ok_or(AppError::InvalidOrExpiredToken)?;
        link.used_at = Some(now);
        Ok(link.user_id)
    }

    async fn get_email_by_id(&self, user_id: Uuid) -> AppResult<String> {
        self.store
            .lock()
            .unwrap()
            .users
            .get(&user_id)
            .cloned()
            .ok_or(AppError::UserNotFound)
    }

    async fn purge_login_links(&self, retention: chrono::Duration) -> AppResult<u64> {
        let now = self.now();
        let cutoff = now - retention;
        let mut store = self.store.lock().unwrap();
        let before = store.links.len();
        store.links.retain(|l| !l.is_purgeable(now, cutoff));
        Ok((before - store.links.len()) as u64)
    }
}

// ============================================================================
// Email senders
// ============================================================================

#[derive(Debug, Clone)]
pub struct SentLoginEmail {
    pub to: String,
    pub link: String,
    pub raw_token: String,
}

/// Captures every login email instead of delivering it.
#[derive(Default)]
pub struct InMemoryEmailSender {
    sent: Mutex<Vec<SentLoginEmail>>,
}

impl InMemoryEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captured(&self) -> Vec<SentLoginEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_sent(&self) -> Option<SentLoginEmail> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl EmailSender for InMemoryEmailSender {
    async fn send_login_email(
        &self,
        to: &str,
        deeplink_base_url: &Url,
        raw_token: &str,
    ) -> AppResult<()> {
        self.sent.lock().unwrap().push(SentLoginEmail {
            to: to.to_string(),
            link: login_link_url(deeplink_base_url, raw_token),
            raw_token: raw_token.to_string(),
        });
        Ok(())
    }
}

/// Gateway that rejects every message.
pub struct FailingEmailSender;

#[async_trait]
impl EmailSender for FailingEmailSender {
    async fn send_login_email(&self, _to: &str, _base: &Url, _raw_token: &str) -> AppResult<()> {
        Err(AppError::EmailSendFailed("gateway returned 500".into()))
    }
}

/// Gateway that never answers within any sane timeout.
pub struct SlowEmailSender;

#[async_trait]
impl EmailSender for SlowEmailSender {
    async fn send_login_email(&self, _to: &str, _base: &Url, _raw_token: &str) -> AppResult<()> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(())
    }
}
