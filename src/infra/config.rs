use std::net::SocketAddr;

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::{ExposeSecret, SecretString};
use time::Duration;
use url::Url;

use crate::use_cases::user::AuthSettings;

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub db_max_connections: u32,
    /// Apply embedded migrations at startup.
    pub run_migrations: bool,
    pub jwt_secret: SecretString,
    pub session_ttl: Duration,
    pub magic_link_ttl_minutes: i64,
    /// Used or expired login links older than this are purged by the cleanup task.
    pub login_link_retention_days: i64,
    /// Public https endpoint serving `/auth/deeplink`; embedded in login emails.
    pub app_deeplink_url: Url,
    /// URI scheme the deeplink page hands the token to (e.g. "feedbackapp").
    pub app_url_scheme: String,
    pub mailgun_api_key: SecretString,
    pub mailgun_domain: String,
    pub mailgun_base_url: Url,
    pub email_from: String,
    /// Slack incoming webhook for feedback notifications. Unset means log-only.
    pub slack_webhook_url: Option<SecretString>,
    /// `None` allows any origin.
    pub cors_origin: Option<HeaderValue>,
    /// Upper bound for every storage, email and notifier call.
    pub outbound_timeout: std::time::Duration,
    pub request_timeout: std::time::Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret: SecretString = SecretString::new(get_env::<String>("JWT_SECRET").into());
        anyhow::ensure!(
            !jwt_secret.expose_secret().is_empty(),
            "JWT_SECRET must not be empty"
        );

        let session_ttl = session_ttl_from_days(get_env_default("SESSION_TTL_DAYS", 30))?;
        let magic_link_ttl_minutes: i64 = get_env_default("MAGIC_LINK_TTL_MINUTES", 15);
        anyhow::ensure!(
            magic_link_ttl_minutes > 0,
            "MAGIC_LINK_TTL_MINUTES must be positive"
        );
        let login_link_retention_days: i64 = get_env_default("LOGIN_LINK_RETENTION_DAYS", 7);

        let bind_addr: SocketAddr = get_env_default("BIND_ADDR", "0.0.0.0:8080".parse()?);
        let database_url: String = get_env("DATABASE_URL");
        let db_max_connections: u32 = get_env_default("DB_MAX_CONNECTIONS", 5);
        let run_migrations: bool = get_env_default("RUN_MIGRATIONS", true);

        let app_deeplink_url: Url = get_env("APP_DEEPLINK_URL");
        let app_url_scheme: String = get_env_default("APP_URL_SCHEME", "feedbackapp".to_string());

        let mailgun_api_key = SecretString::new(get_env::<String>("MAILGUN_API_KEY").into());
        let mailgun_domain: String = get_env("MAILGUN_DOMAIN");
        let mailgun_base_url: Url =
            get_env_default("MAILGUN_BASE_URL", Url::parse("https://api.mailgun.net")?);
        let email_from: String = get_env("EMAIL_FROM");

        let slack_webhook_url = std::env::var("SLACK_WEBHOOK_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(|s| SecretString::new(s.into()));

        let cors_origin_raw: String = get_env_default("CORS_ORIGIN", String::from("*"));
        let cors_origin = match cors_origin_raw.as_str() {
            "*" => None,
            origin => Some(origin.parse::<HeaderValue>()?),
        };

        let outbound_timeout_secs: u64 = get_env_default("OUTBOUND_TIMEOUT_SECS", 10);
        let request_timeout_secs: u64 = get_env_default("REQUEST_TIMEOUT_SECS", 15);

        Ok(Self {
            bind_addr,
            database_url,
            db_max_connections,
            run_migrations,
            jwt_secret,
            session_ttl,
            magic_link_ttl_minutes,
            login_link_retention_days,
            app_deeplink_url,
            app_url_scheme,
            mailgun_api_key,
            mailgun_domain,
            mailgun_base_url,
            email_from,
            slack_webhook_url,
            cors_origin,
            outbound_timeout: std::time::Duration::from_secs(outbound_timeout_secs),
            request_timeout: std::time::Duration::from_secs(request_timeout_secs),
        })
    }

    pub fn auth_settings(&self) -> AuthSettings {
        AuthSettings {
            magic_link_ttl: chrono::Duration::minutes(self.magic_link_ttl_minutes),
            session_ttl: self.session_ttl,
            outbound_timeout: self.outbound_timeout,
        }
    }
}

/// A non-positive TTL would mint sessions that are already expired.
fn session_ttl_from_days(days: i64) -> anyhow::Result<Duration> {
    anyhow::ensure!(days > 0, "SESSION_TTL_DAYS must be positive, got {days}");
    Ok(Duration::days(days))
}
