//! Fixed test settings shared by use case and HTTP tests.

use std::{net::SocketAddr, time::Duration};

use secrecy::SecretString;
use url::Url;

use crate::{infra::config::AppConfig, use_cases::user::AuthSettings};

pub fn test_jwt_secret() -> SecretString {
    SecretString::new("test_jwt_secret".into())
}

pub fn test_deeplink_url() -> Url {
    Url::parse("https://api.feedback.test/auth/deeplink").unwrap()
}

pub fn test_auth_settings() -> AuthSettings {
    AuthSettings {
        magic_link_ttl: chrono::Duration::minutes(15),
        session_ttl: time::Duration::days(30),
        outbound_timeout: Duration::from_secs(10),
    }
}

/// Minimal config for tests. Nothing here points at a live service.
pub fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:3001".parse::<SocketAddr>().unwrap(),
        database_url: String::new(),
        db_max_connections: 1,
        run_migrations: false,
        jwt_secret: test_jwt_secret(),
        session_ttl: time::Duration::days(30),
        magic_link_ttl_minutes: 15,
        login_link_retention_days: 7,
        app_deeplink_url: test_deeplink_url(),
        app_url_scheme: "feedbackapp".to_string(),
        mailgun_api_key: SecretString::new("test_mailgun_key".into()),
        mailgun_domain: "mg.feedback.test".to_string(),
        mailgun_base_url: Url::parse("http://127.0.0.1:9").unwrap(),
        email_from: "Feedback <no-reply@feedback.test>".to_string(),
        slack_webhook_url: None,
        cors_origin: None,
        outbound_timeout: Duration::from_secs(10),
        request_timeout: Duration::from_secs(15),
    }
}
