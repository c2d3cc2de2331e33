use std::fs::File;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::{
        email::mailgun::MailgunEmailSender,
        http::app_state::AppState,
        notifier::{logging::LogNotifier, slack::SlackWebhookNotifier},
    },
    infra::{config::AppConfig, postgres_persistence},
    use_cases::{
        feedback::{FeedbackNotifier, FeedbackRepo, FeedbackUseCases},
        user::{AuthUseCases, UserRepo},
    },
};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env()?;

    let postgres_arc = Arc::new(postgres_persistence(&config).await?);

    let email = Arc::new(MailgunEmailSender::new(
        config.mailgun_api_key.clone(),
        config.mailgun_base_url.clone(),
        config.mailgun_domain.clone(),
        config.email_from.clone(),
        config.magic_link_ttl_minutes,
        config.outbound_timeout,
    )?);

    let notifier: Arc<dyn FeedbackNotifier> = match &config.slack_webhook_url {
        Some(webhook_url) => Arc::new(SlackWebhookNotifier::new(
            webhook_url.clone(),
            config.outbound_timeout,
        )?),
        None => {
            tracing::warn!("SLACK_WEBHOOK_URL not set, feedback will only be logged");
            Arc::new(LogNotifier)
        }
    };

    let user_repo_arc = postgres_arc.clone() as Arc<dyn UserRepo>;
    let feedback_repo_arc = postgres_arc.clone() as Arc<dyn FeedbackRepo>;

    let auth_use_cases = AuthUseCases::new(
        user_repo_arc,
        email,
        config.app_deeplink_url.clone(),
        config.jwt_secret.clone(),
        config.auth_settings(),
    );

    let feedback_use_cases =
        FeedbackUseCases::new(feedback_repo_arc, notifier, config.outbound_timeout);

    Ok(AppState {
        config: Arc::new(config),
        auth_use_cases: Arc::new(auth_use_cases),
        feedback_use_cases: Arc::new(feedback_use_cases),
    })
}

pub fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "feedback_api=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs)
    let file = File::create("app.log")?;
    let json_layer = fmt::layer()
        .json()
        .with_writer(file)
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    Ok(())
}
