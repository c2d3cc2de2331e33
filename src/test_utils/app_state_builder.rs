//! Test app state builder for HTTP-level testing.
//!
//! `TestAppStateBuilder` wires the real use cases to in-memory mocks so handlers and
//! middleware run exactly as in production, minus Postgres and the network.

use std::sync::Arc;

use crate::{
    adapters::http::app_state::AppState,
    test_utils::{
        InMemoryEmailSender, InMemoryFeedbackRepo, InMemoryUserRepo, RecordingNotifier,
        test_config,
    },
    use_cases::{
        feedback::{FeedbackNotifier, FeedbackUseCases},
        user::{AuthUseCases, EmailSender},
    },
};

/// Handles on the mocks behind a built `AppState`, for assertions.
pub struct TestMocks {
    pub app_state: AppState,
    pub users: Arc<InMemoryUserRepo>,
    pub emails: Arc<InMemoryEmailSender>,
    pub feedback: Arc<InMemoryFeedbackRepo>,
    pub notifier: Arc<RecordingNotifier>,
}

/// # Example
///
/// ```ignore
/// let mocks = TestAppStateBuilder::new().build_with_mocks();
/// let server = TestServer::new(router.with_state(mocks.app_state)).unwrap();
/// // ...
/// let raw = mocks.emails.last_sent().unwrap().raw_token;
/// ```
#[derive(Default)]
pub struct TestAppStateBuilder {
    email_sender: Option<Arc<dyn EmailSender>>,
    notifier: Option<Arc<dyn FeedbackNotifier>>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the capturing email sender (e.g. with a failing one).
    pub fn with_email_sender(mut self, sender: Arc<dyn EmailSender>) -> Self {
        self.email_sender = Some(sender);
        self
    }

    /// Replace the recording notifier.
    pub fn with_notifier(mut self, notifier: Arc<dyn FeedbackNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn build(self) -> AppState {
        self.build_with_mocks().app_state
    }

    /// Overrides set via `with_*` take the place of the returned capture mocks,
    /// which then stay empty.
    pub fn build_with_mocks(self) -> TestMocks {
        let users = Arc::new(InMemoryUserRepo::new());
        let emails = Arc::new(InMemoryEmailSender::new());
        let feedback = Arc::new(InMemoryFeedbackRepo::new());
        let notifier = Arc::new(RecordingNotifier::new());

        let email_sender: Arc<dyn EmailSender> =
            self.email_sender.unwrap_or_else(|| emails.clone());
        let feedback_notifier: Arc<dyn FeedbackNotifier> =
            self.notifier.unwrap_or_else(|| notifier.clone());

        let config = test_config();

        let auth_use_cases = AuthUseCases::new(
            users.clone(),
            email_sender,
            config.app_deeplink_url.clone(),
            config.jwt_secret.clone(),
            config.auth_settings(),
        );
        let feedback_use_cases =
            FeedbackUseCases::new(feedback.clone(), feedback_notifier, config.outbound_timeout);

        let app_state = AppState {
            config: Arc::new(config),
            auth_use_cases: Arc::new(auth_use_cases),
            feedback_use_cases: Arc::new(feedback_use_cases),
        };

        TestMocks {
            app_state,
            users,
            emails,
            feedback,
            notifier,
        }
    }
}
