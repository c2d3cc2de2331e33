use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::{adapters::http::app_state::AppState, app_error::AppResult};

#[derive(Deserialize)]
struct RequestLoginLinkPayload {
    #[serde(default)]
    email: String,
}

#[derive(Serialize)]
struct RequestLoginLinkResponse {
    ok: bool,
}

#[derive(Deserialize)]
struct VerifyLoginLinkPayload {
    #[serde(default)]
    token: String,
}

#[derive(Deserialize)]
struct DeeplinkQuery {
    token: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login-link", post(request_login_link))
        .route("/login-link/verify", post(verify_login_link))
        .route("/deeplink", get(deeplink))
}

/// POST /auth/login-link
async fn request_login_link(
    State(app_state): State<AppState>,
    payload: Result<Json<RequestLoginLinkPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload?;
    app_state
        .auth_use_cases
        .request_login_link(&payload.email)
        .await?;
    Ok((StatusCode::OK, Json(RequestLoginLinkResponse { ok: true })))
}

/// POST /auth/login-link/verify
async fn verify_login_link(
    State(app_state): State<AppState>,
    payload: Result<Json<VerifyLoginLinkPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let login = app_state
        .auth_use_cases
        .verify_login_link(&payload.token)
        .await?;
    Ok((StatusCode::OK, Json(login)))
}

/// GET /auth/deeplink?token=...
/// Bounces the browser from the emailed https link into the app's URI scheme.
async fn deeplink(
    State(app_state): State<AppState>,
    Query(query): Query<DeeplinkQuery>,
) -> Response {
    let Some(token) = query.token.filter(|t| !t.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            "missing token",
        )
            .into_response();
    };

    let token: String = form_urlencoded::byte_serialize(token.as_bytes()).collect();
    let target = format!("{}://auth?token={}", app_state.config.app_url_scheme, token);
    Html(deeplink_page(&target, app_state.config.magic_link_ttl_minutes)).into_response()
}

fn deeplink_page(target: &str, ttl_minutes: i64) -> String {
    // JSON string literal doubles as a safe JS string literal.
    let target_js = serde_json::Value::String(target.to_string()).to_string();
    format!(
        r#"<!doctype html>
<html>
<head>
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Open FeedbackApp</title>
</head>
<body style="font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,Arial,sans-serif;padding:24px;line-height:1.4;">
  <h2>Opening FeedbackApp...</h2>
  <p>If nothing happens, tap the button below.</p>
  <p>
    <a href="{target}"
       style="display:inline-block;padding:12px 16px;border:1px solid #ccc;border-radius:10px;text-decoration:none;">
      Open FeedbackApp
    </a>
  </p>
  <p style="color:#666;margin-top:24px;">This login link expires in {ttl_minutes} minutes.</p>
  <script>
    window.location.href = {target_js};
  </script>
</body>
</html>"#
    )
}
