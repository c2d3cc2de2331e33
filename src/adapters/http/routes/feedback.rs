use axum::{
    Extension, Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::post,
};
use serde::Deserialize;

use crate::{
    adapters::http::{app_state::AppState, middleware::require_auth},
    app_error::AppResult,
    use_cases::user::AuthenticatedUser,
};

#[derive(Deserialize)]
struct CreateFeedbackPayload {
    #[serde(default)]
    message: String,
}

/// Every route here sits behind the bearer session gate.
pub fn router(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/feedback", post(create_feedback))
        .route_layer(middleware::from_fn_with_state(app_state, require_auth))
}

/// POST /feedback
async fn create_feedback(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    payload: Result<Json<CreateFeedbackPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let created = app_state
        .feedback_use_cases
        .create_feedback(&user, &payload.message)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}
