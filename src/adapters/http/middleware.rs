use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{adapters::http::app_state::AppState, app_error::AppError, app_error::AppResult};

/// Gate for protected routes: resolves the bearer session into an `AuthenticatedUser`
/// request extension. Never touches storage.
pub async fn require_auth(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .filter(|value| !value.is_empty())
        .ok_or(AppError::MissingAuthorization)?;
    let header = header
        .to_str()
        .map_err(|_| AppError::InvalidAuthorizationFormat)?;

    let token = bearer_token(header)?;
    let user = app_state.auth_use_cases.authenticate(token)?;

    tracing::debug!(user_id = %user.user_id, "Request authenticated");
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Exactly two space-separated parts, the first being `Bearer`.
fn bearer_token(header: &str) -> AppResult<&str> {
    let parts: Vec<&str> = header.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] => Ok(token),
        _ => Err(AppError::InvalidAuthorizationFormat),
    }
}
