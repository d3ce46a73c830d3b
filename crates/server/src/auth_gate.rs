//! Per-request auth gate for protected routes.
//!
//! Missing credential is 401; a credential that fails verification is 403;
//! a verified token whose subject no longer exists is 404. The resolved
//! user rides the request as an extension value, so downstream handlers
//! never touch the raw token.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use service::auth::domain::AuthUser;

use crate::errors::ApiError;
use crate::state::AppState;

/// Identity resolved by the gate, injected into request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthUser);

pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(ApiError::Unauthenticated)?
        .to_str()
        .map_err(|_| ApiError::Unauthenticated)?;
    let token = header.strip_prefix("Bearer ").unwrap_or(header);

    let subject = state
        .auth
        .verify_session(token)
        .map_err(|_| ApiError::InvalidToken)?;

    // Live existence check: a cryptographically valid token for a deleted
    // account must not authenticate.
    let user = state
        .users
        .find_user_by_id(subject)
        .await
        .map_err(ApiError::from)?
        .ok_or(ApiError::NotFound("User"))?;

    req.extensions_mut().insert(CurrentUser(user.into()));
    Ok(next.run(req).await)
}
