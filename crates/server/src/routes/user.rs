use axum::{extract::State, Extension, Json};
use serde::Serialize;

use service::auth::domain::{LoginInput, SignupInput};

use crate::auth_gate::CurrentUser;
use crate::errors::ApiError;
use crate::state::AppState;
use crate::validate::ValidateBody;

#[derive(Serialize)]
pub struct TokenOutput {
    pub token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeOutput {
    pub full_name: String,
    pub email: String,
}

#[utoipa::path(post, path = "/user/signup", tag = "user", request_body = crate::openapi::SignupRequest,
    responses((status = 200, description = "Token issued"), (status = 400, description = "Validation failed or email taken")))]
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupInput>,
) -> Result<Json<TokenOutput>, ApiError> {
    input.validate_body()?;
    let token = state.auth.signup(input).await?;
    Ok(Json(TokenOutput { token }))
}

#[utoipa::path(post, path = "/user/login", tag = "user", request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Token issued"), (status = 401, description = "Invalid credentials")))]
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<TokenOutput>, ApiError> {
    input.validate_body()?;
    let token = state.auth.login(input).await?;
    Ok(Json(TokenOutput { token }))
}

#[utoipa::path(get, path = "/user/me", tag = "user",
    responses((status = 200, description = "Current user"), (status = 401, description = "No token"),
              (status = 403, description = "Bad token"), (status = 404, description = "User gone")))]
pub async fn me(Extension(user): Extension<CurrentUser>) -> Json<MeOutput> {
    let CurrentUser(user) = user;
    Json(MeOutput { full_name: user.full_name, email: user.email })
}
