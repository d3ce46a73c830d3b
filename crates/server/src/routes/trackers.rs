use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use uuid::Uuid;

use models::tracker;
use service::probe::ProbeDraft;
use service::tracker::TrackerSpec;

use crate::auth_gate::CurrentUser;
use crate::errors::ApiError;
use crate::state::AppState;
use crate::validate::ValidateBody;

#[derive(Serialize)]
pub struct MessageOutput {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct TestOutput {
    pub result: String,
}

#[utoipa::path(post, path = "/trackers", tag = "trackers", request_body = crate::openapi::TrackerRequest,
    responses((status = 200, description = "Created tracker"), (status = 400, description = "Validation failed")))]
pub async fn create(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(spec): Json<TrackerSpec>,
) -> Result<Json<tracker::Model>, ApiError> {
    spec.validate_body()?;
    let created = state.trackers.create(user.id, spec).await?;
    Ok(Json(created))
}

#[utoipa::path(get, path = "/trackers", tag = "trackers",
    responses((status = 200, description = "All trackers owned by the caller")))]
pub async fn list(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<tracker::Model>>, ApiError> {
    let rows = state.trackers.list_by_owner(user.id).await?;
    Ok(Json(rows))
}

#[utoipa::path(get, path = "/trackers/{id}", tag = "trackers",
    params(("id" = Uuid, Path, description = "Tracker id")),
    responses((status = 200, description = "Tracker"), (status = 404, description = "Not found")))]
pub async fn get_one(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<tracker::Model>, ApiError> {
    let row = state.trackers.get(user.id, id).await?;
    Ok(Json(row))
}

#[utoipa::path(put, path = "/trackers/{id}", tag = "trackers", request_body = crate::openapi::TrackerRequest,
    params(("id" = Uuid, Path, description = "Tracker id")),
    responses((status = 200, description = "Updated tracker"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(spec): Json<TrackerSpec>,
) -> Result<Json<tracker::Model>, ApiError> {
    spec.validate_body()?;
    let updated = state.trackers.update(user.id, id, spec).await?;
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/trackers/{id}", tag = "trackers",
    params(("id" = Uuid, Path, description = "Tracker id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not found")))]
pub async fn remove(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageOutput>, ApiError> {
    state.trackers.delete(user.id, id).await?;
    Ok(Json(MessageOutput { message: "Tracker deleted successfully" }))
}

/// One-shot preview of what a selector currently resolves to. Nothing is
/// persisted; the draft dies with the request.
#[utoipa::path(post, path = "/trackers/test", tag = "trackers", request_body = crate::openapi::ProbeRequest,
    responses((status = 200, description = "Extracted content"),
              (status = 422, description = "Selector never appeared"),
              (status = 502, description = "Navigation failed"),
              (status = 504, description = "Probe exceeded wall clock")))]
pub async fn test(
    State(state): State<AppState>,
    Extension(CurrentUser(_user)): Extension<CurrentUser>,
    Json(draft): Json<ProbeDraft>,
) -> Result<Json<TestOutput>, ApiError> {
    draft.validate_body()?;
    let result = state.probe.extract(draft).await?;
    Ok(Json(TestOutput { result }))
}
