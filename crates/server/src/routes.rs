use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::auth_gate;
use crate::state::AppState;

pub mod trackers;
pub mod user;

#[utoipa::path(get, path = "/health", tag = "meta", responses((status = 200, description = "Service healthy")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public auth routes, the protected
/// tracker surface behind the auth gate, and API docs.
pub fn build_router(cors: CorsLayer, state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/user/signup", post(user::signup))
        .route("/user/login", post(user::login));

    let protected = Router::new()
        .route("/user/me", get(user::me))
        .route("/trackers", post(trackers::create).get(trackers::list))
        .route("/trackers/test", post(trackers::test))
        .route(
            "/trackers/:id",
            get(trackers::get_one).put(trackers::update).delete(trackers::remove),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_gate::require_session,
        ));

    public
        .merge(protected)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()),
        )
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
