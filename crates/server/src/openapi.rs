use utoipa::OpenApi;
use utoipa::ToSchema;

// Doc twins for request bodies living in the service crate; the wire shapes
// are camelCase.

#[derive(ToSchema)]
#[schema(as = SignupRequest)]
pub struct SignupRequest {
    #[schema(example = "Ada Lovelace")]
    pub full_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
}

#[derive(ToSchema)]
#[schema(as = LoginRequest)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema)]
#[schema(as = TrackerRequest)]
pub struct TrackerRequest {
    pub name: String,
    pub cron_expr: String,
    #[schema(example = "innerText")]
    pub compare_mode: String,
    pub website_url: String,
    pub selector: String,
}

#[derive(ToSchema)]
#[schema(as = ProbeRequest)]
pub struct ProbeRequest {
    pub website_url: String,
    pub selector: String,
    #[schema(example = "innerHtml")]
    pub compare_mode: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::user::signup,
        crate::routes::user::login,
        crate::routes::user::me,
        crate::routes::trackers::create,
        crate::routes::trackers::list,
        crate::routes::trackers::get_one,
        crate::routes::trackers::update,
        crate::routes::trackers::remove,
        crate::routes::trackers::test,
    ),
    components(schemas(SignupRequest, LoginRequest, TrackerRequest, ProbeRequest)),
    tags(
        (name = "user", description = "Signup, login, and identity"),
        (name = "trackers", description = "Ownership-scoped tracker CRUD and selector preview"),
        (name = "meta", description = "Service metadata")
    )
)]
pub struct ApiDoc;
