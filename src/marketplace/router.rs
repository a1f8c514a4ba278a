use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use super::domain::{
    Application, ApplicationListing, ApplyRequest, CompletionOutcome, CreateJobRequest,
    FeedbackRequest, JobDetail, JobListing, LoginRequest, LoginResponse, RegisterRequest,
    UserProfile,
};
use super::ids::IdGenerator;
use super::service::{MarketplaceError, MarketplaceService};

type SharedService<G> = State<Arc<MarketplaceService<G>>>;

/// Router exposing the `/api` surface with permissive CORS headers.
pub fn marketplace_router<G>(service: Arc<MarketplaceService<G>>) -> Router
where
    G: IdGenerator + 'static,
{
    Router::new()
        .route("/api/auth/login", post(login_handler::<G>))
        .route("/api/auth/register", post(register_handler::<G>))
        .route("/api/profiles/:id", get(profile_handler::<G>))
        .route(
            "/api/jobs",
            get(list_jobs_handler::<G>).post(create_job_handler::<G>),
        )
        .route("/api/jobs/:id", get(job_handler::<G>))
        .route("/api/jobs/:id/apply", post(apply_handler::<G>))
        .route("/api/jobs/:id/feedback", post(feedback_handler::<G>))
        .route(
            "/api/volunteers/:id/applications",
            get(volunteer_applications_handler::<G>),
        )
        .route(
            "/api/requesters/:id/jobs",
            get(requester_jobs_handler::<G>),
        )
        .layer(middleware::from_fn(cors_headers))
        .with_state(service)
}

impl MarketplaceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MarketplaceError::InvalidPayload
            | MarketplaceError::InvalidRole
            | MarketplaceError::MissingRegistrationFields
            | MarketplaceError::MissingJobFields
            | MarketplaceError::RequesterMissing
            | MarketplaceError::VolunteerMissing => StatusCode::BAD_REQUEST,
            MarketplaceError::AccountNotFound => StatusCode::UNAUTHORIZED,
            MarketplaceError::ProfileNotFound
            | MarketplaceError::JobNotFound
            | MarketplaceError::VolunteerNotFound
            | MarketplaceError::RequesterNotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for MarketplaceError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}

/// Decode a JSON request body. The `Content-Type` header is not consulted.
fn body<T: DeserializeOwned>(payload: &Bytes) -> Result<T, MarketplaceError> {
    serde_json::from_slice(payload).map_err(|err| {
        debug!(%err, "request body rejected");
        MarketplaceError::InvalidPayload
    })
}

pub(crate) async fn cors_headers(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, PATCH, DELETE, OPTIONS"),
    );
    response
}

pub(crate) async fn login_handler<G>(
    State(service): SharedService<G>,
    payload: Bytes,
) -> Result<Json<LoginResponse>, MarketplaceError>
where
    G: IdGenerator + 'static,
{
    service.login(body(&payload)?).map(Json)
}

pub(crate) async fn register_handler<G>(
    State(service): SharedService<G>,
    payload: Bytes,
) -> Result<(StatusCode, Json<UserProfile>), MarketplaceError>
where
    G: IdGenerator + 'static,
{
    let profile = service.register(body(&payload)?)?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub(crate) async fn profile_handler<G>(
    State(service): SharedService<G>,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, MarketplaceError>
where
    G: IdGenerator + 'static,
{
    service.profile(&id).map(Json)
}

pub(crate) async fn list_jobs_handler<G>(State(service): SharedService<G>) -> Json<JobListing>
where
    G: IdGenerator + 'static,
{
    Json(JobListing {
        jobs: service.jobs(),
    })
}

pub(crate) async fn job_handler<G>(
    State(service): SharedService<G>,
    Path(id): Path<String>,
) -> Result<Json<JobDetail>, MarketplaceError>
where
    G: IdGenerator + 'static,
{
    service.job(&id).map(Json)
}

pub(crate) async fn create_job_handler<G>(
    State(service): SharedService<G>,
    payload: Bytes,
) -> Result<(StatusCode, Json<JobDetail>), MarketplaceError>
where
    G: IdGenerator + 'static,
{
    let job = service.create_job(body(&payload)?)?;
    Ok((StatusCode::CREATED, Json(job)))
}

pub(crate) async fn apply_handler<G>(
    State(service): SharedService<G>,
    Path(job_id): Path<String>,
    payload: Bytes,
) -> Result<(StatusCode, Json<Application>), MarketplaceError>
where
    G: IdGenerator + 'static,
{
    let application = service.apply(&job_id, body(&payload)?)?;
    Ok((StatusCode::CREATED, Json(application)))
}

pub(crate) async fn feedback_handler<G>(
    State(service): SharedService<G>,
    Path(job_id): Path<String>,
    payload: Bytes,
) -> Result<Json<CompletionOutcome>, MarketplaceError>
where
    G: IdGenerator + 'static,
{
    service.complete(&job_id, body(&payload)?).map(Json)
}

pub(crate) async fn volunteer_applications_handler<G>(
    State(service): SharedService<G>,
    Path(volunteer_id): Path<String>,
) -> Result<Json<ApplicationListing>, MarketplaceError>
where
    G: IdGenerator + 'static,
{
    let items = service.volunteer_applications(&volunteer_id)?;
    Ok(Json(ApplicationListing { items }))
}

pub(crate) async fn requester_jobs_handler<G>(
    State(service): SharedService<G>,
    Path(requester_id): Path<String>,
) -> Result<Json<JobListing>, MarketplaceError>
where
    G: IdGenerator + 'static,
{
    let jobs = service.requester_jobs(&requester_id)?;
    Ok(Json(JobListing { jobs }))
}
