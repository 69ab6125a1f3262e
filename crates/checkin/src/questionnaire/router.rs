use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ResultMood, UserId, Viewer};
use super::recommendations::recommendations_for;
use super::repository::{ResultRepository, UnlockPublisher};
use super::service::{CheckinService, CheckinServiceError, SessionEvent, SessionId};

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    /// Signed-in user id from the identity collaborator; absent for an
    /// anonymous visitor.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Router builder exposing the check-in flow to the presentation layer.
pub fn checkin_router<R, U>(service: Arc<CheckinService<R, U>>) -> Router
where
    R: ResultRepository + 'static,
    U: UnlockPublisher + 'static,
{
    Router::new()
        .route("/api/v1/checkin/sessions", post(start_handler::<R, U>))
        .route(
            "/api/v1/checkin/sessions/:session_id",
            get(view_handler::<R, U>),
        )
        .route(
            "/api/v1/checkin/sessions/:session_id/events",
            post(event_handler::<R, U>),
        )
        .route(
            "/api/v1/checkin/recommendations/:mood",
            get(recommendations_handler),
        )
        .route(
            "/api/v1/checkin/users/:user_id/last-checkin",
            get(last_checkin_handler::<R, U>),
        )
        .with_state(service)
}

pub(crate) async fn start_handler<R, U>(
    State(service): State<Arc<CheckinService<R, U>>>,
    axum::Json(request): axum::Json<StartSessionRequest>,
) -> Response
where
    R: ResultRepository + 'static,
    U: UnlockPublisher + 'static,
{
    let viewer = match request.user_id {
        Some(user_id) => Viewer::SignedIn(UserId(user_id)),
        None => Viewer::Anonymous,
    };

    let view = service.start(viewer);
    (StatusCode::CREATED, axum::Json(view)).into_response()
}

pub(crate) async fn view_handler<R, U>(
    State(service): State<Arc<CheckinService<R, U>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: ResultRepository + 'static,
    U: UnlockPublisher + 'static,
{
    match service.view(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn event_handler<R, U>(
    State(service): State<Arc<CheckinService<R, U>>>,
    Path(session_id): Path<String>,
    axum::Json(event): axum::Json<SessionEvent>,
) -> Response
where
    R: ResultRepository + 'static,
    U: UnlockPublisher + 'static,
{
    match service.apply(&SessionId(session_id), event) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recommendations_handler(Path(mood): Path<String>) -> Response {
    match ResultMood::parse(&mood) {
        Some(mood) => {
            (StatusCode::OK, axum::Json(recommendations_for(mood))).into_response()
        }
        None => {
            let payload = json!({ "error": format!("unknown mood band: {mood}") });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn last_checkin_handler<R, U>(
    State(service): State<Arc<CheckinService<R, U>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: ResultRepository + 'static,
    U: UnlockPublisher + 'static,
{
    match service.last_checkin(&UserId(user_id)) {
        Ok(Some(snapshot)) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Ok(None) => {
            let payload = json!({ "error": "no completed check-in on record" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: CheckinServiceError) -> Response {
    let status = match &error {
        CheckinServiceError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        CheckinServiceError::Session(_) => StatusCode::CONFLICT,
        CheckinServiceError::UnknownRecommendation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CheckinServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
