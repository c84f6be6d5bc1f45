use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::response::Envelope;
use crate::services::{InvalidBody, RequestBody};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let timeout = state.request_timeout;

    Router::new()
        .route("/health", get(health))
        .route("/api/matakuliah", get(list_courses).post(create_course))
        .route(
            "/api/matakuliah/{id}",
            get(get_course)
                .put(update_course)
                .patch(update_course)
                .delete(delete_course),
        )
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(map_response(timeout_envelope))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(err) => {
            error!("health check failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}

async fn list_courses(State(state): State<AppState>) -> Envelope {
    state.courses.list().await
}

async fn create_course(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Envelope {
    state.courses.create(request_body(body)).await
}

async fn get_course(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
) -> Envelope {
    state.courses.get(&path_id(path, &uri)).await
}

async fn update_course(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Envelope {
    state.courses.update(&path_id(path, &uri), request_body(body)).await
}

async fn delete_course(
    State(state): State<AppState>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
) -> Envelope {
    state.courses.delete(&path_id(path, &uri)).await
}

/// An id that cannot be decoded still has to reach the service so it
/// resolves to NotFound. The raw, still-encoded segment stands in for it.
fn path_id(path: Result<Path<String>, PathRejection>, uri: &Uri) -> String {
    match path {
        Ok(Path(id)) => id,
        Err(_) => uri
            .path()
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

// TimeoutLayer answers with an empty body; give it the usual envelope.
async fn timeout_envelope(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }
    Envelope::failure(
        StatusCode::REQUEST_TIMEOUT,
        "Request timed out",
        json!({ "detail": "The server did not finish the request in time" }),
    )
    .into_response()
}

fn request_body(body: Result<Json<Value>, JsonRejection>) -> RequestBody {
    match body {
        Ok(Json(Value::Object(payload))) => Ok(payload),
        Ok(Json(_)) => Err(InvalidBody("Request body must be a JSON object".to_string())),
        Err(rejection) => Err(InvalidBody(rejection.body_text())),
    }
}
