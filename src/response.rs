use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

/// Uniform wrapper returned by every course operation.
///
/// `code` mirrors the HTTP status. Exactly one of `data` (on success) or
/// `errors` (on failure) is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub code: u16,
    pub message: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

impl Envelope {
    pub fn success(status: StatusCode, message: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            code: status.as_u16(),
            message: message.into(),
            timestamp: timestamp(),
            data: Some(data),
            errors: None,
        }
    }

    pub fn failure(status: StatusCode, message: impl Into<String>, errors: Value) -> Self {
        Self {
            success: false,
            code: status.as_u16(),
            message: message.into(),
            timestamp: timestamp(),
            data: None,
            errors: Some(errors),
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Current UTC time as ISO-8601 with microseconds and a `Z` suffix.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status = self.status();
        match serde_json::to_vec_pretty(&self) {
            Ok(body) => (
                status,
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                )],
                body,
            )
                .into_response(),
            Err(err) => {
                error!("failed to serialize response envelope: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
