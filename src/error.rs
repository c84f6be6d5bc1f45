use axum::http::StatusCode;
use serde_json::{Value, json};
use thiserror::Error;

use crate::response::Envelope;
use crate::validation::FieldErrors;

/// The five course operations, used to pick failure messages and label log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Get,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Get => "get",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            Operation::List => "Failed to retrieve courses",
            Operation::Create => "Failed to create course",
            Operation::Get => "Failed to retrieve course",
            Operation::Update => "Failed to update course",
            Operation::Delete => "Failed to delete course",
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{field} '{value}' already exists")]
    Conflict { field: &'static str, value: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum CourseError {
    #[error("Missing fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Validation failed: {0:?}")]
    Validation(FieldErrors),

    #[error("Invalid request data: {0}")]
    InvalidBody(String),

    #[error("Course with id {id} does not exist")]
    NotFound { id: String },

    #[error("Course {field} '{value}' already exists")]
    Conflict { field: String, value: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CourseError {
    pub fn not_found(id: impl ToString) -> Self {
        CourseError::NotFound { id: id.to_string() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CourseError::MissingFields(_)
            | CourseError::Validation(_)
            | CourseError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            CourseError::NotFound { .. } => StatusCode::NOT_FOUND,
            CourseError::Conflict { .. } => StatusCode::CONFLICT,
            CourseError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into the failure envelope for `operation`.
    ///
    /// Internal detail never reaches the envelope; callers log it first.
    pub fn into_envelope(self, operation: Operation) -> Envelope {
        let status = self.status();
        let (message, errors): (&str, Value) = match self {
            CourseError::MissingFields(fields) => {
                ("Validation failed", json!({ "missing_fields": fields }))
            }
            CourseError::Validation(errors) => ("Validation failed", Value::Object(errors)),
            CourseError::InvalidBody(detail) => ("Invalid request data", json!({ "detail": detail })),
            CourseError::NotFound { id } => (
                "Course not found",
                json!({ "resource": format!("Course with id {} does not exist", id) }),
            ),
            CourseError::Conflict { field, value } => {
                let mut errors = FieldErrors::new();
                errors.insert(
                    field.clone(),
                    Value::String(format!("Course {} '{}' already exists", field, value)),
                );
                ("Course already exists", Value::Object(errors))
            }
            CourseError::Internal(_) => (
                operation.failure_message(),
                json!({ "detail": "Internal server error" }),
            ),
        };

        Envelope::failure(status, message, errors)
    }
}

impl From<StoreError> for CourseError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { field, value } => CourseError::Conflict {
                field: field.to_string(),
                value,
            },
            StoreError::Database(e) => CourseError::Internal(e.to_string()),
        }
    }
}
