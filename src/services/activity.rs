use std::sync::{Mutex, PoisonError};

use tracing::{error, info, warn};

use crate::error::{CourseError, Operation};
use crate::validation::FieldErrors;

/// Something the course service reports while handling an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Activity {
    Listed { total: usize },
    Retrieved { id: i64, code: String },
    Created { id: i64, code: String },
    Updated { id: i64, code: String },
    Deleted { id: i64, code: String },
    NotFound { operation: Operation, id: String },
    Rejected { operation: Operation, errors: FieldErrors },
    Conflict { operation: Operation, field: String, value: String },
    Failed { operation: Operation, detail: String },
}

impl Activity {
    pub fn from_error(operation: Operation, err: &CourseError) -> Self {
        match err {
            CourseError::MissingFields(fields) => {
                let mut errors = FieldErrors::new();
                errors.insert("missing_fields".to_string(), fields.clone().into());
                Activity::Rejected { operation, errors }
            }
            CourseError::Validation(errors) => Activity::Rejected {
                operation,
                errors: errors.clone(),
            },
            CourseError::InvalidBody(detail) => {
                let mut errors = FieldErrors::new();
                errors.insert("detail".to_string(), detail.clone().into());
                Activity::Rejected { operation, errors }
            }
            CourseError::NotFound { id } => Activity::NotFound {
                operation,
                id: id.clone(),
            },
            CourseError::Conflict { field, value } => Activity::Conflict {
                operation,
                field: field.clone(),
                value: value.clone(),
            },
            CourseError::Internal(detail) => Activity::Failed {
                operation,
                detail: detail.clone(),
            },
        }
    }
}

/// Observability sink handed to the course service.
pub trait ActivityLog: Send + Sync {
    fn record(&self, activity: Activity);
}

/// Forwards activity to `tracing`.
pub struct TracingActivityLog;

impl ActivityLog for TracingActivityLog {
    fn record(&self, activity: Activity) {
        match activity {
            Activity::Listed { total } => info!(total, "retrieved course records"),
            Activity::Retrieved { id, code } => info!(id, %code, "retrieved course"),
            Activity::Created { id, code } => info!(id, %code, "created course"),
            Activity::Updated { id, code } => info!(id, %code, "updated course"),
            Activity::Deleted { id, code } => info!(id, %code, "deleted course"),
            Activity::NotFound { operation, id } => {
                warn!(operation = operation.as_str(), %id, "course not found")
            }
            Activity::Rejected { operation, errors } => {
                warn!(operation = operation.as_str(), ?errors, "course request rejected")
            }
            Activity::Conflict {
                operation,
                field,
                value,
            } => warn!(operation = operation.as_str(), %field, %value, "course already exists"),
            Activity::Failed { operation, detail } => {
                error!(operation = operation.as_str(), %detail, "course operation failed")
            }
        }
    }
}

/// Keeps every activity in memory, for assertions.
#[derive(Default)]
pub struct RecordingActivityLog {
    events: Mutex<Vec<Activity>>,
}

impl RecordingActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Activity> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ActivityLog for RecordingActivityLog {
    fn record(&self, activity: Activity) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(activity);
    }
}
