use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::db::CourseStore;
use crate::error::{CourseError, Operation};
use crate::models::Course;
use crate::response::Envelope;
use crate::services::activity::{Activity, ActivityLog, TracingActivityLog};
use crate::validation::{Payload, parse_course_patch, parse_new_course};

/// A request body that could not be decoded into a JSON object.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct InvalidBody(pub String);

pub type RequestBody = Result<Payload, InvalidBody>;

impl From<InvalidBody> for CourseError {
    fn from(err: InvalidBody) -> Self {
        CourseError::InvalidBody(err.0)
    }
}

/// Runs course operations against a [`CourseStore`] and wraps every
/// outcome in an [`Envelope`].
///
/// Holds no records between calls. Ids arrive as raw path segments; one
/// that is not an integer cannot name a record and is reported as not found.
pub struct CourseService {
    store: Arc<dyn CourseStore>,
    activity: Arc<dyn ActivityLog>,
}

impl CourseService {
    pub fn new(store: Arc<dyn CourseStore>, activity: Arc<dyn ActivityLog>) -> Self {
        Self { store, activity }
    }

    pub fn with_tracing(store: Arc<dyn CourseStore>) -> Self {
        Self::new(store, Arc::new(TracingActivityLog))
    }

    pub async fn list(&self) -> Envelope {
        match self.store.list().await {
            Ok(courses) => {
                let total = courses.len();
                self.activity.record(Activity::Listed { total });
                Envelope::success(
                    StatusCode::OK,
                    "Courses retrieved successfully",
                    json!({ "items": courses, "total": total }),
                )
            }
            Err(err) => self.fail(Operation::List, err.into()),
        }
    }

    pub async fn create(&self, body: RequestBody) -> Envelope {
        match self.try_create(body).await {
            Ok(course) => {
                self.activity.record(Activity::Created {
                    id: course.id,
                    code: course.code.clone(),
                });
                Envelope::success(
                    StatusCode::CREATED,
                    "Course created successfully",
                    json!({ "course": course }),
                )
            }
            Err(err) => self.fail(Operation::Create, err),
        }
    }

    pub async fn get(&self, id: &str) -> Envelope {
        match self.find(id).await {
            Ok(course) => {
                self.activity.record(Activity::Retrieved {
                    id: course.id,
                    code: course.code.clone(),
                });
                Envelope::success(
                    StatusCode::OK,
                    "Course retrieved successfully",
                    json!({ "course": course }),
                )
            }
            Err(err) => self.fail(Operation::Get, err),
        }
    }

    pub async fn update(&self, id: &str, body: RequestBody) -> Envelope {
        match self.try_update(id, body).await {
            Ok(course) => {
                self.activity.record(Activity::Updated {
                    id: course.id,
                    code: course.code.clone(),
                });
                Envelope::success(
                    StatusCode::OK,
                    "Course updated successfully",
                    json!({ "course": course }),
                )
            }
            Err(err) => self.fail(Operation::Update, err),
        }
    }

    pub async fn delete(&self, id: &str) -> Envelope {
        match self.try_delete(id).await {
            Ok(snapshot) => {
                self.activity.record(Activity::Deleted {
                    id: snapshot.id,
                    code: snapshot.code.clone(),
                });
                Envelope::success(
                    StatusCode::OK,
                    "Course deleted successfully",
                    json!({ "deleted_course": snapshot }),
                )
            }
            Err(err) => self.fail(Operation::Delete, err),
        }
    }

    async fn try_create(&self, body: RequestBody) -> Result<Course, CourseError> {
        let payload = body?;
        let new_course = parse_new_course(&payload)?;
        Ok(self.store.insert(new_course).await?)
    }

    // Existence is checked before the body is looked at, so a missing id
    // always wins over validation errors.
    async fn try_update(&self, id: &str, body: RequestBody) -> Result<Course, CourseError> {
        let current = self.find(id).await?;
        let payload = body?;
        let patch = parse_course_patch(&payload)?;

        self.store
            .update(current.id, &patch)
            .await?
            .ok_or_else(|| CourseError::not_found(current.id))
    }

    async fn try_delete(&self, id: &str) -> Result<Course, CourseError> {
        let current = self.find(id).await?;

        self.store
            .delete(current.id)
            .await?
            .ok_or_else(|| CourseError::not_found(current.id))
    }

    async fn find(&self, raw_id: &str) -> Result<Course, CourseError> {
        let id: i64 = raw_id.parse().map_err(|_| CourseError::not_found(raw_id))?;

        self.store
            .get(id)
            .await?
            .ok_or_else(|| CourseError::not_found(id))
    }

    fn fail(&self, operation: Operation, err: CourseError) -> Envelope {
        self.activity.record(Activity::from_error(operation, &err));
        err.into_envelope(operation)
    }
}
