pub mod activity;
pub mod course_service;

pub use activity::{Activity, ActivityLog, RecordingActivityLog, TracingActivityLog};
pub use course_service::{CourseService, InvalidBody, RequestBody};
