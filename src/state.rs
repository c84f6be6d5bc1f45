use std::sync::Arc;
use std::time::Duration;

use crate::db::CourseStore;
use crate::services::{ActivityLog, CourseService, TracingActivityLog};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CourseStore>,
    pub courses: Arc<CourseService>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(store: Arc<dyn CourseStore>, request_timeout: Duration) -> Self {
        Self::with_activity(store, Arc::new(TracingActivityLog), request_timeout)
    }

    pub fn with_activity(
        store: Arc<dyn CourseStore>,
        activity: Arc<dyn ActivityLog>,
        request_timeout: Duration,
    ) -> Self {
        let courses = Arc::new(CourseService::new(store.clone(), activity));
        Self {
            store,
            courses,
            request_timeout,
        }
    }
}
