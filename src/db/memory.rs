use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::db::CourseStore;
use crate::error::StoreError;
use crate::models::{Course, CoursePatch, NewCourse};

/// In-process store. Every operation runs under one lock, so code
/// uniqueness and read-modify-write updates stay atomic.
#[derive(Default)]
pub struct MemoryCourseStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i64,
    courses: BTreeMap<i64, Course>,
}

impl Inner {
    fn code_taken(&self, code: &str, except: Option<i64>) -> bool {
        self.courses
            .values()
            .any(|c| c.code == code && Some(c.id) != except)
    }
}

impl MemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CourseStore for MemoryCourseStore {
    async fn list(&self) -> Result<Vec<Course>, StoreError> {
        Ok(self.lock().courses.values().cloned().collect())
    }

    async fn insert(&self, course: NewCourse) -> Result<Course, StoreError> {
        let mut inner = self.lock();
        if inner.code_taken(&course.code, None) {
            return Err(StoreError::Conflict {
                field: "code",
                value: course.code,
            });
        }

        inner.last_id += 1;
        let course = course.into_course(inner.last_id);
        inner.courses.insert(course.id, course.clone());
        Ok(course)
    }

    async fn get(&self, id: i64) -> Result<Option<Course>, StoreError> {
        Ok(self.lock().courses.get(&id).cloned())
    }

    async fn update(&self, id: i64, patch: &CoursePatch) -> Result<Option<Course>, StoreError> {
        let mut inner = self.lock();
        if let Some(code) = &patch.code {
            if inner.courses.contains_key(&id) && inner.code_taken(code, Some(id)) {
                return Err(StoreError::Conflict {
                    field: "code",
                    value: code.clone(),
                });
            }
        }

        Ok(inner.courses.get_mut(&id).map(|course| {
            patch.apply_to(course);
            course.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<Option<Course>, StoreError> {
        Ok(self.lock().courses.remove(&id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
