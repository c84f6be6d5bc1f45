pub mod memory;
pub mod repository;
pub mod sqlite;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Course, CoursePatch, NewCourse};

pub use memory::MemoryCourseStore;
pub use sqlite::SqliteCourseStore;

/// Keyed storage for course records.
///
/// Implementations own uniqueness of `code` and must apply `insert`,
/// `update` and `delete` atomically: a duplicate code yields
/// [`StoreError::Conflict`], and `update`/`delete` on a missing id yield
/// `Ok(None)` without creating anything.
#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Course>, StoreError>;
    async fn insert(&self, course: NewCourse) -> Result<Course, StoreError>;
    async fn get(&self, id: i64) -> Result<Option<Course>, StoreError>;
    async fn update(&self, id: i64, patch: &CoursePatch) -> Result<Option<Course>, StoreError>;
    /// Removes the course and returns the row as it was just before deletion.
    async fn delete(&self, id: i64) -> Result<Option<Course>, StoreError>;
    async fn ping(&self) -> Result<(), StoreError>;
}
