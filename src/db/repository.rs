use sqlx::SqlitePool;

use crate::error::StoreError;
use crate::models::{Course, CoursePatch, NewCourse};

pub async fn fetch_courses(db: &SqlitePool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, code, name, credits, term FROM courses ORDER BY id"
    )
    .fetch_all(db)
    .await
}

pub async fn find_course_by_id(db: &SqlitePool, id: i64) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, code, name, credits, term FROM courses WHERE id = ?1"
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert_course(db: &SqlitePool, req: NewCourse) -> Result<Course, StoreError> {
    sqlx::query_as::<_, Course>(
        r#"
        INSERT INTO courses (code, name, credits, term)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING id, code, name, credits, term
        "#,
    )
    .bind(&req.code)
    .bind(&req.name)
    .bind(req.credits)
    .bind(req.term)
    .fetch_one(db)
    .await
    .map_err(|e| classify(e, &req.code))
}

/// Overwrites only the columns set in `patch`, in a single statement.
pub async fn update_course(
    db: &SqlitePool,
    id: i64,
    patch: &CoursePatch,
) -> Result<Option<Course>, StoreError> {
    sqlx::query_as::<_, Course>(
        r#"
        UPDATE courses
        SET code = COALESCE(?1, code),
            name = COALESCE(?2, name),
            credits = COALESCE(?3, credits),
            term = COALESCE(?4, term)
        WHERE id = ?5
        RETURNING id, code, name, credits, term
        "#,
    )
    .bind(patch.code.as_deref())
    .bind(patch.name.as_deref())
    .bind(patch.credits)
    .bind(patch.term)
    .bind(id)
    .fetch_optional(db)
    .await
    .map_err(|e| classify(e, patch.code.as_deref().unwrap_or_default()))
}

pub async fn delete_course(db: &SqlitePool, id: i64) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "DELETE FROM courses WHERE id = ?1 RETURNING id, code, name, credits, term"
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

// `code` is the only unique column besides the primary key.
fn classify(err: sqlx::Error, code: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Conflict {
                field: "code",
                value: code.to_string(),
            };
        }
    }
    StoreError::Database(err)
}
