use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::db::{CourseStore, repository};
use crate::error::StoreError;
use crate::models::{Course, CoursePatch, NewCourse};

/// Opens the pool, creating the database file if needed, and runs migrations.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

#[derive(Clone)]
pub struct SqliteCourseStore {
    db: SqlitePool,
}

impl SqliteCourseStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseStore for SqliteCourseStore {
    async fn list(&self) -> Result<Vec<Course>, StoreError> {
        Ok(repository::fetch_courses(&self.db).await?)
    }

    async fn insert(&self, course: NewCourse) -> Result<Course, StoreError> {
        repository::insert_course(&self.db, course).await
    }

    async fn get(&self, id: i64) -> Result<Option<Course>, StoreError> {
        Ok(repository::find_course_by_id(&self.db, id).await?)
    }

    async fn update(&self, id: i64, patch: &CoursePatch) -> Result<Option<Course>, StoreError> {
        repository::update_course(&self.db, id, patch).await
    }

    async fn delete(&self, id: i64) -> Result<Option<Course>, StoreError> {
        Ok(repository::delete_course(&self.db, id).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("select 1").execute(&self.db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_round_trip() {
        let pool = connect("sqlite::memory:", 1).await.expect("Failed to create test db");
        let store = SqliteCourseStore::new(pool);

        store.ping().await.expect("ping");

        let created = store
            .insert(NewCourse {
                code: "IF101".to_string(),
                name: "Algoritma".to_string(),
                credits: 3,
                term: 1,
            })
            .await
            .expect("insert");

        assert_eq!(store.get(created.id).await.expect("get"), Some(created.clone()));
        assert_eq!(store.list().await.expect("list"), vec![created.clone()]);
        assert_eq!(store.delete(created.id).await.expect("delete"), Some(created));
        assert!(store.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_ping_fails_on_closed_pool() {
        let pool = connect("sqlite::memory:", 1).await.expect("Failed to create test db");
        pool.close().await;
        let store = SqliteCourseStore::new(pool);

        assert!(matches!(store.ping().await, Err(StoreError::Database(_))));
    }
}
