//! PostgreSQL-backed `ContentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::Content;
use crate::domain::ports::{ContentPersistenceError, ContentRepository};

use super::models::{ContentChangeset, ContentRow, NewContentRow};
use super::pool::{DbPool, PoolError};
use super::schema::contents;

/// Diesel-backed implementation of the `ContentRepository` port.
#[derive(Clone)]
pub struct DieselContentRepository {
    pool: DbPool,
}

impl DieselContentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ContentPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ContentPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ContentPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "diesel operation failed");
    }

    match &error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ContentPersistenceError::connection("database connection error")
        }
        _ => ContentPersistenceError::query("database error"),
    }
}

fn row_to_content(row: ContentRow) -> Content {
    Content::new(row.id, row.name, row.body, row.video_url, row.course_id)
}

#[async_trait]
impl ContentRepository for DieselContentRepository {
    async fn insert(&self, content: &Content) -> Result<(), ContentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewContentRow {
            id: content.id(),
            name: content.name(),
            body: content.body(),
            video_url: content.video_url(),
            course_id: content.course_id(),
        };
        diesel::insert_into(contents::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Content>, ContentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ContentRow> = contents::table
            .find(id)
            .select(ContentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_content))
    }

    async fn list_for_course(
        &self,
        course_id: Uuid,
    ) -> Result<Vec<Content>, ContentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ContentRow> = contents::table
            .filter(contents::course_id.eq(course_id))
            .select(ContentRow::as_select())
            .order_by(contents::name)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_content).collect())
    }

    async fn update(&self, content: &Content) -> Result<(), ContentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = ContentChangeset {
            name: content.name(),
            body: content.body(),
            video_url: content.video_url(),
        };
        diesel::update(contents::table.find(content.id()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ContentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(contents::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
