//! SQLite-backed `CommentRepository` implementation using Diesel.
//!
//! Passcode uniqueness is left to the `UNIQUE` index; a violation comes back
//! as `DuplicatePasscode` so the record store can retry with a new code.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{CommentView, NewComment, Passcode, Sector, UserId};

use super::diesel_error_mapping::StoreFault;
use super::models::{CommentRow, NewCommentRow};
use super::pool::DbPool;
use super::schema::comments;

/// Diesel-backed comment table.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_fault(fault: impl Into<StoreFault>, passcode: &Passcode) -> CommentRepositoryError {
    match fault.into() {
        StoreFault::Connection(message) => CommentRepositoryError::connection(message),
        StoreFault::Query(message) => CommentRepositoryError::query(message),
        StoreFault::UniqueViolation => CommentRepositoryError::duplicate_passcode(passcode.as_str()),
    }
}

fn map_read_fault(fault: impl Into<StoreFault>) -> CommentRepositoryError {
    match fault.into() {
        StoreFault::Connection(message) => CommentRepositoryError::connection(message),
        StoreFault::Query(message) => CommentRepositoryError::query(message),
        StoreFault::UniqueViolation => {
            CommentRepositoryError::query("unexpected unique violation on read")
        }
    }
}

fn row_to_view(row: CommentRow) -> Result<CommentView, CommentRepositoryError> {
    let sector = row
        .sector
        .parse::<Sector>()
        .map_err(|err| CommentRepositoryError::query(err.to_string()))?;
    let passcode = Passcode::parse(&row.passcode)
        .map_err(|err| CommentRepositoryError::query(err.to_string()))?;
    Ok(CommentView {
        sector,
        comment: row.comment,
        sentiment: row.sentiment,
        summary: row.summary,
        passcode,
        status: row.status,
        created_at: DateTime::<Utc>::from_naive_utc_and_offset(row.created_at, Utc),
    })
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn insert(&self, comment: &NewComment) -> Result<(), CommentRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_fault(err, &comment.passcode))?;

        let row = NewCommentRow {
            user_id: comment.owner.as_stored(),
            sector: comment.sector.label(),
            comment: &comment.text,
            sentiment: &comment.sentiment,
            summary: &comment.summary,
            passcode: comment.passcode.as_str(),
            status: &comment.status,
            created_at: comment.created_at.naive_utc(),
        };
        diesel::insert_into(comments::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_fault(err, &comment.passcode))?;
        Ok(())
    }

    async fn find_by_passcode(
        &self,
        passcode: &Passcode,
    ) -> Result<Option<CommentView>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_read_fault)?;

        let row: Option<CommentRow> = comments::table
            .filter(comments::passcode.eq(passcode.as_str()))
            .select(CommentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_fault)?;

        row.map(row_to_view).transpose()
    }

    async fn list_for_owner(
        &self,
        user_id: UserId,
    ) -> Result<Vec<CommentView>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_read_fault)?;

        let rows: Vec<CommentRow> = comments::table
            .filter(comments::user_id.eq(user_id.get()))
            .order(comments::id.desc())
            .select(CommentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_fault)?;

        rows.into_iter().map(row_to_view).collect()
    }
}
