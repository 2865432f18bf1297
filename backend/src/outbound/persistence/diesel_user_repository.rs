//! SQLite-backed `UserRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, StoredUser, UserId, Username};

use super::diesel_error_mapping::StoreFault;
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed account table.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_fault(fault: impl Into<StoreFault>, username: &Username) -> UserRepositoryError {
    match fault.into() {
        StoreFault::Connection(message) => UserRepositoryError::connection(message),
        StoreFault::Query(message) => UserRepositoryError::query(message),
        StoreFault::UniqueViolation => UserRepositoryError::duplicate_username(username.as_str()),
    }
}

fn row_to_user(row: UserRow) -> Result<StoredUser, UserRepositoryError> {
    let id = UserId::new(row.id).map_err(|err| UserRepositoryError::query(err.to_string()))?;
    let username =
        Username::new(&row.username).map_err(|err| UserRepositoryError::query(err.to_string()))?;
    Ok(StoredUser {
        id,
        username,
        password_hash: row.password_hash,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &NewUser) -> Result<UserId, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_fault(err, &user.username))?;

        let row = NewUserRow {
            username: user.username.as_str(),
            password_hash: &user.password_hash,
            mobile: user.mobile.as_ref().map(|mobile| mobile.as_str()),
            created_at: user.created_at.naive_utc(),
        };
        let id: i32 = diesel::insert_into(users::table)
            .values(&row)
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(|err| map_fault(err, &user.username))?;

        UserId::new(id).map_err(|err| UserRepositoryError::query(err.to_string()))
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredUser>, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_fault(err, username))?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_fault(err, username))?;

        row.map(row_to_user).transpose()
    }
}
