//! Internal Diesel row structs.
//!
//! Rows never leave the persistence layer; repositories convert them into
//! domain types and report rows that violate domain invariants as query
//! errors.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::{comments, users};

/// Account row read back for authentication.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub mobile: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

/// Comment row as exposed to record views.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct CommentRow {
    pub sector: String,
    pub comment: String,
    pub sentiment: String,
    pub summary: String,
    pub passcode: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub user_id: i32,
    pub sector: &'a str,
    pub comment: &'a str,
    pub sentiment: &'a str,
    pub summary: &'a str,
    pub passcode: &'a str,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
}
