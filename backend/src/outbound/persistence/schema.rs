//! Diesel table definitions for the SQLite schema.
//!
//! Must match `migrations/` exactly.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Integer,
        /// Unique login name.
        username -> Text,
        /// Argon2 PHC string.
        password_hash -> Text,
        mobile -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Consultation comments. `user_id` 0 marks a guest submission.
    comments (id) {
        id -> Integer,
        user_id -> Integer,
        sector -> Text,
        comment -> Text,
        sentiment -> Text,
        summary -> Text,
        /// Unique tracking code.
        passcode -> Text,
        status -> Text,
        created_at -> Timestamp,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, comments);
