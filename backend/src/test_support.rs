//! Test doubles shared by unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled for `cfg(test)` or with the `test-support` feature.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{
    CommentRepository, CommentRepositoryError, CredentialHashError, CredentialHasher,
    PasscodeGenerator, UserRepository, UserRepositoryError,
};
use crate::domain::{
    CommentOwner, CommentView, NewComment, NewUser, Passcode, RecordStore, RecordStorePorts,
    StoredUser, UserId, Username,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Timestamp returned by [`FixtureClock::default`].
#[must_use]
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
        .single()
        .unwrap_or_default()
}

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock(pub DateTime<Utc>);

impl Default for FixtureClock {
    fn default() -> Self {
        Self(fixture_timestamp())
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Reversible "hash" for fast tests: `plain:<password>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHasher;

const PLAIN_PREFIX: &str = "plain:";

impl CredentialHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialHashError> {
        Ok(format!("{PLAIN_PREFIX}{password}"))
    }

    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, CredentialHashError> {
        let expected = stored_hash
            .strip_prefix(PLAIN_PREFIX)
            .ok_or_else(|| CredentialHashError::malformed_hash("missing plain: prefix"))?;
        Ok(expected == password)
    }
}

/// Generator replaying scripted codes, then counting upwards.
///
/// Scripted codes let tests force collisions; the counter keeps long runs
/// unique once the script is exhausted.
#[derive(Debug, Default)]
pub struct ScriptedPasscodes {
    script: Mutex<VecDeque<Passcode>>,
    counter: Mutex<u32>,
}

impl ScriptedPasscodes {
    /// Replay `codes` in order before falling back to the counter.
    ///
    /// # Panics
    /// Panics when a scripted code is not a valid passcode.
    #[must_use]
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let script = codes
            .into_iter()
            .map(|code| match Passcode::parse(code.as_ref()) {
                Ok(passcode) => passcode,
                Err(err) => panic!("scripted passcode must be valid: {err}"),
            })
            .collect();
        Self {
            script: Mutex::new(script),
            counter: Mutex::new(0),
        }
    }
}

impl PasscodeGenerator for ScriptedPasscodes {
    fn generate(&self) -> Passcode {
        if let Some(next) = lock(&self.script).pop_front() {
            return next;
        }
        let mut counter = lock(&self.counter);
        *counter += 1;
        match Passcode::parse(&format!("seq{:05}", *counter)) {
            Ok(code) => code,
            Err(err) => panic!("counter passcode must be valid: {err}"),
        }
    }
}

/// Mutex-backed user table.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<StoredUser>>,
    unavailable: Mutex<bool>,
}

impl InMemoryUserRepository {
    /// Make every subsequent call fail with a connection error.
    pub fn set_unavailable(&self, unavailable: bool) {
        *lock(&self.unavailable) = unavailable;
    }

    /// Number of stored accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.rows).len()
    }

    /// Whether no account is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), UserRepositoryError> {
        if *lock(&self.unavailable) {
            return Err(UserRepositoryError::connection("store offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> Result<UserId, UserRepositoryError> {
        self.check_available()?;
        let mut rows = lock(&self.rows);
        if rows.iter().any(|row| row.username == user.username) {
            return Err(UserRepositoryError::duplicate_username(
                user.username.as_str(),
            ));
        }
        let next = i32::try_from(rows.len() + 1)
            .map_err(|_| UserRepositoryError::query("user table full"))?;
        let id = UserId::new(next).map_err(|err| UserRepositoryError::query(err.to_string()))?;
        rows.push(StoredUser {
            id,
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
        });
        Ok(id)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredUser>, UserRepositoryError> {
        self.check_available()?;
        Ok(lock(&self.rows)
            .iter()
            .find(|row| &row.username == username)
            .cloned())
    }
}

/// Mutex-backed comment table with a unique passcode index.
#[derive(Debug, Default)]
pub struct InMemoryCommentRepository {
    rows: Mutex<Vec<NewComment>>,
    insert_attempts: Mutex<usize>,
}

impl InMemoryCommentRepository {
    /// Stored comments in insertion order.
    #[must_use]
    pub fn rows(&self) -> Vec<NewComment> {
        lock(&self.rows).clone()
    }

    /// Number of insert calls, including rejected ones.
    #[must_use]
    pub fn insert_attempts(&self) -> usize {
        *lock(&self.insert_attempts)
    }
}

fn to_view(row: &NewComment) -> CommentView {
    CommentView {
        sector: row.sector,
        comment: row.text.clone(),
        sentiment: row.sentiment.clone(),
        summary: row.summary.clone(),
        passcode: row.passcode.clone(),
        status: row.status.clone(),
        created_at: row.created_at,
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn insert(&self, comment: &NewComment) -> Result<(), CommentRepositoryError> {
        *lock(&self.insert_attempts) += 1;
        let mut rows = lock(&self.rows);
        if rows.iter().any(|row| row.passcode == comment.passcode) {
            return Err(CommentRepositoryError::duplicate_passcode(
                comment.passcode.as_str(),
            ));
        }
        rows.push(comment.clone());
        Ok(())
    }

    async fn find_by_passcode(
        &self,
        passcode: &Passcode,
    ) -> Result<Option<CommentView>, CommentRepositoryError> {
        Ok(lock(&self.rows)
            .iter()
            .find(|row| &row.passcode == passcode)
            .map(to_view))
    }

    async fn list_for_owner(
        &self,
        user_id: UserId,
    ) -> Result<Vec<CommentView>, CommentRepositoryError> {
        Ok(lock(&self.rows)
            .iter()
            .rev()
            .filter(|row| row.owner == CommentOwner::User(user_id))
            .map(to_view)
            .collect())
    }
}

/// In-memory record store with the doubles it was built from.
pub struct InMemoryStore {
    /// Store wired to the doubles below.
    pub store: Arc<RecordStore>,
    /// Account rows.
    pub users: Arc<InMemoryUserRepository>,
    /// Comment rows.
    pub comments: Arc<InMemoryCommentRepository>,
}

impl InMemoryStore {
    /// Build a store using [`PlainHasher`], [`FixtureClock`] and `passcodes`.
    #[must_use]
    pub fn with_passcodes(passcodes: ScriptedPasscodes) -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let comments = Arc::new(InMemoryCommentRepository::default());
        let store = Arc::new(RecordStore::new(RecordStorePorts {
            users: users.clone(),
            comments: comments.clone(),
            hasher: Arc::new(PlainHasher),
            passcodes: Arc::new(passcodes),
            clock: Arc::new(FixtureClock::default()),
        }));
        Self {
            store,
            users,
            comments,
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::with_passcodes(ScriptedPasscodes::default())
    }
}
