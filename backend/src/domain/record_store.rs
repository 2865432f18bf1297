//! Record store: accounts, comments, and passcode lookups.
//!
//! The store is the only component that writes users or comments. It owns
//! credential hashing, passcode issuance, and timestamping; adapters behind
//! the repository ports only persist what they are given.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use super::ports::{
    AccountService, CommentRepository, CommentRepositoryError, CredentialHasher,
    PasscodeGenerator, UserRepository,
};
use super::{
    CommentOwner, CommentView, ConsultationError, Credentials, Error, INITIAL_STATUS, NewComment,
    NewUser, Passcode, Registration, Sector, UserId,
};

/// Upper bound on passcode generation attempts for a single comment.
pub const MAX_PASSCODE_ATTEMPTS: usize = 16;

/// Collaborators required by [`RecordStore`].
#[derive(Clone)]
pub struct RecordStorePorts {
    /// Account persistence.
    pub users: Arc<dyn UserRepository>,
    /// Comment persistence.
    pub comments: Arc<dyn CommentRepository>,
    /// Password hashing and verification.
    pub hasher: Arc<dyn CredentialHasher>,
    /// Source of candidate passcodes.
    pub passcodes: Arc<dyn PasscodeGenerator>,
    /// Time source for `created_at`.
    pub clock: Arc<dyn Clock>,
}

/// Sentiment and summary computed for a comment before it is stored.
#[derive(Debug, Clone, Copy)]
pub struct CommentAnalysis<'a> {
    /// Lowercase sentiment label.
    pub sentiment: &'a str,
    /// Synopsis to store.
    pub summary: &'a str,
}

/// Domain service owning users and comments.
#[derive(Clone)]
pub struct RecordStore {
    users: Arc<dyn UserRepository>,
    comments: Arc<dyn CommentRepository>,
    hasher: Arc<dyn CredentialHasher>,
    passcodes: Arc<dyn PasscodeGenerator>,
    clock: Arc<dyn Clock>,
}

impl RecordStore {
    /// Create a store over the given ports.
    pub fn new(ports: RecordStorePorts) -> Self {
        let RecordStorePorts {
            users,
            comments,
            hasher,
            passcodes,
            clock,
        } = ports;
        Self {
            users,
            comments,
            hasher,
            passcodes,
            clock,
        }
    }

    /// Register an account, hashing its password.
    ///
    /// Fails with [`ConsultationError::DuplicateUsername`] when the name is
    /// taken; the existing account is left untouched.
    pub async fn create_user(
        &self,
        registration: &Registration,
    ) -> Result<UserId, ConsultationError> {
        let credentials = registration.credentials();
        let password_hash = self.hasher.hash(credentials.password())?;
        let user = NewUser {
            username: credentials.username().clone(),
            password_hash,
            mobile: registration.mobile().cloned(),
            created_at: self.clock.utc(),
        };
        let id = self.users.create(&user).await?;
        info!(user_id = %id, "account registered");
        Ok(id)
    }

    /// Check credentials and return the account id.
    pub async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<UserId, ConsultationError> {
        let username = credentials.username();
        let Some(user) = self.users.find_by_username(username).await? else {
            return Err(ConsultationError::UserNotFound {
                username: username.to_string(),
            });
        };
        if self
            .hasher
            .verify(credentials.password(), &user.password_hash)?
        {
            Ok(user.id)
        } else {
            debug!(user_id = %user.id, "password mismatch");
            Err(ConsultationError::InvalidCredential)
        }
    }

    /// Persist a comment and return its freshly issued passcode.
    ///
    /// Passcodes are inserted optimistically; a uniqueness violation triggers
    /// a new candidate, up to [`MAX_PASSCODE_ATTEMPTS`] times.
    pub async fn add_comment(
        &self,
        owner: CommentOwner,
        sector: Sector,
        text: &str,
        analysis: CommentAnalysis<'_>,
    ) -> Result<Passcode, ConsultationError> {
        let mut comment = NewComment {
            owner,
            sector,
            text: text.to_owned(),
            sentiment: analysis.sentiment.to_owned(),
            summary: analysis.summary.to_owned(),
            passcode: self.passcodes.generate(),
            status: INITIAL_STATUS.to_owned(),
            created_at: self.clock.utc(),
        };

        for attempt in 1..=MAX_PASSCODE_ATTEMPTS {
            match self.comments.insert(&comment).await {
                Ok(()) => return Ok(comment.passcode),
                Err(CommentRepositoryError::DuplicatePasscode { .. }) => {
                    debug!(attempt, "passcode collision; regenerating");
                    comment.passcode = self.passcodes.generate();
                }
                Err(other) => return Err(other.into()),
            }
        }

        warn!(
            attempts = MAX_PASSCODE_ATTEMPTS,
            "could not issue a unique passcode"
        );
        Err(ConsultationError::storage(format!(
            "no unique passcode after {MAX_PASSCODE_ATTEMPTS} attempts"
        )))
    }

    /// Exact-match lookup by passcode.
    ///
    /// Any holder of the code may read the record. Strings that cannot be a
    /// passcode are reported as absent without touching the store.
    pub async fn get_by_passcode(
        &self,
        code: &str,
    ) -> Result<Option<CommentView>, ConsultationError> {
        let Ok(passcode) = Passcode::parse(code) else {
            return Ok(None);
        };
        Ok(self.comments.find_by_passcode(&passcode).await?)
    }

    /// Comments owned by `user_id`, most recent first.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<CommentView>, ConsultationError> {
        Ok(self.comments.list_for_owner(user_id).await?)
    }
}

#[async_trait]
impl AccountService for RecordStore {
    async fn register(&self, registration: &Registration) -> Result<UserId, Error> {
        self.create_user(registration).await.map_err(Error::from)
    }

    async fn login(&self, credentials: &Credentials) -> Result<UserId, Error> {
        self.authenticate(credentials).await.map_err(Error::from)
    }
}

#[cfg(test)]
#[path = "record_store_tests.rs"]
mod tests;
