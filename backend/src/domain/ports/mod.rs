//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod comment_repository;
mod credential_hasher;
mod passcode_generator;
mod submission_service;
mod text_models;
mod user_repository;

#[cfg(test)]
pub use account_service::MockAccountService;
pub use account_service::AccountService;
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentRepository, CommentRepositoryError};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
#[cfg(test)]
pub use passcode_generator::MockPasscodeGenerator;
pub use passcode_generator::PasscodeGenerator;
#[cfg(test)]
pub use submission_service::MockSubmissionService;
pub use submission_service::{SubmissionReceipt, SubmissionRequest, SubmissionService};
#[cfg(test)]
pub use text_models::{MockModelLoader, MockSentimentModel, MockSummaryModel};
pub use text_models::{
    HeavyModels, ModelLabel, ModelLoader, SentimentModel, SummaryBounds, SummaryModel,
    TextModelError,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
