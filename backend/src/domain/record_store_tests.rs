//! Tests for account and comment bookkeeping.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockCommentRepository, MockPasscodeGenerator};
use crate::test_support::{
    FixtureClock, InMemoryStore, InMemoryUserRepository, PlainHasher, ScriptedPasscodes,
    fixture_timestamp,
};

const ANALYSIS: CommentAnalysis<'static> = CommentAnalysis {
    sentiment: "neutral",
    summary: "Street lights are out",
};

#[fixture]
fn memory() -> InMemoryStore {
    InMemoryStore::default()
}

fn registration(username: &str, password: &str) -> Registration {
    match Registration::try_from_parts(username, password, Some("+91 98765 43210")) {
        Ok(registration) => registration,
        Err(err) => panic!("valid registration: {err}"),
    }
}

fn credentials(username: &str, password: &str) -> Credentials {
    match Credentials::try_from_parts(username, password) {
        Ok(credentials) => credentials,
        Err(err) => panic!("valid credentials: {err}"),
    }
}

fn store_with_comments(comments: MockCommentRepository, codes: MockPasscodeGenerator) -> RecordStore {
    RecordStore::new(RecordStorePorts {
        users: Arc::new(InMemoryUserRepository::default()),
        comments: Arc::new(comments),
        hasher: Arc::new(PlainHasher),
        passcodes: Arc::new(codes),
        clock: Arc::new(FixtureClock::default()),
    })
}

#[rstest]
#[tokio::test]
async fn registered_user_can_authenticate(memory: InMemoryStore) {
    let id = memory
        .store
        .create_user(&registration("asha", "s3cret"))
        .await
        .expect("register");

    let authenticated = memory
        .store
        .authenticate(&credentials("asha", "s3cret"))
        .await
        .expect("login");
    assert_eq!(authenticated, id);
}

#[rstest]
#[tokio::test]
async fn passwords_are_hashed_before_storage(memory: InMemoryStore) {
    memory
        .store
        .create_user(&registration("asha", "s3cret"))
        .await
        .expect("register");
    let stored = memory
        .users
        .find_by_username(credentials("asha", "x").username())
        .await
        .expect("lookup")
        .expect("row");
    assert_ne!(stored.password_hash, "s3cret");
}

#[rstest]
#[tokio::test]
async fn duplicate_username_leaves_original_account(memory: InMemoryStore) {
    memory
        .store
        .create_user(&registration("asha", "first"))
        .await
        .expect("register");

    let err = memory
        .store
        .create_user(&registration("asha", "second"))
        .await
        .expect_err("duplicate");
    assert_eq!(
        err,
        ConsultationError::DuplicateUsername {
            username: "asha".to_owned()
        }
    );
    assert_eq!(memory.users.len(), 1);
    memory
        .store
        .authenticate(&credentials("asha", "first"))
        .await
        .expect("original password still valid");
}

#[rstest]
#[tokio::test]
async fn unknown_user_is_reported(memory: InMemoryStore) {
    let err = memory
        .store
        .authenticate(&credentials("ghost", "pw"))
        .await
        .expect_err("missing");
    assert!(matches!(err, ConsultationError::UserNotFound { .. }));
}

#[rstest]
#[tokio::test]
async fn wrong_password_is_rejected(memory: InMemoryStore) {
    memory
        .store
        .create_user(&registration("asha", "right"))
        .await
        .expect("register");
    let err = memory
        .store
        .authenticate(&credentials("asha", "wrong"))
        .await
        .expect_err("mismatch");
    assert_eq!(err, ConsultationError::InvalidCredential);
}

#[rstest]
#[tokio::test]
async fn offline_user_store_is_unavailable(memory: InMemoryStore) {
    memory.users.set_unavailable(true);
    let err = memory
        .store
        .create_user(&registration("asha", "pw"))
        .await
        .expect_err("offline");
    assert!(matches!(err, ConsultationError::StorageUnavailable { .. }));
}

#[rstest]
#[tokio::test]
async fn stored_comment_is_found_by_its_passcode(memory: InMemoryStore) {
    let text = "  Street lights are out on 5th Avenue.  ";
    let passcode = memory
        .store
        .add_comment(CommentOwner::Guest, Sector::Transport, text, ANALYSIS)
        .await
        .expect("insert");

    let view = memory
        .store
        .get_by_passcode(passcode.as_str())
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(
        view,
        CommentView {
            sector: Sector::Transport,
            comment: text.to_owned(),
            sentiment: "neutral".to_owned(),
            summary: "Street lights are out".to_owned(),
            passcode,
            status: INITIAL_STATUS.to_owned(),
            created_at: fixture_timestamp(),
        }
    );
}

#[rstest]
#[tokio::test]
async fn guest_comments_are_stored_with_the_sentinel(memory: InMemoryStore) {
    memory
        .store
        .add_comment(CommentOwner::Guest, Sector::Trade, "hello there", ANALYSIS)
        .await
        .expect("insert");
    let rows = memory.comments.rows();
    let owners: Vec<i32> = rows.iter().map(|row| row.owner.as_stored()).collect();
    assert_eq!(owners, vec![CommentOwner::GUEST_SENTINEL]);
}

#[rstest]
#[tokio::test]
async fn passcodes_are_distinct_across_comments(memory: InMemoryStore) {
    let mut seen = Vec::new();
    for _ in 0..20 {
        let code = memory
            .store
            .add_comment(CommentOwner::Guest, Sector::Trade, "hello there", ANALYSIS)
            .await
            .expect("insert");
        assert!(!seen.contains(&code));
        seen.push(code);
    }
}

#[rstest]
#[tokio::test]
async fn collision_triggers_regeneration() {
    let memory = InMemoryStore::with_passcodes(ScriptedPasscodes::new([
        "aaaa1111", "aaaa1111", "aaaa1111", "bbbb2222",
    ]));
    let first = memory
        .store
        .add_comment(CommentOwner::Guest, Sector::Trade, "first one", ANALYSIS)
        .await
        .expect("first insert");
    let second = memory
        .store
        .add_comment(CommentOwner::Guest, Sector::Trade, "second one", ANALYSIS)
        .await
        .expect("second insert");

    assert_eq!(first.as_str(), "aaaa1111");
    assert_eq!(second.as_str(), "bbbb2222");
    assert_eq!(memory.comments.insert_attempts(), 4);
}

#[rstest]
#[tokio::test]
async fn persistent_collisions_give_up_after_bound() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_insert()
        .times(MAX_PASSCODE_ATTEMPTS)
        .returning(|comment| {
            Err(CommentRepositoryError::duplicate_passcode(
                comment.passcode.as_str(),
            ))
        });
    let mut codes = MockPasscodeGenerator::new();
    codes
        .expect_generate()
        .returning(|| Passcode::parse("zzzz9999").expect("valid code"));
    let store = store_with_comments(comments, codes);

    let err = store
        .add_comment(CommentOwner::Guest, Sector::Trade, "hello there", ANALYSIS)
        .await
        .expect_err("exhausted");
    assert!(matches!(err, ConsultationError::Storage { .. }));
}

#[rstest]
#[tokio::test]
async fn query_failures_are_not_retried() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_insert()
        .times(1)
        .returning(|_| Err(CommentRepositoryError::query("disk I/O error")));
    let mut codes = MockPasscodeGenerator::new();
    codes
        .expect_generate()
        .times(1)
        .returning(|| Passcode::parse("abcd1234").expect("valid code"));
    let store = store_with_comments(comments, codes);

    let err = store
        .add_comment(CommentOwner::Guest, Sector::Trade, "hello there", ANALYSIS)
        .await
        .expect_err("query failure");
    assert_eq!(err, ConsultationError::storage("disk I/O error"));
}

#[rstest]
#[case("")]
#[case("abc")]
#[case("NOT-A-CODE")]
#[case("abcd123!")]
#[tokio::test]
async fn malformed_passcodes_are_absent_without_a_query(#[case] code: &str) {
    let mut comments = MockCommentRepository::new();
    comments.expect_find_by_passcode().never();
    let store = store_with_comments(comments, MockPasscodeGenerator::new());

    assert_eq!(store.get_by_passcode(code).await.expect("lookup"), None);
}

#[rstest]
#[tokio::test]
async fn unknown_passcode_is_absent(memory: InMemoryStore) {
    assert_eq!(
        memory.store.get_by_passcode("zzzz0000").await.expect("lookup"),
        None
    );
}

#[rstest]
#[case(" {code}")]
#[case("{code}\t")]
#[case("  {code}  ")]
#[tokio::test]
async fn lookups_match_the_passcode_exactly(memory: InMemoryStore, #[case] template: &str) {
    let code = memory
        .store
        .add_comment(CommentOwner::Guest, Sector::Trade, "hello there", ANALYSIS)
        .await
        .expect("insert");
    let padded = template.replace("{code}", code.as_str());

    assert_eq!(memory.store.get_by_passcode(&padded).await.expect("lookup"), None);
    assert!(
        memory
            .store
            .get_by_passcode(code.as_str())
            .await
            .expect("lookup")
            .is_some()
    );
}

#[rstest]
#[tokio::test]
async fn repeated_lookups_are_identical(memory: InMemoryStore) {
    let code = memory
        .store
        .add_comment(CommentOwner::Guest, Sector::Trade, "hello there", ANALYSIS)
        .await
        .expect("insert");
    let first = memory.store.get_by_passcode(code.as_str()).await.expect("a");
    let second = memory.store.get_by_passcode(code.as_str()).await.expect("b");
    assert_eq!(first, second);
    assert_eq!(memory.comments.rows().len(), 1);
}

#[rstest]
#[tokio::test]
async fn listing_is_most_recent_first_and_owner_scoped(memory: InMemoryStore) {
    let asha = memory
        .store
        .create_user(&registration("asha", "pw"))
        .await
        .expect("asha");
    let ravi = memory
        .store
        .create_user(&registration("ravi", "pw"))
        .await
        .expect("ravi");

    for text in ["first comment", "second comment", "third comment"] {
        memory
            .store
            .add_comment(CommentOwner::User(asha), Sector::Construction, text, ANALYSIS)
            .await
            .expect("insert");
    }
    memory
        .store
        .add_comment(CommentOwner::User(ravi), Sector::Trade, "other user", ANALYSIS)
        .await
        .expect("insert");
    memory
        .store
        .add_comment(CommentOwner::Guest, Sector::Trade, "anonymous", ANALYSIS)
        .await
        .expect("insert");

    let listed: Vec<String> = memory
        .store
        .list_for_user(asha)
        .await
        .expect("list")
        .into_iter()
        .map(|view| view.comment)
        .collect();
    assert_eq!(
        listed,
        vec!["third comment", "second comment", "first comment"]
    );
}

#[rstest]
#[tokio::test]
async fn listing_is_empty_for_users_without_comments(memory: InMemoryStore) {
    let id = memory
        .store
        .create_user(&registration("asha", "pw"))
        .await
        .expect("register");
    assert!(memory.store.list_for_user(id).await.expect("list").is_empty());
}

#[rstest]
#[tokio::test]
async fn account_service_maps_failures_to_envelopes(memory: InMemoryStore) {
    let service: &dyn AccountService = memory.store.as_ref();
    let err = service
        .login(&credentials("ghost", "pw"))
        .await
        .expect_err("missing");
    assert_eq!(err.code(), crate::domain::ErrorCode::Unauthorized);
    assert_eq!(err.message(), "user not found");
}
