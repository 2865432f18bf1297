//! Tests for the submission workflow.

use std::sync::Arc;

use mockall::Sequence;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    HeavyModels, MockModelLoader, MockSentimentModel, MockSummaryModel, ModelLabel,
    TextModelError,
};
use crate::domain::{DEFAULT_SUMMARY_MAX_CHARS, ErrorCode, KeywordSet, Registration};
use crate::test_support::InMemoryStore;

struct Harness {
    memory: InMemoryStore,
    analyzer: Arc<TextAnalyzer>,
    workflow: SubmissionWorkflow,
}

#[fixture]
fn harness() -> Harness {
    let memory = InMemoryStore::default();
    let analyzer = Arc::new(TextAnalyzer::new(
        KeywordSet::default(),
        DEFAULT_SUMMARY_MAX_CHARS,
    ));
    let workflow = SubmissionWorkflow::new(analyzer.clone(), memory.store.clone());
    Harness {
        memory,
        analyzer,
        workflow,
    }
}

fn request(owner: CommentOwner, text: &str, use_heavy_models: bool) -> SubmissionRequest {
    SubmissionRequest {
        owner,
        sector: Sector::ElectricityAndGas,
        text: text.to_owned(),
        use_heavy_models,
    }
}

#[rstest]
#[case("")]
#[case("abcd")]
#[case("   hi    ")]
#[case("\n\t ok \n")]
#[tokio::test]
async fn short_comments_are_rejected_before_storage(harness: Harness, #[case] text: &str) {
    let err = harness
        .workflow
        .submit(request(CommentOwner::Guest, text, false))
        .await
        .expect_err("too short");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(harness.memory.comments.insert_attempts(), 0);
}

#[rstest]
#[tokio::test]
async fn five_characters_after_trimming_are_enough(harness: Harness) {
    harness
        .workflow
        .submit(request(CommentOwner::Guest, "  hello  ", false))
        .await
        .expect("accepted");
    assert_eq!(harness.memory.comments.rows().len(), 1);
}

#[rstest]
#[tokio::test]
async fn guest_submission_is_trackable(harness: Harness) {
    let text = "Power cuts are causing delay in work. Please fix.";
    let receipt = harness
        .workflow
        .submit(request(CommentOwner::Guest, text, false))
        .await
        .expect("submitted");

    assert_eq!(receipt.sentiment, Sentiment::negative());
    assert_eq!(receipt.summary, "Power cuts are causing delay in work");

    let view = harness
        .workflow
        .track(receipt.passcode.as_str())
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(view.comment, text);
    assert_eq!(view.sentiment, "negative");
    assert_eq!(view.summary, receipt.summary);
    assert_eq!(view.status, "Submitted");
    assert_eq!(view.sector, Sector::ElectricityAndGas);
}

#[rstest]
#[tokio::test]
async fn registered_user_sees_own_submissions(harness: Harness) {
    let registration =
        Registration::try_from_parts("asha", "pw", None).expect("valid registration");
    let user = harness
        .memory
        .store
        .create_user(&registration)
        .await
        .expect("register");

    let older = harness
        .workflow
        .submit(request(CommentOwner::User(user), "thank you for the new road", false))
        .await
        .expect("first");
    let newer = harness
        .workflow
        .submit(request(CommentOwner::User(user), "the bus stop is fine", false))
        .await
        .expect("second");
    harness
        .workflow
        .submit(request(CommentOwner::Guest, "guest comment here", false))
        .await
        .expect("guest");

    let listed: Vec<_> = harness
        .workflow
        .list_mine(user)
        .await
        .expect("list")
        .into_iter()
        .map(|view| view.passcode)
        .collect();
    assert_eq!(listed, vec![newer.passcode, older.passcode]);
}

#[rstest]
#[tokio::test]
async fn analysis_runs_in_order_before_persisting(harness: Harness) {
    let mut sequence = Sequence::new();
    let mut sentiment = MockSentimentModel::new();
    sentiment
        .expect_classify()
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_| {
            Ok(ModelLabel {
                label: "POSITIVE".to_owned(),
                score: 0.97,
            })
        });
    let mut summary = MockSummaryModel::new();
    summary
        .expect_summarize()
        .times(1)
        .in_sequence(&mut sequence)
        .returning(|_, _| Ok("Residents like the park.".to_owned()));
    let models = HeavyModels {
        sentiment: Arc::new(sentiment),
        summary: Arc::new(summary),
    };
    let mut loader = MockModelLoader::new();
    loader.expect_load().return_once(move || Ok(models));
    assert!(harness.analyzer.enable_heavy_models(&loader).await);

    let receipt = harness
        .workflow
        .submit(request(
            CommentOwner::Guest,
            "The new park is lovely to walk in.",
            true,
        ))
        .await
        .expect("submitted");

    assert_eq!(receipt.sentiment, Sentiment::new("positive", 0.97));
    assert_eq!(receipt.summary, "Residents like the park.");
    let rows = harness.memory.comments.rows();
    let stored: Vec<(&str, &str)> = rows
        .iter()
        .map(|row| (row.sentiment.as_str(), row.summary.as_str()))
        .collect();
    assert_eq!(stored, vec![("positive", "Residents like the park.")]);
}

#[rstest]
#[tokio::test]
async fn model_faults_never_reach_the_caller(harness: Harness) {
    let mut sentiment = MockSentimentModel::new();
    sentiment
        .expect_classify()
        .returning(|_| Err(TextModelError::inference("gpu lost")));
    let mut summary = MockSummaryModel::new();
    summary
        .expect_summarize()
        .returning(|_, _| Err(TextModelError::inference("gpu lost")));
    let models = HeavyModels {
        sentiment: Arc::new(sentiment),
        summary: Arc::new(summary),
    };
    let mut loader = MockModelLoader::new();
    loader.expect_load().return_once(move || Ok(models));
    assert!(harness.analyzer.enable_heavy_models(&loader).await);

    let receipt = harness
        .workflow
        .submit(request(CommentOwner::Guest, "Great help, thank you!", true))
        .await
        .expect("submitted despite model faults");
    assert_eq!(receipt.sentiment, Sentiment::positive());
    assert_eq!(receipt.summary, "Great help, thank you");
}

#[rstest]
#[tokio::test]
async fn malformed_tracking_codes_are_absent(harness: Harness) {
    assert_eq!(harness.workflow.track("nope").await.expect("lookup"), None);
}
