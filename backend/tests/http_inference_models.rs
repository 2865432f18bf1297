//! HTTP inference adapter against a wiremock model service.

use std::time::Duration;

use econsult::domain::ports::{ModelLoader, SummaryBounds, TextModelError};
use econsult::domain::{KeywordSet, Sentiment, TextAnalyzer};
use econsult::outbound::inference::HttpModelLoader;
use reqwest::Url;
use rstest::{fixture, rstest};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[fixture]
async fn models() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

fn loader_for(server: &MockServer) -> HttpModelLoader {
    let endpoint = Url::parse(&server.uri()).expect("mock server url");
    HttpModelLoader::new(endpoint, Duration::from_secs(5)).expect("client")
}

#[rstest]
#[tokio::test]
async fn sentiment_predictions_come_from_the_service(#[future] models: MockServer) {
    let server = models.await;
    Mock::given(method("POST"))
        .and(path("/sentiment"))
        .and(body_partial_json(json!({ "inputs": "Lovely new bus lanes" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "label": "POSITIVE", "score": 0.97 }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let models = loader_for(&server).load().await.expect("models load");
    let prediction = models
        .sentiment
        .classify("Lovely new bus lanes")
        .await
        .expect("prediction");
    assert_eq!(prediction.label, "POSITIVE");
    assert!((prediction.score - 0.97).abs() < 1e-6);
}

#[rstest]
#[tokio::test]
async fn summaries_send_length_bounds(#[future] models: MockServer) {
    let server = models.await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .and(body_partial_json(json!({
            "parameters": { "min_length": 5, "max_length": 40 }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "summary_text": "Ports need more berths" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let models = loader_for(&server).load().await.expect("models load");
    let summary = models
        .summary
        .summarize("Ports are congested and need more berths.", SummaryBounds::default())
        .await
        .expect("summary");
    assert_eq!(summary, "Ports need more berths");
}

#[rstest]
#[case(503, true)]
#[case(500, false)]
#[tokio::test]
async fn failing_calls_map_to_model_errors(
    #[future] models: MockServer,
    #[case] status: u16,
    #[case] unavailable: bool,
) {
    let server = models.await;
    Mock::given(method("POST"))
        .and(path("/sentiment"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;

    let models = loader_for(&server).load().await.expect("models load");
    let error = models
        .sentiment
        .classify("anything")
        .await
        .expect_err("status should fail");
    assert_eq!(
        matches!(error, TextModelError::Unavailable { .. }),
        unavailable
    );
}

#[rstest]
#[tokio::test]
async fn a_failed_health_check_leaves_the_analyzer_on_heuristics() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let analyzer = TextAnalyzer::new(KeywordSet::default(), 120);
    assert!(!analyzer.enable_heavy_models(&loader_for(&server)).await);
    assert!(!analyzer.heavy_models_loaded());

    let sentiment = analyzer.classify("The delay is bad", true).await;
    assert_eq!(sentiment, Sentiment::negative());
    assert_eq!(
        analyzer.summarize("Short one. Then more.", true).await,
        "Short one"
    );
}

#[rstest]
#[tokio::test]
async fn model_faults_after_loading_fall_back_per_call(#[future] models: MockServer) {
    let server = models.await;
    Mock::given(method("POST"))
        .and(path("/sentiment"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let analyzer = TextAnalyzer::new(KeywordSet::default(), 120);
    assert!(analyzer.enable_heavy_models(&loader_for(&server)).await);

    let text = "Thank you for the quick permit approvals. More please.";
    assert_eq!(analyzer.classify(text, true).await, Sentiment::positive());
    assert_eq!(
        analyzer.summarize(text, true).await,
        "Thank you for the quick permit approvals"
    );
}
