//! Reqwest-backed sentiment and summary models.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use tracing::debug;

use super::dto::{SentimentRequestDto, SummaryRequestDto, first_label, first_summary};
use crate::domain::ports::{
    HeavyModels, ModelLabel, ModelLoader, SentimentModel, SummaryBounds, SummaryModel,
    TextModelError,
};

const USER_AGENT: &str = "econsult-backend/0.1";

#[derive(Clone)]
struct InferenceClient {
    client: Client,
    base: Url,
}

impl InferenceClient {
    fn endpoint(&self, route: &str) -> Result<Url, TextModelError> {
        self.base
            .join(route)
            .map_err(|err| TextModelError::unavailable(format!("invalid model endpoint: {err}")))
    }

    async fn post<B: Serialize + Sync>(
        &self,
        route: &str,
        body: &B,
    ) -> Result<Vec<u8>, TextModelError> {
        let response = self
            .client
            .post(self.endpoint(route)?)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status));
        }
        Ok(bytes.to_vec())
    }
}

fn map_transport_error(error: reqwest::Error) -> TextModelError {
    debug!(%error, "inference transport failed");
    if error.is_connect() {
        TextModelError::unavailable(error.to_string())
    } else {
        TextModelError::inference(error.to_string())
    }
}

fn map_status_error(status: StatusCode) -> TextModelError {
    let message = format!("status {}", status.as_u16());
    if status == StatusCode::SERVICE_UNAVAILABLE {
        TextModelError::unavailable(message)
    } else {
        TextModelError::inference(message)
    }
}

/// Sentiment classification via `POST /sentiment`.
#[derive(Clone)]
pub struct HttpSentimentModel {
    inner: InferenceClient,
}

#[async_trait]
impl SentimentModel for HttpSentimentModel {
    async fn classify(&self, text: &str) -> Result<ModelLabel, TextModelError> {
        let body = self
            .inner
            .post("sentiment", &SentimentRequestDto { inputs: text })
            .await?;
        first_label(&body)
    }
}

/// Summarisation via `POST /summarize`.
#[derive(Clone)]
pub struct HttpSummaryModel {
    inner: InferenceClient,
}

#[async_trait]
impl SummaryModel for HttpSummaryModel {
    async fn summarize(
        &self,
        text: &str,
        bounds: SummaryBounds,
    ) -> Result<String, TextModelError> {
        let request = SummaryRequestDto {
            inputs: text,
            parameters: bounds.into(),
        };
        let body = self.inner.post("summarize", &request).await?;
        first_summary(&body)
    }
}

/// Probes the inference service and hands out HTTP-backed models.
///
/// ```rust,ignore
/// let loader = HttpModelLoader::new(Url::parse("http://127.0.0.1:9000/")?, Duration::from_secs(30))?;
/// let enabled = analyzer.enable_heavy_models(&loader).await;
/// ```
pub struct HttpModelLoader {
    inner: InferenceClient,
}

impl HttpModelLoader {
    /// Build a loader whose requests time out after `timeout`.
    ///
    /// A trailing slash is added to `endpoint` so routes resolve beneath it.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(mut endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            inner: InferenceClient {
                client,
                base: endpoint,
            },
        })
    }
}

#[async_trait]
impl ModelLoader for HttpModelLoader {
    async fn load(&self) -> Result<HeavyModels, TextModelError> {
        let response = self
            .inner
            .client
            .get(self.inner.endpoint("health")?)
            .send()
            .await
            .map_err(|err| TextModelError::unavailable(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(TextModelError::unavailable(format!(
                "health probe returned status {}",
                status.as_u16()
            )));
        }
        Ok(HeavyModels {
            sentiment: Arc::new(HttpSentimentModel {
                inner: self.inner.clone(),
            }),
            summary: Arc::new(HttpSummaryModel {
                inner: self.inner.clone(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StatusCode::SERVICE_UNAVAILABLE, true)]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, false)]
    #[case(StatusCode::UNPROCESSABLE_ENTITY, false)]
    fn statuses_map_to_model_errors(#[case] status: StatusCode, #[case] unavailable: bool) {
        let error = map_status_error(status);
        assert_eq!(
            matches!(error, TextModelError::Unavailable { .. }),
            unavailable
        );
    }

    #[rstest]
    #[case("http://models.internal:9000", "http://models.internal:9000/sentiment")]
    #[case("http://models.internal:9000/v1", "http://models.internal:9000/v1/sentiment")]
    #[case("http://models.internal:9000/v1/", "http://models.internal:9000/v1/sentiment")]
    fn routes_resolve_beneath_the_endpoint(#[case] base: &str, #[case] expected: &str) {
        let loader = HttpModelLoader::new(Url::parse(base).expect("url"), Duration::from_secs(1))
            .expect("client");
        let url = loader.inner.endpoint("sentiment").expect("join");
        assert_eq!(url.as_str(), expected);
    }
}
