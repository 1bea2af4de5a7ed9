use std::time::Duration;

use tagger_logging::tagger_debug;
use url::Url;

use crate::types::SuggestionResponse;
use crate::{FailureKind, SuggestError, SuggestionRequest};

/// Production suggestion service.
pub const DEFAULT_ENDPOINT: &str = "https://aiback-production.up.railway.app/llm/suggest";

#[derive(Debug, Clone)]
pub struct SuggestSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    /// Whole-request deadline. `None` waits for the service indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

/// Proposes a journey stage for a question.
///
/// Returns the service's `suggestedStage` field as-is: a missing field is
/// `None` and an empty string is passed through. Callers decide what counts
/// as a usable suggestion.
#[async_trait::async_trait]
pub trait Suggester: Send + Sync {
    async fn suggest(&self, request: &SuggestionRequest) -> Result<Option<String>, SuggestError>;
}

/// Single-attempt HTTP suggester: one `POST` per call, no retries, no caching.
#[derive(Debug, Clone)]
pub struct ReqwestSuggester {
    endpoint: Url,
    client: reqwest::Client,
}

impl ReqwestSuggester {
    pub fn new(settings: SuggestSettings) -> Result<Self, SuggestError> {
        let endpoint = Url::parse(&settings.endpoint)
            .map_err(|err| SuggestError::new(FailureKind::InvalidEndpoint, err.to_string()))?;

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| SuggestError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl Suggester for ReqwestSuggester {
    async fn suggest(&self, request: &SuggestionRequest) -> Result<Option<String>, SuggestError> {
        tagger_debug!(
            "POST {} question_len={} existing_stages={}",
            self.endpoint,
            request.question.len(),
            request.existing_journey_stages.len()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SuggestError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body: SuggestionResponse = response.json().await.map_err(map_reqwest_error)?;
        Ok(body.suggested_stage)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SuggestError {
    if err.is_timeout() {
        return SuggestError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return SuggestError::new(FailureKind::Decode, err.to_string());
    }
    SuggestError::new(FailureKind::Network, err.to_string())
}
