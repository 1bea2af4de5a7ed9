use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type EntryId = u64;

/// Identifies which entry, and which of its requests, a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    pub entry_id: EntryId,
    pub generation: u64,
}

/// JSON body sent to the suggestion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub question: String,
    pub objective: String,
    pub existing_journey_stages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SuggestionResponse {
    #[serde(default)]
    pub suggested_stage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SuggestionCompleted {
        ticket: RequestTicket,
        result: Result<Option<String>, SuggestError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct SuggestError {
    pub kind: FailureKind,
    pub message: String,
}

impl SuggestError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_camel_case_keys() {
        let request = SuggestionRequest {
            question: "Why do users churn?".to_string(),
            objective: "Retention".to_string(),
            existing_journey_stages: vec!["Awareness".to_string()],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "question": "Why do users churn?",
                "objective": "Retention",
                "existingJourneyStages": ["Awareness"],
            })
        );
    }

    #[test]
    fn response_tolerates_missing_and_null_stage() {
        let missing: SuggestionResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.suggested_stage, None);
        let null: SuggestionResponse =
            serde_json::from_str(r#"{"suggestedStage": null, "extra": 1}"#).unwrap();
        assert_eq!(null.suggested_stage, None);
    }

    #[test]
    fn error_display_names_kind_and_message() {
        let err = SuggestError::new(FailureKind::HttpStatus(502), "502 Bad Gateway");
        assert_eq!(err.to_string(), "http status 502: 502 Bad Gateway");
    }
}
