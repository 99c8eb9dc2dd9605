use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("schema translation failed: {0}")]
    Translation(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("assertion failure: {0}")]
    Assertion(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub operation: String,
    pub trace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
}

impl BridgeError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Translation(_) => "SCHEMA_TRANSLATION",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Rejected { .. } => "REQUEST_REJECTED",
            Self::Transport(_) => "TRANSPORT_FAILED",
            Self::Json(_) => "JSON_ERROR",
            Self::Assertion(_) => "ASSERTION_FAILURE",
        }
    }

    /// True when the request never produced a response; only these failures
    /// are candidates for retry at the orchestration layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn to_payload(&self, operation: impl Into<String>, index: Option<String>) -> ErrorPayload {
        ErrorPayload {
            code: self.code().to_string(),
            message: self.to_string(),
            operation: operation.into(),
            trace_id: Uuid::new_v4().to_string(),
            index,
        }
    }
}
