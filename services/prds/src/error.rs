use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use prdgen_domain::project::BriefError;

/// Ways a language-model completion can fail. Each is surfaced as `GENERATION_FAILED`.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("provider request failed: {0}")]
    Transport(String),
    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("provider response could not be decoded: {0}")]
    Malformed(String),
    #[error("provider returned no content")]
    Empty,
}

/// PRD service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum PrdServiceError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("userId is required")]
    MissingUserId,
    #[error("forbidden")]
    Forbidden,
    #[error("prd not found")]
    PrdNotFound,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("generation failed")]
    Generation(#[from] GenerationError),
    #[error("configuration error")]
    Configuration(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl PrdServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::MissingUserId => "MISSING_USER_ID",
            Self::Forbidden => "FORBIDDEN",
            Self::PrdNotFound => "PRD_NOT_FOUND",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::Generation(_) => "GENERATION_FAILED",
            Self::Configuration(_) => "CONFIGURATION",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<BriefError> for PrdServiceError {
    fn from(e: BriefError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

impl IntoResponse for PrdServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidInput(_) | Self::MissingUserId | Self::InvalidSignature => {
                StatusCode::BAD_REQUEST
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::PrdNotFound => StatusCode::NOT_FOUND,
            Self::Generation(_) | Self::Configuration(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        // Client errors are already visible in the TraceLayer span.
        match &self {
            Self::Generation(cause) => {
                tracing::error!(error = %cause, kind = "GENERATION_FAILED", "generation failed");
            }
            Self::Configuration(detail) => {
                tracing::error!(error = %detail, kind = "CONFIGURATION", "configuration error");
            }
            Self::Internal(e) => {
                let chain = format!("{e:#}");
                tracing::error!(error = %chain, kind = "INTERNAL", "internal error");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
