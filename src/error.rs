//! Error types shared by every generated client.
//!
//! Every operation fails in one of three phases (preparing, sending or
//! responding), annotated with the operation that failed and, where the
//! service answered, the raw HTTP response.

use crate::arm::request::{Operation, RawResponse};
use crate::resourceids::ResourceIdError;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The `error` object ARM returns in failed responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArmErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Deserialize)]
struct ArmErrorEnvelope {
    error: ArmErrorDetail,
}

impl ArmErrorDetail {
    /// Decode `{"error": {...}}` from a response body, if it has that shape.
    pub fn from_body(body: &str) -> Option<Self> {
        let envelope: ArmErrorEnvelope = serde_json::from_str(body).ok()?;
        Some(envelope.error)
    }
}

/// Errors returned by the ARM client and generated operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{operation}: failure preparing request: {message}")]
    Prepare {
        operation: Operation,
        message: String,
    },

    #[error("{operation}: failure sending request: {source}")]
    Send {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation}: failure responding to request: {message}")]
    Respond {
        operation: Operation,
        status: Option<StatusCode>,
        message: String,
        detail: Option<ArmErrorDetail>,
        response: Option<Box<RawResponse>>,
    },

    #[error(transparent)]
    ResourceId(#[from] ResourceIdError),

    #[error("no more pages returned")]
    NoMorePages,

    #[error("polling after {operation}: {message}")]
    Polling {
        operation: Operation,
        message: String,
    },

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    pub(crate) fn prepare(operation: Operation, message: impl Into<String>) -> Self {
        Self::Prepare {
            operation,
            message: message.into(),
        }
    }

    /// The service answered with a status code the operation doesn't accept.
    pub(crate) fn unexpected_status(operation: Operation, response: RawResponse) -> Self {
        let detail = ArmErrorDetail::from_body(&response.body);
        let message = match &detail {
            Some(detail) => format!(
                "unexpected status {} with error: {}: {}",
                response.status.as_u16(),
                detail.code,
                detail.message
            ),
            None => format!("unexpected status {}", response.status.as_u16()),
        };

        Self::Respond {
            operation,
            status: Some(response.status),
            message,
            detail,
            response: Some(Box::new(response)),
        }
    }

    /// A success body that couldn't be decoded into the expected model.
    pub(crate) fn decode(
        operation: Operation,
        source: serde_json::Error,
        response: &RawResponse,
    ) -> Self {
        Self::Respond {
            operation,
            status: Some(response.status),
            message: format!("unmarshaling response: {}", source),
            detail: None,
            response: Some(Box::new(response.clone())),
        }
    }

    /// HTTP status of the failed response, if the service answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Respond { status, .. } => *status,
            Self::Send { source, .. } => source.status(),
            _ => None,
        }
    }

    /// True when the service reported the resource doesn't exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// The ARM error code (e.g. `ResourceNotFound`), when the body carried one.
    pub fn arm_error_code(&self) -> Option<&str> {
        match self {
            Self::Respond {
                detail: Some(detail),
                ..
            } => Some(detail.code.as_str()),
            _ => None,
        }
    }

    /// The raw response that caused the failure, when one exists.
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            Self::Respond { response, .. } => response.as_deref(),
            _ => None,
        }
    }
}
