//! Error types shared by the client and the page flows.
//!
//! Every failed request collapses into one [`ApiError`]. Conditions that are
//! decided locally, before any request is sent, live in [`ClientError`].

use thiserror::Error;

use crate::routes::Route;
use crate::session::SessionError;

/// Fallback message when the response body carries none.
pub const REQUEST_FAILED: &str = "Request failed";

/// What went wrong underneath a failed request. Flows treat every kind alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never produced a response
    Network,
    /// The server answered with a non-2xx status
    Status(u16),
    /// A 2xx body did not match the expected shape
    Decode,
}

/// The single "request failed" condition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network() -> Self {
        Self::new(FailureKind::Network, REQUEST_FAILED)
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::new(FailureKind::Status(status), message)
    }

    pub fn decode(detail: impl std::fmt::Display) -> Self {
        Self::new(
            FailureKind::Decode,
            format!("{}: unexpected response ({})", REQUEST_FAILED, detail),
        )
    }

    pub fn status_code(&self) -> Option<u16> {
        match self.kind {
            FailureKind::Status(code) => Some(code),
            _ => None,
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// The backend answers failures with `{"error": "..."}`; some handlers use
/// `message` instead. Anything else yields [`REQUEST_FAILED`].
pub fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["error", "message"].iter().find_map(|key| {
                value
                    .get(key)
                    .and_then(|v| v.as_str())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| REQUEST_FAILED.to_string())
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Request(#[from] ApiError),

    #[error("{0}")]
    Validation(String),

    #[error("Login required")]
    NotAuthenticated(Route),

    #[error("Access denied. Admin credentials required.")]
    Forbidden,

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    /// Where the UI should go when this error means "log in first".
    pub fn redirect(&self) -> Option<&Route> {
        match self {
            ClientError::NotAuthenticated(route) => Some(route),
            _ => None,
        }
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
