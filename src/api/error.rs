//! API Error Types
//!
//! Two tiers: transport/validation failures (network, non-2xx status,
//! malformed body) and application failures (a body whose `status` is not
//! `"Success"`). Views collapse both into one user-facing string.

use thiserror::Error;

/// Errors returned by [`ConsoleApi`](super::ConsoleApi) operations
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP 401
    #[error("Unauthorized: {}", .message.as_deref().unwrap_or("token rejected"))]
    Unauthorized { message: Option<String> },

    /// Any other non-2xx status
    #[error("API error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Http { status: u16, message: Option<String> },

    /// 2xx response whose envelope status is not `"Success"`
    #[error("Request rejected with status {status:?}")]
    Rejected {
        status: String,
        message: Option<String>,
    },

    /// Body could not be decoded
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Login succeeded at the HTTP level but carried no token
    #[error("No authorization token received from server")]
    MissingAuthorization,

    /// An authenticated call was attempted without a stored token
    #[error("Not signed in")]
    MissingToken,
}

/// Per-view fallback texts used when the server supplies no message
#[derive(Debug, Clone, Copy)]
pub struct FailureText {
    /// Shown for transport failures without a server message
    pub transport: &'static str,
    /// Shown when the envelope status is not `"Success"`
    pub rejected: &'static str,
}

impl ApiError {
    /// The `message` field the server sent with the failure, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message }
            | ApiError::Http { message, .. }
            | ApiError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Collapse the error into the single string a view displays
    pub fn user_message(&self, text: &FailureText) -> String {
        match self {
            ApiError::Rejected { .. } => text.rejected.to_string(),
            ApiError::MissingAuthorization | ApiError::MissingToken => self.to_string(),
            _ => self
                .server_message()
                .filter(|m| !m.is_empty())
                .unwrap_or(text.transport)
                .to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Malformed(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Malformed(err.to_string())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
