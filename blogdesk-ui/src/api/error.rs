//! API Errors
//!
//! Failures of a console request, and how each screen turns them into a
//! single line of text.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response
    Network(String),
    /// HTTP 401
    Unauthorized { message: Option<String> },
    /// Other non-2xx status
    Http { status: u16, message: Option<String> },
    /// 2xx with an envelope status other than `"Success"`
    Rejected { message: Option<String> },
    /// Body could not be decoded
    Malformed(String),
    /// Login answered without a token
    MissingAuthorization,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e) => write!(f, "Network error: {}", e),
            ApiError::Unauthorized { message } => {
                write!(f, "Unauthorized: {}", message.as_deref().unwrap_or("token rejected"))
            }
            ApiError::Http { status, message } => write!(
                f,
                "API error {}: {}",
                status,
                message.as_deref().unwrap_or("no message")
            ),
            ApiError::Rejected { .. } => write!(f, "Request rejected"),
            ApiError::Malformed(e) => write!(f, "Parse error: {}", e),
            ApiError::MissingAuthorization => {
                write!(f, "No authorization token received from server")
            }
        }
    }
}

/// Fallback texts of one screen
#[derive(Debug, Clone, Copy)]
pub struct FailureText {
    pub transport: &'static str,
    pub rejected: &'static str,
}

impl ApiError {
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message }
            | ApiError::Http { message, .. }
            | ApiError::Rejected { message } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// The text shown in the screen's error banner
    pub fn user_message(&self, text: &FailureText) -> String {
        match self {
            ApiError::Rejected { .. } => text.rejected.to_string(),
            ApiError::MissingAuthorization => self.to_string(),
            _ => self
                .server_message()
                .filter(|m| !m.is_empty())
                .unwrap_or(text.transport)
                .to_string(),
        }
    }
}
