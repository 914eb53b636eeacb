//! Response envelopes
//!
//! The service wraps payloads as `{ status, data, message }` and signals
//! success with `status == "Success"`. Login is the exception and answers
//! `{ data, authorization }`.

use serde::Deserialize;

use super::error::{ApiError, ApiResult};
use crate::models::User;

/// Envelope status that marks success
pub const SUCCESS_STATUS: &str = "Success";

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub status: Option<String>,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(SUCCESS_STATUS)
    }

    /// The payload of a successful envelope
    pub fn into_data(self) -> ApiResult<T> {
        if !self.is_success() {
            return Err(self.rejection());
        }
        self.data
            .ok_or_else(|| ApiError::Malformed("success envelope without data".to_string()))
    }

    /// Success check for payload-less responses such as delete
    pub fn into_unit(self) -> ApiResult<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self.rejection())
        }
    }

    fn rejection(self) -> ApiError {
        ApiError::Rejected {
            status: self.status.unwrap_or_default(),
            message: self.message,
        }
    }
}

/// Body of `POST /user/login`
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub data: Option<User>,
    pub authorization: Option<String>,
}

/// Error body of a non-2xx response
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}

impl ErrorBody {
    /// Best-effort parse; non-JSON bodies carry no message
    pub fn parse(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }
}
