//! apikeeda API
//!
//! Wire types, error taxonomy, and the gloo-net client.

pub mod client;
pub mod error;
pub mod types;

pub use client::*;
pub use error::{ApiError, ApiResult, FailureText};
pub use types::{Blog, Category, LoginResponse, Reference};
