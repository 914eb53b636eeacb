//! apikeeda REST API
//!
//! Typed access to the external service the console manages.
//!
//! # Endpoints
//!
//! ## Auth
//! - `POST /user/login` - Exchange credentials for a token
//!
//! ## Categories
//! - `GET /category` - List all categories
//! - `GET /category/search?search=<term>` - Filter categories by name
//! - `POST /category` - Create a category
//! - `GET /category/:id` - Get a category
//! - `PATCH /category/:id` - Rename a category
//! - `DELETE /category/:id` - Delete a category
//!
//! ## Blogs
//! - `GET /blog` - List the signed-in user's blogs
//!
//! Every request carries the `x-apikeeda-key` service header; every call
//! except login also carries the session token in `authorization`.

pub mod client;
pub mod envelope;
pub mod error;

pub use client::{ApiClient, API_KEY_HEADER};
pub use envelope::{Envelope, SUCCESS_STATUS};
pub use error::{ApiError, ApiResult, FailureText};

use async_trait::async_trait;

use crate::models::{Blog, Category, CategoryInput, Credentials, LoginResponse};
use crate::session::AuthToken;

/// Operations the console views need from the service.
///
/// [`ApiClient`] is the HTTP implementation; tests script their own.
#[async_trait]
pub trait ConsoleApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse>;

    async fn list_categories(&self, token: &AuthToken) -> ApiResult<Vec<Category>>;

    async fn search_categories(&self, token: &AuthToken, term: &str) -> ApiResult<Vec<Category>>;

    async fn create_category(&self, token: &AuthToken, input: &CategoryInput)
        -> ApiResult<Category>;

    async fn get_category(&self, token: &AuthToken, id: &str) -> ApiResult<Category>;

    async fn update_category(
        &self,
        token: &AuthToken,
        id: &str,
        input: &CategoryInput,
    ) -> ApiResult<Category>;

    async fn delete_category(&self, token: &AuthToken, id: &str) -> ApiResult<()>;

    async fn list_blogs(&self, token: &AuthToken) -> ApiResult<Vec<Blog>>;
}
