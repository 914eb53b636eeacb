//! apikeeda REST API Client
//!
//! HTTP client for the category and blog endpoints.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::envelope::{Envelope, ErrorBody, LoginBody};
use super::error::{ApiError, ApiResult};
use super::ConsoleApi;
use crate::config::ServiceConfig;
use crate::models::{Blog, Category, CategoryInput, Credentials, LoginResponse};
use crate::session::AuthToken;

/// Header carrying the static service key
pub const API_KEY_HEADER: &str = "x-apikeeda-key";

/// REST client for the apikeeda service
pub struct ApiClient {
    http: Client,
    config: ServiceConfig,
}

impl ApiClient {
    /// Create a new client with the given configuration
    pub fn new(config: ServiceConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base(), path)
    }

    fn request(&self, method: Method, path: &str, token: Option<&AuthToken>) -> RequestBuilder {
        tracing::debug!(%method, path, authenticated = token.is_some(), "API request");

        let builder = self
            .http
            .request(method, self.url(path))
            .header(API_KEY_HEADER, &self.config.api_key);

        match token {
            Some(token) => builder.header(
                reqwest::header::AUTHORIZATION,
                self.config.auth_scheme.header_value(token.as_str()),
            ),
            None => builder,
        }
    }

    /// Send a request and decode the body, mapping HTTP failures
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<(T, String)> {
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("API rejected the session token");
            return Err(ApiError::Unauthorized {
                message: ErrorBody::parse(&text).message,
            });
        }

        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: ErrorBody::parse(&text).message,
            });
        }

        let body = serde_json::from_str(&text)?;
        Ok((body, text))
    }

    async fn send_envelope<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> ApiResult<Envelope<T>> {
        self.send(builder).await.map(|(body, _)| body)
    }
}

fn category_path(id: &str) -> String {
    format!("/category/{}", urlencoding::encode(id))
}

#[async_trait]
impl ConsoleApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        let builder = self
            .request(Method::POST, "/user/login", None)
            .json(credentials);

        let (body, raw): (LoginBody, String) = self.send(builder).await?;

        let authorization = body
            .authorization
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::MissingAuthorization)?;
        let user = body
            .data
            .ok_or_else(|| ApiError::Malformed("login response without user".to_string()))?;

        Ok(LoginResponse {
            user,
            authorization,
            raw,
        })
    }

    async fn list_categories(&self, token: &AuthToken) -> ApiResult<Vec<Category>> {
        let builder = self.request(Method::GET, "/category", Some(token));
        self.send_envelope(builder).await?.into_data()
    }

    async fn search_categories(&self, token: &AuthToken, term: &str) -> ApiResult<Vec<Category>> {
        let path = format!("/category/search?search={}", urlencoding::encode(term));
        let builder = self.request(Method::GET, &path, Some(token));
        self.send_envelope(builder).await?.into_data()
    }

    async fn create_category(
        &self,
        token: &AuthToken,
        input: &CategoryInput,
    ) -> ApiResult<Category> {
        let builder = self
            .request(Method::POST, "/category", Some(token))
            .json(input);
        self.send_envelope(builder).await?.into_data()
    }

    async fn get_category(&self, token: &AuthToken, id: &str) -> ApiResult<Category> {
        let builder = self.request(Method::GET, &category_path(id), Some(token));
        self.send_envelope(builder).await?.into_data()
    }

    async fn update_category(
        &self,
        token: &AuthToken,
        id: &str,
        input: &CategoryInput,
    ) -> ApiResult<Category> {
        let builder = self
            .request(Method::PATCH, &category_path(id), Some(token))
            .json(input);
        self.send_envelope(builder).await?.into_data()
    }

    async fn delete_category(&self, token: &AuthToken, id: &str) -> ApiResult<()> {
        let builder = self.request(Method::DELETE, &category_path(id), Some(token));
        self.send_envelope::<serde_json::Value>(builder)
            .await?
            .into_unit()
    }

    async fn list_blogs(&self, token: &AuthToken) -> ApiResult<Vec<Blog>> {
        let builder = self.request(Method::GET, "/blog", Some(token));
        self.send_envelope(builder).await?.into_data()
    }
}
