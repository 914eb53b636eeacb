//! HTTP API Client
//!
//! Functions for calling the apikeeda REST API. Every request carries the
//! build-time service key; every call except login also carries the
//! session token.

use gloo_net::http::{Method, Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;

use super::error::{ApiError, ApiResult};
use super::types::{Blog, Category, Envelope, ErrorBody, LoginBody, LoginResponse};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://service.apikeeda.com/api/v1";

/// Header carrying the service key
pub const API_KEY_HEADER: &str = "x-apikeeda-key";

/// `localStorage` key overriding the base URL
pub const API_URL_STORAGE_KEY: &str = "blogdesk_api_url";

/// Service key baked in at build time
pub fn api_key() -> &'static str {
    option_env!("BLOGDESK_API_KEY").unwrap_or("")
}

/// Get the API base URL from local storage, the build, or the default
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_STORAGE_KEY).ok().flatten())
        .filter(|url| !url.is_empty());

    let url = stored.unwrap_or_else(|| {
        option_env!("BLOGDESK_API_URL")
            .unwrap_or(DEFAULT_API_BASE)
            .to_string()
    });
    url.trim_end_matches('/').to_string()
}

/// `authorization` header value for a token
pub fn authorization_value(token: &str) -> String {
    match option_env!("BLOGDESK_AUTH_SCHEME") {
        Some(scheme) if scheme.eq_ignore_ascii_case("bearer") => format!("Bearer {}", token),
        _ => token.to_string(),
    }
}

fn encode(value: &str) -> String {
    String::from(js_sys::encode_uri_component(value))
}

fn request(method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
    let builder = RequestBuilder::new(&format!("{}{}", get_api_base(), path))
        .method(method)
        .header(API_KEY_HEADER, api_key());

    match token {
        Some(token) => builder.header("authorization", &authorization_value(token)),
        None => builder,
    }
}

/// Send the request and decode the body; returns it with the raw text
async fn send<T: DeserializeOwned>(
    request: Result<Request, gloo_net::Error>,
) -> ApiResult<(T, String)> {
    let response = request
        .map_err(|e| ApiError::Network(format!("Request build error: {}", e)))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if status == 401 {
        web_sys::console::warn_1(&"API rejected the session token".into());
        return Err(ApiError::Unauthorized {
            message: error_message(&text),
        });
    }

    if !response.ok() {
        return Err(ApiError::Http {
            status,
            message: error_message(&text),
        });
    }

    let body = serde_json::from_str(&text).map_err(|e| ApiError::Malformed(e.to_string()))?;
    Ok((body, text))
}

fn error_message(text: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(text)
        .unwrap_or_default()
        .message
}

async fn send_data<T: DeserializeOwned>(
    request: Result<Request, gloo_net::Error>,
) -> ApiResult<T> {
    let (envelope, _): (Envelope<T>, String) = send(request).await?;
    if !envelope.is_success() {
        return Err(ApiError::Rejected {
            message: envelope.message,
        });
    }
    envelope
        .data
        .ok_or_else(|| ApiError::Malformed("success envelope without data".to_string()))
}

// ============ API Functions ============

/// Exchange credentials for a session token
pub async fn login(email: &str, password: &str) -> ApiResult<LoginResponse> {
    let request = request(Method::POST, "/user/login", None)
        .json(&json!({ "email": email, "password": password }));

    let (body, raw): (LoginBody, String) = send(request).await?;

    let authorization = body
        .authorization
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::MissingAuthorization)?;
    let user = body
        .data
        .ok_or_else(|| ApiError::Malformed("login response without user".to_string()))?;

    Ok(LoginResponse {
        authorization,
        auth_id: user.auth_id,
        raw,
    })
}

/// All categories, or those matching `search`
pub async fn fetch_categories(token: &str, search: Option<&str>) -> ApiResult<Vec<Category>> {
    let path = match search {
        Some(term) => format!("/category/search?search={}", encode(term)),
        None => "/category".to_string(),
    };
    send_data(request(Method::GET, &path, Some(token)).build()).await
}

pub async fn create_category(token: &str, name: &str) -> ApiResult<Category> {
    let request = request(Method::POST, "/category", Some(token)).json(&json!({ "name": name }));
    send_data(request).await
}

pub async fn fetch_category(token: &str, id: &str) -> ApiResult<Category> {
    let path = format!("/category/{}", encode(id));
    send_data(request(Method::GET, &path, Some(token)).build()).await
}

pub async fn update_category(token: &str, id: &str, name: &str) -> ApiResult<Category> {
    let path = format!("/category/{}", encode(id));
    let request = request(Method::PATCH, &path, Some(token)).json(&json!({ "name": name }));
    send_data(request).await
}

pub async fn delete_category(token: &str, id: &str) -> ApiResult<()> {
    let path = format!("/category/{}", encode(id));
    let (envelope, _): (Envelope<serde_json::Value>, String) =
        send(request(Method::DELETE, &path, Some(token)).build()).await?;

    if envelope.is_success() {
        Ok(())
    } else {
        Err(ApiError::Rejected {
            message: envelope.message,
        })
    }
}

pub async fn fetch_blogs(token: &str) -> ApiResult<Vec<Blog>> {
    send_data(request(Method::GET, "/blog", Some(token)).build()).await
}
