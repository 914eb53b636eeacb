//! Session Store
//!
//! Holds the authorization token, the auth identifier, and a raw copy of
//! the last login response. Views receive a [`SessionContext`] explicitly
//! instead of reaching into storage themselves.
//!
//! ## Keys
//!
//! The store uses the same three keys the browser console keeps in
//! `localStorage`: `authToken`, `authId`, `loginResponse`.

mod storage;

pub use storage::{FileStorage, MemoryStorage, SessionStorage};

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::models::LoginResponse;

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const AUTH_ID_KEY: &str = "authId";
pub const LOGIN_RESPONSE_KEY: &str = "loginResponse";

/// Opaque bearer credential issued at login.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Errors from the session store
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Session lock poisoned")]
    Poisoned,
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Shared handle to the session store
#[derive(Clone)]
pub struct SessionContext {
    storage: Arc<dyn SessionStorage>,
}

impl SessionContext {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Session kept in memory only
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Session persisted to a JSON file
    pub fn file(path: impl Into<std::path::PathBuf>) -> Self {
        Self::new(Arc::new(FileStorage::new(path)))
    }

    pub fn set_token(&self, token: &str, auth_id: &str) -> SessionResult<()> {
        self.storage
            .set_items(&[(AUTH_TOKEN_KEY, token), (AUTH_ID_KEY, auth_id)])
    }

    /// The stored token. Empty strings count as absent.
    pub fn token(&self) -> SessionResult<Option<AuthToken>> {
        Ok(self
            .storage
            .get_item(AUTH_TOKEN_KEY)?
            .filter(|t| !t.is_empty())
            .map(AuthToken::new))
    }

    pub fn auth_id(&self) -> SessionResult<Option<String>> {
        self.storage.get_item(AUTH_ID_KEY)
    }

    pub fn login_response(&self) -> SessionResult<Option<String>> {
        self.storage.get_item(LOGIN_RESPONSE_KEY)
    }

    pub fn store_login_response(&self, raw: &str) -> SessionResult<()> {
        self.storage.set_item(LOGIN_RESPONSE_KEY, raw)
    }

    /// Persist everything a successful login yields in one write
    pub fn establish(&self, login: &LoginResponse) -> SessionResult<()> {
        self.storage.set_items(&[
            (LOGIN_RESPONSE_KEY, login.raw.as_str()),
            (AUTH_TOKEN_KEY, login.authorization.as_str()),
            (AUTH_ID_KEY, login.user.auth_id.as_str()),
        ])
    }

    /// Remove every session key
    pub fn clear(&self) -> SessionResult<()> {
        self.storage
            .remove_items(&[AUTH_TOKEN_KEY, AUTH_ID_KEY, LOGIN_RESPONSE_KEY])
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn login(token: &str, auth_id: &str) -> LoginResponse {
        LoginResponse {
            user: User {
                id: "u1".to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                auth_id: auth_id.to_string(),
                created_at: None,
                updated_at: None,
            },
            authorization: token.to_string(),
            raw: format!(r#"{{"authorization":"{}"}}"#, token),
        }
    }

    #[test]
    fn test_set_and_clear() {
        let session = SessionContext::in_memory();
        assert!(session.token().unwrap().is_none());

        session.set_token("tok", "a1").unwrap();
        assert_eq!(session.token().unwrap().unwrap().as_str(), "tok");
        assert_eq!(session.auth_id().unwrap().as_deref(), Some("a1"));

        session.clear().unwrap();
        assert!(session.token().unwrap().is_none());
        assert!(session.auth_id().unwrap().is_none());
    }

    #[test]
    fn test_establish_writes_all_keys() {
        let session = SessionContext::in_memory();
        session.establish(&login("tok123", "a1")).unwrap();

        assert_eq!(session.token().unwrap().unwrap().as_str(), "tok123");
        assert_eq!(session.auth_id().unwrap().as_deref(), Some("a1"));
        assert_eq!(
            session.login_response().unwrap().as_deref(),
            Some(r#"{"authorization":"tok123"}"#)
        );
    }

    #[test]
    fn test_store_login_response_keeps_token() {
        let session = SessionContext::in_memory();
        session.establish(&login("tok123", "a1")).unwrap();

        session
            .store_login_response(r#"{"authorization":"tok123","refreshed":true}"#)
            .unwrap();

        assert_eq!(
            session.login_response().unwrap().as_deref(),
            Some(r#"{"authorization":"tok123","refreshed":true}"#)
        );
        assert_eq!(session.token().unwrap().unwrap().as_str(), "tok123");
        assert_eq!(session.auth_id().unwrap().as_deref(), Some("a1"));
    }

    #[test]
    fn test_empty_token_is_absent() {
        let session = SessionContext::in_memory();
        session.set_token("", "a1").unwrap();
        assert!(session.token().unwrap().is_none());
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = AuthToken::new("secret");
        assert_eq!(format!("{:?}", token), "AuthToken(***)");
    }
}
