//! Session Context
//!
//! The signed-in session, persisted in `localStorage` under the keys the
//! console has always used and mirrored into signals for rendering.

use leptos::*;

use crate::api::LoginResponse;

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const AUTH_ID_KEY: &str = "authId";
pub const LOGIN_RESPONSE_KEY: &str = "loginResponse";

/// What an authenticated screen does when no token is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingTokenPolicy {
    /// Navigate to `/login`
    Redirect,
    /// Render an empty screen
    Empty,
}

impl MissingTokenPolicy {
    /// Chosen at build time through `BLOGDESK_ON_MISSING_TOKEN`
    pub fn configured() -> Self {
        match option_env!("BLOGDESK_ON_MISSING_TOKEN") {
            Some(policy) if policy.eq_ignore_ascii_case("empty") => MissingTokenPolicy::Empty,
            _ => MissingTokenPolicy::Redirect,
        }
    }
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn read_item(key: &str) -> Option<String> {
    storage()?.get_item(key).ok().flatten()
}

/// Write every pair or none of them
pub fn write_items(items: &[(&str, &str)]) -> Result<(), String> {
    let storage = storage().ok_or("Local storage is unavailable")?;

    for (i, (key, value)) in items.iter().enumerate() {
        if storage.set_item(key, value).is_err() {
            for (written, _) in &items[..i] {
                let _ = storage.remove_item(written);
            }
            return Err(format!("Failed to store {}", key));
        }
    }
    Ok(())
}

pub fn remove_items(keys: &[&str]) {
    if let Some(storage) = storage() {
        for key in keys {
            let _ = storage.remove_item(key);
        }
    }
}

/// Session handed to every screen through context
#[derive(Clone, Copy)]
pub struct SessionContext {
    token: RwSignal<Option<String>>,
    auth_id: RwSignal<Option<String>>,
    pub policy: MissingTokenPolicy,
}

impl SessionContext {
    fn load() -> Self {
        Self {
            token: create_rw_signal(read_item(AUTH_TOKEN_KEY).filter(|t| !t.is_empty())),
            auth_id: create_rw_signal(read_item(AUTH_ID_KEY)),
            policy: MissingTokenPolicy::configured(),
        }
    }

    /// Current token, without subscribing
    pub fn token(&self) -> Option<String> {
        self.token.get_untracked()
    }

    /// Reactive signed-in flag
    pub fn is_signed_in(&self) -> bool {
        self.token.with(Option::is_some)
    }

    pub fn auth_id(&self) -> Option<String> {
        self.auth_id.get()
    }

    /// Token for an authenticated fetch. When absent, applies the
    /// missing-token policy through `redirect`.
    pub fn require_token(&self, redirect: WriteSignal<bool>) -> Option<String> {
        let token = self.token();
        if token.is_none() {
            web_sys::console::log_1(&"No auth token found".into());
            if self.policy == MissingTokenPolicy::Redirect {
                redirect.set(true);
            }
        }
        token
    }

    /// Persist a successful login in one write
    pub fn establish(&self, login: &LoginResponse) -> Result<(), String> {
        write_items(&[
            (AUTH_TOKEN_KEY, login.authorization.as_str()),
            (AUTH_ID_KEY, login.auth_id.as_str()),
            (LOGIN_RESPONSE_KEY, login.raw.as_str()),
        ])?;
        self.token.set(Some(login.authorization.clone()));
        self.auth_id.set(Some(login.auth_id.clone()));
        Ok(())
    }

    pub fn clear(&self) {
        remove_items(&[AUTH_TOKEN_KEY, AUTH_ID_KEY, LOGIN_RESPONSE_KEY]);
        self.token.set(None);
        self.auth_id.set(None);
    }
}

pub fn provide_session() {
    provide_context(SessionContext::load());
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext not found")
}
