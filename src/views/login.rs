//! Login view

use std::sync::Arc;

use super::Route;
use crate::api::{ConsoleApi, FailureText};
use crate::models::Credentials;
use crate::session::SessionContext;

const LOGIN_TEXT: FailureText = FailureText {
    transport: "Login failed. Please check your credentials.",
    rejected: "Login failed. Please check your credentials.",
};

/// Credentials form
pub struct LoginView {
    api: Arc<dyn ConsoleApi>,
    session: SessionContext,
    pub email: String,
    pub password: String,
    error: Option<String>,
    submitting: bool,
}

impl LoginView {
    pub fn new(api: Arc<dyn ConsoleApi>, session: SessionContext) -> Self {
        Self {
            api,
            session,
            email: String::new(),
            password: String::new(),
            error: None,
            submitting: false,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit the credentials.
    ///
    /// The session is written only after the service returned a token, and
    /// then in a single write. Returns the dashboard route on success.
    pub async fn submit(&mut self) -> Option<Route> {
        if self.submitting {
            return None;
        }
        self.error = None;
        self.submitting = true;

        let credentials = Credentials::new(self.email.trim(), self.password.clone());
        let result = self.api.login(&credentials).await;
        self.submitting = false;

        let login = match result {
            Ok(login) => login,
            Err(e) => {
                tracing::debug!("Login failed: {}", e);
                self.error = Some(e.user_message(&LOGIN_TEXT));
                return None;
            }
        };

        if let Err(e) = self.session.establish(&login) {
            self.error = Some(format!("Failed to save session: {}", e));
            return None;
        }

        tracing::info!(auth_id = %login.user.auth_id, "Signed in");
        Some(Route::Dashboard)
    }
}
