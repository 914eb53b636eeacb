//! Blog list view
//!
//! Read-only card grid. Unlike the category screens, an unauthorized reply
//! clears the session before the missing-token policy applies.

use std::sync::Arc;

use super::{denied_route, require_token, Access, Route};
use crate::api::{ApiError, ConsoleApi, FailureText};
use crate::config::MissingTokenPolicy;
use crate::models::Blog;
use crate::session::SessionContext;

const BLOGS_TEXT: FailureText = FailureText {
    transport: "An error occurred while fetching blogs",
    rejected: "Failed to fetch blogs",
};

/// Rendered state of the blog list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogListState {
    pub blogs: Vec<Blog>,
    pub error: Option<String>,
    pub loading: bool,
    pub redirect: Option<Route>,
}

impl Default for BlogListState {
    fn default() -> Self {
        Self {
            blogs: Vec::new(),
            error: None,
            loading: true,
            redirect: None,
        }
    }
}

/// Blog list screen
pub struct BlogListView {
    api: Arc<dyn ConsoleApi>,
    session: SessionContext,
    policy: MissingTokenPolicy,
    state: BlogListState,
}

impl BlogListView {
    pub fn new(api: Arc<dyn ConsoleApi>, session: SessionContext, policy: MissingTokenPolicy) -> Self {
        Self {
            api,
            session,
            policy,
            state: BlogListState::default(),
        }
    }

    pub fn state(&self) -> &BlogListState {
        &self.state
    }

    pub async fn load(&mut self) {
        let token = match require_token(&self.session, self.policy) {
            Access::Granted(token) => token,
            Access::Denied(redirect) => {
                self.state.loading = false;
                self.state.redirect = redirect;
                return;
            }
        };

        self.state.loading = true;
        match self.api.list_blogs(&token).await {
            Ok(blogs) => {
                self.state.blogs = blogs;
                self.state.error = None;
            }
            Err(e) if e.is_unauthorized() => {
                tracing::warn!("Unauthorized access, clearing session");
                if let Err(e) = self.session.clear() {
                    tracing::warn!("Failed to clear session: {}", e);
                }
                self.state.redirect = denied_route(self.policy);
            }
            Err(ApiError::Rejected { message, .. }) => {
                self.state.error = Some(match message {
                    Some(message) => format!("{}: {}", BLOGS_TEXT.rejected, message),
                    None => BLOGS_TEXT.rejected.to_string(),
                });
            }
            Err(e) => self.state.error = Some(e.user_message(&BLOGS_TEXT)),
        }
        self.state.loading = false;
    }

    /// Clear the session and head back to the login screen
    pub fn logout(&mut self) -> Route {
        if let Err(e) = self.session.clear() {
            tracing::warn!("Failed to clear session: {}", e);
        }
        self.state.redirect = Some(Route::Login);
        Route::Login
    }
}
