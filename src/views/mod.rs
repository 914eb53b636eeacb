//! Console Views
//!
//! Headless view models, one per screen. Each owns the screen's state
//! machine and talks to the service through [`ConsoleApi`]; front ends only
//! render the state and forward input.
//!
//! - [`LoginView`]: credentials form, writes the session
//! - [`CategoryListView`]: list, debounced search, delete in place
//! - [`CategoryFormView`]: create and rename
//! - [`BlogListView`]: read-only blog cards

pub mod blog_list;
pub mod category_form;
pub mod category_list;
pub mod login;

pub use blog_list::{BlogListState, BlogListView};
pub use category_form::{CategoryFormView, FormMode};
pub use category_list::{CategoryListState, CategoryListView, SearchAction};
pub use login::LoginView;

use std::fmt;

use crate::config::MissingTokenPolicy;
use crate::session::{AuthToken, SessionContext};

/// Console screens, addressed the way the browser router addresses them
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    AddCategory,
    UpdateCategory(String),
    Blogs,
    BlogDetail(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::AddCategory => "/dashboard/AddCategory".to_string(),
            Route::UpdateCategory(id) => format!("/dashboard/UpdateCategory/{}", id),
            Route::Blogs => "/dashboard/blogs".to_string(),
            Route::BlogDetail(id) => format!("/dashboard/blogs/{}", id),
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim_end_matches('/');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["login"] => Some(Route::Login),
            ["dashboard"] => Some(Route::Dashboard),
            ["dashboard", "AddCategory"] => Some(Route::AddCategory),
            ["dashboard", "UpdateCategory", id] => Some(Route::UpdateCategory(id.to_string())),
            ["dashboard", "blogs"] => Some(Route::Blogs),
            ["dashboard", "blogs", id] => Some(Route::BlogDetail(id.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of checking the session before an authenticated fetch
#[derive(Debug)]
pub(crate) enum Access {
    Granted(AuthToken),
    /// No token; the view navigates to the route, or stays empty on `None`
    Denied(Option<Route>),
}

pub(crate) fn require_token(session: &SessionContext, policy: MissingTokenPolicy) -> Access {
    let token = session.token().unwrap_or_else(|e| {
        tracing::warn!("Failed to read session: {}", e);
        None
    });

    match token {
        Some(token) => Access::Granted(token),
        None => {
            tracing::info!("No auth token found");
            Access::Denied(denied_route(policy))
        }
    }
}

pub(crate) fn denied_route(policy: MissingTokenPolicy) -> Option<Route> {
    match policy {
        MissingTokenPolicy::Redirect => Some(Route::Login),
        MissingTokenPolicy::Empty => None,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths_round_trip() {
        let routes = [
            Route::Login,
            Route::Dashboard,
            Route::AddCategory,
            Route::UpdateCategory("c1".to_string()),
            Route::Blogs,
            Route::BlogDetail("b1".to_string()),
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn test_unknown_route() {
        assert_eq!(Route::parse("/settings"), None);
        assert_eq!(Route::parse("/dashboard/"), Some(Route::Dashboard));
    }

    #[test]
    fn test_missing_token_policy() {
        let session = SessionContext::in_memory();
        assert!(matches!(
            require_token(&session, MissingTokenPolicy::Redirect),
            Access::Denied(Some(Route::Login))
        ));
        assert!(matches!(
            require_token(&session, MissingTokenPolicy::Empty),
            Access::Denied(None)
        ));

        session.set_token("tok", "a1").unwrap();
        assert!(matches!(
            require_token(&session, MissingTokenPolicy::Empty),
            Access::Granted(_)
        ));
    }
}
