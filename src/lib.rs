//! # Blogdesk
//!
//! Admin console for the categories and blogs of the apikeeda REST service.
//!
//! ## Features
//!
//! - **Typed client**: every endpoint the console uses, with the service's
//!   `{ status, data }` success envelope decoded into `Result`s
//! - **Session store**: token, auth id, and raw login response persisted
//!   across runs, handed to views explicitly
//! - **Debounced search**: a cancellable timer collapses keystrokes into one
//!   fetch
//! - **Headless views**: one state machine per screen, shared by the
//!   terminal front end and mirrored by the browser console
//!
//! ## Modules
//!
//! - [`api`]: REST client and error taxonomy
//! - [`session`]: session context and storage backends
//! - [`debounce`]: cancellable quiet-period timer
//! - [`views`]: login, category list/form, blog list view models
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blogdesk::{ApiClient, Config, LoginView, SessionContext};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default(None)?;
//!     let api = Arc::new(ApiClient::new(config.service.clone())?);
//!     let session = SessionContext::file(&config.session.path);
//!
//!     let mut login = LoginView::new(api, session);
//!     login.email = "admin@example.com".to_string();
//!     login.password = "secret".to_string();
//!
//!     match login.submit().await {
//!         Some(route) => println!("Signed in, continue at {}", route),
//!         None => println!("{}", login.error().unwrap_or("Login failed")),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod debounce;
pub mod models;
pub mod session;
pub mod views;

pub use api::{ApiClient, ApiError, ApiResult, ConsoleApi};

pub use config::{
    AuthScheme, Config, ConfigError, ConsoleConfig, LoggingConfig, MissingTokenPolicy,
    ServiceConfig, SessionConfig,
};

pub use debounce::Debouncer;

pub use models::{Blog, Category, CategoryInput, Credentials, LoginResponse, Reference, User};

pub use session::{
    AuthToken, FileStorage, MemoryStorage, SessionContext, SessionError, SessionStorage,
};

pub use views::{
    BlogListState, BlogListView, CategoryFormView, CategoryListState, CategoryListView,
    FormMode, LoginView, Route, SearchAction,
};
