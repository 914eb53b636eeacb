//! Category create / edit view

use std::sync::Arc;

use super::{require_token, Access, Route};
use crate::api::{ApiResult, ConsoleApi, FailureText};
use crate::config::MissingTokenPolicy;
use crate::models::{Category, CategoryInput};
use crate::session::{AuthToken, SessionContext};

const CREATE_TEXT: FailureText = FailureText {
    transport: "An error occurred while adding the category",
    rejected: "Failed to add category",
};

const LOAD_TEXT: FailureText = FailureText {
    transport: "An error occurred while fetching the category",
    rejected: "Failed to fetch category",
};

const UPDATE_TEXT: FailureText = FailureText {
    transport: "An error occurred while updating the category",
    rejected: "Failed to update category",
};

/// Which form is shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// Single-field category form
pub struct CategoryFormView {
    api: Arc<dyn ConsoleApi>,
    session: SessionContext,
    policy: MissingTokenPolicy,
    mode: FormMode,
    name: String,
    error: Option<String>,
    busy: bool,
    redirect: Option<Route>,
}

impl CategoryFormView {
    pub fn create(
        api: Arc<dyn ConsoleApi>,
        session: SessionContext,
        policy: MissingTokenPolicy,
    ) -> Self {
        Self::new(api, session, policy, FormMode::Create)
    }

    pub fn edit(
        api: Arc<dyn ConsoleApi>,
        session: SessionContext,
        policy: MissingTokenPolicy,
        id: impl Into<String>,
    ) -> Self {
        Self::new(api, session, policy, FormMode::Edit { id: id.into() })
    }

    fn new(
        api: Arc<dyn ConsoleApi>,
        session: SessionContext,
        policy: MissingTokenPolicy,
        mode: FormMode,
    ) -> Self {
        // The edit form starts busy until the category is loaded.
        let busy = matches!(mode, FormMode::Edit { .. });
        Self {
            api,
            session,
            policy,
            mode,
            name: String::new(),
            error: None,
            busy,
            redirect: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Where the view wants to navigate, once it is done
    pub fn redirect(&self) -> Option<&Route> {
        self.redirect.as_ref()
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add New Category",
            FormMode::Edit { .. } => "Update Category",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (&self.mode, self.busy) {
            (FormMode::Create, true) => "Adding...",
            (FormMode::Create, false) => "Add Category",
            (FormMode::Edit { .. }, true) => "Updating...",
            (FormMode::Edit { .. }, false) => "Update Category",
        }
    }

    fn token(&mut self) -> Option<AuthToken> {
        match require_token(&self.session, self.policy) {
            Access::Granted(token) => Some(token),
            Access::Denied(redirect) => {
                self.redirect = redirect;
                self.busy = false;
                None
            }
        }
    }

    /// Pre-populate the edit form. A no-op for the create form.
    pub async fn load(&mut self) {
        let id = match &self.mode {
            FormMode::Create => return,
            FormMode::Edit { id } => id.clone(),
        };
        let Some(token) = self.token() else {
            return;
        };

        self.busy = true;
        match self.api.get_category(&token, &id).await {
            Ok(category) => self.name = category.name,
            Err(e) => self.error = Some(e.user_message(&LOAD_TEXT)),
        }
        self.busy = false;
    }

    /// Submit the form.
    ///
    /// On success returns the list route; on failure the error is set and
    /// the typed name is kept for another attempt. Ignored while busy.
    pub async fn submit(&mut self) -> Option<Route> {
        if self.busy {
            return None;
        }
        if self.name.trim().is_empty() {
            self.error = Some("Category name is required".to_string());
            return None;
        }

        self.error = None;
        let token = self.token()?;
        self.busy = true;

        let input = CategoryInput::new(self.name.clone());
        let (result, text): (ApiResult<Category>, _) = match &self.mode {
            FormMode::Create => (self.api.create_category(&token, &input).await, CREATE_TEXT),
            FormMode::Edit { id } => (
                self.api.update_category(&token, id, &input).await,
                UPDATE_TEXT,
            ),
        };
        self.busy = false;

        match result {
            Ok(category) => {
                tracing::info!(category_id = %category.id, name = %category.name, "Category saved");
                self.redirect = Some(Route::Dashboard);
                self.redirect.clone()
            }
            Err(e) => {
                self.error = Some(e.user_message(&text));
                None
            }
        }
    }
}
