//! Category list view
//!
//! `loading → ready` or `loading → ready-with-error`. Search input of at
//! least `min_search_len` characters schedules a debounced filtered fetch;
//! clearing the input cancels it and fetches the full list at once.

use std::sync::Arc;
use tokio::sync::watch;

use super::{require_token, Access, Route};
use crate::api::{ConsoleApi, FailureText};
use crate::config::ConsoleConfig;
use crate::debounce::Debouncer;
use crate::models::Category;
use crate::session::SessionContext;

const FETCH_TEXT: FailureText = FailureText {
    transport: "An error occurred while fetching categories",
    rejected: "Failed to fetch categories",
};

const DELETE_TEXT: FailureText = FailureText {
    transport: "An error occurred while deleting the category",
    rejected: "Failed to delete category",
};

/// What a change of the search input should trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    /// Input cleared: fetch the full list now
    FetchAll,
    /// Long enough: fetch filtered after the quiet period
    Debounce(String),
    /// Too short to search, not empty: leave the list alone
    Wait,
}

impl SearchAction {
    pub fn for_input(value: &str, min_len: usize) -> Self {
        let len = value.chars().count();
        if len == 0 {
            SearchAction::FetchAll
        } else if len >= min_len {
            SearchAction::Debounce(value.to_string())
        } else {
            SearchAction::Wait
        }
    }
}

/// Rendered state of the category list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryListState {
    pub categories: Vec<Category>,
    pub search_term: String,
    pub error: Option<String>,
    pub loading: bool,
    pub redirect: Option<Route>,
}

impl Default for CategoryListState {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            search_term: String::new(),
            error: None,
            loading: true,
            redirect: None,
        }
    }
}

/// Everything a fetch needs, cheap to clone into a debounced task
#[derive(Clone)]
struct Fetcher {
    api: Arc<dyn ConsoleApi>,
    session: SessionContext,
    config: ConsoleConfig,
    state: Arc<watch::Sender<CategoryListState>>,
}

impl Fetcher {
    async fn fetch(self, search: Option<String>) {
        let token = match require_token(&self.session, self.config.on_missing_token) {
            Access::Granted(token) => token,
            Access::Denied(redirect) => {
                self.state.send_modify(|s| {
                    s.categories.clear();
                    s.loading = false;
                    s.redirect = redirect;
                });
                return;
            }
        };

        self.state.send_modify(|s| s.loading = true);

        let result = match search.as_deref() {
            Some(term) => self.api.search_categories(&token, term).await,
            None => self.api.list_categories(&token).await,
        };

        self.state.send_modify(|s| {
            match result {
                Ok(categories) => {
                    s.categories = categories;
                    s.error = None;
                }
                Err(e) => {
                    tracing::debug!("Category fetch failed: {}", e);
                    s.error = Some(e.user_message(&FETCH_TEXT));
                }
            }
            s.loading = false;
        });
    }
}

/// Category list screen
pub struct CategoryListView {
    fetcher: Fetcher,
    debouncer: Debouncer,
}

impl CategoryListView {
    pub fn new(api: Arc<dyn ConsoleApi>, session: SessionContext, config: ConsoleConfig) -> Self {
        let debouncer = Debouncer::new(config.search_debounce());
        let (state, _) = watch::channel(CategoryListState::default());

        Self {
            fetcher: Fetcher {
                api,
                session,
                config,
                state: Arc::new(state),
            },
            debouncer,
        }
    }

    /// Current state
    pub fn snapshot(&self) -> CategoryListState {
        self.fetcher.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<CategoryListState> {
        self.fetcher.state.subscribe()
    }

    /// Initial unfiltered fetch
    pub async fn load(&self) {
        self.fetcher.clone().fetch(None).await;
    }

    /// React to a new value of the search box.
    ///
    /// Returns once an immediate fetch completes; debounced fetches run in
    /// the background and publish through [`subscribe`](Self::subscribe).
    pub async fn on_search_input(&mut self, value: &str) {
        self.fetcher
            .state
            .send_modify(|s| s.search_term = value.to_string());

        match SearchAction::for_input(value, self.fetcher.config.min_search_len) {
            SearchAction::FetchAll => {
                self.debouncer.cancel();
                self.fetcher.clone().fetch(None).await;
            }
            SearchAction::Debounce(term) => {
                let fetcher = self.fetcher.clone();
                self.debouncer.schedule(fetcher.fetch(Some(term)));
            }
            SearchAction::Wait => {}
        }
    }

    /// Filtered fetch without the quiet period, for one-shot callers
    pub async fn search(&mut self, term: &str) {
        self.debouncer.cancel();
        self.fetcher
            .state
            .send_modify(|s| s.search_term = term.to_string());
        let search = (!term.is_empty()).then(|| term.to_string());
        self.fetcher.clone().fetch(search).await;
    }

    /// Whether a debounced search is waiting to fire
    pub fn search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Wait until the last scheduled search has fired and published
    pub async fn flush_search(&mut self) {
        self.debouncer.flush().await;
    }

    /// Delete a category; the row disappears only after the server confirms.
    ///
    /// Returns whether the category was removed.
    pub async fn delete(&self, id: &str) -> bool {
        let token = match require_token(&self.fetcher.session, self.fetcher.config.on_missing_token)
        {
            Access::Granted(token) => token,
            Access::Denied(redirect) => {
                self.fetcher.state.send_modify(|s| s.redirect = redirect);
                return false;
            }
        };

        match self.fetcher.api.delete_category(&token, id).await {
            Ok(()) => {
                tracing::info!(category_id = id, "Category deleted");
                self.fetcher
                    .state
                    .send_modify(|s| s.categories.retain(|c| c.id != id));
                true
            }
            Err(e) => {
                self.fetcher
                    .state
                    .send_modify(|s| s.error = Some(e.user_message(&DELETE_TEXT)));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::config::MissingTokenPolicy;
    use crate::views::testing::{category, Call, FakeApi};
    use std::time::Duration;

    fn signed_in() -> SessionContext {
        let session = SessionContext::in_memory();
        session.set_token("tok", "a1").unwrap();
        session
    }

    fn view(api: &Arc<FakeApi>, session: SessionContext) -> CategoryListView {
        CategoryListView::new(
            Arc::clone(api) as Arc<dyn ConsoleApi>,
            session,
            ConsoleConfig::default(),
        )
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn test_search_action() {
        assert_eq!(SearchAction::for_input("", 2), SearchAction::FetchAll);
        assert_eq!(SearchAction::for_input("r", 2), SearchAction::Wait);
        assert_eq!(
            SearchAction::for_input("ru", 2),
            SearchAction::Debounce("ru".to_string())
        );
        // Characters, not bytes
        assert_eq!(SearchAction::for_input("é", 2), SearchAction::Wait);
    }

    #[tokio::test]
    async fn test_load_ready() {
        let api = Arc::new(FakeApi::new().on_list(Ok(vec![category("c1", "Rust")])));
        let view = view(&api, signed_in());
        assert!(view.snapshot().loading);

        view.load().await;

        let state = view.snapshot();
        assert!(!state.loading);
        assert_eq!(state.categories, vec![category("c1", "Rust")]);
        assert!(state.error.is_none());
        assert_eq!(*api.tokens.lock().unwrap(), vec!["tok".to_string()]);
    }

    #[tokio::test]
    async fn test_load_ready_with_error() {
        let api = Arc::new(FakeApi::new().on_list(Err(ApiError::Rejected {
            status: "Fail".to_string(),
            message: None,
        })));
        let view = view(&api, signed_in());

        view.load().await;

        let state = view.snapshot();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch categories"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_burst_fetches_final_term_only() {
        let api = Arc::new(
            FakeApi::new()
                .on_list(Ok(vec![category("c1", "Rust"), category("c2", "Go")]))
                .on_list(Ok(vec![category("c1", "Rust")])),
        );
        let mut view = view(&api, signed_in());
        view.load().await;

        for term in ["r", "ru", "rus", "rust"] {
            view.on_search_input(term).await;
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert!(view.search_pending());

        tokio::time::sleep(Duration::from_millis(300)).await;
        settle().await;

        assert_eq!(
            api.calls(),
            vec![
                Call("list_categories", None),
                Call("search_categories", Some("rust".to_string())),
            ]
        );
        let state = view.snapshot();
        assert_eq!(state.search_term, "rust");
        assert_eq!(state.categories, vec![category("c1", "Rust")]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_input_fetches_immediately() {
        let api = Arc::new(
            FakeApi::new()
                .on_list(Ok(vec![category("c1", "Rust")]))
                .on_list(Ok(vec![category("c1", "Rust"), category("c2", "Go")])),
        );
        let mut view = view(&api, signed_in());
        view.load().await;

        view.on_search_input("go").await;
        assert!(view.search_pending());

        view.on_search_input("").await;

        // Issued without waiting, and the pending search never fires.
        assert!(!view.search_pending());
        assert_eq!(
            api.calls(),
            vec![Call("list_categories", None), Call("list_categories", None)]
        );
        assert_eq!(view.snapshot().categories.len(), 2);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        settle().await;
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_single_character_does_nothing() {
        let api = Arc::new(FakeApi::new().on_list(Ok(vec![category("c1", "Rust")])));
        let mut view = view(&api, signed_in());
        view.load().await;

        view.on_search_input("r").await;

        assert!(!view.search_pending());
        assert_eq!(api.calls().len(), 1);
        assert_eq!(view.snapshot().search_term, "r");
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_search_publishes_result() {
        let api = Arc::new(FakeApi::new().on_list(Ok(vec![category("c2", "Go")])));
        let mut view = view(&api, signed_in());

        view.on_search_input("go").await;
        view.flush_search().await;

        let state = view.snapshot();
        assert!(!state.loading);
        assert_eq!(state.categories, vec![category("c2", "Go")]);
        assert_eq!(
            api.calls(),
            vec![Call("search_categories", Some("go".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_search_skips_quiet_period() {
        let api = Arc::new(FakeApi::new().on_list(Ok(vec![category("c1", "Rust")])));
        let mut view = view(&api, signed_in());

        view.search("r").await;

        assert_eq!(
            api.calls(),
            vec![Call("search_categories", Some("r".to_string()))]
        );
        assert_eq!(view.snapshot().search_term, "r");
    }

    #[tokio::test]
    async fn test_delete_removes_only_target() {
        let api = Arc::new(
            FakeApi::new()
                .on_list(Ok(vec![
                    category("c1", "Rust"),
                    category("c2", "Go"),
                    category("c3", "Zig"),
                ]))
                .on_delete(Ok(())),
        );
        let view = view(&api, signed_in());
        view.load().await;

        assert!(view.delete("c2").await);

        assert_eq!(
            view.snapshot().categories,
            vec![category("c1", "Rust"), category("c3", "Zig")]
        );
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_list_unchanged() {
        let api = Arc::new(
            FakeApi::new()
                .on_list(Ok(vec![category("c1", "Rust"), category("c2", "Go")]))
                .on_delete(Err(ApiError::Http {
                    status: 404,
                    message: Some("Category not found".to_string()),
                })),
        );
        let view = view(&api, signed_in());
        view.load().await;
        let before = view.snapshot().categories;

        assert!(!view.delete("c2").await);

        let state = view.snapshot();
        assert_eq!(state.categories, before);
        assert_eq!(state.error.as_deref(), Some("Category not found"));
    }

    #[tokio::test]
    async fn test_missing_token_redirects_without_fetching() {
        let api = Arc::new(FakeApi::new());
        let view = view(&api, SessionContext::in_memory());

        view.load().await;

        let state = view.snapshot();
        assert_eq!(state.redirect, Some(Route::Login));
        assert!(!state.loading);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_token_empty_policy() {
        let api = Arc::new(FakeApi::new());
        let config = ConsoleConfig {
            on_missing_token: MissingTokenPolicy::Empty,
            ..ConsoleConfig::default()
        };
        let view = CategoryListView::new(
            Arc::clone(&api) as Arc<dyn ConsoleApi>,
            SessionContext::in_memory(),
            config,
        );

        view.load().await;

        let state = view.snapshot();
        assert!(state.redirect.is_none());
        assert!(state.categories.is_empty());
        assert!(state.error.is_none());
        assert!(api.calls().is_empty());
    }
}
