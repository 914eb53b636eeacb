//! Search Decisions
//!
//! What the category search box does with each new value.

use crate::api::Category;

/// Quiet period before a filtered fetch
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Shortest term that triggers a filtered fetch
pub const MIN_SEARCH_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    /// Cleared: fetch everything at once
    FetchAll,
    /// Fetch filtered after the quiet period
    Debounce(String),
    /// Too short: leave the list as it is
    Wait,
}

impl SearchAction {
    pub fn for_input(value: &str, min_len: usize) -> Self {
        match value.chars().count() {
            0 => SearchAction::FetchAll,
            n if n >= min_len => SearchAction::Debounce(value.to_string()),
            _ => SearchAction::Wait,
        }
    }
}

/// Drop the category with `id`, keeping the order of the rest
pub fn remove_by_id(categories: &mut Vec<Category>, id: &str) {
    categories.retain(|c| c.id != id);
}
