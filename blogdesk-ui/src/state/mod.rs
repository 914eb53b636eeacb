//! State Management
//!
//! Session context, debounced search, and list helpers.

pub mod debounce;
pub mod search;
pub mod session;

pub use debounce::Debouncer;
pub use search::{remove_by_id, SearchAction, MIN_SEARCH_LEN, SEARCH_DEBOUNCE_MS};
pub use session::{provide_session, use_session, MissingTokenPolicy, SessionContext};
