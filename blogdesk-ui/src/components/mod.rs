//! UI Components
//!
//! Reusable Leptos components for the console screens.

pub mod error_banner;
pub mod loading;
pub mod nav;

pub use error_banner::ErrorBanner;
pub use loading::{CardSkeleton, Loading};
pub use nav::Nav;
