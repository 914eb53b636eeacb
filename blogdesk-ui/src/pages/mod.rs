//! Pages
//!
//! Top-level page components for each route.

pub mod blogs;
pub mod categories;
pub mod category_form;
pub mod login;

pub use blogs::Blogs;
pub use categories::Categories;
pub use category_form::{AddCategory, UpdateCategory};
pub use login::Login;
