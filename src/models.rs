//! Resource Models
//!
//! Wire types for the apikeeda service. Field names follow the service's
//! JSON (`_id`, `imgURL`, `authId`) through serde renames.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// Body for category create and rename
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInput {
    pub name: String,
}

impl CategoryInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A reference to another document.
///
/// The service returns either the bare identifier or the populated
/// document, depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    Id(String),
    Document {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl Reference {
    pub fn id(&self) -> &str {
        match self {
            Reference::Id(id) => id,
            Reference::Document { id, .. } => id,
        }
    }

    /// Human readable label: the name when populated, the id otherwise
    pub fn label(&self) -> &str {
        match self {
            Reference::Id(id) => id,
            Reference::Document { name: Some(name), .. } => name,
            Reference::Document { id, .. } => id,
        }
    }
}

/// A blog post (read-only in the console)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "imgURL", default)]
    pub img_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: Option<Reference>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub user: Option<Reference>,
}

impl Blog {
    /// Path of the detail page for this blog
    pub fn detail_path(&self) -> String {
        format!("/dashboard/blogs/{}", self.id)
    }
}

/// The user document returned by login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "authId")]
    pub auth_id: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Login credentials
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Successful login response.
///
/// `raw` keeps the exact body so the session can persist it verbatim.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub user: User,
    pub authorization: String,
    pub raw: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_uses_mongo_id() {
        let category: Category =
            serde_json::from_str(r#"{"_id": "c1", "name": "Rust", "__v": 0}"#).unwrap();
        assert_eq!(category.id, "c1");
        assert_eq!(category.name, "Rust");
    }

    #[test]
    fn test_blog_accepts_id_or_populated_references() {
        let blog: Blog = serde_json::from_str(
            r#"{
                "_id": "b1",
                "imgURL": "https://img.example/b1.png",
                "title": "Hello",
                "category": {"_id": "c1", "name": "Rust"},
                "description": "First post",
                "user": "u1"
            }"#,
        )
        .unwrap();

        assert_eq!(blog.img_url, "https://img.example/b1.png");
        assert_eq!(blog.category.as_ref().unwrap().label(), "Rust");
        assert_eq!(blog.category.as_ref().unwrap().id(), "c1");
        assert_eq!(blog.user.as_ref().unwrap().id(), "u1");
        assert_eq!(blog.detail_path(), "/dashboard/blogs/b1");
    }

    #[test]
    fn test_blog_list_tolerates_untitled_blog() {
        let blogs: Vec<Blog> = serde_json::from_str(
            r#"[{"_id": "b1", "title": "Ownership"}, {"_id": "b2", "imgURL": "y.png"}]"#,
        )
        .unwrap();
        assert_eq!(blogs.len(), 2);
        assert_eq!(blogs[1].title, "");
        assert_eq!(blogs[1].img_url, "y.png");
    }

    #[test]
    fn test_user_timestamps_are_optional() {
        let user: User =
            serde_json::from_str(r#"{"_id": "u1", "authId": "a1", "email": "x@y.z"}"#).unwrap();
        assert_eq!(user.auth_id, "a1");
        assert!(user.created_at.is_none());
    }
}
