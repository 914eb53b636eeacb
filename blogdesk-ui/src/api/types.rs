//! Response Types
//!
//! Shapes of the apikeeda JSON bodies the console reads.

use serde::{Deserialize, Serialize};

/// Envelope status that marks success
pub const SUCCESS_STATUS: &str = "Success";

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub status: Option<String>,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(SUCCESS_STATUS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// Either a bare id or a populated document
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
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
    pub fn label(&self) -> &str {
        match self {
            Reference::Id(id) => id,
            Reference::Document { name: Some(name), .. } => name,
            Reference::Document { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
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
}

impl Blog {
    pub fn detail_path(&self) -> String {
        format!("/dashboard/blogs/{}", self.id)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginUser {
    #[serde(rename = "authId")]
    pub auth_id: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub data: Option<LoginUser>,
    pub authorization: Option<String>,
}

/// What a successful login leaves behind
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub authorization: String,
    pub auth_id: String,
    /// The response body, stored verbatim
    pub raw: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
