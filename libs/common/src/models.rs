//! Wire models exchanged with the authentication and media backend

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile of the authenticated user
///
/// Only `email` is consumed; everything else the backend sends is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Create a profile carrying only an email
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            extra: Map::new(),
        }
    }
}

/// Response for a successful login
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Request for user registration
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// A post as returned by the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default = "unknown_author")]
    pub email: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub file_type: String,
    pub url: String,
    #[serde(default)]
    pub is_owner: bool,
}

fn unknown_author() -> String {
    "unknown".to_string()
}

impl Post {
    /// Whether the post is rendered as an image
    pub fn is_image(&self) -> bool {
        self.file_type == "image"
    }
}

/// Response for the feed endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// Error body returned by the backend on failure
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Render `detail` for display: strings verbatim, anything else as compact JSON
    pub fn detail_message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Media file to be shared as a new post
#[derive(Debug, Clone)]
pub struct NewUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
    pub caption: String,
}
