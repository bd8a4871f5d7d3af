//! Request and response types for the Gigs API.

use gigs_core::{Account, AccountId, ArtistRecord, Role};
use serde::{Deserialize, Serialize};

/// Connection settings for the marketplace backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server root, e.g. `http://localhost:5000`; endpoints live under `/api`
    pub api_url: String,
    /// Base URL uploaded media is served from. Defaults to `api_url`.
    #[serde(default)]
    pub media_url: Option<String>,
}

impl ClientConfig {
    /// Create a config whose media is served by the API server itself.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            media_url: None,
        }
    }

    /// Serve media from a different base URL.
    pub fn with_media_url(mut self, media_url: impl Into<String>) -> Self {
        self.media_url = Some(media_url.into());
        self
    }
}

/// `{ "message": ... }` body used for both success and error responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageResponse {
    /// Non-empty message, if any
    pub fn into_message(self) -> Option<String> {
        self.message.filter(|m| !m.is_empty())
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: an opaque token plus the account it belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Account,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
    pub role: Role,
}

/// Public performer listing: `{ "profiles": [...] }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryResponse {
    #[serde(default)]
    pub profiles: Vec<ArtistRecord>,
}

/// A user as listed in the admin panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: AccountId,
    #[serde(default)]
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub status: Option<String>,
}

impl AdminUser {
    /// Case-insensitive match on username, email or role
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [self.username.as_str(), self.email.as_str(), self.role.as_str()]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

/// `{ "users": [...] }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub users: Vec<AdminUser>,
}

/// New account created by an administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl NewUser {
    /// Whether every text field has a non-blank value
    pub fn is_complete(&self) -> bool {
        [&self.username, &self.email, &self.password]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}
