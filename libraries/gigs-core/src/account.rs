//! Account identity as reported by the auth endpoints

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric account identifier assigned by the backend
pub type AccountId = i64;

/// Marketplace role of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Event host looking for performers
    Host,
    /// Performing artist
    Performer,
    /// Marketplace administrator
    Admin,
}

impl Role {
    /// Wire name of the role
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Host => "host",
            Role::Performer => "performer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "host" => Ok(Role::Host),
            "performer" | "artist" => Ok(Role::Performer),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// The signed-in account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub username: Option<String>,
}

impl Account {
    /// Username, or an empty string when the backend did not send one
    pub fn username_or_empty(&self) -> &str {
        self.username.as_deref().unwrap_or("")
    }
}
