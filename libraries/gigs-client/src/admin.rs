//! Admin user management.

use crate::client::{server_message, AUTH_HEADER};
use crate::error::{ClientError, Result};
use crate::types::{AdminUser, MessageResponse, NewUser, UsersResponse};
use gigs_core::{AccountId, ProfileError};
use reqwest::{Client, Response};
use tracing::{debug, info, warn};

pub const INCOMPLETE_USER_MESSAGE: &str = "Please fill all fields for the new user.";

/// Admin client. Obtained through [`GigsClient::admin`](crate::GigsClient::admin).
pub struct AdminClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: &'a str,
}

impl<'a> AdminClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    pub async fn list_users(&self) -> Result<Vec<AdminUser>> {
        let url = format!("{}/api/admin/users", self.base_url);
        debug!(url = %url, "Listing users");

        let response = self
            .http
            .get(&url)
            .header(AUTH_HEADER, self.access_token)
            .send()
            .await
            .map_err(ClientError::send)?;

        if response.status().is_success() {
            let body: UsersResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse user list: {}", e))
            })?;
            debug!(count = body.users.len(), "Listed users");
            Ok(body.users)
        } else {
            Err(failure(response, "Failed to fetch users.").await)
        }
    }

    /// Create an account. Blank fields are rejected before any request.
    pub async fn add_user(&self, user: &NewUser) -> Result<Option<String>> {
        if !user.is_complete() {
            return Err(ProfileError::validation(INCOMPLETE_USER_MESSAGE).into());
        }

        let url = format!("{}/api/admin/users", self.base_url);
        debug!(url = %url, email = %user.email, role = %user.role, "Adding user");

        let response = self
            .http
            .post(&url)
            .header(AUTH_HEADER, self.access_token)
            .json(user)
            .send()
            .await
            .map_err(ClientError::send)?;

        if response.status().is_success() {
            let body: MessageResponse = response.json().await.unwrap_or_default();
            info!(email = %user.email, role = %user.role, "User added");
            Ok(body.into_message())
        } else {
            Err(failure(response, "Failed to add user.").await)
        }
    }

    pub async fn delete_user(&self, id: AccountId) -> Result<Option<String>> {
        let url = format!("{}/api/admin/users/{}", self.base_url, id);
        debug!(url = %url, "Deleting user");

        let response = self
            .http
            .delete(&url)
            .header(AUTH_HEADER, self.access_token)
            .send()
            .await
            .map_err(ClientError::send)?;

        if response.status().is_success() {
            let body: MessageResponse = response.json().await.unwrap_or_default();
            info!(user_id = id, "User deleted");
            Ok(body.into_message())
        } else {
            Err(failure(response, "Failed to delete user.").await)
        }
    }
}

async fn failure(response: Response, fallback: &str) -> ClientError {
    let status = response.status();
    let message = server_message(response)
        .await
        .unwrap_or_else(|| fallback.to_string());
    warn!(status = %status, error = %message, "Admin request failed");
    if status.as_u16() == 401 || status.as_u16() == 403 {
        ClientError::Forbidden(message)
    } else {
        ClientError::ServerError {
            status: status.as_u16(),
            message,
        }
    }
}
