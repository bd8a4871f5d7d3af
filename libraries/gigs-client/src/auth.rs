//! Authentication endpoints.

use crate::client::server_message;
use crate::error::{ClientError, Result};
use crate::types::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use gigs_core::Role;
use reqwest::Client;
use tracing::{debug, info, warn};

/// Authentication client for the Gigs API.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Create an account. Returns the server's confirmation message.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        username: &str,
        role: Role,
    ) -> Result<Option<String>> {
        let url = format!("{}/api/auth/register", self.base_url);
        debug!(url = %url, email = %email, role = %role, "Registering account");

        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            username: username.to_string(),
            role,
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(ClientError::send)?;

        let status = response.status();

        if status.is_success() {
            let body: MessageResponse = response.json().await.unwrap_or_default();
            info!(email = %email, role = %role, "Registration successful");
            Ok(body.into_message())
        } else {
            let message = server_message(response)
                .await
                .unwrap_or_else(|| "Registration failed".to_string());
            warn!(status = %status, error = %message, "Registration failed");
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Login with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let url = format!("{}/api/auth/login", self.base_url);
        debug!(url = %url, email = %email, "Attempting login");

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(ClientError::send)?;

        let status = response.status();

        if status.is_success() {
            let login_response: LoginResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse login response: {}", e))
            })?;

            info!(
                user_id = login_response.user.id,
                role = %login_response.user.role,
                "Login successful"
            );

            Ok(login_response)
        } else if status.is_client_error() {
            let message = server_message(response)
                .await
                .unwrap_or_else(|| "Login failed".to_string());
            warn!(status = %status, error = %message, "Login rejected");
            Err(ClientError::AuthFailed(message))
        } else {
            let message = server_message(response)
                .await
                .unwrap_or_else(|| "Login failed".to_string());
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }
}
