//! Main Gigs API client.

use crate::admin::AdminClient;
use crate::auth::AuthClient;
use crate::directory::DirectoryClient;
use crate::error::{ClientError, Result};
use crate::profile::ProfileClient;
use crate::session::Session;
use crate::types::{ClientConfig, MessageResponse};
use gigs_core::{MediaBase, Role};
use reqwest::{Client, Response};
use std::time::Duration;

/// Request header carrying the session token
pub const AUTH_HEADER: &str = "x-auth-token";

/// Client for the marketplace backend.
///
/// Holds no session state of its own; operations that need a credential
/// take a [`Session`] from the [`SessionContext`](crate::SessionContext).
/// Cloning is cheap and shares the connection pool.
///
/// # Example
///
/// ```ignore
/// use gigs_client::{ClientConfig, GigsClient, MemorySessionStore, SessionContext};
/// use std::sync::Arc;
///
/// let client = GigsClient::new(ClientConfig::new("http://localhost:5000"))?;
/// let session = SessionContext::new(Arc::new(MemorySessionStore::default()));
///
/// let account = session.login(&client.auth(), "nimal@example.lk", "secret").await?;
/// println!("Signed in as {}", account.email);
///
/// let artists = client.directory().list_artists().await?;
/// for card in artists.search("colombo") {
///     println!("{} ({})", card.name, card.location);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GigsClient {
    http: Client,
    api_url: String,
    media: MediaBase,
}

impl GigsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api_url = normalize_url(&config.api_url)?;
        let media_url = match config.media_url.as_deref() {
            Some(url) => normalize_url(url)?,
            None => api_url.clone(),
        };

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Gigs/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            api_url,
            media: MediaBase::new(media_url),
        })
    }

    /// The normalized API server URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Base location uploaded media is served from.
    pub fn media(&self) -> &MediaBase {
        &self.media
    }

    /// Login and registration.
    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(&self.http, &self.api_url)
    }

    /// Artist and host profile endpoints.
    pub fn profiles(&self) -> ProfileClient<'_> {
        ProfileClient::new(&self.http, &self.api_url)
    }

    /// Public artist directory.
    pub fn directory(&self) -> DirectoryClient<'_> {
        DirectoryClient::new(&self.http, &self.api_url, &self.media)
    }

    /// User management. Requires an admin session.
    pub fn admin<'a>(&'a self, session: &'a Session) -> Result<AdminClient<'a>> {
        if session.account.role != Role::Admin {
            return Err(ClientError::Forbidden(
                "Admin access required".to_string(),
            ));
        }
        Ok(AdminClient::new(&self.http, &self.api_url, &session.token))
    }
}

fn normalize_url(url: &str) -> Result<String> {
    if url.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }
    let url = url.trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }
    Ok(url)
}

/// `message` from a JSON error body, if the server sent one.
pub(crate) async fn server_message(response: Response) -> Option<String> {
    response
        .json::<MessageResponse>()
        .await
        .ok()
        .and_then(MessageResponse::into_message)
}
