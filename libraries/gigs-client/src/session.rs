//! Signed-in session and its persistence.
//!
//! [`SessionContext`] is the single source of the current account and
//! token. It is created once at startup, restored from a [`SessionStore`],
//! and handed to every consumer that needs a credential.

use crate::auth::AuthClient;
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use gigs_core::{Account, ProfileError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// Shown when an operation needs a credential and none is present
pub const MISSING_CREDENTIAL_MESSAGE: &str = "Authentication token or user data missing.";

/// Token and account of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(rename = "user")]
    pub account: Account,
}

/// Persistence for the session between runs.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stored session, if any. Unreadable data is an error.
    async fn load(&self) -> Result<Option<Session>>;

    async fn save(&self, session: &Session) -> Result<()>;

    /// Remove the stored session. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<()>;
}

/// Session kept as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let session = serde_json::from_str(&contents).map_err(|e| {
            ClientError::ParseError(format!("Failed to parse stored session: {}", e))
        })?;
        Ok(Some(session))
    }

    async fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let contents = serde_json::to_string_pretty(session)
            .map_err(|e| ClientError::ParseError(e.to_string()))?;
        tokio::fs::write(&self.path, contents).await?;
        debug!(path = %self.path.display(), "Saved session");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        Ok(self.session.lock().await.clone())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        *self.session.lock().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.session.lock().await = None;
        Ok(())
    }
}

/// The current session, shared by every consumer.
///
/// Cloning shares the underlying state.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    current: Arc<RwLock<Option<Session>>>,
}

impl SessionContext {
    /// Create an empty context backed by `store`.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a context populated from `store`.
    ///
    /// A stored session that cannot be read is discarded and removed.
    pub async fn restore(store: Arc<dyn SessionStore>) -> Self {
        let session = match store.load().await {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable stored session");
                if let Err(e) = store.clear().await {
                    warn!(error = %e, "Failed to remove stored session");
                }
                None
            }
        };
        if let Some(session) = &session {
            info!(user_id = session.account.id, role = %session.account.role, "Restored session");
        }
        Self {
            store,
            current: Arc::new(RwLock::new(session)),
        }
    }

    /// Sign in and persist the session.
    ///
    /// Any previous session is cleared first, so a failed login leaves the
    /// context signed out.
    pub async fn login(&self, auth: &AuthClient<'_>, email: &str, password: &str) -> Result<Account> {
        self.logout().await?;
        let response = auth.login(email, password).await?;
        let session = Session {
            token: response.token,
            account: response.user,
        };
        self.set(session.clone()).await?;
        Ok(session.account)
    }

    /// Replace the current session and persist it.
    pub async fn set(&self, session: Session) -> Result<()> {
        self.store.save(&session).await?;
        *self.current.write().await = Some(session);
        Ok(())
    }

    /// Clear memory and storage.
    pub async fn logout(&self) -> Result<()> {
        let previous = self.current.write().await.take();
        self.store.clear().await?;
        if let Some(session) = previous {
            info!(user_id = session.account.id, "Logged out");
        }
        Ok(())
    }

    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    pub async fn account(&self) -> Option<Account> {
        self.current.read().await.as_ref().map(|s| s.account.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// The current session, or an authentication error when signed out.
    pub async fn credential(&self) -> Result<Session> {
        self.current()
            .await
            .ok_or_else(|| ProfileError::authentication(MISSING_CREDENTIAL_MESSAGE).into())
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext").finish_non_exhaustive()
    }
}
