//! Gigs Client
//!
//! HTTP client library for the Gigs marketplace backend.
//!
//! # Features
//!
//! - **Authentication**: register, login, and a persisted [`SessionContext`]
//! - **Profiles**: fetch and save artist and host profiles, and
//!   [`EditorSession`] to drive a `gigs_core::ProfileEditor` against them
//! - **Directory**: public artist listing with search
//! - **Admin**: list, add and delete users
//!
//! # Example
//!
//! ```ignore
//! use gigs_client::{ClientConfig, EditorSession, FileSessionStore, GigsClient, SessionContext};
//! use gigs_core::{ArtistSchema, ArtistTags, EditorConfig};
//! use std::sync::Arc;
//!
//! let client = GigsClient::new(ClientConfig::new("http://localhost:5000"))?;
//! let session = SessionContext::restore(Arc::new(FileSessionStore::new("session.json"))).await;
//!
//! let mut editing =
//!     EditorSession::<ArtistSchema>::open(client, session, EditorConfig::default()).await?;
//! editing.editor_mut().begin_edit()?;
//! editing.editor_mut().add_tag(ArtistTags::Skills, "Guitar")?;
//! editing.stage_avatar_path("me.png".as_ref()).await?;
//! editing.save().await?;
//! ```

mod admin;
mod auth;
mod client;
mod directory;
mod editor_session;
mod error;
mod profile;
mod session;
mod types;

pub use client::{GigsClient, AUTH_HEADER};
pub use error::{ClientError, Result};
pub use types::{
    AdminUser, ClientConfig, DirectoryResponse, LoginRequest, LoginResponse, MessageResponse,
    NewUser, RegisterRequest, UsersResponse,
};

pub use admin::{AdminClient, INCOMPLETE_USER_MESSAGE};
pub use auth::AuthClient;
pub use directory::{
    ArtistCard, ArtistDetail, ArtistDirectory, DirectoryClient, DIRECTORY_PLACEHOLDER,
};
pub use editor_session::EditorSession;
pub use profile::{ProfileClient, SaveResponse};
pub use session::{
    FileSessionStore, MemorySessionStore, Session, SessionContext, SessionStore,
    MISSING_CREDENTIAL_MESSAGE,
};
