//! Gigs Core
//!
//! Platform-agnostic profile editing for the Gigs marketplace.
//!
//! Artists and event hosts edit their own profiles through the same flow:
//! fetch the stored record, default every missing field, edit a buffered
//! copy, stage new images next to the persisted ones, and serialize the
//! result into a multipart submission. This crate holds that flow without
//! any I/O; `gigs-client` drives it against the HTTP backend.
//!
//! # Architecture
//!
//! - **Profiles**: [`Profile`] generic over a [`ProfileSchema`]
//!   ([`ArtistSchema`], [`HostSchema`])
//! - **Media**: [`MediaBase`] URL normalization, [`MediaStaging`] with
//!   [`PreviewRegistry`] handles for files not uploaded yet
//! - **Editor**: [`ProfileEditor`] state machine and its [`Submission`]
//! - **Errors**: [`ProfileError`] and [`Result`]
//!
//! # Example
//!
//! ```rust
//! use gigs_core::{
//!     Account, ArtistSchema, ArtistTags, EditorConfig, FetchOutcome, MediaBase, ProfileEditor,
//!     Role,
//! };
//! use std::time::Instant;
//!
//! let account = Account {
//!     id: 1,
//!     email: "nimal@example.lk".into(),
//!     role: Role::Performer,
//!     username: Some("nimal".into()),
//! };
//! let mut editor: ProfileEditor<ArtistSchema> = ProfileEditor::new(
//!     account,
//!     MediaBase::new("http://localhost:5000"),
//!     EditorConfig::default(),
//! );
//!
//! editor.load(FetchOutcome::Missing, Instant::now());
//! assert!(editor.is_creating());
//!
//! editor.add_tag(ArtistTags::Skills, "Guitar").unwrap();
//! let submission = editor.begin_save().unwrap();
//! assert_eq!(submission.text("skills"), Some(r#"["Guitar"]"#));
//! ```

#![forbid(unsafe_code)]

pub mod account;
pub mod editor;
pub mod error;
pub mod loose;
pub mod media;
pub mod notice;
pub mod profile;
pub mod staging;
pub mod submission;

pub use account::{Account, AccountId, Role};
pub use editor::{EditorConfig, EditorMode, FetchOutcome, ProfileEditor};
pub use error::{ProfileError, Result};
pub use media::MediaBase;
pub use notice::{Notice, NoticeBoard, NoticeKind};
pub use profile::{
    ArtistFields, ArtistFlag, ArtistNumber, ArtistRecord, ArtistSchema, ArtistTags, ArtistText,
    FieldKey, HostFields, HostFlag, HostNumber, HostRecord, HostSchema, HostTags, HostText,
    MediaRef, Profile, ProfileEnvelope, ProfileSchema,
};
pub use staging::{
    MediaSlot, MediaStaging, PendingFile, PreviewHandle, PreviewRegistry, MAX_UPLOAD_BYTES,
};
pub use submission::{BoolEncoding, FormValue, Submission};
