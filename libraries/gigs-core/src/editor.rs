//! Profile editor state machine.
//!
//! Owns the last-fetched profile, the edit buffer cloned from it, the media
//! staging area and the notice board. The editor does no I/O: callers feed
//! it fetch and save results and read the save payload from
//! [`ProfileEditor::begin_save`].

use crate::account::Account;
use crate::error::{ProfileError, Result};
use crate::media::{is_placeholder, MediaBase};
use crate::notice::{Notice, NoticeBoard, NoticeKind};
use crate::profile::{MediaRef, Profile, ProfileSchema};
use crate::staging::{MediaStaging, PendingFile, PreviewHandle, PreviewRegistry};
use crate::submission::Submission;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const SAVE_SUCCESS_MESSAGE: &str = "Profile saved successfully!";
pub const CREATION_MODE_MESSAGE: &str =
    "No existing profile found. Please fill out your details and save.";
pub const STALE_PROFILE_MESSAGE: &str =
    "Profile could not be reloaded after saving. Reload it before editing again.";

/// Whether the editor shows the persisted profile or the edit buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Viewing,
    Editing,
}

/// Result of a successful profile read
#[derive(Debug, Clone)]
pub enum FetchOutcome<R> {
    Found(R),
    /// The server holds no profile for this account yet
    Missing,
}

/// Notice lifetimes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    pub success_notice: Duration,
    pub error_notice: Duration,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            success_notice: Duration::from_secs(3),
            error_notice: Duration::from_secs(5),
        }
    }
}

/// Editing flow for one profile, generic over its schema.
#[derive(Debug)]
pub struct ProfileEditor<S: ProfileSchema> {
    account: Account,
    media: MediaBase,
    config: EditorConfig,
    persisted: Option<Profile<S>>,
    buffer: Option<Profile<S>>,
    staging: MediaStaging,
    mode: EditorMode,
    creating: bool,
    saving: bool,
    /// Server state unknown since the last save; cleared by `load`
    stale: bool,
    notices: NoticeBoard,
}

impl<S: ProfileSchema> ProfileEditor<S> {
    pub fn new(account: Account, media: MediaBase, config: EditorConfig) -> Self {
        Self::with_registry(account, media, config, PreviewRegistry::new())
    }

    /// Create an editor whose preview handles are issued by `registry`
    pub fn with_registry(
        account: Account,
        media: MediaBase,
        config: EditorConfig,
        registry: PreviewRegistry,
    ) -> Self {
        Self {
            account,
            media,
            config,
            persisted: None,
            buffer: None,
            staging: MediaStaging::new(registry),
            mode: EditorMode::Viewing,
            creating: false,
            saving: false,
            stale: false,
            notices: NoticeBoard::new(),
        }
    }

    // ------------------------------------------------------------------
    // Fetch results
    // ------------------------------------------------------------------

    /// Apply a fetch result. Pending selections are always discarded.
    pub fn load(&mut self, outcome: FetchOutcome<S::Record>, now: Instant) {
        self.notices.clear();
        self.saving = false;
        self.stale = false;
        if self.apply(outcome) {
            self.mode = EditorMode::Viewing;
            self.creating = false;
            info!(kind = S::KIND, user_id = self.account.id, "Loaded profile");
        } else {
            self.mode = EditorMode::Editing;
            self.creating = true;
            self.notices
                .post(NoticeKind::Info, CREATION_MODE_MESSAGE, now, None);
            info!(
                kind = S::KIND,
                user_id = self.account.id,
                "No profile found, entering creation mode"
            );
        }
    }

    /// Record a failed fetch. The error stays until the next action.
    pub fn load_failed(&mut self, err: &ProfileError, now: Instant) {
        warn!(kind = S::KIND, error = %err, "Profile fetch failed");
        self.saving = false;
        self.notices
            .post(NoticeKind::Error, err.to_string(), now, None);
    }

    /// Replace persisted and buffered state. Returns `false` for a missing profile.
    fn apply(&mut self, outcome: FetchOutcome<S::Record>) -> bool {
        self.staging.clear();
        let (profile, found) = match outcome {
            FetchOutcome::Found(record) => (
                Profile::from_record(&record, &self.account, &self.media),
                true,
            ),
            FetchOutcome::Missing => (Profile::defaults(&self.account), false),
        };
        self.buffer = Some(profile.clone());
        self.persisted = Some(profile);
        found
    }

    // ------------------------------------------------------------------
    // Mode transitions
    // ------------------------------------------------------------------

    pub fn begin_edit(&mut self) -> Result<()> {
        if self.persisted.is_none() {
            return Err(ProfileError::NotLoaded);
        }
        if self.stale {
            return Err(ProfileError::fetch(STALE_PROFILE_MESSAGE));
        }
        self.mode = EditorMode::Editing;
        debug!(kind = S::KIND, "Entered edit mode");
        Ok(())
    }

    /// Discard the edit buffer and every pending file.
    pub fn cancel(&mut self) {
        self.staging.clear();
        self.buffer.clone_from(&self.persisted);
        self.mode = EditorMode::Viewing;
        self.notices.clear();
        debug!(kind = S::KIND, "Cancelled editing");
    }

    // ------------------------------------------------------------------
    // Field mutation
    // ------------------------------------------------------------------

    pub fn set_text(&mut self, field: S::Text, value: impl Into<String>) -> Result<()> {
        let profile = self.editable()?;
        *S::text_mut(&mut profile.fields, field) = value.into();
        Ok(())
    }

    pub fn set_number(&mut self, field: S::Number, value: f64) -> Result<()> {
        let profile = self.editable()?;
        *S::number_mut(&mut profile.fields, field) = value;
        Ok(())
    }

    /// Append a trimmed tag. Returns `false` when it is empty or already present.
    pub fn add_tag(&mut self, field: S::Tags, value: &str) -> Result<bool> {
        let profile = self.editable()?;
        let value = value.trim();
        let tags = S::tags_mut(&mut profile.fields, field);
        if value.is_empty() || tags.iter().any(|t| t == value) {
            return Ok(false);
        }
        tags.push(value.to_string());
        Ok(true)
    }

    /// Remove the first exact match. Returns `false` when absent.
    pub fn remove_tag(&mut self, field: S::Tags, value: &str) -> Result<bool> {
        let profile = self.editable()?;
        let tags = S::tags_mut(&mut profile.fields, field);
        match tags.iter().position(|t| t == value) {
            Some(index) => {
                tags.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Flip a flag and return its new value.
    pub fn toggle_flag(&mut self, field: S::Flag) -> Result<bool> {
        let profile = self.editable()?;
        let flag = S::flag_mut(&mut profile.fields, field);
        *flag = !*flag;
        Ok(*flag)
    }

    // ------------------------------------------------------------------
    // Media
    // ------------------------------------------------------------------

    /// Stage a new avatar and show its preview in the buffer.
    ///
    /// An oversized file leaves the current avatar untouched and posts an
    /// error notice.
    pub fn stage_avatar(&mut self, file: PendingFile, now: Instant) -> Result<PreviewHandle> {
        self.editable()?;
        let handle = match self.staging.stage_avatar(file) {
            Ok(handle) => handle,
            Err(e) => {
                self.report_error(&e, now);
                return Err(e);
            }
        };
        if let Some(profile) = self.buffer.as_mut() {
            profile.avatar = Some(MediaRef::Pending(handle.clone()));
        }
        Ok(handle)
    }

    /// Stage gallery files in order. Each file is accepted or rejected on its own.
    pub fn stage_gallery(
        &mut self,
        files: Vec<PendingFile>,
        now: Instant,
    ) -> Result<Vec<Result<PreviewHandle>>> {
        self.editable()?;
        Ok(files
            .into_iter()
            .map(|file| self.stage_gallery_file(file, now))
            .collect())
    }

    /// Append one gallery file and its preview to the buffer.
    pub fn stage_gallery_file(&mut self, file: PendingFile, now: Instant) -> Result<PreviewHandle> {
        self.editable()?;
        let handle = match self.staging.stage_gallery(file) {
            Ok(handle) => handle,
            Err(e) => {
                self.report_error(&e, now);
                return Err(e);
            }
        };
        if let Some(profile) = self.buffer.as_mut() {
            profile.gallery.push(MediaRef::Pending(handle.clone()));
        }
        Ok(handle)
    }

    /// Remove the gallery entry at `index`, releasing its preview if pending.
    pub fn remove_gallery_entry(&mut self, index: usize) -> Result<MediaRef> {
        let profile = self.editable()?;
        if index >= profile.gallery.len() {
            return Err(ProfileError::NoSuchGalleryEntry(index));
        }
        let entry = profile.gallery.remove(index);
        if let MediaRef::Pending(handle) = &entry {
            self.staging.remove_gallery(handle);
        }
        debug!(index, pending = entry.is_pending(), "Removed gallery entry");
        Ok(entry)
    }

    // ------------------------------------------------------------------
    // Save
    // ------------------------------------------------------------------

    /// Serialize the edit buffer and staged files into one submission.
    pub fn submission(&self) -> Result<Submission> {
        let profile = self.buffer.as_ref().ok_or(ProfileError::NotLoaded)?;
        let names = S::FORM_NAMES;
        let mut submission = Submission::new();

        S::write_fields(&profile.fields, &mut submission);

        match (self.staging.pending_avatar(), &profile.avatar) {
            (Some(staged), _) => {
                submission.push_file(names.avatar_file, staged.file.clone());
            }
            (None, Some(MediaRef::Persisted(url))) if !is_placeholder(url) => {
                submission.push_text(names.avatar_url, self.media.relativize(url));
            }
            _ => submission.push_text(names.avatar_url, ""),
        }

        let existing: Vec<String> = profile
            .persisted_gallery()
            .map(|url| self.media.relativize(url))
            .collect();
        submission.push_list(names.existing_gallery, &existing);

        for entry in &profile.gallery {
            if let MediaRef::Pending(handle) = entry {
                if let Some(file) = self.staging.gallery_file(handle) {
                    submission.push_file(names.new_gallery, file.clone());
                }
            }
        }

        Ok(submission)
    }

    /// Mark a save as in flight and return the payload to send.
    pub fn begin_save(&mut self) -> Result<Submission> {
        if self.saving {
            return Err(ProfileError::SaveInProgress);
        }
        if self.stale {
            return Err(ProfileError::fetch(STALE_PROFILE_MESSAGE));
        }
        if self.mode != EditorMode::Editing {
            return Err(ProfileError::NotEditing);
        }
        let submission = self.submission()?;
        self.notices.dismiss(NoticeKind::Success);
        self.notices.dismiss(NoticeKind::Error);
        self.saving = true;
        debug!(kind = S::KIND, parts = submission.len(), "Save started");
        Ok(submission)
    }

    /// Apply a successful save and the re-fetch that followed it.
    pub fn save_succeeded(
        &mut self,
        message: Option<String>,
        refreshed: Result<FetchOutcome<S::Record>>,
        now: Instant,
    ) {
        self.saving = false;
        self.mode = EditorMode::Viewing;
        self.creating = false;
        self.notices.clear();

        match refreshed {
            Ok(outcome) => {
                self.apply(outcome);
            }
            Err(e) => {
                // Uploaded URLs are unknown until the next load; editing stays blocked.
                warn!(kind = S::KIND, error = %e, "Refresh after save failed");
                let kept = self.buffer.take().map(Profile::without_pending);
                self.staging.clear();
                self.buffer.clone_from(&kept);
                self.persisted = kept;
                self.stale = true;
                self.report_error(&e, now);
            }
        }

        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| SAVE_SUCCESS_MESSAGE.to_string());
        info!(kind = S::KIND, user_id = self.account.id, "Profile saved");
        self.notices.post(
            NoticeKind::Success,
            message,
            now,
            Some(self.config.success_notice),
        );
    }

    /// Record a failed save. Mode and buffer are left as they were.
    pub fn save_failed(&mut self, err: &ProfileError, now: Instant) {
        warn!(kind = S::KIND, error = %err, "Profile save failed");
        self.saving = false;
        self.report_error(err, now);
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn media(&self) -> &MediaBase {
        &self.media
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditorMode::Editing
    }

    /// No profile existed on the last fetch
    pub fn is_creating(&self) -> bool {
        self.creating
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// A save went through but the profile could not be reloaded
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Last-fetched profile
    pub fn persisted(&self) -> Option<&Profile<S>> {
        self.persisted.as_ref()
    }

    /// Profile as currently shown: the buffer while editing
    pub fn current(&self) -> Option<&Profile<S>> {
        match self.mode {
            EditorMode::Editing => self.buffer.as_ref(),
            EditorMode::Viewing => self.persisted.as_ref(),
        }
    }

    pub fn buffer(&self) -> Option<&Profile<S>> {
        self.buffer.as_ref()
    }

    pub fn staging(&self) -> &MediaStaging {
        &self.staging
    }

    pub fn visible_notices(&self, now: Instant) -> Vec<&Notice> {
        self.notices.visible(now)
    }

    pub fn notice(&self, kind: NoticeKind, now: Instant) -> Option<&Notice> {
        self.notices.get(kind, now)
    }

    pub fn dismiss_notice(&mut self, kind: NoticeKind) {
        self.notices.dismiss(kind);
    }

    fn editable(&mut self) -> Result<&mut Profile<S>> {
        if self.mode != EditorMode::Editing {
            return Err(ProfileError::NotEditing);
        }
        self.buffer.as_mut().ok_or(ProfileError::NotLoaded)
    }

    /// Show `err` as a transient error notice.
    pub fn report_error(&mut self, err: &ProfileError, now: Instant) {
        self.notices.post(
            NoticeKind::Error,
            err.to_string(),
            now,
            Some(self.config.error_notice),
        );
    }
}
