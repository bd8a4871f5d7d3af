//! Media Staging Area.
//!
//! Holds files chosen for upload but not yet persisted, each paired with a
//! local preview handle. Preview handles are process-local resources: every
//! handle created through a [`PreviewRegistry`] must be released once
//! nothing references it, otherwise the registry grows without bound.

use crate::error::{ProfileError, Result};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};
use uuid::Uuid;

/// Largest accepted upload, inclusive (5 MB)
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Which upload slot a file is destined for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSlot {
    Avatar,
    Gallery,
}

impl MediaSlot {
    /// Message shown when a file exceeds [`MAX_UPLOAD_BYTES`]
    pub fn size_limit_message(self) -> &'static str {
        match self {
            MediaSlot::Avatar => "Profile picture must be less than 5MB",
            MediaSlot::Gallery => "Gallery images must be less than 5MB each",
        }
    }
}

/// Reject files above the upload threshold.
pub fn check_size(slot: MediaSlot, size: u64) -> Result<()> {
    if size > MAX_UPLOAD_BYTES {
        return Err(ProfileError::validation(slot.size_limit_message()));
    }
    Ok(())
}

/// A file chosen for upload, held in memory until save.
#[derive(Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PendingFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

impl fmt::Debug for PendingFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Local preview reference for a pending file (`blob:gigs/<uuid>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewHandle(String);

impl PreviewHandle {
    /// The local URL a UI can load the preview from
    pub fn url(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues preview handles and tracks which are still live.
///
/// Cloning shares the underlying registry.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    live: Arc<Mutex<HashSet<PreviewHandle>>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle for `file`.
    pub fn create(&self, file: &PendingFile) -> PreviewHandle {
        let handle = PreviewHandle(format!("blob:gigs/{}", Uuid::new_v4()));
        debug!(handle = %handle, file = %file.file_name, "Created preview handle");
        self.lock().insert(handle.clone());
        handle
    }

    /// Release a handle. Returns `false` if it was already released.
    pub fn release(&self, handle: &PreviewHandle) -> bool {
        let released = self.lock().remove(handle);
        if released {
            debug!(handle = %handle, "Released preview handle");
        }
        released
    }

    pub fn is_live(&self, handle: &PreviewHandle) -> bool {
        self.lock().contains(handle)
    }

    /// Number of handles not yet released
    pub fn live_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<PreviewHandle>> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A pending file together with its preview handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub handle: PreviewHandle,
    pub file: PendingFile,
}

/// Files awaiting upload: at most one avatar, any number of gallery images.
#[derive(Debug)]
pub struct MediaStaging {
    registry: PreviewRegistry,
    avatar: Option<StagedFile>,
    gallery: Vec<StagedFile>,
}

impl MediaStaging {
    pub fn new(registry: PreviewRegistry) -> Self {
        Self {
            registry,
            avatar: None,
            gallery: Vec::new(),
        }
    }

    pub fn registry(&self) -> &PreviewRegistry {
        &self.registry
    }

    /// Stage a new avatar, discarding any previous pending avatar.
    pub fn stage_avatar(&mut self, file: PendingFile) -> Result<PreviewHandle> {
        if let Err(e) = check_size(MediaSlot::Avatar, file.size()) {
            warn!(file = %file.file_name, size = file.size(), "Rejected avatar above size limit");
            return Err(e);
        }
        if let Some(previous) = self.avatar.take() {
            self.registry.release(&previous.handle);
        }
        let handle = self.registry.create(&file);
        self.avatar = Some(StagedFile {
            handle: handle.clone(),
            file,
        });
        Ok(handle)
    }

    /// Append a gallery file. Earlier selections are kept.
    pub fn stage_gallery(&mut self, file: PendingFile) -> Result<PreviewHandle> {
        if let Err(e) = check_size(MediaSlot::Gallery, file.size()) {
            warn!(file = %file.file_name, size = file.size(), "Rejected gallery image above size limit");
            return Err(e);
        }
        let handle = self.registry.create(&file);
        self.gallery.push(StagedFile {
            handle: handle.clone(),
            file,
        });
        Ok(handle)
    }

    /// Drop a pending gallery file and release its handle.
    pub fn remove_gallery(&mut self, handle: &PreviewHandle) -> Option<PendingFile> {
        let index = self.gallery.iter().position(|s| &s.handle == handle)?;
        let staged = self.gallery.remove(index);
        self.registry.release(&staged.handle);
        Some(staged.file)
    }

    pub fn pending_avatar(&self) -> Option<&StagedFile> {
        self.avatar.as_ref()
    }

    /// Pending gallery files in selection order
    pub fn pending_gallery(&self) -> &[StagedFile] {
        &self.gallery
    }

    /// Pending gallery file for a handle
    pub fn gallery_file(&self, handle: &PreviewHandle) -> Option<&PendingFile> {
        self.gallery
            .iter()
            .find(|s| &s.handle == handle)
            .map(|s| &s.file)
    }

    pub fn is_empty(&self) -> bool {
        self.avatar.is_none() && self.gallery.is_empty()
    }

    /// Discard every pending file and release all handles.
    pub fn clear(&mut self) {
        if let Some(avatar) = self.avatar.take() {
            self.registry.release(&avatar.handle);
        }
        for staged in self.gallery.drain(..) {
            self.registry.release(&staged.handle);
        }
    }
}

impl Drop for MediaStaging {
    fn drop(&mut self) {
        self.clear();
    }
}
