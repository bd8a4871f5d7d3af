//! Fetch, edit, save and re-fetch against the backend.

use crate::client::GigsClient;
use crate::error::{ClientError, Result};
use crate::session::SessionContext;
use gigs_core::staging::{check_size, MediaSlot};
use gigs_core::{
    EditorConfig, FetchOutcome, PendingFile, PreviewHandle, ProfileEditor, ProfileError,
    ProfileSchema,
};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// A [`ProfileEditor`] wired to the profile endpoints of one account.
#[derive(Debug)]
pub struct EditorSession<S: ProfileSchema> {
    client: GigsClient,
    session: SessionContext,
    editor: ProfileEditor<S>,
}

impl<S: ProfileSchema> EditorSession<S> {
    /// Open the editor for the signed-in account and fetch its profile.
    ///
    /// Fails only when nobody is signed in. A failed fetch is reported as an
    /// error notice on the returned editor.
    pub async fn open(
        client: GigsClient,
        session: SessionContext,
        config: EditorConfig,
    ) -> Result<Self> {
        let credential = session.credential().await?;
        let editor = ProfileEditor::new(credential.account, client.media().clone(), config);
        let mut this = Self {
            client,
            session,
            editor,
        };
        this.refresh().await;
        Ok(this)
    }

    /// Fetch the profile again, discarding pending files.
    ///
    /// Returns `false` when the fetch failed.
    pub async fn refresh(&mut self) -> bool {
        let now = Instant::now();
        match self.fetch().await {
            Ok(outcome) => {
                self.editor.load(outcome, now);
                true
            }
            Err(e) => {
                self.editor.load_failed(&e, now);
                false
            }
        }
    }

    /// Enter edit mode, reloading first if the last save could not be
    /// followed by a successful fetch.
    pub async fn begin_edit(&mut self) -> Result<()> {
        if self.editor.is_stale() {
            debug!(kind = S::KIND, "Reloading stale profile before editing");
            self.refresh().await;
        }
        Ok(self.editor.begin_edit()?)
    }

    pub fn editor(&self) -> &ProfileEditor<S> {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut ProfileEditor<S> {
        &mut self.editor
    }

    /// Stage an avatar from disk. The size is checked before reading.
    pub async fn stage_avatar_path(&mut self, path: &Path) -> Result<PreviewHandle> {
        let now = Instant::now();
        let file = match read_upload(path, MediaSlot::Avatar).await {
            Ok(file) => file,
            Err(e) => return Err(self.report(e, now)),
        };
        Ok(self.editor.stage_avatar(file, now)?)
    }

    /// Stage gallery images from disk, each accepted or rejected on its own.
    pub async fn stage_gallery_paths(
        &mut self,
        paths: &[impl AsRef<Path>],
    ) -> Result<Vec<Result<PreviewHandle>>> {
        if !self.editor.is_editing() {
            return Err(ProfileError::NotEditing.into());
        }
        let now = Instant::now();
        let mut results = Vec::with_capacity(paths.len());
        for path in paths {
            let result = match read_upload(path.as_ref(), MediaSlot::Gallery).await {
                Ok(file) => self
                    .editor
                    .stage_gallery_file(file, now)
                    .map_err(ClientError::from),
                Err(e) => Err(self.report(e, now)),
            };
            results.push(result);
        }
        Ok(results)
    }

    /// Send the edit buffer, then re-fetch on success.
    ///
    /// Errors are also posted as notices on the editor. Nothing is retried.
    pub async fn save(&mut self) -> Result<()> {
        let submission = self.editor.begin_save()?;
        let now = Instant::now();

        let credential = match self.session.credential().await {
            Ok(credential) => credential,
            Err(e) => {
                let e = e.into_profile_error(ProfileError::Save);
                self.editor.save_failed(&e, now);
                return Err(e.into());
            }
        };

        let profiles = self.client.profiles();
        match profiles.save::<S>(&credential, submission).await {
            Ok(response) => {
                let refreshed = profiles
                    .fetch::<S>(&credential)
                    .await
                    .map_err(|e| e.into_profile_error(ProfileError::Fetch));
                self.editor
                    .save_succeeded(response.message, refreshed, Instant::now());
                info!(kind = S::KIND, "Save complete");
                Ok(())
            }
            Err(e) => {
                let e = e.into_profile_error(ProfileError::Save);
                self.editor.save_failed(&e, Instant::now());
                Err(e.into())
            }
        }
    }

    async fn fetch(&self) -> gigs_core::Result<FetchOutcome<S::Record>> {
        let credential = self
            .session
            .credential()
            .await
            .map_err(|e| e.into_profile_error(ProfileError::Fetch))?;
        self.client
            .profiles()
            .fetch::<S>(&credential)
            .await
            .map_err(|e| e.into_profile_error(ProfileError::Fetch))
    }

    /// Post a staging failure as a notice, passing the error through.
    fn report(&mut self, err: ClientError, now: Instant) -> ClientError {
        let notice = match &err {
            ClientError::Profile(e) => e.clone(),
            other => ProfileError::validation(other.to_string()),
        };
        self.editor.report_error(&notice, now);
        err
    }
}

/// Read a file chosen for upload, rejecting oversized files unread.
async fn read_upload(path: &Path, slot: MediaSlot) -> Result<PendingFile> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ClientError::FileNotFound(path.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    check_size(slot, metadata.len())?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    let bytes = tokio::fs::read(path).await?;

    debug!(file = %file_name, size = bytes.len(), content_type = %content_type, "Read upload");
    Ok(PendingFile::new(file_name, content_type, bytes))
}
