//! Artist and host profile endpoints.

use crate::client::{server_message, AUTH_HEADER};
use crate::error::{ClientError, Result};
use crate::session::Session;
use crate::types::MessageResponse;
use gigs_core::profile::ProfileEnvelope;
use gigs_core::staging::{check_size, MediaSlot};
use gigs_core::{FetchOutcome, FormValue, ProfileError, ProfileSchema, Submission};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, info, warn};

/// Body of a successful save
#[derive(Debug, Clone, Default)]
pub struct SaveResponse {
    pub message: Option<String>,
}

/// Profile client, generic over the profile kind at each call.
pub struct ProfileClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> ProfileClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Fetch the profile owned by the session's account.
    ///
    /// `{ "profile": null }` is not an error: it yields
    /// [`FetchOutcome::Missing`].
    pub async fn fetch<S: ProfileSchema>(
        &self,
        session: &Session,
    ) -> Result<FetchOutcome<S::Record>> {
        authorize::<S>(session)?;

        let url = format!("{}{}", self.base_url, S::ENDPOINT);
        debug!(url = %url, kind = S::KIND, "Fetching profile");

        let response = self
            .http
            .get(&url)
            .header(AUTH_HEADER, &session.token)
            .send()
            .await
            .map_err(ClientError::send)?;

        let status = response.status();

        if status.is_success() {
            let envelope: ProfileEnvelope<S::Record> = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse {} profile: {}", S::KIND, e))
            })?;

            Ok(match envelope.profile {
                Some(record) => FetchOutcome::Found(record),
                None => {
                    debug!(kind = S::KIND, "No profile stored yet");
                    FetchOutcome::Missing
                }
            })
        } else {
            let message = server_message(response)
                .await
                .unwrap_or_else(|| format!("Failed to fetch {} profile.", S::KIND));
            warn!(status = %status, kind = S::KIND, error = %message, "Profile fetch failed");
            Err(ProfileError::fetch(message).into())
        }
    }

    /// Send a submission built by the editor.
    ///
    /// File sizes are checked again before anything is sent.
    pub async fn save<S: ProfileSchema>(
        &self,
        session: &Session,
        submission: Submission,
    ) -> Result<SaveResponse> {
        authorize::<S>(session)?;

        let form = into_form::<S>(submission)?;
        let url = format!("{}{}", self.base_url, S::ENDPOINT);
        debug!(url = %url, kind = S::KIND, "Saving profile");

        let response = self
            .http
            .put(&url)
            .header(AUTH_HEADER, &session.token)
            .multipart(form)
            .send()
            .await
            .map_err(ClientError::send)?;

        let status = response.status();

        if status.is_success() {
            let body: MessageResponse = response.json().await.unwrap_or_default();
            info!(kind = S::KIND, user_id = session.account.id, "Profile saved");
            Ok(SaveResponse {
                message: body.into_message(),
            })
        } else {
            let message = server_message(response)
                .await
                .unwrap_or_else(|| format!("Failed to save {} profile.", S::KIND));
            warn!(status = %status, kind = S::KIND, error = %message, "Profile save failed");
            Err(ProfileError::save(message).into())
        }
    }
}

/// Fail before any request when the session may not edit this kind.
fn authorize<S: ProfileSchema>(session: &Session) -> Result<()> {
    if session.token.is_empty() {
        return Err(ProfileError::authentication(crate::session::MISSING_CREDENTIAL_MESSAGE).into());
    }
    if session.account.role != S::ROLE {
        warn!(role = %session.account.role, kind = S::KIND, "Role cannot edit this profile");
        return Err(ProfileError::authentication(format!(
            "Only {} accounts can manage a {} profile.",
            S::ROLE,
            S::KIND
        ))
        .into());
    }
    Ok(())
}

fn into_form<S: ProfileSchema>(submission: Submission) -> Result<Form> {
    let mut form = Form::new();
    for (name, value) in submission.into_parts() {
        form = match value {
            FormValue::Text(text) => form.text(name, text),
            FormValue::File(file) => {
                let slot = if name == S::FORM_NAMES.avatar_file {
                    MediaSlot::Avatar
                } else {
                    MediaSlot::Gallery
                };
                check_size(slot, file.size())?;
                let part = Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.content_type)?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}
