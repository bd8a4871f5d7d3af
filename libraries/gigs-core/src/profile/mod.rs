//! Profile data model.
//!
//! Artist and host profiles share one editing flow. What differs between
//! them (which fields exist, their defaults, their form names, where they
//! are fetched from) lives in a [`ProfileSchema`] implementation; the
//! editor and serializer are generic over it.

use crate::account::{Account, AccountId, Role};
use crate::error::ProfileError;
use crate::media::{is_placeholder, MediaBase};
use crate::staging::PreviewHandle;
use crate::submission::{BoolEncoding, Submission};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt::Debug;
use std::str::FromStr;

/// A named field of a profile schema.
///
/// `name` is both the record key and the submission form name.
pub trait FieldKey:
    Copy + Debug + Eq + Send + Sync + FromStr<Err = ProfileError> + 'static
{
    const ALL: &'static [Self];

    fn name(self) -> &'static str;
}

/// Declares a field enum with its wire names.
macro_rules! field_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::profile::FieldKey for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::ProfileError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($key => Ok($name::$variant),)+
                    other => Err($crate::error::ProfileError::UnknownField(other.to_string())),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::profile::FieldKey::name(*self))
            }
        }
    };
}

mod artist;
mod host;

pub use artist::{
    ArtistFields, ArtistFlag, ArtistNumber, ArtistRecord, ArtistSchema, ArtistTags, ArtistText,
    ARTIST_PLACEHOLDER_AVATAR,
};
pub use host::{
    HostFields, HostFlag, HostNumber, HostRecord, HostSchema, HostTags, HostText,
    HOST_PLACEHOLDER_AVATAR,
};

/// Multipart field names used for media on save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormNames {
    /// Newly chosen avatar file
    pub avatar_file: &'static str,
    /// Storage-relative URL of the kept avatar (empty clears it)
    pub avatar_url: &'static str,
    /// JSON array of kept, storage-relative gallery URLs
    pub existing_gallery: &'static str,
    /// One part per newly chosen gallery file
    pub new_gallery: &'static str,
}

/// Media names shared by both profile endpoints
pub const DEFAULT_FORM_NAMES: FormNames = FormNames {
    avatar_file: "profile_picture",
    avatar_url: "profile_picture_url",
    existing_gallery: "existing_gallery_images",
    new_gallery: "new_gallery_images",
};

/// Field mapping for one profile variant.
pub trait ProfileSchema: Debug + Clone + PartialEq + Send + Sync + 'static {
    /// Record as delivered by the server; every field nullable
    type Record: DeserializeOwned + Debug + Send;
    /// Fully defaulted scalar and collection fields
    type Fields: Debug + Clone + PartialEq + Send + Sync;

    type Text: FieldKey;
    type Number: FieldKey;
    type Tags: FieldKey;
    type Flag: FieldKey;

    /// Human-readable kind used in messages ("performer", "host")
    const KIND: &'static str;
    /// Path of the profile endpoint, relative to the API base
    const ENDPOINT: &'static str;
    /// Role allowed to edit this kind of profile
    const ROLE: Role;
    /// Avatar shown while none is stored
    const PLACEHOLDER_AVATAR: &'static str;
    const BOOL_ENCODING: BoolEncoding;
    const FORM_NAMES: FormNames;

    /// Defaults for a profile that does not exist yet
    fn default_fields(account: &Account) -> Self::Fields;

    /// Replace every missing value in `record` with its default.
    /// Media is handled separately by [`Profile::from_record`].
    fn fields_from_record(record: &Self::Record, account: &Account) -> Self::Fields;

    fn record_avatar(record: &Self::Record) -> Option<&str>;
    fn record_gallery(record: &Self::Record) -> &[String];
    fn record_owner(record: &Self::Record) -> Option<AccountId>;

    fn text(fields: &Self::Fields, field: Self::Text) -> &str;
    fn text_mut(fields: &mut Self::Fields, field: Self::Text) -> &mut String;
    fn number(fields: &Self::Fields, field: Self::Number) -> f64;
    fn number_mut(fields: &mut Self::Fields, field: Self::Number) -> &mut f64;
    fn tags(fields: &Self::Fields, field: Self::Tags) -> &[String];
    fn tags_mut(fields: &mut Self::Fields, field: Self::Tags) -> &mut Vec<String>;
    fn flag(fields: &Self::Fields, field: Self::Flag) -> bool;
    fn flag_mut(fields: &mut Self::Fields, field: Self::Flag) -> &mut bool;

    /// Write scalar, flag and collection fields under their own names.
    fn write_fields(fields: &Self::Fields, submission: &mut Submission) {
        for &field in Self::Text::ALL {
            submission.push_text(field.name(), Self::text(fields, field));
        }
        for &field in Self::Number::ALL {
            submission.push_number(field.name(), Self::number(fields, field));
        }
        for &field in Self::Flag::ALL {
            submission.push_flag(field.name(), Self::flag(fields, field), Self::BOOL_ENCODING);
        }
        for &field in Self::Tags::ALL {
            submission.push_list(field.name(), Self::tags(fields, field));
        }
    }
}

/// A media reference that is either stored server-side or only local.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaRef {
    /// Absolute URL of a stored file
    Persisted(String),
    /// Preview of a file not uploaded yet
    Pending(PreviewHandle),
}

impl MediaRef {
    /// URL a UI can display
    pub fn display_url(&self) -> &str {
        match self {
            MediaRef::Persisted(url) => url,
            MediaRef::Pending(handle) => handle.url(),
        }
    }

    pub fn as_persisted(&self) -> Option<&str> {
        match self {
            MediaRef::Persisted(url) => Some(url),
            MediaRef::Pending(_) => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, MediaRef::Pending(_))
    }
}

/// Response body of the profile endpoint: `{ "profile": <record|null> }`
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "R: Deserialize<'de>"))]
pub struct ProfileEnvelope<R> {
    #[serde(default)]
    pub profile: Option<R>,
}

/// A profile owned by one account
#[derive(Debug, Clone, PartialEq)]
pub struct Profile<S: ProfileSchema> {
    pub user_id: AccountId,
    pub fields: S::Fields,
    /// `None` displays the schema placeholder
    pub avatar: Option<MediaRef>,
    /// Insertion order is display order
    pub gallery: Vec<MediaRef>,
}

impl<S: ProfileSchema> Profile<S> {
    /// All-default profile for creation mode
    pub fn defaults(account: &Account) -> Self {
        Self {
            user_id: account.id,
            fields: S::default_fields(account),
            avatar: None,
            gallery: Vec::new(),
        }
    }

    /// Default every field and rewrite media paths to absolute URLs.
    pub fn from_record(record: &S::Record, account: &Account, media: &MediaBase) -> Self {
        let avatar = S::record_avatar(record)
            .filter(|url| !url.is_empty() && !is_placeholder(url))
            .map(|url| MediaRef::Persisted(media.absolutize(url)));

        let gallery = S::record_gallery(record)
            .iter()
            .filter(|url| !url.is_empty())
            .map(|url| MediaRef::Persisted(media.absolutize(url)))
            .collect();

        Self {
            user_id: S::record_owner(record).unwrap_or(account.id),
            fields: S::fields_from_record(record, account),
            avatar,
            gallery,
        }
    }

    /// Avatar URL to display, falling back to the placeholder
    pub fn avatar_url(&self) -> &str {
        self.avatar
            .as_ref()
            .map_or(S::PLACEHOLDER_AVATAR, MediaRef::display_url)
    }

    /// Gallery URLs in display order, pending previews included
    pub fn gallery_urls(&self) -> Vec<&str> {
        self.gallery.iter().map(MediaRef::display_url).collect()
    }

    /// Stored gallery URLs only
    pub fn persisted_gallery(&self) -> impl Iterator<Item = &str> {
        self.gallery.iter().filter_map(MediaRef::as_persisted)
    }

    /// Drop pending references, keeping only known persisted URLs
    pub(crate) fn without_pending(mut self) -> Self {
        if self.avatar.as_ref().is_some_and(MediaRef::is_pending) {
            self.avatar = None;
        }
        self.gallery.retain(|entry| !entry.is_pending());
        self
    }
}

/// `value` unless it is missing or empty, otherwise `default`
pub(crate) fn text_or(value: Option<&String>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.clone(),
        _ => default.to_string(),
    }
}
