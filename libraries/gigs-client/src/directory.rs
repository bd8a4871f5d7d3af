//! Public artist directory.

use crate::client::server_message;
use crate::error::{ClientError, Result};
use crate::types::DirectoryResponse;
use gigs_core::{ArtistRecord, MediaBase};
use reqwest::Client;
use tracing::debug;

/// Image shown for artists without a profile picture
pub const DIRECTORY_PLACEHOLDER: &str =
    "https://placehold.co/400x400/553c9a/ffffff?text=No+Image";

/// Listing entry for one artist, every field defaulted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistCard {
    pub id: String,
    pub name: String,
    pub category: String,
    pub location: String,
    pub rating: f64,
    pub review_count: u32,
    pub price: String,
    pub image: String,
}

impl ArtistCard {
    pub fn from_record(record: &ArtistRecord, media: &MediaBase) -> Self {
        let id = record
            .id
            .or(record.user_id)
            .map(|id| id.to_string())
            .unwrap_or_default();
        let name = [&record.stage_name, &record.full_name]
            .into_iter()
            .flatten()
            .find(|n| !n.is_empty())
            .cloned()
            .unwrap_or_else(|| "Unknown Artist".to_string());
        let image = record
            .profile_picture_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(|url| media.absolutize(url))
            .unwrap_or_else(|| DIRECTORY_PLACEHOLDER.to_string());

        Self {
            id,
            name,
            category: or_default(record.performance_type.as_deref(), "General"),
            location: or_default(record.location.as_deref(), "Not Set"),
            rating: record.rating,
            review_count: record.review_count,
            price: or_default(record.price.as_deref(), "Price Varies"),
            image,
        }
    }

    /// Case-insensitive substring match on name, category, location or price
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [&self.name, &self.category, &self.location, &self.price]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

fn or_default(value: Option<&str>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Everything shown for one artist, defaulted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistDetail {
    pub card: ArtistCard,
    pub full_name: String,
    pub bio: String,
    pub contact_number: String,
    pub skills: Vec<String>,
    /// Absolute URLs in display order
    pub gallery: Vec<String>,
    pub direct_booking: bool,
    pub travel_distance: f64,
    pub availability_weekdays: bool,
    pub availability_weekends: bool,
    pub availability_morning: bool,
    pub availability_evening: bool,
}

impl ArtistDetail {
    pub fn from_record(record: &ArtistRecord, media: &MediaBase) -> Self {
        Self {
            card: ArtistCard::from_record(record, media),
            full_name: or_default(record.full_name.as_deref(), "Unknown Artist"),
            bio: or_default(record.bio.as_deref(), "No bio provided."),
            contact_number: or_default(record.contact_number.as_deref(), "Not Set"),
            skills: record.skills.clone(),
            gallery: record
                .gallery_images
                .iter()
                .filter(|url| !url.is_empty())
                .map(|url| media.absolutize(url))
                .collect(),
            direct_booking: record.direct_booking,
            travel_distance: record.travel_distance,
            availability_weekdays: record.availability_weekdays,
            availability_weekends: record.availability_weekends,
            availability_morning: record.availability_morning,
            availability_evening: record.availability_evening,
        }
    }
}

/// Artists returned by the public listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtistDirectory {
    artists: Vec<ArtistDetail>,
}

impl ArtistDirectory {
    pub fn new(artists: Vec<ArtistDetail>) -> Self {
        Self { artists }
    }

    pub fn from_records(records: &[ArtistRecord], media: &MediaBase) -> Self {
        Self::new(
            records
                .iter()
                .map(|record| ArtistDetail::from_record(record, media))
                .collect(),
        )
    }

    /// Listing cards in server order
    pub fn cards(&self) -> impl Iterator<Item = &ArtistCard> {
        self.artists.iter().map(|artist| &artist.card)
    }

    /// Cards matching `query`; an empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&ArtistCard> {
        let query = query.trim();
        self.cards().filter(|c| c.matches(query)).collect()
    }

    /// Full entry for the card with this id
    pub fn get(&self, id: &str) -> Option<&ArtistDetail> {
        self.artists.iter().find(|artist| artist.card.id == id)
    }

    pub fn len(&self) -> usize {
        self.artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }
}

/// Client for the public performer listing. Needs no credential.
pub struct DirectoryClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    media: &'a MediaBase,
}

impl<'a> DirectoryClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, media: &'a MediaBase) -> Self {
        Self {
            http,
            base_url,
            media,
        }
    }

    pub async fn list_artists(&self) -> Result<ArtistDirectory> {
        let url = format!("{}/api/performers", self.base_url);
        debug!(url = %url, "Fetching artist directory");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ClientError::send)?;

        let status = response.status();

        if status.is_success() {
            let body: DirectoryResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse artist directory: {}", e))
            })?;

            debug!(count = body.profiles.len(), "Fetched artist directory");
            Ok(ArtistDirectory::from_records(&body.profiles, self.media))
        } else {
            let message = server_message(response)
                .await
                .unwrap_or_else(|| "Failed to fetch artists.".to_string());
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }
}
