//! Performer (artist) profile schema

use super::{FormNames, ProfileSchema, DEFAULT_FORM_NAMES};
use crate::account::{Account, AccountId, Role};
use crate::loose;
use crate::profile::text_or;
use crate::submission::BoolEncoding;
use serde::Deserialize;

pub const ARTIST_PLACEHOLDER_AVATAR: &str =
    "https://placehold.co/150x150/553c9a/ffffff?text=Profile";

const NOT_SET: &str = "Not Set";
const DEFAULT_BIO: &str = "Tell us about your talent and experience!";
const DEFAULT_PRICE: &str = "Rs. 0 - Rs. 0";

/// Performer profile as stored by the backend
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<AccountId>,
    #[serde(default, deserialize_with = "loose::text")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "loose::text")]
    pub stage_name: Option<String>,
    #[serde(default, deserialize_with = "loose::text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "loose::text")]
    pub performance_type: Option<String>,
    #[serde(default, deserialize_with = "loose::text")]
    pub bio: Option<String>,
    /// Free-text price display, e.g. "Rs. 10,000 - Rs. 25,000"
    #[serde(default, deserialize_with = "loose::text")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "loose::text")]
    pub contact_number: Option<String>,
    #[serde(default, deserialize_with = "loose::string_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "loose::text")]
    pub profile_picture_url: Option<String>,
    #[serde(default, deserialize_with = "loose::string_list")]
    pub gallery_images: Vec<String>,
    #[serde(default, deserialize_with = "loose::flag")]
    pub direct_booking: bool,
    #[serde(default, deserialize_with = "loose::number")]
    pub travel_distance: f64,
    #[serde(default, deserialize_with = "loose::flag")]
    pub availability_weekdays: bool,
    #[serde(default, deserialize_with = "loose::flag")]
    pub availability_weekends: bool,
    #[serde(default, deserialize_with = "loose::flag")]
    pub availability_morning: bool,
    #[serde(default, deserialize_with = "loose::flag")]
    pub availability_evening: bool,
    #[serde(default, deserialize_with = "loose::number")]
    pub rating: f64,
    #[serde(default, deserialize_with = "loose::count")]
    pub review_count: u32,
}

/// Defaulted performer fields
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistFields {
    pub full_name: String,
    pub stage_name: String,
    pub location: String,
    pub performance_type: String,
    pub bio: String,
    pub price: String,
    pub contact_number: String,
    pub skills: Vec<String>,
    pub travel_distance: f64,
    pub direct_booking: bool,
    pub availability_weekdays: bool,
    pub availability_weekends: bool,
    pub availability_morning: bool,
    pub availability_evening: bool,
    /// Read-only aggregate
    pub rating: f64,
    /// Read-only aggregate
    pub review_count: u32,
}

field_enum! {
    pub enum ArtistText {
        FullName => "full_name",
        StageName => "stage_name",
        Location => "location",
        PerformanceType => "performance_type",
        Bio => "bio",
        Price => "price",
        ContactNumber => "contact_number",
    }
}

field_enum! {
    pub enum ArtistNumber {
        TravelDistance => "travel_distance",
    }
}

field_enum! {
    pub enum ArtistTags {
        Skills => "skills",
    }
}

field_enum! {
    pub enum ArtistFlag {
        DirectBooking => "direct_booking",
        AvailabilityWeekdays => "availability_weekdays",
        AvailabilityWeekends => "availability_weekends",
        AvailabilityMorning => "availability_morning",
        AvailabilityEvening => "availability_evening",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArtistSchema;

impl ProfileSchema for ArtistSchema {
    type Record = ArtistRecord;
    type Fields = ArtistFields;
    type Text = ArtistText;
    type Number = ArtistNumber;
    type Tags = ArtistTags;
    type Flag = ArtistFlag;

    const KIND: &'static str = "performer";
    const ENDPOINT: &'static str = "/api/performers/profile";
    const ROLE: Role = Role::Performer;
    const PLACEHOLDER_AVATAR: &'static str = ARTIST_PLACEHOLDER_AVATAR;
    const BOOL_ENCODING: BoolEncoding = BoolEncoding::Numeric;
    const FORM_NAMES: FormNames = DEFAULT_FORM_NAMES;

    fn default_fields(account: &Account) -> ArtistFields {
        ArtistFields {
            full_name: account.username_or_empty().to_string(),
            stage_name: String::new(),
            location: NOT_SET.to_string(),
            performance_type: NOT_SET.to_string(),
            bio: DEFAULT_BIO.to_string(),
            price: DEFAULT_PRICE.to_string(),
            contact_number: NOT_SET.to_string(),
            skills: Vec::new(),
            travel_distance: 0.0,
            direct_booking: false,
            availability_weekdays: false,
            availability_weekends: false,
            availability_morning: false,
            availability_evening: false,
            rating: 0.0,
            review_count: 0,
        }
    }

    fn fields_from_record(record: &ArtistRecord, account: &Account) -> ArtistFields {
        ArtistFields {
            full_name: text_or(record.full_name.as_ref(), account.username_or_empty()),
            stage_name: text_or(record.stage_name.as_ref(), ""),
            location: text_or(record.location.as_ref(), NOT_SET),
            performance_type: text_or(record.performance_type.as_ref(), NOT_SET),
            bio: text_or(record.bio.as_ref(), DEFAULT_BIO),
            price: text_or(record.price.as_ref(), DEFAULT_PRICE),
            contact_number: text_or(record.contact_number.as_ref(), NOT_SET),
            skills: record.skills.clone(),
            travel_distance: record.travel_distance,
            direct_booking: record.direct_booking,
            availability_weekdays: record.availability_weekdays,
            availability_weekends: record.availability_weekends,
            availability_morning: record.availability_morning,
            availability_evening: record.availability_evening,
            rating: record.rating,
            review_count: record.review_count,
        }
    }

    fn record_avatar(record: &ArtistRecord) -> Option<&str> {
        record.profile_picture_url.as_deref()
    }

    fn record_gallery(record: &ArtistRecord) -> &[String] {
        &record.gallery_images
    }

    fn record_owner(record: &ArtistRecord) -> Option<AccountId> {
        record.user_id
    }

    fn text(fields: &ArtistFields, field: ArtistText) -> &str {
        match field {
            ArtistText::FullName => &fields.full_name,
            ArtistText::StageName => &fields.stage_name,
            ArtistText::Location => &fields.location,
            ArtistText::PerformanceType => &fields.performance_type,
            ArtistText::Bio => &fields.bio,
            ArtistText::Price => &fields.price,
            ArtistText::ContactNumber => &fields.contact_number,
        }
    }

    fn text_mut(fields: &mut ArtistFields, field: ArtistText) -> &mut String {
        match field {
            ArtistText::FullName => &mut fields.full_name,
            ArtistText::StageName => &mut fields.stage_name,
            ArtistText::Location => &mut fields.location,
            ArtistText::PerformanceType => &mut fields.performance_type,
            ArtistText::Bio => &mut fields.bio,
            ArtistText::Price => &mut fields.price,
            ArtistText::ContactNumber => &mut fields.contact_number,
        }
    }

    fn number(fields: &ArtistFields, field: ArtistNumber) -> f64 {
        match field {
            ArtistNumber::TravelDistance => fields.travel_distance,
        }
    }

    fn number_mut(fields: &mut ArtistFields, field: ArtistNumber) -> &mut f64 {
        match field {
            ArtistNumber::TravelDistance => &mut fields.travel_distance,
        }
    }

    fn tags(fields: &ArtistFields, field: ArtistTags) -> &[String] {
        match field {
            ArtistTags::Skills => &fields.skills,
        }
    }

    fn tags_mut(fields: &mut ArtistFields, field: ArtistTags) -> &mut Vec<String> {
        match field {
            ArtistTags::Skills => &mut fields.skills,
        }
    }

    fn flag(fields: &ArtistFields, field: ArtistFlag) -> bool {
        match field {
            ArtistFlag::DirectBooking => fields.direct_booking,
            ArtistFlag::AvailabilityWeekdays => fields.availability_weekdays,
            ArtistFlag::AvailabilityWeekends => fields.availability_weekends,
            ArtistFlag::AvailabilityMorning => fields.availability_morning,
            ArtistFlag::AvailabilityEvening => fields.availability_evening,
        }
    }

    fn flag_mut(fields: &mut ArtistFields, field: ArtistFlag) -> &mut bool {
        match field {
            ArtistFlag::DirectBooking => &mut fields.direct_booking,
            ArtistFlag::AvailabilityWeekdays => &mut fields.availability_weekdays,
            ArtistFlag::AvailabilityWeekends => &mut fields.availability_weekends,
            ArtistFlag::AvailabilityMorning => &mut fields.availability_morning,
            ArtistFlag::AvailabilityEvening => &mut fields.availability_evening,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaBase;
    use crate::profile::{MediaRef, Profile};

    fn account() -> Account {
        Account {
            id: 42,
            email: "nimal@example.lk".into(),
            role: Role::Performer,
            username: Some("nimal".into()),
        }
    }

    #[test]
    fn null_fields_take_documented_defaults() {
        let record: ArtistRecord = serde_json::from_value(serde_json::json!({
            "user_id": 42,
            "full_name": null,
            "stage_name": null,
            "location": null,
            "performance_type": null,
            "bio": null,
            "price": null,
            "contact_number": null,
            "skills": null,
            "profile_picture_url": null,
            "gallery_images": null,
            "rating": null,
            "review_count": null
        }))
        .unwrap();

        let media = MediaBase::new("http://localhost:5000");
        let profile = Profile::<ArtistSchema>::from_record(&record, &account(), &media);

        assert_eq!(profile.fields, ArtistSchema::default_fields(&account()));
        assert_eq!(profile.fields.full_name, "nimal");
        assert_eq!(profile.fields.bio, DEFAULT_BIO);
        assert!(profile.avatar.is_none());
        assert_eq!(profile.avatar_url(), ARTIST_PLACEHOLDER_AVATAR);
        assert!(profile.gallery.is_empty());
    }

    #[test]
    fn stored_values_and_media_are_normalized() {
        let record: ArtistRecord = serde_json::from_value(serde_json::json!({
            "user_id": 42,
            "stage_name": "DJ Nim",
            "rating": "4.50",
            "review_count": 8,
            "direct_booking": 1,
            "skills": "[\"House\",\"Techno\"]",
            "profile_picture_url": "/uploads/profile_pictures/nim.png",
            "gallery_images": ["/uploads/gallery/1.jpg", "https://cdn.example.com/2.jpg"]
        }))
        .unwrap();

        let media = MediaBase::new("http://localhost:5000");
        let profile = Profile::<ArtistSchema>::from_record(&record, &account(), &media);

        assert_eq!(profile.fields.stage_name, "DJ Nim");
        assert_eq!(profile.fields.rating, 4.5);
        assert_eq!(profile.fields.review_count, 8);
        assert!(profile.fields.direct_booking);
        assert_eq!(profile.fields.skills, vec!["House", "Techno"]);
        assert_eq!(
            profile.avatar,
            Some(MediaRef::Persisted(
                "http://localhost:5000/uploads/profile_pictures/nim.png".into()
            ))
        );
        assert_eq!(
            profile.gallery_urls(),
            vec![
                "http://localhost:5000/uploads/gallery/1.jpg",
                "https://cdn.example.com/2.jpg"
            ]
        );
    }

    #[test]
    fn empty_username_defaults_full_name_to_empty() {
        let mut account = account();
        account.username = None;
        assert_eq!(ArtistSchema::default_fields(&account).full_name, "");
    }
}
