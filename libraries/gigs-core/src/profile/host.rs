//! Event host profile schema

use super::{FormNames, ProfileSchema, DEFAULT_FORM_NAMES};
use crate::account::{Account, AccountId, Role};
use crate::loose;
use crate::profile::text_or;
use crate::submission::BoolEncoding;
use serde::Deserialize;

pub const HOST_PLACEHOLDER_AVATAR: &str = "https://placehold.co/150x150/553c9a/ffffff?text=Host";

const NOT_SET: &str = "Not Set";

/// Host profile as stored by the backend.
///
/// Budgets are DECIMAL columns and arrive as strings; the JSON columns
/// (event types, preferences, gallery) may arrive still encoded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<AccountId>,
    #[serde(default, deserialize_with = "loose::text")]
    pub company_organization: Option<String>,
    #[serde(default, deserialize_with = "loose::text")]
    pub contact_person: Option<String>,
    #[serde(default, deserialize_with = "loose::text")]
    pub contact_number: Option<String>,
    #[serde(default, deserialize_with = "loose::text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "loose::text")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "loose::string_list")]
    pub event_types_typically_hosted: Vec<String>,
    #[serde(default, deserialize_with = "loose::number")]
    pub default_budget_range_min: f64,
    #[serde(default, deserialize_with = "loose::number")]
    pub default_budget_range_max: f64,
    #[serde(default, deserialize_with = "loose::string_list")]
    pub preferred_performer_types: Vec<String>,
    #[serde(default, deserialize_with = "loose::string_list")]
    pub preferred_locations_for_gigs: Vec<String>,
    #[serde(default, deserialize_with = "loose::flag")]
    pub urgent_booking_enabled: bool,
    #[serde(default, deserialize_with = "loose::flag")]
    pub email_notifications_enabled: bool,
    #[serde(default, deserialize_with = "loose::flag")]
    pub sms_notifications_enabled: bool,
    #[serde(default, deserialize_with = "loose::text")]
    pub profile_picture_url: Option<String>,
    #[serde(default, deserialize_with = "loose::string_list")]
    pub gallery_images: Vec<String>,
    #[serde(default, deserialize_with = "loose::count")]
    pub events_hosted: u32,
    #[serde(default, deserialize_with = "loose::number")]
    pub average_rating: f64,
    #[serde(default, deserialize_with = "loose::count")]
    pub total_reviews: u32,
}

/// Defaulted host fields
#[derive(Debug, Clone, PartialEq)]
pub struct HostFields {
    pub company_organization: String,
    pub contact_person: String,
    pub contact_number: String,
    pub location: String,
    pub bio: String,
    pub event_types_typically_hosted: Vec<String>,
    pub default_budget_range_min: f64,
    pub default_budget_range_max: f64,
    pub preferred_performer_types: Vec<String>,
    pub preferred_locations_for_gigs: Vec<String>,
    pub urgent_booking_enabled: bool,
    pub email_notifications_enabled: bool,
    pub sms_notifications_enabled: bool,
    pub events_hosted: u32,
    pub average_rating: f64,
    pub total_reviews: u32,
}

field_enum! {
    pub enum HostText {
        CompanyOrganization => "company_organization",
        ContactPerson => "contact_person",
        ContactNumber => "contact_number",
        Location => "location",
        Bio => "bio",
    }
}

field_enum! {
    pub enum HostNumber {
        BudgetMin => "default_budget_range_min",
        BudgetMax => "default_budget_range_max",
    }
}

field_enum! {
    pub enum HostTags {
        EventTypes => "event_types_typically_hosted",
        PreferredPerformerTypes => "preferred_performer_types",
        PreferredLocations => "preferred_locations_for_gigs",
    }
}

field_enum! {
    pub enum HostFlag {
        UrgentBooking => "urgent_booking_enabled",
        EmailNotifications => "email_notifications_enabled",
        SmsNotifications => "sms_notifications_enabled",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostSchema;

impl ProfileSchema for HostSchema {
    type Record = HostRecord;
    type Fields = HostFields;
    type Text = HostText;
    type Number = HostNumber;
    type Tags = HostTags;
    type Flag = HostFlag;

    const KIND: &'static str = "host";
    const ENDPOINT: &'static str = "/api/hosts/profile";
    const ROLE: Role = Role::Host;
    const PLACEHOLDER_AVATAR: &'static str = HOST_PLACEHOLDER_AVATAR;
    const BOOL_ENCODING: BoolEncoding = BoolEncoding::Numeric;
    const FORM_NAMES: FormNames = DEFAULT_FORM_NAMES;

    fn default_fields(account: &Account) -> HostFields {
        HostFields {
            company_organization: account.username_or_empty().to_string(),
            contact_person: String::new(),
            contact_number: String::new(),
            location: NOT_SET.to_string(),
            bio: String::new(),
            event_types_typically_hosted: Vec::new(),
            default_budget_range_min: 0.0,
            default_budget_range_max: 0.0,
            preferred_performer_types: Vec::new(),
            preferred_locations_for_gigs: Vec::new(),
            urgent_booking_enabled: false,
            email_notifications_enabled: false,
            sms_notifications_enabled: false,
            events_hosted: 0,
            average_rating: 0.0,
            total_reviews: 0,
        }
    }

    fn fields_from_record(record: &HostRecord, account: &Account) -> HostFields {
        HostFields {
            company_organization: text_or(
                record.company_organization.as_ref(),
                account.username_or_empty(),
            ),
            contact_person: text_or(record.contact_person.as_ref(), ""),
            contact_number: text_or(record.contact_number.as_ref(), ""),
            location: text_or(record.location.as_ref(), NOT_SET),
            bio: text_or(record.bio.as_ref(), ""),
            event_types_typically_hosted: record.event_types_typically_hosted.clone(),
            default_budget_range_min: record.default_budget_range_min,
            default_budget_range_max: record.default_budget_range_max,
            preferred_performer_types: record.preferred_performer_types.clone(),
            preferred_locations_for_gigs: record.preferred_locations_for_gigs.clone(),
            urgent_booking_enabled: record.urgent_booking_enabled,
            email_notifications_enabled: record.email_notifications_enabled,
            sms_notifications_enabled: record.sms_notifications_enabled,
            events_hosted: record.events_hosted,
            average_rating: record.average_rating,
            total_reviews: record.total_reviews,
        }
    }

    fn record_avatar(record: &HostRecord) -> Option<&str> {
        record.profile_picture_url.as_deref()
    }

    fn record_gallery(record: &HostRecord) -> &[String] {
        &record.gallery_images
    }

    fn record_owner(record: &HostRecord) -> Option<AccountId> {
        record.user_id
    }

    fn text(fields: &HostFields, field: HostText) -> &str {
        match field {
            HostText::CompanyOrganization => &fields.company_organization,
            HostText::ContactPerson => &fields.contact_person,
            HostText::ContactNumber => &fields.contact_number,
            HostText::Location => &fields.location,
            HostText::Bio => &fields.bio,
        }
    }

    fn text_mut(fields: &mut HostFields, field: HostText) -> &mut String {
        match field {
            HostText::CompanyOrganization => &mut fields.company_organization,
            HostText::ContactPerson => &mut fields.contact_person,
            HostText::ContactNumber => &mut fields.contact_number,
            HostText::Location => &mut fields.location,
            HostText::Bio => &mut fields.bio,
        }
    }

    fn number(fields: &HostFields, field: HostNumber) -> f64 {
        match field {
            HostNumber::BudgetMin => fields.default_budget_range_min,
            HostNumber::BudgetMax => fields.default_budget_range_max,
        }
    }

    fn number_mut(fields: &mut HostFields, field: HostNumber) -> &mut f64 {
        match field {
            HostNumber::BudgetMin => &mut fields.default_budget_range_min,
            HostNumber::BudgetMax => &mut fields.default_budget_range_max,
        }
    }

    fn tags(fields: &HostFields, field: HostTags) -> &[String] {
        match field {
            HostTags::EventTypes => &fields.event_types_typically_hosted,
            HostTags::PreferredPerformerTypes => &fields.preferred_performer_types,
            HostTags::PreferredLocations => &fields.preferred_locations_for_gigs,
        }
    }

    fn tags_mut(fields: &mut HostFields, field: HostTags) -> &mut Vec<String> {
        match field {
            HostTags::EventTypes => &mut fields.event_types_typically_hosted,
            HostTags::PreferredPerformerTypes => &mut fields.preferred_performer_types,
            HostTags::PreferredLocations => &mut fields.preferred_locations_for_gigs,
        }
    }

    fn flag(fields: &HostFields, field: HostFlag) -> bool {
        match field {
            HostFlag::UrgentBooking => fields.urgent_booking_enabled,
            HostFlag::EmailNotifications => fields.email_notifications_enabled,
            HostFlag::SmsNotifications => fields.sms_notifications_enabled,
        }
    }

    fn flag_mut(fields: &mut HostFields, field: HostFlag) -> &mut bool {
        match field {
            HostFlag::UrgentBooking => &mut fields.urgent_booking_enabled,
            HostFlag::EmailNotifications => &mut fields.email_notifications_enabled,
            HostFlag::SmsNotifications => &mut fields.sms_notifications_enabled,
        }
    }
}
