//! Records held by the stores and the catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's bookmark of a hotel. Unique per (`user_id`, `hotel_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: i64,
    pub user_id: String,
    pub hotel_id: String,
    pub created_at: DateTime<Utc>,
}

/// One logged view of a hotel by a user. Repeated views produce repeated entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub user_id: String,
    pub hotel_id: String,
    pub viewed_at: DateTime<Utc>,
}

/// Fields needed to append a view to the history log.
#[derive(Debug, Clone)]
pub struct NewHistoryEntry {
    pub user_id: String,
    pub hotel_id: String,
    pub viewed_at: DateTime<Utc>,
}

impl NewHistoryEntry {
    /// A view happening right now.
    pub fn now(user_id: impl Into<String>, hotel_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            hotel_id: hotel_id.into(),
            viewed_at: Utc::now(),
        }
    }
}

/// The nested location object stored with a hotel. Only the formatted
/// address is read; other keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    #[serde(default)]
    pub formatted_address: Option<String>,
}

/// Hotel images are stored either as one URL or as an ordered list of URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HotelImages {
    Many(Vec<String>),
    One(String),
}

impl HotelImages {
    /// The primary image: the first element of a list, or the single value.
    pub fn primary(&self) -> Option<&str> {
        match self {
            HotelImages::Many(urls) => urls.first().map(String::as_str),
            HotelImages::One(url) => Some(url.as_str()),
        }
    }
}

/// A catalog hotel as seen by this backend. Everything but the id may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: String,
    pub hotel_name_cn: Option<String>,
    pub location_info: Option<LocationInfo>,
    pub star_rating: Option<f64>,
    pub main_image_url: Option<HotelImages>,
    pub min_price: Option<f64>,
}

impl Hotel {
    /// A hotel with only its id set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// The display name, treating an empty name as missing.
    pub fn display_name(&self) -> Option<&str> {
        self.hotel_name_cn.as_deref().filter(|name| !name.is_empty())
    }

    pub fn formatted_address(&self) -> Option<&str> {
        self.location_info
            .as_ref()
            .and_then(|location| location.formatted_address.as_deref())
            .filter(|address| !address.is_empty())
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.main_image_url
            .as_ref()
            .and_then(HotelImages::primary)
            .filter(|url| !url.is_empty())
    }
}

pub(crate) fn datetime_from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}
