//! Payloads returned by the collection services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for adding a favorite
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AddFavoriteRequest {
    /// The hotel to bookmark
    pub hotel_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FavoriteAdded {
    pub favorite_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FavoriteRemoved {
    pub hotel_id: String,
}

/// A favorite with a snapshot of its hotel's display fields.
///
/// Always fully populated: a hotel missing from the catalog yields
/// placeholder values instead of nulls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FavoriteItem {
    pub favorite_id: i64,
    pub hotel_id: String,
    pub hotel_name: String,
    pub hotel_address: String,
    pub hotel_star: f64,
    pub main_image_url: String,
    pub created_at: DateTime<Utc>,
}

/// A history entry, with the hotel embedded when the catalog knows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HistoryItem {
    pub id: i64,
    pub hotel_id: String,
    /// Absent (not null) when the hotel could not be resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel: Option<HistoryHotel>,
    pub viewed_at: DateTime<Utc>,
}

/// Hotel fields shown in the history list. `name` and `star_rating` are
/// passed through from the catalog, nulls included.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HistoryHotel {
    pub id: String,
    pub name: Option<String>,
    pub address: String,
    pub star_rating: Option<f64>,
    pub price: f64,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HistoryRemoved {
    pub history_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HistoryCleared {
    pub status: String,
}

impl HistoryCleared {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}
