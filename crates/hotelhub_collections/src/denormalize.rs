//! Turning store rows plus catalog hotels into list items.
//!
//! | field        | favorites                 | history                  |
//! |--------------|---------------------------|--------------------------|
//! | name         | unknown-hotel placeholder | passed through           |
//! | address      | `""`                      | `""`                     |
//! | star rating  | `0`                       | passed through           |
//! | price        | n/a                       | `0`                      |
//! | image        | `""`                      | `""`                     |

use crate::models::{FavoriteItem, HistoryHotel, HistoryItem};
use hotelhub_db::{Favorite, HistoryEntry, Hotel};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Build the favorite list item, substituting placeholders for anything the
/// catalog lacks. `hotel` is `None` when the catalog has no such hotel.
pub fn favorite_item(favorite: &Favorite, hotel: Option<&Hotel>, unknown_hotel_name: &str) -> FavoriteItem {
    FavoriteItem {
        favorite_id: favorite.id,
        hotel_id: favorite.hotel_id.clone(),
        hotel_name: hotel
            .and_then(Hotel::display_name)
            .unwrap_or(unknown_hotel_name)
            .to_string(),
        hotel_address: hotel
            .and_then(Hotel::formatted_address)
            .unwrap_or_default()
            .to_string(),
        hotel_star: hotel.and_then(|h| h.star_rating).unwrap_or(0.0),
        main_image_url: hotel
            .and_then(Hotel::primary_image)
            .unwrap_or_default()
            .to_string(),
        created_at: favorite.created_at,
    }
}

pub fn history_item(entry: &HistoryEntry, hotel: Option<&Hotel>) -> HistoryItem {
    HistoryItem {
        id: entry.id,
        hotel_id: entry.hotel_id.clone(),
        hotel: hotel.map(history_hotel),
        viewed_at: entry.viewed_at,
    }
}

fn history_hotel(hotel: &Hotel) -> HistoryHotel {
    HistoryHotel {
        id: hotel.id.clone(),
        name: hotel.hotel_name_cn.clone(),
        address: hotel.formatted_address().unwrap_or_default().to_string(),
        star_rating: hotel.star_rating,
        price: hotel.min_price.unwrap_or(0.0),
        image: hotel.primary_image().unwrap_or_default().to_string(),
    }
}

/// Distinct hotel ids of a page, in first-seen order.
pub fn hotel_ids<'a, I>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// Log the ids the catalog could not resolve. Dangling references are
/// tolerated, so this only warns.
pub fn report_unresolved(entity: &str, ids: &[String], hotels: &HashMap<String, Hotel>) {
    let missing: Vec<&str> = ids
        .iter()
        .filter(|id| !hotels.contains_key(id.as_str()))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        warn!(
            "{} list references {} hotel(s) missing from the catalog: {:?}",
            entity,
            missing.len(),
            missing
        );
    }
}
