//! SQL implementation of the hotel catalog

use crate::error::DbError;
use crate::models::{Hotel, HotelImages, LocationInfo};
use crate::repositories::hotel::HotelCatalog;
use crate::DbClient;
use hotelhub_common::BoxFuture;
use serde::de::DeserializeOwned;
use sqlx::any::AnyRow;
use sqlx::{Any, Decode, Row, Type, ValueRef};
use std::collections::{HashMap, HashSet};
use tracing::{debug, error, info, warn};

/// Upper bound on bind parameters per lookup, well below SQLite's variable limit.
const MAX_IDS_PER_QUERY: usize = 500;

/// Reads hotels from the `hotels` table.
///
/// `location_info` and `main_image_url` hold JSON text. A value that does not
/// parse is treated as missing.
#[derive(Debug, Clone)]
pub struct SqlHotelCatalog {
    db_client: DbClient,
}

impl SqlHotelCatalog {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing hotel catalog schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS hotels (
                id TEXT PRIMARY KEY,
                hotel_name_cn TEXT,
                location_info TEXT,
                star_rating REAL,
                main_image_url TEXT,
                min_price REAL
            )
        "#;

        self.db_client.execute(query).await?;

        info!("Hotel catalog schema initialized successfully");
        Ok(())
    }

    /// Insert or replace a hotel. The catalog is owned elsewhere; this exists
    /// for seeding and tests.
    pub async fn upsert(&self, hotel: &Hotel) -> Result<(), DbError> {
        debug!("Upserting hotel: {}", hotel.id);

        let location = hotel
            .location_info
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| DbError::Other(e.to_string()))?;
        let images = hotel
            .main_image_url
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| DbError::Other(e.to_string()))?;

        let query = r#"
            INSERT INTO hotels (id, hotel_name_cn, location_info, star_rating, main_image_url, min_price)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                hotel_name_cn = excluded.hotel_name_cn,
                location_info = excluded.location_info,
                star_rating = excluded.star_rating,
                main_image_url = excluded.main_image_url,
                min_price = excluded.min_price
        "#;

        sqlx::query(query)
            .bind(&hotel.id)
            .bind(hotel.hotel_name_cn.clone())
            .bind(location)
            .bind(hotel.star_rating)
            .bind(images)
            .bind(hotel.min_price)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to upsert hotel: {}", e);
                DbError::from_write(e)
            })?;

        Ok(())
    }

    async fn fetch_by_ids(&self, ids: &[String]) -> Result<HashMap<String, Hotel>, DbError> {
        let unique: Vec<&str> = {
            let mut seen = HashSet::new();
            ids.iter()
                .map(String::as_str)
                .filter(|id| seen.insert(*id))
                .collect()
        };
        if unique.is_empty() {
            return Ok(HashMap::new());
        }

        debug!("Resolving {} hotels from the catalog", unique.len());

        let mut hotels = HashMap::with_capacity(unique.len());
        for chunk in unique.chunks(MAX_IDS_PER_QUERY) {
            self.fetch_chunk(chunk, &mut hotels).await?;
        }
        Ok(hotels)
    }

    async fn fetch_chunk(&self, ids: &[&str], hotels: &mut HashMap<String, Hotel>) -> Result<(), DbError> {
        let placeholders = (1..=ids.len())
            .map(|n| format!("${}", n))
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!(
            "SELECT id, hotel_name_cn, location_info, star_rating, main_image_url, min_price \
             FROM hotels WHERE id IN ({})",
            placeholders
        );

        let mut statement = sqlx::query(&query);
        for id in ids {
            statement = statement.bind(*id);
        }

        let rows = statement
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to resolve hotels: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        for row in &rows {
            let hotel = hotel_from_row(row)?;
            hotels.insert(hotel.id.clone(), hotel);
        }
        Ok(())
    }
}

impl HotelCatalog for SqlHotelCatalog {
    fn find_by_ids<'a>(&'a self, ids: &'a [String]) -> BoxFuture<'a, HashMap<String, Hotel>, DbError> {
        Box::pin(self.fetch_by_ids(ids))
    }
}

fn hotel_from_row(row: &AnyRow) -> Result<Hotel, DbError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| DbError::RowError(e.to_string()))?;

    let location_info =
        parse_json_column::<LocationInfo>(&id, "location_info", nullable(row, "location_info")?);
    let main_image_url =
        parse_json_column::<HotelImages>(&id, "main_image_url", nullable(row, "main_image_url")?);

    Ok(Hotel {
        hotel_name_cn: nullable(row, "hotel_name_cn")?,
        location_info,
        star_rating: nullable(row, "star_rating")?,
        main_image_url,
        min_price: nullable(row, "min_price")?,
        id,
    })
}

/// Decode an optional column. The `Any` driver reports NULL as its own type,
/// so `Option<T>` cannot be decoded directly.
fn nullable<'r, T>(row: &'r AnyRow, column: &str) -> Result<Option<T>, DbError>
where
    T: Decode<'r, Any> + Type<Any>,
{
    let raw = row
        .try_get_raw(column)
        .map_err(|e| DbError::RowError(e.to_string()))?;
    if raw.is_null() {
        return Ok(None);
    }
    row.try_get(column)
        .map(Some)
        .map_err(|e| DbError::RowError(e.to_string()))
}

fn parse_json_column<T: DeserializeOwned>(hotel_id: &str, column: &str, raw: Option<String>) -> Option<T> {
    let raw = raw.filter(|value| !value.trim().is_empty())?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(
                "Ignoring malformed {} for hotel {}: {}",
                column, hotel_id, e
            );
            None
        }
    }
}
