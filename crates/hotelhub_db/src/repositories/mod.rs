//! Store and catalog interfaces with their SQL and in-memory implementations

pub mod favorite;
pub mod favorite_sql;
pub mod history;
pub mod history_sql;
pub mod hotel;
pub mod hotel_sql;
pub mod memory;

pub use favorite::FavoriteStore;
pub use favorite_sql::SqlFavoriteRepository;
pub use history::HistoryStore;
pub use history_sql::SqlHistoryRepository;
pub use hotel::HotelCatalog;
pub use hotel_sql::SqlHotelCatalog;
pub use memory::MemoryStore;

/// Integers bound into SQL are signed 64-bit; larger values clamp.
pub(crate) fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

pub(crate) fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}
