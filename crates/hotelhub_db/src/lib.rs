//! Storage for Hotelhub user collections
//!
//! This crate holds the records behind favorites and view history, the
//! read-only hotel catalog, and the stores that persist them. Stores are
//! object-safe traits so services can hold them as `Arc<dyn ...>`; each has
//! a SQL implementation on SQLx's `Any` driver and an in-memory one.
//!
//! # Features
//!
//! - `sqlite` (default), `postgres`, `mysql`: compiled-in database drivers
//!
//! # Example
//!
//! ```rust,no_run
//! use hotelhub_config::AppConfig;
//! use hotelhub_db::Stores;
//!
//! async fn setup() -> Result<Stores, hotelhub_db::DbError> {
//!     let config = AppConfig::default();
//!     Stores::from_app_config(&config).await
//! }
//! ```

pub mod client;
pub mod error;
pub mod factory;
pub mod models;
pub mod repositories;

pub use client::{DbClient, DbTransaction};
pub use error::DbError;
pub use factory::{DbClientFactory, Stores};
pub use models::{Favorite, HistoryEntry, Hotel, HotelImages, LocationInfo, NewHistoryEntry};
pub use repositories::{
    FavoriteStore, HistoryStore, HotelCatalog, MemoryStore, SqlFavoriteRepository,
    SqlHistoryRepository, SqlHotelCatalog,
};
