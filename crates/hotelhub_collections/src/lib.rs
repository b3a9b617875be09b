//! Favorites and view history for the Hotelhub mobile backend
//!
//! Two per-user collections of hotels. Favorites are unique per
//! (user, hotel); history is an append log of viewed hotels. Both are listed
//! page by page, newest first, with each row joined to the hotel catalog.
//! Rows whose hotel the catalog does not know are still listed, with
//! placeholder values (favorites) or without the hotel object (history).
//!
//! # Features
//!
//! - `openapi`: utoipa documentation for the routes
//!
//! # Example
//!
//! ```rust,no_run
//! use hotelhub_collections::{routes, CollectionsServiceFactory};
//! use hotelhub_config::AppConfig;
//! use hotelhub_db::Stores;
//! use std::sync::Arc;
//!
//! async fn setup_app() -> Result<axum::Router, hotelhub_db::DbError> {
//!     let config = Arc::new(AppConfig::default());
//!     let stores = Stores::from_app_config(&config).await?;
//!     let factory = CollectionsServiceFactory::new(config.clone(), stores);
//!     Ok(axum::Router::new().nest("/api", routes(config, &factory)))
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `POST /favorites`, `GET /favorites`, `DELETE /favorites/{hotel_id}`
//! - `GET /history`, `DELETE /history`, `DELETE /history/{history_id}`

pub mod auth;
pub mod denormalize;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod error;
pub mod favorites;
pub mod handlers;
pub mod history;
pub mod models;
pub mod pagination;
#[cfg(test)]
mod pagination_proptest;
pub mod routes;
pub mod service;

pub use error::{Entity, FavoriteError, HistoryError, Operation};
pub use favorites::FavoriteService;
pub use history::HistoryService;
pub use pagination::{ListDefaults, Page, PageQuery, PageRequest};
pub use routes::{favorite_routes, history_routes, routes};
pub use service::CollectionsServiceFactory;

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::CollectionsApiDoc;
}
