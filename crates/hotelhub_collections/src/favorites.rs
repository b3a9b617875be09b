//! The favorites service: add, remove and list a user's bookmarked hotels.

use crate::denormalize::{favorite_item, hotel_ids, report_unresolved};
use crate::error::FavoriteError;
use crate::models::{FavoriteAdded, FavoriteItem, FavoriteRemoved};
use crate::pagination::{ListDefaults, Page, PageQuery};
use hotelhub_config::CollectionsConfig;
use hotelhub_db::{DbError, FavoriteStore, HotelCatalog};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Favorites for one backend instance.
///
/// Uniqueness per (user, hotel) is checked up front for a clear error, but
/// the store's own constraint has the final word.
#[derive(Clone)]
pub struct FavoriteService {
    store: Arc<dyn FavoriteStore>,
    catalog: Arc<dyn HotelCatalog>,
    defaults: ListDefaults,
    unknown_hotel_name: String,
}

impl FavoriteService {
    pub fn new(
        store: Arc<dyn FavoriteStore>,
        catalog: Arc<dyn HotelCatalog>,
        config: &CollectionsConfig,
    ) -> Self {
        Self {
            store,
            catalog,
            defaults: ListDefaults::from_config(config),
            unknown_hotel_name: config.unknown_hotel_name.clone(),
        }
    }

    /// Bookmark a hotel for a user.
    ///
    /// # Errors
    ///
    /// * `DuplicateFavorite` if the pair already exists, whether found by the
    ///   lookup or rejected by the store on insert
    /// * `FavoriteAddUnavailable` if the store fails
    pub async fn add_favorite(&self, user_id: &str, hotel_id: &str) -> Result<FavoriteAdded, FavoriteError> {
        debug!("Adding favorite hotel {} for user {}", hotel_id, user_id);

        let existing = self.store.find_one(user_id, hotel_id).await.map_err(|e| {
            error!("Favorite lookup failed for user {}: {}", user_id, e);
            FavoriteError::FavoriteAddUnavailable
        })?;
        if existing.is_some() {
            return Err(FavoriteError::DuplicateFavorite {
                hotel_id: hotel_id.to_string(),
            });
        }

        match self.store.create(user_id, hotel_id).await {
            Ok(favorite) => {
                info!("User {} added hotel {} to favorites", user_id, hotel_id);
                Ok(FavoriteAdded {
                    favorite_id: favorite.id,
                })
            }
            Err(DbError::UniqueViolation(_)) => {
                debug!(
                    "Concurrent insert of favorite ({}, {}) lost to the store constraint",
                    user_id, hotel_id
                );
                Err(FavoriteError::DuplicateFavorite {
                    hotel_id: hotel_id.to_string(),
                })
            }
            Err(e) => {
                error!("Failed to create favorite for user {}: {}", user_id, e);
                Err(FavoriteError::FavoriteAddUnavailable)
            }
        }
    }

    /// Remove a user's bookmark of a hotel, echoing the hotel id.
    pub async fn remove_favorite(
        &self,
        user_id: &str,
        hotel_id: &str,
    ) -> Result<FavoriteRemoved, FavoriteError> {
        debug!("Removing favorite hotel {} for user {}", hotel_id, user_id);

        let favorite = self
            .store
            .find_one(user_id, hotel_id)
            .await
            .map_err(|e| {
                error!("Favorite lookup failed for user {}: {}", user_id, e);
                FavoriteError::FavoriteRemoveUnavailable
            })?
            .ok_or_else(|| FavoriteError::FavoriteNotFound {
                hotel_id: hotel_id.to_string(),
            })?;

        self.store.destroy_one(&favorite).await.map_err(|e| {
            error!("Failed to delete favorite {}: {}", favorite.id, e);
            FavoriteError::FavoriteRemoveUnavailable
        })?;

        info!("User {} removed hotel {} from favorites", user_id, hotel_id);
        Ok(FavoriteRemoved {
            hotel_id: hotel_id.to_string(),
        })
    }

    /// One page of a user's favorites, newest first, each joined to its
    /// hotel. Hotels missing from the catalog produce placeholder items.
    pub async fn list_favorites(
        &self,
        user_id: &str,
        query: &PageQuery,
    ) -> Result<Page<FavoriteItem>, FavoriteError> {
        let request = self.defaults.resolve(query);
        debug!(
            "Listing favorites for user {} (page {}, size {})",
            user_id, request.page, request.page_size
        );

        let (total, favorites) = self
            .store
            .find_and_count(user_id, request.limit(), request.offset())
            .await
            .map_err(|e| {
                error!("Failed to load favorites for user {}: {}", user_id, e);
                FavoriteError::FavoriteListUnavailable
            })?;

        let ids = hotel_ids(favorites.iter().map(|f| f.hotel_id.as_str()));
        let hotels = self.catalog.find_by_ids(&ids).await.map_err(|e| {
            error!("Failed to resolve favorite hotels for user {}: {}", user_id, e);
            FavoriteError::FavoriteListUnavailable
        })?;
        report_unresolved("Favorite", &ids, &hotels);

        let list = favorites
            .iter()
            .map(|favorite| {
                favorite_item(
                    favorite,
                    hotels.get(&favorite.hotel_id),
                    &self.unknown_hotel_name,
                )
            })
            .collect();

        Ok(Page::new(request, total, list))
    }
}

impl std::fmt::Debug for FavoriteService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoriteService")
            .field("defaults", &self.defaults)
            .field("unknown_hotel_name", &self.unknown_hotel_name)
            .finish_non_exhaustive()
    }
}
