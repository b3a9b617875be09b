//! The view-history service: list, remove one and clear a user's history.

use crate::denormalize::{history_item, hotel_ids, report_unresolved};
use crate::error::HistoryError;
use crate::models::{HistoryCleared, HistoryItem, HistoryRemoved};
use crate::pagination::{ListDefaults, Page, PageQuery};
use hotelhub_config::CollectionsConfig;
use hotelhub_db::{HistoryStore, HotelCatalog};
use std::sync::Arc;
use tracing::{debug, error, info};

/// View history for one backend instance. Entries are recorded elsewhere;
/// this service only reads and deletes them.
#[derive(Clone)]
pub struct HistoryService {
    store: Arc<dyn HistoryStore>,
    catalog: Arc<dyn HotelCatalog>,
    defaults: ListDefaults,
}

impl HistoryService {
    pub fn new(
        store: Arc<dyn HistoryStore>,
        catalog: Arc<dyn HotelCatalog>,
        config: &CollectionsConfig,
    ) -> Self {
        Self {
            store,
            catalog,
            defaults: ListDefaults::from_config(config),
        }
    }

    /// One page of a user's history, most recent view first. Entries whose
    /// hotel is unknown to the catalog carry no `hotel` object.
    pub async fn list_history(
        &self,
        user_id: &str,
        query: &PageQuery,
    ) -> Result<Page<HistoryItem>, HistoryError> {
        let request = self.defaults.resolve(query);
        debug!(
            "Listing history for user {} (page {}, size {})",
            user_id, request.page, request.page_size
        );

        let (total, entries) = self
            .store
            .find_and_count(user_id, request.limit(), request.offset())
            .await
            .map_err(|e| {
                error!("Failed to load history for user {}: {}", user_id, e);
                HistoryError::HistoryListUnavailable
            })?;

        let ids = hotel_ids(entries.iter().map(|e| e.hotel_id.as_str()));
        let hotels = self.catalog.find_by_ids(&ids).await.map_err(|e| {
            error!("Failed to resolve history hotels for user {}: {}", user_id, e);
            HistoryError::HistoryListUnavailable
        })?;
        report_unresolved("History", &ids, &hotels);

        let list = entries
            .iter()
            .map(|entry| history_item(entry, hotels.get(&entry.hotel_id)))
            .collect();

        Ok(Page::new(request, total, list))
    }

    /// Delete one entry. Only the owner's entries are visible, so another
    /// user's id is reported as not found.
    pub async fn remove_history(
        &self,
        user_id: &str,
        history_id: i64,
    ) -> Result<HistoryRemoved, HistoryError> {
        debug!("Removing history entry {} for user {}", history_id, user_id);

        let entry = self
            .store
            .find_one(user_id, history_id)
            .await
            .map_err(|e| {
                error!("History lookup failed for user {}: {}", user_id, e);
                HistoryError::HistoryRemoveUnavailable
            })?
            .ok_or(HistoryError::HistoryEntryNotFound { history_id })?;

        self.store.destroy_one(&entry).await.map_err(|e| {
            error!("Failed to delete history entry {}: {}", history_id, e);
            HistoryError::HistoryRemoveUnavailable
        })?;

        info!("User {} removed history entry {}", user_id, history_id);
        Ok(HistoryRemoved { history_id })
    }

    /// Delete every entry of a user. Clearing an empty history succeeds.
    pub async fn clear_history(&self, user_id: &str) -> Result<HistoryCleared, HistoryError> {
        debug!("Clearing history for user {}", user_id);

        let removed = self.store.destroy_many(user_id).await.map_err(|e| {
            error!("Failed to clear history for user {}: {}", user_id, e);
            HistoryError::HistoryClearUnavailable
        })?;

        info!("User {} cleared {} history entries", user_id, removed);
        Ok(HistoryCleared::success())
    }
}

impl std::fmt::Debug for HistoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryService")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}
