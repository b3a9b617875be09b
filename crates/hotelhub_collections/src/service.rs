//! Builds the collection services from configuration and stores.

use crate::favorites::FavoriteService;
use crate::history::HistoryService;
use hotelhub_config::AppConfig;
use hotelhub_db::Stores;
use std::sync::Arc;

/// Wires one set of stores into both services.
#[derive(Debug, Clone)]
pub struct CollectionsServiceFactory {
    config: Arc<AppConfig>,
    stores: Stores,
}

impl CollectionsServiceFactory {
    pub fn new(config: Arc<AppConfig>, stores: Stores) -> Self {
        Self { config, stores }
    }

    pub fn favorite_service(&self) -> Arc<FavoriteService> {
        Arc::new(FavoriteService::new(
            self.stores.favorites.clone(),
            self.stores.hotels.clone(),
            &self.config.collections,
        ))
    }

    pub fn history_service(&self) -> Arc<HistoryService> {
        Arc::new(HistoryService::new(
            self.stores.history.clone(),
            self.stores.hotels.clone(),
            &self.config.collections,
        ))
    }
}
