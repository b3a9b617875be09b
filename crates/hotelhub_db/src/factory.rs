//! Factories for database clients and store bundles
//!
//! The backend picks its stores from configuration: a `[database]` section
//! selects the SQL repositories, no section selects the in-memory store.

use crate::client::DbClient;
use crate::error::DbError;
use crate::repositories::{
    FavoriteStore, HistoryStore, HotelCatalog, MemoryStore, SqlFavoriteRepository,
    SqlHistoryRepository, SqlHotelCatalog,
};
use hotelhub_config::{AppConfig, DatabaseConfig};
use std::sync::Arc;
use tracing::{debug, info};

/// Factory for creating database clients
#[derive(Debug, Clone, Default)]
pub struct DbClientFactory;

impl DbClientFactory {
    pub fn new() -> Self {
        Self
    }

    /// Create a new database client from an application configuration
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    ///
    /// * The database configuration is missing
    /// * The database URL is missing
    /// * The database connection fails
    pub async fn from_app_config(&self, config: &AppConfig) -> Result<DbClient, DbError> {
        debug!("Creating database client from application configuration");

        let db_config = config
            .database
            .as_ref()
            .ok_or_else(|| DbError::ConfigError("Database configuration is missing".to_string()))?;

        self.from_db_config(db_config).await
    }

    /// Create a new database client from a database configuration
    pub async fn from_db_config(&self, db_config: &DatabaseConfig) -> Result<DbClient, DbError> {
        debug!("Creating database client from database configuration");
        DbClient::from_config(db_config).await
    }

    /// Create a new database client from a database URL
    pub async fn from_url(&self, db_url: &str) -> Result<DbClient, DbError> {
        debug!("Creating database client from URL");
        DbClient::from_url(db_url).await
    }
}

/// The three collaborators the collection services need, type-erased.
#[derive(Clone)]
pub struct Stores {
    pub favorites: Arc<dyn FavoriteStore>,
    pub history: Arc<dyn HistoryStore>,
    pub hotels: Arc<dyn HotelCatalog>,
}

impl Stores {
    /// SQL repositories sharing one client. Tables are created if missing.
    pub async fn sql(db_client: DbClient) -> Result<Self, DbError> {
        let favorites = SqlFavoriteRepository::new(db_client.clone());
        let history = SqlHistoryRepository::new(db_client.clone());
        let hotels = SqlHotelCatalog::new(db_client);

        favorites.init_schema().await?;
        history.init_schema().await?;
        hotels.init_schema().await?;

        Ok(Self {
            favorites: Arc::new(favorites),
            history: Arc::new(history),
            hotels: Arc::new(hotels),
        })
    }

    /// One in-memory store serving all three roles
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            favorites: store.clone(),
            history: store.clone(),
            hotels: store,
        }
    }

    /// Build the stores the configuration asks for.
    pub async fn from_app_config(config: &AppConfig) -> Result<Self, DbError> {
        match config.database {
            Some(ref db_config) => {
                let client = DbClientFactory::new().from_db_config(db_config).await?;
                info!("Using SQL stores ({})", client);
                Self::sql(client).await
            }
            None => {
                info!("No database configured, using the in-memory store");
                Ok(Self::memory(Arc::new(MemoryStore::new())))
            }
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotelhub_config::DatabaseConfig;

    #[tokio::test]
    async fn test_no_database_section_selects_memory_store() {
        let stores = Stores::from_app_config(&AppConfig::default()).await.unwrap();
        let (total, _) = stores.favorites.find_and_count("u1", 10, 0).await.unwrap();
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_database_section_creates_schema() {
        let config = AppConfig {
            database: Some(DatabaseConfig {
                url: "sqlite::memory:".to_string(),
            }),
            ..AppConfig::default()
        };
        let stores = Stores::from_app_config(&config).await.unwrap();

        let favorite = stores.favorites.create("u1", "h1").await.unwrap();
        assert_eq!(favorite.hotel_id, "h1");
        assert!(stores.hotels.find_by_ids(&["h1".to_string()]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_factory_rejects_missing_database_section() {
        let result = DbClientFactory::new()
            .from_app_config(&AppConfig::default())
            .await;
        assert!(matches!(result, Err(DbError::ConfigError(_))));
    }
}
