//! SQL implementation of the favorite store

use crate::error::DbError;
use crate::models::{datetime_from_millis, Favorite};
use crate::repositories::favorite::FavoriteStore;
use crate::repositories::{count_to_u64, to_sql_int};
use crate::DbClient;
use chrono::Utc;
use hotelhub_common::BoxFuture;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

/// SQL implementation of [`FavoriteStore`]
#[derive(Debug, Clone)]
pub struct SqlFavoriteRepository {
    /// The database client
    db_client: DbClient,
}

impl SqlFavoriteRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    /// Create the `favorites` table if it doesn't exist.
    ///
    /// `UNIQUE(user_id, hotel_id)` is what ultimately guarantees one
    /// favorite per pair.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing favorites schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS favorites (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                hotel_id TEXT NOT NULL,
                created_at BIGINT NOT NULL,
                UNIQUE(user_id, hotel_id)
            )
        "#;

        self.db_client.execute(query).await?;

        info!("Favorites schema initialized successfully");
        Ok(())
    }

    async fn fetch_one(&self, user_id: &str, hotel_id: &str) -> Result<Option<Favorite>, DbError> {
        debug!("Finding favorite for user: {} and hotel: {}", user_id, hotel_id);

        let query = r#"
            SELECT id, user_id, hotel_id, created_at
            FROM favorites
            WHERE user_id = $1 AND hotel_id = $2
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .bind(hotel_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find favorite: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        row.as_ref().map(favorite_from_row).transpose()
    }

    async fn fetch_page(
        &self,
        user_id: &str,
        limit: u32,
        offset: u64,
    ) -> Result<(u64, Vec<Favorite>), DbError> {
        debug!(
            "Listing favorites for user: {} (limit {}, offset {})",
            user_id, limit, offset
        );

        let mut tx = self.db_client.begin().await?;

        let total: i64 = sqlx::query("SELECT COUNT(*) AS total FROM favorites WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await
            .and_then(|row| row.try_get("total"))
            .map_err(|e| {
                error!("Failed to count favorites: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        let query = r#"
            SELECT id, user_id, hotel_id, created_at
            FROM favorites
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .bind(to_sql_int(u64::from(limit)))
            .bind(to_sql_int(offset))
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| {
                error!("Failed to list favorites: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        let favorites = rows
            .iter()
            .map(favorite_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((count_to_u64(total), favorites))
    }

    async fn insert(&self, user_id: &str, hotel_id: &str) -> Result<Favorite, DbError> {
        debug!("Creating favorite for user: {} and hotel: {}", user_id, hotel_id);

        let query = r#"
            INSERT INTO favorites (user_id, hotel_id, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, hotel_id, created_at
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .bind(hotel_id)
            .bind(Utc::now().timestamp_millis())
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert favorite: {}", e);
                DbError::from_write(e)
            })?;

        let favorite = favorite_from_row(&row)?;
        info!("Favorite {} created successfully", favorite.id);
        Ok(favorite)
    }

    async fn delete(&self, favorite: &Favorite) -> Result<(), DbError> {
        debug!("Deleting favorite: {}", favorite.id);

        sqlx::query("DELETE FROM favorites WHERE id = $1")
            .bind(favorite.id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to delete favorite: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        info!("Favorite {} deleted successfully", favorite.id);
        Ok(())
    }
}

impl FavoriteStore for SqlFavoriteRepository {
    fn find_one<'a>(
        &'a self,
        user_id: &'a str,
        hotel_id: &'a str,
    ) -> BoxFuture<'a, Option<Favorite>, DbError> {
        Box::pin(self.fetch_one(user_id, hotel_id))
    }

    fn find_and_count<'a>(
        &'a self,
        user_id: &'a str,
        limit: u32,
        offset: u64,
    ) -> BoxFuture<'a, (u64, Vec<Favorite>), DbError> {
        Box::pin(self.fetch_page(user_id, limit, offset))
    }

    fn create<'a>(&'a self, user_id: &'a str, hotel_id: &'a str) -> BoxFuture<'a, Favorite, DbError> {
        Box::pin(self.insert(user_id, hotel_id))
    }

    fn destroy_one<'a>(&'a self, favorite: &'a Favorite) -> BoxFuture<'a, (), DbError> {
        Box::pin(self.delete(favorite))
    }
}

fn favorite_from_row(row: &AnyRow) -> Result<Favorite, DbError> {
    let map = |e: sqlx::Error| DbError::RowError(e.to_string());
    Ok(Favorite {
        id: row.try_get("id").map_err(map)?,
        user_id: row.try_get("user_id").map_err(map)?,
        hotel_id: row.try_get("hotel_id").map_err(map)?,
        created_at: datetime_from_millis(row.try_get("created_at").map_err(map)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repository() -> SqlFavoriteRepository {
        let client = DbClient::from_url("sqlite::memory:").await.unwrap();
        let repository = SqlFavoriteRepository::new(client);
        repository.init_schema().await.unwrap();
        repository
    }

    #[tokio::test]
    async fn test_create_then_find_one() {
        let repository = repository().await;

        let created = repository.create("u1", "h1").await.unwrap();
        assert_eq!(created.user_id, "u1");
        assert_eq!(created.hotel_id, "h1");

        let found = repository.find_one("u1", "h1").await.unwrap();
        assert_eq!(found, Some(created));
        assert_eq!(repository.find_one("u2", "h1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_second_insert_for_pair_is_a_unique_violation() {
        let repository = repository().await;

        repository.create("u1", "h1").await.unwrap();
        let result = repository.create("u1", "h1").await;
        assert!(matches!(result, Err(DbError::UniqueViolation(_))));

        // Another user may still favorite the same hotel
        repository.create("u2", "h1").await.unwrap();
        let (total, _) = repository.find_and_count("u1", 10, 0).await.unwrap();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_page_is_newest_first_with_full_count() {
        let repository = repository().await;
        for i in 0..5 {
            repository.create("u1", &format!("h{}", i)).await.unwrap();
        }
        repository.create("u2", "h0").await.unwrap();

        let (total, page) = repository.find_and_count("u1", 2, 2).await.unwrap();
        assert_eq!(total, 5);
        let hotels: Vec<_> = page.iter().map(|f| f.hotel_id.as_str()).collect();
        assert_eq!(hotels, vec!["h2", "h1"]);

        let (total, page) = repository.find_and_count("u1", 10, 50).await.unwrap();
        assert_eq!(total, 5);
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_destroy_one_removes_only_that_row() {
        let repository = repository().await;
        let first = repository.create("u1", "h1").await.unwrap();
        repository.create("u1", "h2").await.unwrap();

        repository.destroy_one(&first).await.unwrap();

        assert_eq!(repository.find_one("u1", "h1").await.unwrap(), None);
        assert!(repository.find_one("u1", "h2").await.unwrap().is_some());
    }
}
