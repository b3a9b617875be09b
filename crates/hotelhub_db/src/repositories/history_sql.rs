//! SQL implementation of the history store

use crate::error::DbError;
use crate::models::{datetime_from_millis, HistoryEntry, NewHistoryEntry};
use crate::repositories::history::HistoryStore;
use crate::repositories::{count_to_u64, to_sql_int};
use crate::DbClient;
use hotelhub_common::BoxFuture;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

/// SQL implementation of [`HistoryStore`]
#[derive(Debug, Clone)]
pub struct SqlHistoryRepository {
    db_client: DbClient,
}

impl SqlHistoryRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    /// Create the `histories` table and its per-user index if they don't exist
    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing history schema");

        let table = r#"
            CREATE TABLE IF NOT EXISTS histories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                hotel_id TEXT NOT NULL,
                viewed_at BIGINT NOT NULL
            )
        "#;
        let index = r#"
            CREATE INDEX IF NOT EXISTS idx_histories_user_viewed
            ON histories (user_id, viewed_at)
        "#;

        self.db_client.execute(table).await?;
        self.db_client.execute(index).await?;

        info!("History schema initialized successfully");
        Ok(())
    }

    async fn fetch_one(&self, user_id: &str, history_id: i64) -> Result<Option<HistoryEntry>, DbError> {
        debug!("Finding history entry {} for user: {}", history_id, user_id);

        let query = r#"
            SELECT id, user_id, hotel_id, viewed_at
            FROM histories
            WHERE id = $1 AND user_id = $2
        "#;

        let row = sqlx::query(query)
            .bind(history_id)
            .bind(user_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find history entry: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        row.as_ref().map(entry_from_row).transpose()
    }

    async fn fetch_page(
        &self,
        user_id: &str,
        limit: u32,
        offset: u64,
    ) -> Result<(u64, Vec<HistoryEntry>), DbError> {
        debug!(
            "Listing history for user: {} (limit {}, offset {})",
            user_id, limit, offset
        );

        let mut tx = self.db_client.begin().await?;

        let total: i64 = sqlx::query("SELECT COUNT(*) AS total FROM histories WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await
            .and_then(|row| row.try_get("total"))
            .map_err(|e| {
                error!("Failed to count history entries: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        let query = r#"
            SELECT id, user_id, hotel_id, viewed_at
            FROM histories
            WHERE user_id = $1
            ORDER BY viewed_at DESC, id DESC
            LIMIT $2 OFFSET $3
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .bind(to_sql_int(u64::from(limit)))
            .bind(to_sql_int(offset))
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| {
                error!("Failed to list history entries: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        let entries = rows
            .iter()
            .map(entry_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((count_to_u64(total), entries))
    }

    async fn insert(&self, entry: NewHistoryEntry) -> Result<HistoryEntry, DbError> {
        debug!(
            "Recording view of hotel: {} for user: {}",
            entry.hotel_id, entry.user_id
        );

        let query = r#"
            INSERT INTO histories (user_id, hotel_id, viewed_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, hotel_id, viewed_at
        "#;

        let row = sqlx::query(query)
            .bind(&entry.user_id)
            .bind(&entry.hotel_id)
            .bind(entry.viewed_at.timestamp_millis())
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert history entry: {}", e);
                DbError::from_write(e)
            })?;

        entry_from_row(&row)
    }

    async fn delete(&self, entry: &HistoryEntry) -> Result<(), DbError> {
        debug!("Deleting history entry: {}", entry.id);

        sqlx::query("DELETE FROM histories WHERE id = $1")
            .bind(entry.id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to delete history entry: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        info!("History entry {} deleted successfully", entry.id);
        Ok(())
    }

    async fn delete_all(&self, user_id: &str) -> Result<u64, DbError> {
        debug!("Clearing history for user: {}", user_id);

        let result = sqlx::query("DELETE FROM histories WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to clear history: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        info!(
            "Cleared {} history entries for user: {}",
            result.rows_affected(),
            user_id
        );
        Ok(result.rows_affected())
    }
}

impl HistoryStore for SqlHistoryRepository {
    fn find_one<'a>(
        &'a self,
        user_id: &'a str,
        history_id: i64,
    ) -> BoxFuture<'a, Option<HistoryEntry>, DbError> {
        Box::pin(self.fetch_one(user_id, history_id))
    }

    fn find_and_count<'a>(
        &'a self,
        user_id: &'a str,
        limit: u32,
        offset: u64,
    ) -> BoxFuture<'a, (u64, Vec<HistoryEntry>), DbError> {
        Box::pin(self.fetch_page(user_id, limit, offset))
    }

    fn create(&self, entry: NewHistoryEntry) -> BoxFuture<'_, HistoryEntry, DbError> {
        Box::pin(self.insert(entry))
    }

    fn destroy_one<'a>(&'a self, entry: &'a HistoryEntry) -> BoxFuture<'a, (), DbError> {
        Box::pin(self.delete(entry))
    }

    fn destroy_many<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, u64, DbError> {
        Box::pin(self.delete_all(user_id))
    }
}

fn entry_from_row(row: &AnyRow) -> Result<HistoryEntry, DbError> {
    let map = |e: sqlx::Error| DbError::RowError(e.to_string());
    Ok(HistoryEntry {
        id: row.try_get("id").map_err(map)?,
        user_id: row.try_get("user_id").map_err(map)?,
        hotel_id: row.try_get("hotel_id").map_err(map)?,
        viewed_at: datetime_from_millis(row.try_get("viewed_at").map_err(map)?),
    })
}
