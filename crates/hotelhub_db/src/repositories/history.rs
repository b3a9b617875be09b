//! Store interface for the view history log

use crate::error::DbError;
use crate::models::{HistoryEntry, NewHistoryEntry};
use hotelhub_common::BoxFuture;

/// Persistence for [`HistoryEntry`] records. Entries are never unique.
pub trait HistoryStore: Send + Sync {
    /// Find an entry by id, only if it belongs to `user_id`
    fn find_one<'a>(
        &'a self,
        user_id: &'a str,
        history_id: i64,
    ) -> BoxFuture<'a, Option<HistoryEntry>, DbError>;

    /// Count a user's entries and fetch one window of them, most recent view
    /// first (`viewed_at` descending, ties broken by id descending).
    fn find_and_count<'a>(
        &'a self,
        user_id: &'a str,
        limit: u32,
        offset: u64,
    ) -> BoxFuture<'a, (u64, Vec<HistoryEntry>), DbError>;

    /// Append an entry to the log
    fn create(&self, entry: NewHistoryEntry) -> BoxFuture<'_, HistoryEntry, DbError>;

    fn destroy_one<'a>(&'a self, entry: &'a HistoryEntry) -> BoxFuture<'a, (), DbError>;

    /// Delete every entry of a user, returning how many were removed
    fn destroy_many<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, u64, DbError>;
}
