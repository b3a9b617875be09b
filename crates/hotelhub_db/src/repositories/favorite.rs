//! Store interface for favorites

use crate::error::DbError;
use crate::models::Favorite;
use hotelhub_common::BoxFuture;

/// Persistence for [`Favorite`] records.
///
/// Implementations must reject a second favorite for the same
/// (`user_id`, `hotel_id`) pair with [`DbError::UniqueViolation`], even when
/// two inserts race past a `find_one` check.
pub trait FavoriteStore: Send + Sync {
    /// Find the favorite a user holds for a hotel
    fn find_one<'a>(
        &'a self,
        user_id: &'a str,
        hotel_id: &'a str,
    ) -> BoxFuture<'a, Option<Favorite>, DbError>;

    /// Count a user's favorites and fetch one window of them, newest first
    /// (`created_at` descending, ties broken by id descending).
    fn find_and_count<'a>(
        &'a self,
        user_id: &'a str,
        limit: u32,
        offset: u64,
    ) -> BoxFuture<'a, (u64, Vec<Favorite>), DbError>;

    /// Create a favorite stamped with the current time
    fn create<'a>(&'a self, user_id: &'a str, hotel_id: &'a str) -> BoxFuture<'a, Favorite, DbError>;

    /// Delete a favorite previously returned by this store
    fn destroy_one<'a>(&'a self, favorite: &'a Favorite) -> BoxFuture<'a, (), DbError>;
}
