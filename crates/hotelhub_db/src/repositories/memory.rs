//! In-memory store used when no database is configured, and by tests.

use crate::error::DbError;
use crate::models::{Favorite, HistoryEntry, Hotel, NewHistoryEntry};
use crate::repositories::{FavoriteStore, HistoryStore, HotelCatalog};
use chrono::Utc;
use hotelhub_common::BoxFuture;
use std::collections::HashMap;
use std::future;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug, Default)]
struct MemoryState {
    favorites: Vec<Favorite>,
    histories: Vec<HistoryEntry>,
    hotels: HashMap<String, Hotel>,
    last_favorite_id: i64,
    last_history_id: i64,
}

/// Favorites, history and a hotel catalog kept behind one mutex.
///
/// Ordering and uniqueness match the SQL repositories. The lock is only held
/// for the synchronous body of each call.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a catalog hotel
    pub fn insert_hotel(&self, hotel: Hotel) -> Result<(), DbError> {
        let mut state = self.lock()?;
        state.hotels.insert(hotel.id.clone(), hotel);
        Ok(())
    }

    pub fn remove_hotel(&self, hotel_id: &str) -> Result<Option<Hotel>, DbError> {
        Ok(self.lock()?.hotels.remove(hotel_id))
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, DbError> {
        self.state
            .lock()
            .map_err(|_| DbError::Other("memory store lock poisoned".to_string()))
    }

    fn run<'a, T, F>(&'a self, op: F) -> BoxFuture<'a, T, DbError>
    where
        T: Send + 'a,
        F: FnOnce(&mut MemoryState) -> Result<T, DbError>,
    {
        let result = self.lock().and_then(|mut state| op(&mut *state));
        Box::pin(future::ready(result))
    }
}

fn window<T: Clone>(rows: &[&T], limit: u32, offset: u64) -> Vec<T> {
    let offset = usize::try_from(offset).unwrap_or(usize::MAX);
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    rows.iter()
        .skip(offset)
        .take(limit)
        .map(|row| (*row).clone())
        .collect()
}

impl FavoriteStore for MemoryStore {
    fn find_one<'a>(
        &'a self,
        user_id: &'a str,
        hotel_id: &'a str,
    ) -> BoxFuture<'a, Option<Favorite>, DbError> {
        self.run(|state| {
            Ok(state
                .favorites
                .iter()
                .find(|f| f.user_id == user_id && f.hotel_id == hotel_id)
                .cloned())
        })
    }

    fn find_and_count<'a>(
        &'a self,
        user_id: &'a str,
        limit: u32,
        offset: u64,
    ) -> BoxFuture<'a, (u64, Vec<Favorite>), DbError> {
        self.run(move |state| {
            let mut rows: Vec<&Favorite> = state
                .favorites
                .iter()
                .filter(|f| f.user_id == user_id)
                .collect();
            rows.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then_with(|| b.id.cmp(&a.id))
            });
            Ok((rows.len() as u64, window(&rows, limit, offset)))
        })
    }

    fn create<'a>(&'a self, user_id: &'a str, hotel_id: &'a str) -> BoxFuture<'a, Favorite, DbError> {
        self.run(|state| {
            if state
                .favorites
                .iter()
                .any(|f| f.user_id == user_id && f.hotel_id == hotel_id)
            {
                return Err(DbError::UniqueViolation(format!(
                    "favorite ({}, {}) already exists",
                    user_id, hotel_id
                )));
            }

            state.last_favorite_id += 1;
            let favorite = Favorite {
                id: state.last_favorite_id,
                user_id: user_id.to_string(),
                hotel_id: hotel_id.to_string(),
                created_at: Utc::now(),
            };
            state.favorites.push(favorite.clone());
            debug!("Created in-memory favorite {}", favorite.id);
            Ok(favorite)
        })
    }

    fn destroy_one<'a>(&'a self, favorite: &'a Favorite) -> BoxFuture<'a, (), DbError> {
        self.run(|state| {
            state.favorites.retain(|f| f.id != favorite.id);
            Ok(())
        })
    }
}

impl HistoryStore for MemoryStore {
    fn find_one<'a>(
        &'a self,
        user_id: &'a str,
        history_id: i64,
    ) -> BoxFuture<'a, Option<HistoryEntry>, DbError> {
        self.run(move |state| {
            Ok(state
                .histories
                .iter()
                .find(|e| e.id == history_id && e.user_id == user_id)
                .cloned())
        })
    }

    fn find_and_count<'a>(
        &'a self,
        user_id: &'a str,
        limit: u32,
        offset: u64,
    ) -> BoxFuture<'a, (u64, Vec<HistoryEntry>), DbError> {
        self.run(move |state| {
            let mut rows: Vec<&HistoryEntry> = state
                .histories
                .iter()
                .filter(|e| e.user_id == user_id)
                .collect();
            rows.sort_by(|a, b| {
                b.viewed_at
                    .cmp(&a.viewed_at)
                    .then_with(|| b.id.cmp(&a.id))
            });
            Ok((rows.len() as u64, window(&rows, limit, offset)))
        })
    }

    fn create(&self, entry: NewHistoryEntry) -> BoxFuture<'_, HistoryEntry, DbError> {
        self.run(move |state| {
            state.last_history_id += 1;
            let entry = HistoryEntry {
                id: state.last_history_id,
                user_id: entry.user_id,
                hotel_id: entry.hotel_id,
                viewed_at: entry.viewed_at,
            };
            state.histories.push(entry.clone());
            Ok(entry)
        })
    }

    fn destroy_one<'a>(&'a self, entry: &'a HistoryEntry) -> BoxFuture<'a, (), DbError> {
        self.run(|state| {
            state.histories.retain(|e| e.id != entry.id);
            Ok(())
        })
    }

    fn destroy_many<'a>(&'a self, user_id: &'a str) -> BoxFuture<'a, u64, DbError> {
        self.run(|state| {
            let before = state.histories.len();
            state.histories.retain(|e| e.user_id != user_id);
            Ok((before - state.histories.len()) as u64)
        })
    }
}

impl HotelCatalog for MemoryStore {
    fn find_by_ids<'a>(&'a self, ids: &'a [String]) -> BoxFuture<'a, HashMap<String, Hotel>, DbError> {
        self.run(|state| {
            Ok(ids
                .iter()
                .filter_map(|id| state.hotels.get(id))
                .map(|hotel| (hotel.id.clone(), hotel.clone()))
                .collect())
        })
    }
}
