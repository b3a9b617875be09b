use hotelhub_common::{HotelhubError, HttpStatusCode};
use std::fmt;
use thiserror::Error;

/// The collection a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Favorite,
    History,
}

/// The service operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    List,
    Clear,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Favorite => write!(f, "favorite"),
            Entity::History => write!(f, "history"),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Add => "add",
            Operation::Remove => "remove",
            Operation::List => "list",
            Operation::Clear => "clear",
        };
        f.write_str(name)
    }
}

/// Business code for a hotel that is already in the user's favorites
pub const CODE_DUPLICATE_FAVORITE: u32 = 5002;
/// Business code for a favorite that does not exist
pub const CODE_FAVORITE_NOT_FOUND: u32 = 5001;
/// Business code for a history entry that does not exist for the user
pub const CODE_HISTORY_NOT_FOUND: u32 = 404;
/// Business code shared by every "unavailable" failure
pub const CODE_UNAVAILABLE: u32 = 500;

/// Failures of the favorites service.
///
/// The `*Unavailable` variants stand in for a store or catalog failure. The
/// underlying cause is logged where it happens and never carried here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FavoriteError {
    #[error("Hotel {hotel_id} is already in favorites")]
    DuplicateFavorite { hotel_id: String },

    #[error("Favorite for hotel {hotel_id} not found")]
    FavoriteNotFound { hotel_id: String },

    #[error("Failed to add favorite")]
    FavoriteAddUnavailable,

    #[error("Failed to remove favorite")]
    FavoriteRemoveUnavailable,

    #[error("Failed to get favorite list")]
    FavoriteListUnavailable,
}

impl FavoriteError {
    pub fn entity(&self) -> Entity {
        Entity::Favorite
    }

    pub fn operation(&self) -> Operation {
        match self {
            FavoriteError::DuplicateFavorite { .. } | FavoriteError::FavoriteAddUnavailable => {
                Operation::Add
            }
            FavoriteError::FavoriteNotFound { .. } | FavoriteError::FavoriteRemoveUnavailable => {
                Operation::Remove
            }
            FavoriteError::FavoriteListUnavailable => Operation::List,
        }
    }

    /// Numeric business code reported to clients
    pub fn code(&self) -> u32 {
        match self {
            FavoriteError::DuplicateFavorite { .. } => CODE_DUPLICATE_FAVORITE,
            FavoriteError::FavoriteNotFound { .. } => CODE_FAVORITE_NOT_FOUND,
            _ => CODE_UNAVAILABLE,
        }
    }
}

impl HttpStatusCode for FavoriteError {
    fn status_code(&self) -> u16 {
        match self {
            FavoriteError::DuplicateFavorite { .. } => 400,
            FavoriteError::FavoriteNotFound { .. } => 404,
            FavoriteError::FavoriteAddUnavailable
            | FavoriteError::FavoriteRemoveUnavailable
            | FavoriteError::FavoriteListUnavailable => 500,
        }
    }
}

/// Failures of the view-history service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("History entry {history_id} not found")]
    HistoryEntryNotFound { history_id: i64 },

    #[error("Failed to get history list")]
    HistoryListUnavailable,

    #[error("Failed to remove history entry")]
    HistoryRemoveUnavailable,

    #[error("Failed to clear history")]
    HistoryClearUnavailable,
}

impl HistoryError {
    pub fn entity(&self) -> Entity {
        Entity::History
    }

    pub fn operation(&self) -> Operation {
        match self {
            HistoryError::HistoryEntryNotFound { .. } | HistoryError::HistoryRemoveUnavailable => {
                Operation::Remove
            }
            HistoryError::HistoryListUnavailable => Operation::List,
            HistoryError::HistoryClearUnavailable => Operation::Clear,
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            HistoryError::HistoryEntryNotFound { .. } => CODE_HISTORY_NOT_FOUND,
            _ => CODE_UNAVAILABLE,
        }
    }
}

impl HttpStatusCode for HistoryError {
    fn status_code(&self) -> u16 {
        match self {
            HistoryError::HistoryEntryNotFound { .. } => 404,
            HistoryError::HistoryListUnavailable
            | HistoryError::HistoryRemoveUnavailable
            | HistoryError::HistoryClearUnavailable => 500,
        }
    }
}

/// Convert FavoriteError to HotelhubError
impl From<FavoriteError> for HotelhubError {
    fn from(err: FavoriteError) -> Self {
        HotelhubError::DomainError {
            status: err.status_code(),
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Convert HistoryError to HotelhubError
impl From<HistoryError> for HotelhubError {
    fn from(err: HistoryError) -> Self {
        HotelhubError::DomainError {
            status: err.status_code(),
            code: err.code(),
            message: err.to_string(),
        }
    }
}
