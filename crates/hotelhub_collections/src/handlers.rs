//! HTTP handlers for favorites and view history
//!
//! Every handler identifies the caller through [`CurrentUser`] and reports
//! failures as `{"error": {"message", "code"}}` with the business code.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Path, Query, State};
use hotelhub_common::{handle_json_result, validation_error, HotelhubError};
use std::sync::Arc;
use tracing::debug;

use crate::auth::CurrentUser;
use crate::favorites::FavoriteService;
use crate::history::HistoryService;
use crate::models::{
    AddFavoriteRequest, FavoriteAdded, FavoriteItem, FavoriteRemoved, HistoryCleared, HistoryItem,
    HistoryRemoved,
};
use crate::pagination::{Page, PageQuery};

/// Shared state for the favorite handlers
#[derive(Clone, Debug)]
pub struct FavoritesState {
    pub service: Arc<FavoriteService>,
}

/// Shared state for the history handlers
#[derive(Clone, Debug)]
pub struct HistoryState {
    pub service: Arc<HistoryService>,
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/favorites",
    request_body = AddFavoriteRequest,
    params(("x-user-id" = String, Header, description = "Authenticated user id")),
    responses(
        (status = 200, description = "Hotel added to favorites", body = FavoriteAdded),
        (status = 400, description = "Already in favorites (code 5002) or invalid body", body = hotelhub_common::ErrorBody),
        (status = 401, description = "Missing user id", body = hotelhub_common::ErrorBody),
        (status = 500, description = "Internal Server Error", body = hotelhub_common::ErrorBody)
    ),
    tag = "Favorites"
))]
pub async fn add_favorite_handler(
    State(state): State<Arc<FavoritesState>>,
    user: CurrentUser,
    payload: Result<Json<AddFavoriteRequest>, JsonRejection>,
) -> Result<Json<FavoriteAdded>, HotelhubError> {
    let Json(payload) = payload.map_err(|rejection| validation_error(rejection.body_text()))?;
    let hotel_id = payload.hotel_id.trim();
    if hotel_id.is_empty() {
        return Err(validation_error("hotel_id must not be empty"));
    }

    debug!("POST /favorites for user {}", user.id());
    handle_json_result(state.service.add_favorite(user.id(), hotel_id).await)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/favorites/{hotel_id}",
    params(
        ("hotel_id" = String, Path, description = "Hotel to remove from favorites"),
        ("x-user-id" = String, Header, description = "Authenticated user id")
    ),
    responses(
        (status = 200, description = "Favorite removed", body = FavoriteRemoved),
        (status = 401, description = "Missing user id", body = hotelhub_common::ErrorBody),
        (status = 404, description = "Favorite not found (code 5001)", body = hotelhub_common::ErrorBody),
        (status = 500, description = "Internal Server Error", body = hotelhub_common::ErrorBody)
    ),
    tag = "Favorites"
))]
pub async fn remove_favorite_handler(
    State(state): State<Arc<FavoritesState>>,
    user: CurrentUser,
    Path(hotel_id): Path<String>,
) -> Result<Json<FavoriteRemoved>, HotelhubError> {
    debug!("DELETE /favorites/{} for user {}", hotel_id, user.id());
    handle_json_result(state.service.remove_favorite(user.id(), &hotel_id).await)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/favorites",
    params(
        PageQuery,
        ("x-user-id" = String, Header, description = "Authenticated user id")
    ),
    responses(
        (status = 200, description = "One page of favorites, newest first", body = Page<FavoriteItem>),
        (status = 401, description = "Missing user id", body = hotelhub_common::ErrorBody),
        (status = 500, description = "Internal Server Error", body = hotelhub_common::ErrorBody)
    ),
    tag = "Favorites"
))]
pub async fn list_favorites_handler(
    State(state): State<Arc<FavoritesState>>,
    user: CurrentUser,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Page<FavoriteItem>>, HotelhubError> {
    let Query(query) = query.map_err(|rejection| validation_error(rejection.body_text()))?;
    debug!("GET /favorites for user {} ({:?})", user.id(), query);
    handle_json_result(state.service.list_favorites(user.id(), &query).await)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/history",
    params(
        PageQuery,
        ("x-user-id" = String, Header, description = "Authenticated user id")
    ),
    responses(
        (status = 200, description = "One page of history, most recent first", body = Page<HistoryItem>),
        (status = 401, description = "Missing user id", body = hotelhub_common::ErrorBody),
        (status = 500, description = "Internal Server Error", body = hotelhub_common::ErrorBody)
    ),
    tag = "History"
))]
pub async fn list_history_handler(
    State(state): State<Arc<HistoryState>>,
    user: CurrentUser,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Page<HistoryItem>>, HotelhubError> {
    let Query(query) = query.map_err(|rejection| validation_error(rejection.body_text()))?;
    debug!("GET /history for user {} ({:?})", user.id(), query);
    handle_json_result(state.service.list_history(user.id(), &query).await)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/history/{history_id}",
    params(
        ("history_id" = i64, Path, description = "History entry to remove"),
        ("x-user-id" = String, Header, description = "Authenticated user id")
    ),
    responses(
        (status = 200, description = "History entry removed", body = HistoryRemoved),
        (status = 400, description = "Malformed history id", body = hotelhub_common::ErrorBody),
        (status = 401, description = "Missing user id", body = hotelhub_common::ErrorBody),
        (status = 404, description = "History entry not found", body = hotelhub_common::ErrorBody),
        (status = 500, description = "Internal Server Error", body = hotelhub_common::ErrorBody)
    ),
    tag = "History"
))]
pub async fn remove_history_handler(
    State(state): State<Arc<HistoryState>>,
    user: CurrentUser,
    Path(history_id): Path<String>,
) -> Result<Json<HistoryRemoved>, HotelhubError> {
    let history_id: i64 = history_id
        .trim()
        .parse()
        .map_err(|_| validation_error(format!("Invalid history id: {}", history_id)))?;

    debug!("DELETE /history/{} for user {}", history_id, user.id());
    handle_json_result(state.service.remove_history(user.id(), history_id).await)
}

#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/history",
    params(("x-user-id" = String, Header, description = "Authenticated user id")),
    responses(
        (status = 200, description = "History cleared", body = HistoryCleared),
        (status = 401, description = "Missing user id", body = hotelhub_common::ErrorBody),
        (status = 500, description = "Internal Server Error", body = hotelhub_common::ErrorBody)
    ),
    tag = "History"
))]
pub async fn clear_history_handler(
    State(state): State<Arc<HistoryState>>,
    user: CurrentUser,
) -> Result<Json<HistoryCleared>, HotelhubError> {
    debug!("DELETE /history for user {}", user.id());
    handle_json_result(state.service.clear_history(user.id()).await)
}
