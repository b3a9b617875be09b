use utoipa::OpenApi;

use crate::models::{
    AddFavoriteRequest, FavoriteAdded, FavoriteItem, FavoriteRemoved, HistoryCleared, HistoryHotel,
    HistoryItem, HistoryRemoved,
};
use hotelhub_common::{ErrorBody, ErrorDetail};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::add_favorite_handler,
        crate::handlers::remove_favorite_handler,
        crate::handlers::list_favorites_handler,
        crate::handlers::list_history_handler,
        crate::handlers::remove_history_handler,
        crate::handlers::clear_history_handler,
    ),
    components(
        schemas(
            AddFavoriteRequest,
            FavoriteAdded,
            FavoriteRemoved,
            FavoriteItem,
            HistoryItem,
            HistoryHotel,
            HistoryRemoved,
            HistoryCleared,
            ErrorBody,
            ErrorDetail,
        )
    ),
    tags(
        (name = "Favorites", description = "A user's bookmarked hotels"),
        (name = "History", description = "Hotels a user has viewed")
    ),
    servers(
        (url = "/api", description = "Hotelhub mobile API")
    )
)]
pub struct CollectionsApiDoc;
