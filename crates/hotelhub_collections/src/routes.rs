use axum::{
    routing::{delete, get},
    Router,
};
use hotelhub_config::AppConfig;
use std::sync::Arc;
use tracing::info;

use crate::favorites::FavoriteService;
use crate::handlers::{
    add_favorite_handler, clear_history_handler, list_favorites_handler, list_history_handler,
    remove_favorite_handler, remove_history_handler, FavoritesState, HistoryState,
};
use crate::history::HistoryService;
use crate::service::CollectionsServiceFactory;

/// Routes for the favorites endpoints
pub fn favorite_routes(service: Arc<FavoriteService>) -> Router {
    let state = Arc::new(FavoritesState { service });

    Router::new()
        .route(
            "/favorites",
            get(list_favorites_handler).post(add_favorite_handler),
        )
        .route("/favorites/{hotel_id}", delete(remove_favorite_handler))
        .with_state(state)
}

/// Routes for the view-history endpoints
pub fn history_routes(service: Arc<HistoryService>) -> Router {
    let state = Arc::new(HistoryState { service });

    Router::new()
        .route(
            "/history",
            get(list_history_handler).delete(clear_history_handler),
        )
        .route("/history/{history_id}", delete(remove_history_handler))
        .with_state(state)
}

/// Create the collection routes enabled in the configuration.
///
/// The returned router is meant to be nested under `/api`.
pub fn routes(config: Arc<AppConfig>, factory: &CollectionsServiceFactory) -> Router {
    let mut router = Router::new();

    if config.use_favorites {
        info!("Mounting favorites routes");
        router = router.merge(favorite_routes(factory.favorite_service()));
    }

    if config.use_history {
        info!("Mounting history routes");
        router = router.merge(history_routes(factory.history_service()));
    }

    router
}
