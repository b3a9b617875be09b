use axum::{routing::get, Router};
use hotelhub_collections::CollectionsServiceFactory;
use hotelhub_config::AppConfig;
use hotelhub_db::{DbError, Stores};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared by everything mounted on the server.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub collections: CollectionsServiceFactory,
}

impl AppState {
    /// Connect the stores the configuration selects and wire the services.
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, DbError> {
        let stores = Stores::from_app_config(&config).await?;
        Ok(Self::with_stores(config, stores))
    }

    pub fn with_stores(config: Arc<AppConfig>, stores: Stores) -> Self {
        let collections = CollectionsServiceFactory::new(config.clone(), stores);
        Self {
            config,
            collections,
        }
    }

    /// The full application router: the API under `/api`, request tracing,
    /// and Swagger UI when built with `openapi`.
    pub fn router(&self) -> Router {
        let api_router = Router::new()
            .route("/", get(|| async { "Welcome to the Hotelhub API!" }))
            .merge(hotelhub_collections::routes(
                self.config.clone(),
                &self.collections,
            ));

        #[allow(unused_mut)]
        let mut app = Router::new().nest("/api", api_router);

        #[cfg(feature = "openapi")]
        {
            use hotelhub_collections::openapi::CollectionsApiDoc;
            use utoipa::OpenApi;
            use utoipa_swagger_ui::SwaggerUi;

            #[derive(OpenApi)]
            #[openapi(
                info(
                    title = "Hotelhub API",
                    version = "0.1.0",
                    description = "Favorites and view history for the Hotelhub mobile app"
                ),
                servers((url = "/api", description = "Main API Prefix")),
            )]
            struct ApiDoc;

            let mut openapi_doc = ApiDoc::openapi();
            openapi_doc.merge(CollectionsApiDoc::openapi());
            tracing::info!("Adding Swagger UI at /api/docs");

            let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
            app = app.merge(swagger_ui);
        }

        app.layer(TraceLayer::new_for_http())
    }
}
