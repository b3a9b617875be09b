// --- File: crates/hotelhub_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite://data/hotelhub.db, loaded via HOTELHUB__DATABASE__URL
}

// --- Favorites / History Config ---
// Defaults applied when a caller omits or garbles the paging parameters.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CollectionsConfig {
    #[serde(default = "default_page")]
    pub default_page: u32,
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Name shown for a favorite whose hotel is gone from the catalog.
    #[serde(default = "default_unknown_hotel_name")]
    pub unknown_hotel_name: String,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            default_page: default_page(),
            default_page_size: default_page_size(),
            unknown_hotel_name: default_unknown_hotel_name(),
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

fn default_unknown_hotel_name() -> String {
    "Unknown Hotel".to_string()
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn enabled() -> bool {
    true
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to true) ---
    #[serde(default = "enabled")]
    pub use_favorites: bool,
    #[serde(default = "enabled")]
    pub use_history: bool,

    // --- Optional Sections ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>, // None -> in-memory store
    #[serde(default)]
    pub collections: CollectionsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            use_favorites: true,
            use_history: true,
            database: None,
            collections: CollectionsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
