//! Configuration loading for Hotelhub.
//!
//! Sources are layered in this order, later ones winning:
//!
//! 1. built-in defaults
//! 2. `config/default.{toml,yaml,json}`
//! 3. `config/{RUN_ENV}.{toml,yaml,json}` (`RUN_ENV` defaults to `debug`)
//! 4. environment variables prefixed with `HOTELHUB`, using `__` as the
//!    nesting separator (e.g. `HOTELHUB__SERVER__PORT=9000`)
//!
//! A `.env` file is loaded into the process environment once before any
//! source is read.

use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
use tracing::debug;

pub mod models;
pub use models::*;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "HOTELHUB";

/// The separator for nested configuration keys in environment variables
pub const CONFIG_SEPARATOR: &str = "__";

type Builder = ConfigBuilder<config::builder::DefaultState>;

/// Load the application configuration from files and the environment.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string());
    let config_dir = PathBuf::from(env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);
    debug!(
        "Loading config from {} and {} (prefix {})",
        default_path.display(),
        env_path.display(),
        prefix
    );

    let builder = with_defaults(Config::builder())?
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .separator(CONFIG_SEPARATOR)
                .try_parsing(true),
        );

    builder.build()?.try_deserialize()
}

/// Parse a TOML document layered over the built-in defaults.
///
/// Environment variables are not consulted, which keeps the result
/// deterministic for tests and tooling.
pub fn load_config_from_str(toml: &str) -> Result<AppConfig, ConfigError> {
    with_defaults(Config::builder())?
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()
}

fn with_defaults(builder: Builder) -> Result<Builder, ConfigError> {
    let defaults = AppConfig::default();
    builder
        .set_default("server.host", defaults.server.host)?
        .set_default("server.port", i64::from(defaults.server.port))?
        .set_default("use_favorites", defaults.use_favorites)?
        .set_default("use_history", defaults.use_history)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file name comes from `DOTENV_OVERRIDE`, or the first command line
/// argument when it starts with `.env`, and falls back to `.env`. Loading
/// happens at most once per process; a missing file is not an error.
///
/// Returns the path that was (or would have been) loaded.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
