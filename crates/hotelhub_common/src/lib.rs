// --- File: crates/hotelhub_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP error responses
pub mod logging; // Logging utilities
pub mod services; // Collaborator abstractions

// Re-export error types and utilities for easier access
pub use error::{auth_error, validation_error, Context, HotelhubError, HttpStatusCode};

// Re-export HTTP utilities for easier access
pub use http::{handle_json_result, ErrorBody, ErrorDetail, IntoHttpResponse};

// Re-export logging utilities for easier access
pub use logging::{init, init_from_config, init_with_level};

pub use services::BoxFuture;
