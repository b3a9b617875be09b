use std::fmt;
use thiserror::Error;

/// The base error type for all Hotelhub errors.
///
/// Each crate extends this by implementing `From<SpecificError> for HotelhubError`.
#[derive(Error, Debug)]
pub enum HotelhubError {
    /// The caller could not be identified
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Input failed validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A domain failure that carries its own HTTP status and business code
    #[error("{message}")]
    DomainError {
        status: u16,
        code: u32,
        message: String,
    },

    /// Anything else that went wrong on our side
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl HotelhubError {
    /// The business code reported to clients alongside the message.
    ///
    /// Only domain errors carry their own code; everything else reports its
    /// HTTP status.
    pub fn code(&self) -> u32 {
        match self {
            HotelhubError::DomainError { code, .. } => *code,
            other => u32::from(other.status_code()),
        }
    }
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for HotelhubError {
    fn status_code(&self) -> u16 {
        match self {
            HotelhubError::AuthError(_) => 401,
            HotelhubError::ValidationError(_) => 400,
            HotelhubError::DomainError { status, .. } => *status,
            HotelhubError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, HotelhubError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, HotelhubError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, HotelhubError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| HotelhubError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, HotelhubError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| HotelhubError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Utility functions for error handling
pub fn validation_error<T: fmt::Display>(message: T) -> HotelhubError {
    HotelhubError::ValidationError(message.to_string())
}

pub fn auth_error<T: fmt::Display>(message: T) -> HotelhubError {
    HotelhubError::AuthError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_keeps_its_own_status_and_code() {
        let err = HotelhubError::DomainError {
            status: 400,
            code: 5002,
            message: "already in favorites".to_string(),
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.code(), 5002);
        assert_eq!(err.to_string(), "already in favorites");
    }

    #[test]
    fn test_plain_errors_report_status_as_code() {
        assert_eq!(auth_error("missing user").code(), 401);
        assert_eq!(validation_error("bad page").code(), 400);
    }

    #[test]
    fn test_context_wraps_as_internal_error() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::AddrInUse,
            "port taken",
        ));
        let err = result.context("binding listener").unwrap_err();
        assert!(matches!(err, HotelhubError::InternalError(_)));
        assert_eq!(err.to_string(), "Internal error: binding listener: port taken");
    }
}
