//! Identifying the caller.
//!
//! Authentication happens upstream; the gateway forwards the verified user
//! id in the `x-user-id` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hotelhub_common::{auth_error, HotelhubError};
use tracing::debug;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user id of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub String);

impl CurrentUser {
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = HotelhubError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match user_id {
            Some(user_id) => Ok(CurrentUser(user_id.to_string())),
            None => {
                debug!("Rejecting request without a {} header", USER_ID_HEADER);
                Err(auth_error(format!("Missing {} header", USER_ID_HEADER)))
            }
        }
    }
}
