use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::{HotelhubError, HttpStatusCode};

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorDetail {
    /// Human readable description
    pub message: String,
    /// Business error code (e.g. 5002 for a duplicate favorite)
    pub code: u32,
}

/// Extension trait for HotelhubError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for HotelhubError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(ErrorBody {
            error: ErrorDetail {
                message: self.to_string(),
                code: self.code(),
            },
        });

        (status_code, body).into_response()
    }
}

impl IntoResponse for HotelhubError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// Convert a `Result<T, E>` into a JSON handler result, mapping the error
/// through `HotelhubError`.
pub fn handle_json_result<T, E>(result: Result<T, E>) -> Result<Json<T>, HotelhubError>
where
    T: Serialize,
    E: Into<HotelhubError>,
{
    result.map(Json).map_err(Into::into)
}
