//! Portal HTTP API.
//!
//! Every screen and form action of the portal is exposed as a JSON endpoint
//! so a thin UI can drive it.

mod dashboard;
mod forms;
mod landing;
mod records;
mod session;
mod snapshot;
mod view;
mod zen;

pub use dashboard::*;
pub use forms::*;
pub use landing::*;
pub use records::*;
pub use session::*;
pub use snapshot::*;
pub use view::*;
pub use zen::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Success response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::errors::AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data))
}
