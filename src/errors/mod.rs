//! Error handling module for the portal.
//!
//! Provides centralized error types with mapping to HTTP status codes and response envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::forms::FormError;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const FORM_LOCKED: &str = "FORM_LOCKED";
    pub const NO_ACTIVE_FORM: &str = "NO_ACTIVE_FORM";
    pub const GATEWAY_ERROR: &str = "GATEWAY_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Admin secret rejected
    Unauthorized(String),
    /// Action reserved for admin sessions
    Forbidden(String),
    /// Record not found in the current snapshot
    NotFound(String),
    /// Form submission failed validation
    Validation {
        message: String,
        fields: serde_json::Value,
    },
    /// Form has not been unlocked with the site password
    Locked,
    /// The current view holds no form of the requested kind
    NoActiveForm,
    /// Data gateway unreachable, rejected the request or returned garbage
    Gateway(String),
    /// Internal error
    Internal(String),
    /// Bad request
    BadRequest(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Locked => StatusCode::FORBIDDEN,
            AppError::NoActiveForm => StatusCode::CONFLICT,
            AppError::Gateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::Forbidden(_) => codes::FORBIDDEN,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation { .. } => codes::VALIDATION_ERROR,
            AppError::Locked => codes::FORM_LOCKED,
            AppError::NoActiveForm => codes::NO_ACTIVE_FORM,
            AppError::Gateway(_) => codes::GATEWAY_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::Forbidden(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Validation { message, .. } => message.clone(),
            AppError::Locked => "Form is locked until the site password is verified".to_string(),
            AppError::NoActiveForm => "No form of this kind is open".to_string(),
            AppError::Gateway(msg) => msg.clone(),
            AppError::Internal(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("Gateway request error: {:?}", err);
        AppError::Gateway(format!("Gateway request failed: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Gateway(format!("Malformed gateway response: {}", err))
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Locked => AppError::Locked,
            FormError::AdminOnly => {
                AppError::Forbidden("Only reviewers can change approval status".to_string())
            }
            FormError::UnknownField(field) => {
                AppError::BadRequest(format!("Unknown field: {}", field))
            }
            FormError::Hidden(field) => {
                AppError::BadRequest(format!("Field is not available for this report: {}", field))
            }
            FormError::Invalid(invalid) => AppError::Validation {
                message: "Report is incomplete".to_string(),
                fields: serde_json::json!({
                    "errors": invalid.errors,
                    "scrollToTop": invalid.scroll_to_top,
                }),
            },
        }
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        let details = match error {
            AppError::Validation { fields, .. } => Some(fields.clone()),
            _ => None,
        };

        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
                details,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::InvalidForm;
    use std::collections::BTreeMap;

    #[test]
    fn test_form_errors_map_to_codes() {
        assert_eq!(AppError::from(FormError::Locked).error_code(), codes::FORM_LOCKED);
        assert_eq!(
            AppError::from(FormError::AdminOnly).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::from(FormError::UnknownField("x".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_validation_details() {
        let mut errors = BTreeMap::new();
        errors.insert("label_day".to_string(), "required".to_string());
        let err = AppError::from(FormError::Invalid(InvalidForm {
            errors,
            scroll_to_top: true,
        }));

        let body = ErrorResponse::new(&err);
        assert!(!body.success);
        assert_eq!(body.error.code, codes::VALIDATION_ERROR);
        let details = body.error.details.unwrap();
        assert_eq!(details["errors"]["label_day"], "required");
        assert_eq!(details["scrollToTop"], true);
    }
}
