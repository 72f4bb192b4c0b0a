//! # API Types
//!
//! Request bodies, the `{ success, data, error }` envelope and the error
//! type handlers return.

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use deck_config::ConfigError;
use deck_modify::ModificationDelta;
use deck_render::{ExportFormat, JobReport, RenderError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

// =============================================================================
// ENVELOPE
// =============================================================================

/// Every JSON reply is wrapped in this envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

// =============================================================================
// BODIES
// =============================================================================

/// Body of `POST /api/regenerate`.
///
/// ```json
/// { "parameters": { "dimensions.scale": 0.8, "visibility.buttons": false }, "format": "3mf" }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct RegenerateRequest {
    /// Dotted keys (or the `scale`/`gripOffset` aliases) to override.
    #[serde(default)]
    pub parameters: ModificationDelta,
    #[serde(default)]
    pub format: ExportFormat,
}

/// Data of a successful regeneration.
#[derive(Debug, Serialize)]
pub struct Regenerated {
    pub parameters: ModificationDelta,
    pub report: JobReport,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub version: String,
}

// =============================================================================
// ERRORS
// =============================================================================

/// A failed request: an HTTP status plus a message for the envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        Self::internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(status = %self.status, error = %self.message, "request failed");
        (self.status, Json(ApiResponse::<()>::failure(self.message))).into_response()
    }
}

pub(crate) fn parse_json<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.is_empty() {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|err| ApiError::bad_request(format!("invalid JSON body: {err}")))
}
