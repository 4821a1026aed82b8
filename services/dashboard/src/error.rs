//! Error types for the sales dashboard

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{error, warn};

use crate::models::ErrorResponse;

/// Dashboard error types
#[derive(Debug, Error)]
pub enum DashboardError {
    /// A `start`/`end` query value that does not parse as a calendar date
    #[error("Invalid date parameter '{param}': {value:?}")]
    InvalidDateParameter {
        /// Query parameter name
        param: &'static str,
        /// Raw value as received
        value: String,
    },

    /// Dataset could not be loaded
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// CSV encoding or decoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result alias used across the dashboard
pub type DashboardResult<T> = std::result::Result<T, DashboardError>;

impl DashboardError {
    /// Stable machine-readable error code
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDateParameter { .. } => "INVALID_DATE_PARAMETER",
            Self::Dataset(_) | Self::Csv(_) | Self::Io(_) | Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status the error maps to
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidDateParameter { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let details = match &self {
            Self::InvalidDateParameter { param, value } => {
                warn!(param = %param, value = %value, "Rejected date parameter");
                let mut details = FxHashMap::default();
                details.insert("parameter".to_string(), (*param).to_string());
                details.insert("value".to_string(), value.clone());
                Some(details)
            }
            other => {
                error!("Request failed: {}", other);
                None
            }
        };

        let body = ErrorResponse {
            error: self.error_code().to_string(),
            message: self.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
