//! Health check handler

use axum::{extract::State, response::Json};
use std::{sync::Arc, time::Instant};
use tracing::debug;

use crate::{dataset::Dataset, models::HealthCheckResponse};

/// Health check handlers
#[derive(Clone)]
pub struct HealthHandlers {
    dataset: Arc<Dataset>,
    start_time: Instant,
}

impl HealthHandlers {
    pub const fn new(dataset: Arc<Dataset>, start_time: Instant) -> Self {
        Self {
            dataset,
            start_time,
        }
    }

    /// Health check endpoint
    pub async fn health_check(State(handlers): State<Self>) -> Json<HealthCheckResponse> {
        debug!("Health check request");

        let stats = handlers.dataset.stats();
        let status = if handlers.dataset.is_empty() {
            "degraded"
        } else {
            "healthy"
        };

        Json(HealthCheckResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: handlers.start_time.elapsed().as_secs(),
            records: handlers.dataset.len(),
            dropped_rows: stats.rows_dropped,
        })
    }
}
