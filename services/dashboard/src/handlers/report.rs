//! CSV report download handler

use axum::{
    extract::{Query, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::info;

use crate::{
    dataset::Dataset,
    engine,
    error::{DashboardError, DashboardResult},
    models::DateRangeQuery,
    report::{report_filename, write_csv},
};

/// Report export handlers
#[derive(Clone)]
pub struct ReportHandlers {
    dataset: Arc<Dataset>,
}

impl ReportHandlers {
    pub const fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    /// Filtered orders as a CSV attachment
    pub async fn csv_report(
        State(handlers): State<Self>,
        Query(query): Query<DateRangeQuery>,
    ) -> DashboardResult<Response> {
        let range = query.date_range()?;
        let view = engine::filter_by_range(handlers.dataset.records(), &range);
        let rows = engine::build_report_rows(&view);
        let body = write_csv(&rows)?;

        let filename = report_filename(query.start.as_deref(), query.end.as_deref());
        info!(filename = %filename, rows = rows.len(), "Exporting CSV report");

        let disposition = HeaderValue::from_str(&format!(
            "attachment; filename=\"{}\"",
            filename.replace('\\', "\\\\").replace('"', "\\\"")
        ))
        .map_err(|e| DashboardError::Internal(format!("invalid report filename: {e}")))?;

        Ok((
            [
                (header::CONTENT_TYPE, HeaderValue::from_static("text/csv")),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            body,
        )
            .into_response())
    }
}
