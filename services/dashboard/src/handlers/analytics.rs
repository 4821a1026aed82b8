//! KPI and grouped sales handlers

use axum::{
    extract::{Query, State},
    response::Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::{
    dataset::Dataset,
    engine::{self, KpiSummary, MonthlySales},
    error::DashboardResult,
    models::DateRangeQuery,
};

/// Analytics handlers
#[derive(Clone)]
pub struct AnalyticsHandlers {
    dataset: Arc<Dataset>,
}

impl AnalyticsHandlers {
    pub const fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    /// KPI summary for the requested date range
    pub async fn kpis(
        State(handlers): State<Self>,
        Query(query): Query<DateRangeQuery>,
    ) -> DashboardResult<Json<KpiSummary>> {
        let range = query.date_range()?;
        let view = engine::filter_by_range(handlers.dataset.records(), &range);
        debug!(?range, rows = view.len(), "Computing KPIs");

        Ok(Json(engine::compute_kpis(&view)))
    }

    /// Monthly sales totals for the requested date range
    pub async fn sales_by_month(
        State(handlers): State<Self>,
        Query(query): Query<DateRangeQuery>,
    ) -> DashboardResult<Json<Vec<MonthlySales>>> {
        let range = query.date_range()?;
        let view = engine::filter_by_range(handlers.dataset.records(), &range);
        debug!(?range, rows = view.len(), "Computing monthly sales");

        Ok(Json(engine::compute_monthly_sales(&view)))
    }
}
