//! Sales Dashboard
//!
//! Web-served analytics over a static sales dataset.
//! Features:
//! - Immutable in-memory order table loaded once from CSV
//! - KPI summaries (total sales, distinct orders, average order value)
//! - Daily, monthly and per-category sales grouping
//! - Date-range filtered CSV report export

#![allow(missing_docs)]

use anyhow::Result;

pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod report;
pub mod server;

pub use config::{CorsConfig, DashboardConfig, DatasetConfig, MonitoringConfig, ServerConfig};
pub use dataset::{Dataset, LoadStats, OrderRecord};
pub use engine::{DateRange, KpiSummary, MonthlySales, ReportRow};
pub use error::{DashboardError, DashboardResult};
pub use server::DashboardServer;

/// Load the dataset and start the dashboard server
pub async fn start_server(config: DashboardConfig) -> Result<()> {
    let server = DashboardServer::new(config).await?;
    server.start().await
}
