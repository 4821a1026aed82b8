//! Dashboard server implementation

use anyhow::Result;
use axum::{
    Router,
    extract::{Query, State},
    middleware,
    response::{Json, Response},
    routing::get,
};
use std::{net::SocketAddr, sync::Arc, time::Instant};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::{
    config::DashboardConfig,
    dataset::Dataset,
    engine::{KpiSummary, MonthlySales},
    error::DashboardResult,
    handlers::{AnalyticsHandlers, HealthHandlers, ReportHandlers, pages},
    middleware::{create_cors_layer, logging_middleware},
    models::{DateRangeQuery, HealthCheckResponse},
};

/// Unified application state containing all handlers
#[derive(Clone)]
pub struct AppState {
    pub analytics_handlers: AnalyticsHandlers,
    pub report_handlers: ReportHandlers,
    pub health_handlers: HealthHandlers,
}

/// Sales dashboard server
pub struct DashboardServer {
    config: DashboardConfig,
    dataset: Arc<Dataset>,
    start_time: Instant,
}

impl DashboardServer {
    /// Create a server, loading the dataset named in the configuration
    pub async fn new(config: DashboardConfig) -> Result<Self> {
        info!("Initializing sales dashboard server");

        let path = config.dataset.path.clone();
        let dataset = match tokio::task::spawn_blocking(move || Dataset::from_path(path)).await? {
            Ok(dataset) => dataset,
            Err(e) => {
                error!("Failed to load dataset from {}: {}", config.dataset.path, e);
                return Err(e.into());
            }
        };

        Ok(Self::with_dataset(config, Arc::new(dataset)))
    }

    /// Create a server around an already loaded dataset
    #[must_use]
    pub fn with_dataset(config: DashboardConfig, dataset: Arc<Dataset>) -> Self {
        Self {
            config,
            dataset,
            start_time: Instant::now(),
        }
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = match self.config.server_address().parse() {
            Ok(addr) => addr,
            Err(e) => {
                error!(
                    "Invalid server address '{}': {}",
                    self.config.server_address(),
                    e
                );
                return Err(anyhow::anyhow!("Invalid server address: {}", e));
            }
        };

        let app = self.router();

        let listener = match tokio::net::TcpListener::bind(addr).await {
            Ok(listener) => {
                info!("Sales dashboard listening on {}", addr);
                listener
            }
            Err(e) => {
                error!("Failed to bind TCP listener to {}: {}", addr, e);
                return Err(anyhow::anyhow!("Failed to bind to address {}: {}", addr, e));
            }
        };

        if let Err(e) = axum::serve(listener, app).await {
            error!("Server encountered a fatal error: {}", e);
            return Err(anyhow::anyhow!("Server error: {}", e));
        }

        Ok(())
    }

    /// Build the Axum application with all routes and middleware
    pub fn router(&self) -> Router {
        let app_state = AppState {
            analytics_handlers: AnalyticsHandlers::new(Arc::clone(&self.dataset)),
            report_handlers: ReportHandlers::new(Arc::clone(&self.dataset)),
            health_handlers: HealthHandlers::new(Arc::clone(&self.dataset), self.start_time),
        };

        let mut app = Router::new()
            .route("/", get(pages::index))
            .route("/static/main.js", get(pages::main_js))
            .route(&self.config.monitoring.health_path, get(health_check))
            .route("/api/kpis", get(kpis))
            .route("/api/sales_by_month", get(sales_by_month))
            .route("/api/report/csv", get(report_csv))
            .with_state(app_state)
            .layer(TimeoutLayer::new(std::time::Duration::from_secs(
                self.config.server.timeout_seconds,
            )));

        if self.config.monitoring.request_logging {
            app = app.layer(middleware::from_fn(logging_middleware));
        }

        app = app.layer(TraceLayer::new_for_http());

        if self.config.server.compression {
            app = app.layer(CompressionLayer::new());
        }

        if self.config.cors.enabled {
            app = app.layer(create_cors_layer(&self.config.cors));
        }

        info!("Dashboard routes configured");
        app
    }
}

// Handler wrapper functions to work with unified state
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    HealthHandlers::health_check(State(state.health_handlers)).await
}

async fn kpis(
    State(state): State<AppState>,
    query: Query<DateRangeQuery>,
) -> DashboardResult<Json<KpiSummary>> {
    AnalyticsHandlers::kpis(State(state.analytics_handlers), query).await
}

async fn sales_by_month(
    State(state): State<AppState>,
    query: Query<DateRangeQuery>,
) -> DashboardResult<Json<Vec<MonthlySales>>> {
    AnalyticsHandlers::sales_by_month(State(state.analytics_handlers), query).await
}

async fn report_csv(
    State(state): State<AppState>,
    query: Query<DateRangeQuery>,
) -> DashboardResult<Response> {
    ReportHandlers::csv_report(State(state.report_handlers), query).await
}

/// API route documentation
pub fn print_routes(config: &DashboardConfig) {
    println!("{}", route_table(config));
}

/// Route table as printed by `--routes`
#[must_use]
pub fn route_table(config: &DashboardConfig) -> String {
    let rows = [
        ("Pages:", "/", "Dashboard page"),
        ("", "/static/main.js", "Dashboard script"),
        (
            "Analytics (optional ?start=YYYY-MM-DD&end=YYYY-MM-DD):",
            "/api/kpis",
            "KPI summary",
        ),
        ("", "/api/sales_by_month", "Monthly sales totals"),
        ("", "/api/report/csv", "Filtered orders as CSV"),
        ("Monitoring:", config.monitoring.health_path.as_str(), "Health check"),
    ];

    let mut table = String::from("Sales Dashboard Routes:\n=======================\n");
    for (section, path, description) in rows {
        if !section.is_empty() {
            table.push('\n');
            table.push_str(section);
            table.push('\n');
        }
        table.push_str(&format!("  GET  {path:<24} - {description}\n"));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_table_uses_configured_health_path() {
        let mut config = DashboardConfig::default();
        assert!(route_table(&config).contains("GET  /health "));

        config.monitoring.health_path = "/status".to_string();
        let table = route_table(&config);
        assert!(table.contains("GET  /status "));
        assert!(!table.contains("/health"));
        assert!(table.contains("GET  /api/report/csv "));
    }
}
