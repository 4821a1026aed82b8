//! Shared fixtures for the dashboard integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use rstest::fixture;
use sales_dashboard::{DashboardConfig, DashboardServer, Dataset, OrderRecord};
use std::sync::{Arc, Once};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize tracing once across all tests
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "sales_dashboard=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}

pub fn order(id: &str, date: (i32, u32, u32), category: &str, total: f64) -> OrderRecord {
    OrderRecord {
        order_id: id.to_string(),
        order_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
        product_category: category.to_string(),
        quantity: Some(1.0),
        unit_price: Some(total),
        total_price: total,
        payment_type: "Credit Card".to_string(),
        order_status: "Delivered".to_string(),
    }
}

/// Two line items of order 1 in January, order 2 in February
#[fixture]
pub fn sample_records() -> Vec<OrderRecord> {
    vec![
        order("1", (2024, 1, 5), "A", 100.0),
        order("1", (2024, 1, 5), "A", 50.0),
        order("2", (2024, 2, 1), "B", 200.0),
    ]
}

/// Configuration suitable for in-process router tests
#[fixture]
pub fn test_config() -> DashboardConfig {
    let mut config = DashboardConfig::default();
    config.server.port = 0;
    config.server.compression = false; // deterministic bodies
    config
}

#[fixture]
pub fn server(test_config: DashboardConfig, sample_records: Vec<OrderRecord>) -> DashboardServer {
    init_test_env();
    DashboardServer::with_dataset(test_config, Arc::new(Dataset::from_records(sample_records)))
}
