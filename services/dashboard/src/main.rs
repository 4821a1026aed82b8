//! Sales Dashboard - Main Entry Point

use anyhow::Result;
use clap::{Arg, Command};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sales_dashboard::{DashboardConfig, start_server};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sales_dashboard=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let matches = Command::new("sales-dashboard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sales analytics dashboard over a static order dataset")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("dashboard.toml"),
        )
        .arg(
            Arg::new("dataset")
                .short('d')
                .long("dataset")
                .value_name("FILE")
                .help("Sales CSV file (overrides the configured path)"),
        )
        .arg(
            Arg::new("routes")
                .long("routes")
                .help("Print available routes and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let default_config = "dashboard.toml".to_string();
    let config_path = matches
        .get_one::<String>("config")
        .unwrap_or(&default_config);
    let mut config = match DashboardConfig::from_file(config_path) {
        Ok(config) => {
            info!("Loaded configuration from: {}", config_path);
            config
        }
        Err(e) => {
            error!("Failed to load config from {}: {}", config_path, e);
            info!("Using default configuration");
            DashboardConfig::default()
        }
    };

    if let Some(dataset) = matches.get_one::<String>("dataset") {
        config.dataset.path.clone_from(dataset);
    }

    if matches.get_flag("routes") {
        sales_dashboard::server::print_routes(&config);
        return Ok(());
    }

    info!(
        "Starting Sales Dashboard v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("Server will bind to: {}", config.server_address());
    info!("Dataset: {}", config.dataset.path);
    info!("Features enabled:");
    info!("  CORS: {}", config.cors.enabled);
    info!("  Compression: {}", config.server.compression);
    info!("  Request logging: {}", config.monitoring.request_logging);

    if let Err(e) = start_server(config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
