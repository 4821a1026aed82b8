//! API handlers for the dashboard endpoints

pub mod analytics;
pub mod health;
pub mod pages;
pub mod report;

pub use analytics::AnalyticsHandlers;
pub use health::HealthHandlers;
pub use report::ReportHandlers;
