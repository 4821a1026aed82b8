//! Dataset store
//!
//! Loads the order table once at start-up, coerces every row into a typed
//! [`OrderRecord`] and drops rows whose required fields are missing or
//! malformed. The resulting [`Dataset`] is immutable for the lifetime of the
//! process and is shared read-only with the aggregation engine.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, info, warn};

use crate::error::{DashboardError, DashboardResult};

/// Column headers that must be present in the source file
pub const REQUIRED_COLUMNS: [&str; 3] = ["Order ID", "Order Date", "Total Price"];

/// Dropped rows logged individually before only the total is reported
const MAX_LOGGED_DROPS: usize = 10;

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// A single order line item
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    /// Order identifier, shared by every line item of the order
    pub order_id: String,
    /// Order timestamp
    pub order_date: NaiveDateTime,
    /// Product category label
    pub product_category: String,
    /// Units ordered
    pub quantity: Option<f64>,
    /// Price per unit
    pub unit_price: Option<f64>,
    /// Monetary amount of the line item
    pub total_price: f64,
    /// Payment method
    pub payment_type: String,
    /// Fulfilment status
    pub order_status: String,
}

/// Row shape as it appears in the source CSV
#[derive(Debug, Deserialize)]
struct RawOrderRow {
    #[serde(rename = "Order ID")]
    order_id: Option<String>,
    #[serde(rename = "Order Date")]
    order_date: Option<String>,
    #[serde(rename = "Product Category")]
    product_category: Option<String>,
    #[serde(rename = "Quantity")]
    quantity: Option<String>,
    #[serde(rename = "Unit Price")]
    unit_price: Option<String>,
    #[serde(rename = "Total Price")]
    total_price: Option<String>,
    #[serde(rename = "Payment Type")]
    payment_type: Option<String>,
    #[serde(rename = "Order Status")]
    order_status: Option<String>,
}

impl TryFrom<RawOrderRow> for OrderRecord {
    type Error = &'static str;

    fn try_from(raw: RawOrderRow) -> Result<Self, Self::Error> {
        let order_id = non_empty(raw.order_id).ok_or("missing order id")?;
        let order_date = non_empty(raw.order_date)
            .as_deref()
            .and_then(parse_order_date)
            .ok_or("missing or invalid order date")?;
        let total_price = non_empty(raw.total_price)
            .as_deref()
            .and_then(parse_number)
            .ok_or("missing or invalid total price")?;

        Ok(Self {
            order_id,
            order_date,
            product_category: non_empty(raw.product_category).unwrap_or_default(),
            quantity: non_empty(raw.quantity).as_deref().and_then(parse_number),
            unit_price: non_empty(raw.unit_price).as_deref().and_then(parse_number),
            total_price,
            payment_type: non_empty(raw.payment_type).unwrap_or_default(),
            order_status: non_empty(raw.order_status).unwrap_or_default(),
        })
    }
}

/// Outcome of a dataset load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Data rows encountered in the source
    pub rows_read: usize,
    /// Rows kept after cleaning
    pub rows_kept: usize,
    /// Rows dropped by cleaning
    pub rows_dropped: usize,
}

/// Immutable, cleaned order table
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<OrderRecord>,
    stats: LoadStats,
}

impl Dataset {
    /// Build a dataset from already validated records
    #[must_use]
    pub fn from_records(records: Vec<OrderRecord>) -> Self {
        let count = records.len();
        Self {
            records,
            stats: LoadStats {
                rows_read: count,
                rows_kept: count,
                rows_dropped: 0,
            },
        }
    }

    /// Load and clean a CSV file
    pub fn from_path(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let path = path.as_ref();
        info!("Loading sales dataset from {}", path.display());

        let file = File::open(path).map_err(|e| {
            DashboardError::Dataset(format!("cannot open {}: {}", path.display(), e))
        })?;

        Self::from_reader(file)
    }

    /// Load and clean CSV data from any reader
    pub fn from_reader<R: Read>(reader: R) -> DashboardResult<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let headers = reader.headers()?.clone();
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|h| h == *column))
            .collect();
        if !missing.is_empty() {
            return Err(DashboardError::Dataset(format!(
                "missing required columns: {}",
                missing.join(", ")
            )));
        }

        let mut records = Vec::new();
        let mut stats = LoadStats::default();

        for (index, result) in reader.deserialize::<RawOrderRow>().enumerate() {
            stats.rows_read += 1;

            let outcome = result
                .map_err(|_| "undecodable row")
                .and_then(OrderRecord::try_from);

            match outcome {
                Ok(record) => records.push(record),
                Err(reason) => {
                    stats.rows_dropped += 1;
                    if stats.rows_dropped <= MAX_LOGGED_DROPS {
                        // +2: header line and 1-based numbering
                        debug!(line = index + 2, reason, "Dropping dataset row");
                    }
                }
            }
        }

        stats.rows_kept = records.len();

        if stats.rows_dropped > 0 {
            warn!(
                "Dropped {} of {} dataset rows with missing or invalid fields",
                stats.rows_dropped, stats.rows_read
            );
        }
        info!("Loaded {} order records", stats.rows_kept);

        Ok(Self { records, stats })
    }

    /// All records, in source order
    #[must_use]
    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    /// Statistics from the load that produced this dataset
    #[must_use]
    pub const fn stats(&self) -> LoadStats {
        self.stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse an order timestamp.
///
/// Date-only values are taken as midnight.
#[must_use]
pub fn parse_order_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}
