//! Aggregation engine
//!
//! Pure functions over a read-only slice of [`OrderRecord`]s: date-range
//! filtering, KPI summaries, daily/monthly/category grouping and report row
//! projection. Nothing here allocates shared state or performs I/O, so every
//! function is safe to call from any number of request tasks at once.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::dataset::OrderRecord;

/// Timestamp format used when exporting report rows
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Inclusive calendar-date bounds; `None` leaves that side open.
///
/// An inverted range is valid and simply matches nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    #[must_use]
    pub const fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Range with no bounds on either side
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Whether the calendar day of `ts` lies within the bounds
    #[must_use]
    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        let day = ts.date();
        self.start.is_none_or(|start| day >= start) && self.end.is_none_or(|end| day <= end)
    }
}

/// Sales total for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub total_sales: f64,
}

/// Sales total for one product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySales {
    pub category: String,
    pub total_sales: f64,
}

/// Sales total for one `YYYY-MM` bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySales {
    pub month: String,
    pub total_sales: f64,
}

/// KPI summary over a filtered view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Sum of line-item totals
    pub total_sales: f64,
    /// Distinct order ids
    pub num_orders: usize,
    /// `total_sales / num_orders`, or `0` without orders
    #[serde(rename = "aov")]
    pub average_order_value: f64,
    /// Ascending by date
    #[serde(rename = "sales_by_date")]
    pub sales_by_day: Vec<DailySales>,
    /// Descending by total, ties in first-encounter order
    pub sales_by_category: Vec<CategorySales>,
}

impl KpiSummary {
    /// Summary of an empty view
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            total_sales: 0.0,
            num_orders: 0,
            average_order_value: 0.0,
            sales_by_day: Vec::new(),
            sales_by_category: Vec::new(),
        }
    }
}

/// Flat export row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Order ID")]
    pub order_id: String,
    #[serde(rename = "Order Date", serialize_with = "serialize_report_date")]
    pub order_date: NaiveDateTime,
    #[serde(rename = "Product Category")]
    pub product_category: String,
    #[serde(rename = "Quantity", serialize_with = "serialize_quantity")]
    pub quantity: Option<f64>,
    #[serde(rename = "Unit Price")]
    pub unit_price: Option<f64>,
    #[serde(rename = "Total Price")]
    pub total_price: f64,
    #[serde(rename = "Payment Type")]
    pub payment_type: String,
    #[serde(rename = "Order Status")]
    pub order_status: String,
}

fn serialize_report_date<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&ts.format(REPORT_DATE_FORMAT))
}

/// Whole quantities are written without a fractional part
fn serialize_quantity<S: Serializer>(
    quantity: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match quantity {
        Some(value) => serializer.collect_str(value),
        None => serializer.serialize_none(),
    }
}

/// Records whose order day falls inside `range`, in dataset order
#[must_use]
pub fn filter_by_range<'a>(records: &'a [OrderRecord], range: &DateRange) -> Vec<&'a OrderRecord> {
    records
        .iter()
        .filter(|record| range.contains(&record.order_date))
        .collect()
}

/// Compute the KPI summary for a filtered view
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_kpis(view: &[&OrderRecord]) -> KpiSummary {
    if view.is_empty() {
        return KpiSummary::empty();
    }

    let mut total_sales = 0.0;
    let mut order_ids: FxHashSet<&str> = FxHashSet::default();
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for record in view {
        total_sales += record.total_price;
        order_ids.insert(record.order_id.as_str());
        *by_day.entry(record.order_date.date()).or_insert(0.0) += record.total_price;
    }

    let num_orders = order_ids.len();
    let average_order_value = if num_orders > 0 {
        total_sales / num_orders as f64
    } else {
        0.0
    };

    KpiSummary {
        total_sales,
        num_orders,
        average_order_value,
        sales_by_day: by_day
            .into_iter()
            .map(|(date, total_sales)| DailySales { date, total_sales })
            .collect(),
        sales_by_category: sales_by_category(view),
    }
}

/// Category totals, largest first
fn sales_by_category(view: &[&OrderRecord]) -> Vec<CategorySales> {
    let mut slots: FxHashMap<&str, usize> = FxHashMap::default();
    let mut totals: Vec<CategorySales> = Vec::new();

    for record in view {
        let category = record.product_category.as_str();
        let slot = *slots.entry(category).or_insert_with(|| {
            totals.push(CategorySales {
                category: category.to_string(),
                total_sales: 0.0,
            });
            totals.len() - 1
        });
        totals[slot].total_sales += record.total_price;
    }

    // Stable sort keeps first-encounter order among equal totals
    totals.sort_by(|a, b| b.total_sales.total_cmp(&a.total_sales));
    totals
}

/// Sales per `YYYY-MM`, ascending; months without orders are omitted
#[must_use]
pub fn compute_monthly_sales(view: &[&OrderRecord]) -> Vec<MonthlySales> {
    let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();

    for record in view {
        let key = (record.order_date.year(), record.order_date.month());
        *by_month.entry(key).or_insert(0.0) += record.total_price;
    }

    by_month
        .into_iter()
        .map(|((year, month), total_sales)| MonthlySales {
            month: format!("{year:04}-{month:02}"),
            total_sales,
        })
        .collect()
}

/// Project the view onto the export columns, preserving order
#[must_use]
pub fn build_report_rows(view: &[&OrderRecord]) -> Vec<ReportRow> {
    view.iter()
        .map(|record| ReportRow {
            order_id: record.order_id.clone(),
            order_date: record.order_date,
            product_category: record.product_category.clone(),
            quantity: record.quantity,
            unit_price: record.unit_price,
            total_price: record.total_price,
            payment_type: record.payment_type.clone(),
            order_status: record.order_status.clone(),
        })
        .collect()
}
