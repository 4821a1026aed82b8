//! REST API models and request/response types

use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    dataset::parse_order_date,
    engine::DateRange,
    error::{DashboardError, DashboardResult},
};

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details
    pub details: Option<FxHashMap<String, String>>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall status
    pub status: String,
    /// Service version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Records held by the dataset store
    pub records: usize,
    /// Rows dropped while loading the dataset
    pub dropped_rows: usize,
}

/// `start`/`end` query parameters shared by every analytics endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateRangeQuery {
    /// Validate both bounds into a [`DateRange`].
    ///
    /// Empty values count as absent.
    pub fn date_range(&self) -> DashboardResult<DateRange> {
        Ok(DateRange::new(
            parse_date_param("start", self.start.as_deref())?,
            parse_date_param("end", self.end.as_deref())?,
        ))
    }
}

/// Parse a single date query value.
///
/// Accepts `YYYY-MM-DD` or any date-time the dataset loader understands,
/// in which case only the calendar day is kept. The value is not trimmed:
/// it is echoed verbatim in the report filename, so surrounding whitespace
/// or control characters are rejected.
pub fn parse_date_param(param: &'static str, raw: Option<&str>) -> DashboardResult<Option<NaiveDate>> {
    let Some(value) = raw.filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    let invalid = || DashboardError::InvalidDateParameter {
        param,
        value: value.to_string(),
    };

    if value.trim() != value {
        return Err(invalid());
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(Some(date));
    }

    parse_order_date(value)
        .map(|ts| Some(ts.date()))
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_empty_params_are_unbounded() {
        let query = DateRangeQuery {
            start: None,
            end: Some(String::new()),
        };
        let range = query.date_range().unwrap();
        assert_eq!(range, DateRange::unbounded());
    }

    #[test]
    fn test_iso_dates_and_datetimes() {
        let query = DateRangeQuery {
            start: Some("2024-01-05".to_string()),
            end: Some("2024-02-29T13:45:00".to_string()),
        };
        let range = query.date_range().unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_surrounding_whitespace_is_rejected() {
        for raw in ["2024-01-01\n", " 2024-01-01", "\u{a0}2024-01-01", "2024-01-01T00:00:00\r"] {
            match parse_date_param("start", Some(raw)) {
                Err(DashboardError::InvalidDateParameter { param, value }) => {
                    assert_eq!(param, "start");
                    assert_eq!(value, raw);
                }
                other => panic!("expected InvalidDateParameter for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_unparsable_param_is_rejected() {
        let query = DateRangeQuery {
            start: Some("2024-01-01".to_string()),
            end: Some("2024-13-45".to_string()),
        };
        match query.date_range() {
            Err(DashboardError::InvalidDateParameter { param, value }) => {
                assert_eq!(param, "end");
                assert_eq!(value, "2024-13-45");
            }
            other => panic!("expected InvalidDateParameter, got {other:?}"),
        }
    }
}
