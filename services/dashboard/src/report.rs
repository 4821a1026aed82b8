//! CSV report export

use crate::{
    engine::ReportRow,
    error::{DashboardError, DashboardResult},
};

/// Column order of the exported report
pub const REPORT_COLUMNS: [&str; 8] = [
    "Order ID",
    "Order Date",
    "Product Category",
    "Quantity",
    "Unit Price",
    "Total Price",
    "Payment Type",
    "Order Status",
];

/// Placeholder used in the filename for an absent query parameter
const ABSENT_PARAM: &str = "None";

/// Serialize report rows to CSV bytes, header first
pub fn write_csv(rows: &[ReportRow]) -> DashboardResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::with_capacity(64 * (rows.len() + 1)));

    // Written explicitly so an empty report still carries the header
    writer.write_record(REPORT_COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| DashboardError::Io(e.into_error()))
}

/// Attachment filename built from the raw `start`/`end` query values
#[must_use]
pub fn report_filename(start: Option<&str>, end: Option<&str>) -> String {
    format!(
        "sales_report_{}_{}.csv",
        start.unwrap_or(ABSENT_PARAM),
        end.unwrap_or(ABSENT_PARAM)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn row(quantity: Option<f64>, unit_price: Option<f64>) -> ReportRow {
        ReportRow {
            order_id: "1001".to_string(),
            order_date: NaiveDate::from_ymd_opt(2024, 1, 5)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            product_category: "Home, Garden".to_string(),
            quantity,
            unit_price,
            total_price: 42.5,
            payment_type: "PayPal".to_string(),
            order_status: "Shipped".to_string(),
        }
    }

    #[test]
    fn test_empty_report_has_header_only() {
        let bytes = write_csv(&[]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Order ID,Order Date,Product Category,Quantity,Unit Price,Total Price,Payment Type,Order Status\n"
        );
    }

    #[test]
    fn test_rows_are_written_in_order() {
        let bytes = write_csv(&[
            row(Some(2.0), Some(21.25)),
            row(None, None),
            row(Some(2.5), Some(17.0)),
        ])
        .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[1],
            "1001,2024-01-05 09:30:00,\"Home, Garden\",2,21.25,42.5,PayPal,Shipped"
        );
        assert_eq!(lines[2], "1001,2024-01-05 09:30:00,\"Home, Garden\",,,42.5,PayPal,Shipped");
        assert_eq!(
            lines[3],
            "1001,2024-01-05 09:30:00,\"Home, Garden\",2.5,17.0,42.5,PayPal,Shipped"
        );
    }

    #[test]
    fn test_report_filename_uses_raw_values() {
        assert_eq!(
            report_filename(Some("2024-01-01"), Some("2024-01-31")),
            "sales_report_2024-01-01_2024-01-31.csv"
        );
        assert_eq!(report_filename(None, None), "sales_report_None_None.csv");
        assert_eq!(report_filename(Some(""), None), "sales_report__None.csv");
    }
}
