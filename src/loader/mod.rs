//! CSV loader for the weekly sales dataset.

pub mod clean;

use crate::models::{Dataset, RawSalesRow};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info, warn};

use self::clean::raw_row_to_record;

// ── Header resolution ─────────────────────────────────────────────────────────

/// Column indices resolved from the CSV header row.
struct Columns {
    store: usize,
    date: usize,
    weekly_sales: usize,
    fuel_price: usize,
    holiday_flag: usize,
}

fn resolve_columns(headers: &csv::StringRecord) -> Result<Columns> {
    let find = |names: &[&str]| -> Option<usize> {
        headers
            .iter()
            .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
    };

    Ok(Columns {
        store: find(&["Store"]).context("missing column: Store")?,
        date: find(&["Date"]).context("missing column: Date")?,
        weekly_sales: find(&["Weekly_Sales"]).context("missing column: Weekly_Sales")?,
        fuel_price: find(&["Fuel_Price"]).context("missing column: Fuel_Price")?,
        // Older exports call it Holiday_Flag, richer ones IsHoliday.
        holiday_flag: find(&["Holiday_Flag", "IsHoliday"])
            .context("missing column: Holiday_Flag / IsHoliday")?,
    })
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Parse a sales CSV: Store, Date, Weekly_Sales, Fuel_Price, Holiday_Flag.
///
/// Rows that fail validation are logged and skipped; a missing file or a
/// header without the required columns is an error.
pub fn load_csv(path: &Path) -> Result<Dataset> {
    debug!("Loading sales data from {:?}", path);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Could not open {:?}", path))?;

    let headers = reader
        .headers()
        .with_context(|| format!("No header row in {:?}", path))?
        .clone();
    let cols = resolve_columns(&headers)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("Row {} in {:?}: {}", i + 1, path, e);
                skipped += 1;
                continue;
            }
        };

        let raw = RawSalesRow {
            store: row.get(cols.store).map(|s| s.to_string()),
            date: row.get(cols.date).map(|s| s.to_string()),
            weekly_sales: row.get(cols.weekly_sales).map(|s| s.to_string()),
            fuel_price: row.get(cols.fuel_price).map(|s| s.to_string()),
            holiday_flag: row.get(cols.holiday_flag).map(|s| s.to_string()),
        };

        match raw_row_to_record(&raw) {
            Some(record) => records.push(record),
            None => {
                warn!("Row {} in {:?}: failed validation, skipped", i + 1, path);
                skipped += 1;
            }
        }
    }

    info!(
        "{}: {} records loaded, {} skipped",
        path.display(),
        records.len(),
        skipped
    );
    Ok(Dataset::new(records))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_loads_walmart_style_csv() {
        let f = write_csv(
            "Store,Date,Weekly_Sales,Fuel_Price,Holiday_Flag\n\
             1,05-02-2010,1643690.90,2.572,0\n\
             1,12-02-2010,1641957.44,2.548,1\n\
             2,05-02-2010,2136989.46,2.572,0\n",
        );
        let dataset = load_csv(f.path()).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.records()[0].store, 1);
        assert_eq!(dataset.records()[0].weekly_sales, 1643690.90);
        assert!(dataset.records()[1].is_holiday);
        assert!(!dataset.records()[2].is_holiday);
    }

    #[test]
    fn test_accepts_is_holiday_header_variant() {
        let f = write_csv(
            "Store,Date,Weekly_Sales,Fuel_Price,IsHoliday\n\
             4,2010-02-05,100.0,2.5,true\n",
        );
        let dataset = load_csv(f.path()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert!(dataset.records()[0].is_holiday);
    }

    #[test]
    fn test_skips_rows_that_fail_validation() {
        let f = write_csv(
            "Store,Date,Weekly_Sales,Fuel_Price,Holiday_Flag\n\
             1,05-02-2010,100.0,2.5,0\n\
             1,not-a-date,200.0,2.5,0\n\
             0,12-02-2010,300.0,2.5,0\n",
        );
        let dataset = load_csv(f.path()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].weekly_sales, 100.0);
    }

    #[test]
    fn test_missing_required_column_is_an_error() {
        let f = write_csv(
            "Store,Date,Weekly_Sales,Holiday_Flag\n\
             1,05-02-2010,100.0,0\n",
        );
        let err = load_csv(f.path()).unwrap_err();
        assert!(err.to_string().contains("Fuel_Price"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_csv(Path::new("no/such/file.csv")).is_err());
    }
}
