use crate::models::{RawSalesRow, SalesRecord};
use chrono::NaiveDate;
use tracing::warn;

// ── Field parsers ─────────────────────────────────────────────────────────────

/// Parse an amount: strip everything except digits, dot, minus.
/// "$1,643,690.90" → 1643690.9 | "2.572" → 2.572
pub fn parse_amount(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() || s == "N/A" || s == "-" {
        return None;
    }
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().ok()
}

/// Parse dates: "05-02-2010" (Walmart export) or ISO, plus slash variants.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%d-%m-%Y") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%d/%m/%Y") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
        return Some(d);
    }

    None
}

/// Parse the holiday flag: "0"/"1" or "true"/"false" in any case.
pub fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

/// Store ids are small positive integers; 0 is not a valid store.
pub fn parse_store_id(s: &str) -> Option<u32> {
    match s.trim().parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(id) => Some(id),
    }
}

// ── Raw row → SalesRecord ─────────────────────────────────────────────────────

pub fn raw_row_to_record(row: &RawSalesRow) -> Option<SalesRecord> {
    let store = parse_store_id(row.store.as_deref()?)?;
    let date = parse_date(row.date.as_deref()?)?;
    let weekly_sales = parse_amount(row.weekly_sales.as_deref()?)?;
    let fuel_price = parse_amount(row.fuel_price.as_deref()?)?;
    let is_holiday = parse_flag(row.holiday_flag.as_deref()?)?;

    if weekly_sales < 0.0 {
        warn!("Negative weekly sales {} for store {} on {}", weekly_sales, store, date);
        return None;
    }
    if fuel_price <= 0.0 {
        warn!("Invalid fuel price {} for store {} on {}", fuel_price, store, date);
        return None;
    }

    Some(SalesRecord {
        store,
        date,
        weekly_sales,
        fuel_price,
        is_holiday,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,643,690.90"), Some(1_643_690.90));
        assert_eq!(parse_amount("2.572"), Some(2.572));
        assert_eq!(parse_amount(" 100 "), Some(100.0));
        assert_eq!(parse_amount("N/A"), None);
        assert_eq!(parse_amount("-"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2010, 2, 5).unwrap();
        assert_eq!(parse_date("05-02-2010"), Some(expected));
        assert_eq!(parse_date("2010-02-05"), Some(expected));
        assert_eq!(parse_date("05/02/2010"), Some(expected));
        assert_eq!(parse_date("garbage"), None);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("false"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_parse_store_id() {
        assert_eq!(parse_store_id("7"), Some(7));
        assert_eq!(parse_store_id(" 45 "), Some(45));
        assert_eq!(parse_store_id("0"), None);
        assert_eq!(parse_store_id("-3"), None);
        assert_eq!(parse_store_id("abc"), None);
    }

    #[test]
    fn test_raw_row_conversion() {
        let row = RawSalesRow {
            store: Some("1".into()),
            date: Some("05-02-2010".into()),
            weekly_sales: Some("1643690.90".into()),
            fuel_price: Some("2.572".into()),
            holiday_flag: Some("0".into()),
        };
        let record = raw_row_to_record(&row).unwrap();
        assert_eq!(record.store, 1);
        assert_eq!(record.weekly_sales, 1_643_690.90);
        assert!(!record.is_holiday);
    }

    #[test]
    fn test_raw_row_rejects_invariant_violations() {
        let base = RawSalesRow {
            store: Some("1".into()),
            date: Some("05-02-2010".into()),
            weekly_sales: Some("100.0".into()),
            fuel_price: Some("2.5".into()),
            holiday_flag: Some("0".into()),
        };

        let mut negative_sales = base.clone();
        negative_sales.weekly_sales = Some("-50.0".into());
        assert!(raw_row_to_record(&negative_sales).is_none());

        let mut bad_fuel = base.clone();
        bad_fuel.fuel_price = Some("0".into());
        assert!(raw_row_to_record(&bad_fuel).is_none());

        let mut missing_date = base;
        missing_date.date = None;
        assert!(raw_row_to_record(&missing_date).is_none());
    }
}
