use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ── Sales record ──────────────────────────────────────────────────────────────

/// One weekly observation for a single store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesRecord {
    pub store: u32,
    pub date: NaiveDate,
    pub weekly_sales: f64,
    pub fuel_price: f64,
    pub is_holiday: bool,
}

// ── Raw CSV row ───────────────────────────────────────────────────────────────

/// Walmart sales CSV: Store, Date, Weekly_Sales, Fuel_Price, Holiday_Flag
#[derive(Debug, Clone, Default)]
pub struct RawSalesRow {
    pub store: Option<String>,
    pub date: Option<String>,
    pub weekly_sales: Option<String>,
    pub fuel_price: Option<String>,
    pub holiday_flag: Option<String>,
}

// ── Dataset ───────────────────────────────────────────────────────────────────

/// The full collection of sales records for all stores.
///
/// Built once by the loader and never mutated afterwards; every derived
/// summary is computed fresh from it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<SalesRecord>,
}

impl Dataset {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── Derived summaries ─────────────────────────────────────────────────────────

/// Dataset-wide metrics, computed once per load.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GlobalSummary {
    pub avg_sales: f64,
    pub top_store_id: u32,
    pub top_store_avg_sales: f64,
    pub fuel_sales_correlation: f64,
    pub correlation_label: CorrelationLabel,
}

/// Metrics for one selected store, recomputed on every selection change.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StoreSummary {
    pub store_id: u32,
    pub avg_sales: f64,
    pub max_sales: f64,
    pub min_sales: f64,
    /// (date, weekly_sales) ascending by date; duplicate dates stay
    /// separate points.
    pub time_series: Vec<(NaiveDate, f64)>,
}

/// Mean weekly sales split by the holiday flag.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HolidaySummary {
    /// `None` when the dataset has no holiday weeks.
    pub holiday_avg_sales: Option<f64>,
    /// `None` when the dataset has no regular weeks.
    pub non_holiday_avg_sales: Option<f64>,
    pub holiday_weeks: usize,
    pub non_holiday_weeks: usize,
}

/// One entry of the stores-by-average-sales ranking.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StoreRanking {
    pub store_id: u32,
    pub avg_sales: f64,
}

// ── Correlation label ─────────────────────────────────────────────────────────

const NEGATIVE_THRESHOLD: f64 = -0.1;
const POSITIVE_THRESHOLD: f64 = 0.1;

/// Qualitative classification of the sales / fuel-price correlation.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum CorrelationLabel {
    Negative,
    Negligible,
    Positive,
}

impl CorrelationLabel {
    /// Classify a Pearson coefficient. Thresholds are fixed: below -0.1 is
    /// Negative, above 0.1 is Positive, anything in between Negligible.
    pub fn classify(r: f64) -> Self {
        if r < NEGATIVE_THRESHOLD {
            CorrelationLabel::Negative
        } else if r > POSITIVE_THRESHOLD {
            CorrelationLabel::Positive
        } else {
            CorrelationLabel::Negligible
        }
    }
}

impl fmt::Display for CorrelationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CorrelationLabel::Negative => "Negative",
            CorrelationLabel::Negligible => "Negligible",
            CorrelationLabel::Positive => "Positive",
        };
        f.write_str(s)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(CorrelationLabel::classify(-0.5), CorrelationLabel::Negative);
        assert_eq!(CorrelationLabel::classify(0.5), CorrelationLabel::Positive);
        assert_eq!(CorrelationLabel::classify(0.0), CorrelationLabel::Negligible);
        // Boundary values are Negligible: the comparison is strict.
        assert_eq!(CorrelationLabel::classify(-0.1), CorrelationLabel::Negligible);
        assert_eq!(CorrelationLabel::classify(0.1), CorrelationLabel::Negligible);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(CorrelationLabel::Negative.to_string(), "Negative");
        assert_eq!(CorrelationLabel::Negligible.to_string(), "Negligible");
        assert_eq!(CorrelationLabel::Positive.to_string(), "Positive");
    }
}
