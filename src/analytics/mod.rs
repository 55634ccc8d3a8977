//! Aggregate statistics over the sales dataset.
//!
//! Every function here is a pure function of an immutable [`Dataset`]: no
//! internal state, no I/O, results are freshly owned. Safe to call
//! repeatedly and from multiple threads against the same dataset.

use crate::models::{
    CorrelationLabel, Dataset, GlobalSummary, HolidaySummary, StoreRanking, StoreSummary,
};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Failures of the computation layer. All are synchronous and local; none
/// are worth retrying, so callers decide how to surface them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyticsError {
    /// Aggregation over zero records (division by zero).
    #[error("dataset contains no records")]
    EmptyDataset,

    /// Selection references a store absent from the dataset.
    #[error("store {0} not present in dataset")]
    UnknownStore(u32),

    /// Correlation input with zero variance. Surfaced explicitly instead
    /// of letting a NaN propagate into the display.
    #[error("correlation undefined: input series has zero variance")]
    DegenerateCorrelation,
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Per-store mean weekly sales, keyed ascending by store id.
fn per_store_means(dataset: &Dataset) -> BTreeMap<u32, f64> {
    let mut groups: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    for r in dataset.records() {
        let entry = groups.entry(r.store).or_insert((0.0, 0));
        entry.0 += r.weekly_sales;
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|(id, (sum, n))| (id, sum / n as f64))
        .collect()
}

/// Pearson correlation coefficient between two equal-length series.
///
/// Fails with [`AnalyticsError::DegenerateCorrelation`] when either series
/// has zero variance (the coefficient is undefined there). The result is
/// clamped to [-1, 1] so float rounding cannot push it out of range.
fn pearson(xs: &[f64], ys: &[f64]) -> Result<f64, AnalyticsError> {
    debug_assert_eq!(xs.len(), ys.len());
    if xs.is_empty() {
        return Err(AnalyticsError::EmptyDataset);
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return Err(AnalyticsError::DegenerateCorrelation);
    }

    Ok((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

// ── Global metrics ────────────────────────────────────────────────────────────

/// Arithmetic mean of weekly sales across the whole dataset.
pub fn avg_weekly_sales(dataset: &Dataset) -> Result<f64, AnalyticsError> {
    if dataset.is_empty() {
        return Err(AnalyticsError::EmptyDataset);
    }
    let records = dataset.records();
    let sum: f64 = records.iter().map(|r| r.weekly_sales).sum();
    Ok(sum / records.len() as f64)
}

/// Pearson correlation between weekly sales and fuel price across the
/// whole dataset.
pub fn fuel_sales_correlation(dataset: &Dataset) -> Result<f64, AnalyticsError> {
    if dataset.is_empty() {
        return Err(AnalyticsError::EmptyDataset);
    }
    let sales: Vec<f64> = dataset.records().iter().map(|r| r.weekly_sales).collect();
    let fuel: Vec<f64> = dataset.records().iter().map(|r| r.fuel_price).collect();
    pearson(&sales, &fuel)
}

/// Dataset-wide summary, computed once per load.
///
/// Top store: the store whose mean weekly sales is maximal. When two
/// stores tie exactly, the lowest store id wins — grouping iterates in
/// ascending id order and the leader is only replaced on a strictly
/// greater mean, so the policy holds regardless of record order.
pub fn global_summary(dataset: &Dataset) -> Result<GlobalSummary, AnalyticsError> {
    let avg_sales = avg_weekly_sales(dataset)?;

    let (top_store_id, top_store_avg_sales) = per_store_means(dataset)
        .into_iter()
        .fold(None, |best: Option<(u32, f64)>, (id, avg)| match best {
            Some((_, best_avg)) if avg <= best_avg => best,
            _ => Some((id, avg)),
        })
        .ok_or(AnalyticsError::EmptyDataset)?;

    let fuel_sales_correlation = fuel_sales_correlation(dataset)?;

    Ok(GlobalSummary {
        avg_sales,
        top_store_id,
        top_store_avg_sales,
        fuel_sales_correlation,
        correlation_label: CorrelationLabel::classify(fuel_sales_correlation),
    })
}

// ── Per-store metrics ─────────────────────────────────────────────────────────

/// Summary for one store, recomputed on every selection change.
pub fn store_summary(dataset: &Dataset, store_id: u32) -> Result<StoreSummary, AnalyticsError> {
    let subset: Vec<_> = dataset
        .records()
        .iter()
        .filter(|r| r.store == store_id)
        .collect();

    if subset.is_empty() {
        return Err(AnalyticsError::UnknownStore(store_id));
    }

    let mut sum = 0.0;
    let mut max_sales = f64::NEG_INFINITY;
    let mut min_sales = f64::INFINITY;
    for r in &subset {
        sum += r.weekly_sales;
        max_sales = max_sales.max(r.weekly_sales);
        min_sales = min_sales.min(r.weekly_sales);
    }

    let mut time_series: Vec<(NaiveDate, f64)> =
        subset.iter().map(|r| (r.date, r.weekly_sales)).collect();
    // Stable sort: duplicate dates stay distinct points in source order.
    time_series.sort_by_key(|(date, _)| *date);

    Ok(StoreSummary {
        store_id,
        avg_sales: sum / subset.len() as f64,
        max_sales,
        min_sales,
        time_series,
    })
}

/// Distinct store ids, ascending. Deterministic and stable across calls
/// on the same dataset.
pub fn store_ids(dataset: &Dataset) -> Vec<u32> {
    let ids: BTreeSet<u32> = dataset.records().iter().map(|r| r.store).collect();
    ids.into_iter().collect()
}

// ── Holiday split ─────────────────────────────────────────────────────────────

/// Mean weekly sales for holiday weeks vs regular weeks.
///
/// A side with zero weeks yields `None` for its mean rather than an error.
pub fn holiday_summary(dataset: &Dataset) -> Result<HolidaySummary, AnalyticsError> {
    if dataset.is_empty() {
        return Err(AnalyticsError::EmptyDataset);
    }

    let mut holiday = (0.0, 0usize);
    let mut regular = (0.0, 0usize);
    for r in dataset.records() {
        let side = if r.is_holiday { &mut holiday } else { &mut regular };
        side.0 += r.weekly_sales;
        side.1 += 1;
    }

    Ok(HolidaySummary {
        holiday_avg_sales: (holiday.1 > 0).then(|| holiday.0 / holiday.1 as f64),
        non_holiday_avg_sales: (regular.1 > 0).then(|| regular.0 / regular.1 as f64),
        holiday_weeks: holiday.1,
        non_holiday_weeks: regular.1,
    })
}

// ── Store ranking ─────────────────────────────────────────────────────────────

/// The `count` best stores by mean weekly sales, descending. Ties resolve
/// to the lower store id (stable sort over ascending-id input).
pub fn top_stores(dataset: &Dataset, count: usize) -> Result<Vec<StoreRanking>, AnalyticsError> {
    if dataset.is_empty() {
        return Err(AnalyticsError::EmptyDataset);
    }

    let mut ranking: Vec<StoreRanking> = per_store_means(dataset)
        .into_iter()
        .map(|(store_id, avg_sales)| StoreRanking { store_id, avg_sales })
        .collect();

    ranking.sort_by(|a, b| {
        b.avg_sales
            .partial_cmp(&a.avg_sales)
            .unwrap_or(Ordering::Equal)
    });
    ranking.truncate(count);
    Ok(ranking)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
