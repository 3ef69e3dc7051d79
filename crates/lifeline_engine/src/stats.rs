//! Summary statistics over a life series.

use serde::Serialize;

use crate::series::LifeSeries;

/// Summary of a series; ages are the first occurrence of each extreme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesStats {
    pub first_open: f64,
    pub first_close: f64,
    pub last_close: f64,
    pub max_high: f64,
    pub max_high_age: usize,
    pub min_low: f64,
    pub min_low_age: usize,
    pub mean_close: f64,
    /// Population variance of the closes.
    pub close_variance: f64,
    /// Last close against the first open, in percent.
    pub total_return_pct: f64,
    /// Standard deviation of the closes relative to their mean, in percent.
    pub volatility_pct: f64,
}

impl SeriesStats {
    /// `None` for an empty series.
    pub fn from_series(series: &LifeSeries) -> Option<Self> {
        let records = series.records();
        let first = records.first()?;
        let last = records.last()?;

        let (max_high_age, max_high) = records
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, r)| {
                if r.high > best.1 { (i, r.high) } else { best }
            });
        let (min_low_age, min_low) = records
            .iter()
            .enumerate()
            .fold((0, f64::INFINITY), |best, (i, r)| {
                if r.low < best.1 { (i, r.low) } else { best }
            });

        let n = records.len() as f64;
        let mean_close = series.closes().sum::<f64>() / n;
        let close_variance = series
            .closes()
            .map(|c| (c - mean_close).powi(2))
            .sum::<f64>()
            / n;

        Some(Self {
            first_open: first.open,
            first_close: first.close,
            last_close: last.close,
            max_high,
            max_high_age,
            min_low,
            min_low_age,
            mean_close,
            close_variance,
            total_return_pct: (last.close - first.open) / first.open * 100.0,
            volatility_pct: close_variance.sqrt() / mean_close * 100.0,
        })
    }
}
