// ==========================================
// Inventory Analytics - Analytics Enricher
// ==========================================
// Responsibility: per-SKU forecast, anomaly flag, stability class
// Input: SkuRecord.history (recent first)
// Output: updates forecast / anomaly / std_dev / cv / stability in place
// ==========================================

use crate::config::AnalysisConfig;
use crate::domain::sku::SkuRecord;
use crate::domain::types::StabilityClass;
use tracing::{debug, instrument};

// ==========================================
// Statistics helpers
// ==========================================

/// Ordinary least-squares fit with x = 0..n-1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    /// Fitted value at x = n
    pub next_value: f64,
}

pub fn linear_regression(y: &[f64]) -> Regression {
    let n = y.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (i, value) in y.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += value;
        sum_xy += x * value;
        sum_xx += x * x;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;
    Regression {
        slope,
        intercept,
        next_value: slope * n + intercept,
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by n)
pub fn standard_deviation(values: &[f64]) -> f64 {
    deviation_around(values, mean(values))
}

/// Population-style deviation of `values` around an arbitrary `center`
pub fn deviation_around(values: &[f64], center: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - center).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// True when the last point's z-score over the whole series exceeds `z_threshold`
pub fn detect_anomaly(series: &[f64], min_points: usize, z_threshold: f64) -> bool {
    if series.len() < min_points {
        return false;
    }
    let std_dev = standard_deviation(series);
    if std_dev == 0.0 {
        return false;
    }
    let Some(last) = series.last() else {
        return false;
    };
    ((last - mean(series)) / std_dev).abs() > z_threshold
}

// ==========================================
// AnalyticsEnricher
// ==========================================
pub struct AnalyticsEnricher<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> AnalyticsEnricher<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Enriches every record in place
    #[instrument(skip(self, records))]
    pub fn enrich_all<'r, I>(&self, records: I) -> usize
    where
        I: IntoIterator<Item = &'r mut SkuRecord>,
    {
        let mut count = 0;
        for record in records {
            self.enrich(record);
            count += 1;
        }
        debug!(records = count, "analytics enrichment done");
        count
    }

    pub fn enrich(&self, record: &mut SkuRecord) {
        // Forecast and anomaly need more than `min_history_points`
        if record.history.len() > self.config.min_history_points {
            let chrono = record.chronological_history();
            let reg = linear_regression(&chrono);
            record.forecast = reg.next_value.max(0.0);
            record.anomaly = detect_anomaly(
                &chrono,
                self.config.min_history_points,
                self.config.anomaly_z_threshold,
            );
        } else {
            record.forecast = 0.0;
            record.anomaly = false;
        }

        if record.history.is_empty() {
            record.std_dev = 0.0;
            record.cv = 0.0;
            record.stability = Some(StabilityClass::NoData);
            return;
        }

        // Centered on total demand, the same quantity the CV divides by
        record.std_dev = deviation_around(&record.history, record.demand_total);
        record.cv = if record.demand_total > 0.0 {
            record.std_dev / record.demand_total
        } else {
            0.0
        };
        record.stability = Some(self.stability(record.demand_total, record.cv));
    }

    fn stability(&self, demand_total: f64, cv: f64) -> StabilityClass {
        if demand_total == 0.0 {
            StabilityClass::Inactive
        } else if cv < self.config.stable_cv {
            StabilityClass::Stable
        } else if cv < self.config.variable_cv {
            StabilityClass::Variable
        } else {
            StabilityClass::Erratic
        }
    }
}
