// ==========================================
// Inventory Analytics - ABC/XYZ Classifier
// ==========================================
// Responsibility: Pareto value class + variability class + health matrix
// Input: enriched records carrying a caller-assigned days_of_stock
// Output: records sorted by sales value (desc, stable) and annotated;
//         ClassificationSummary with matrix and combined-class counts
// ==========================================

use crate::config::AnalysisConfig;
use crate::domain::classification::{ClassificationSummary, HealthMatrix};
use crate::domain::sku::SkuRecord;
use crate::domain::types::{HealthBucket, StabilityClass, ValueClass, VariabilityClass};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{info, instrument};

pub struct AbcXyzClassifier<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> AbcXyzClassifier<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Sorts `records` in place by sales value and annotates each one.
    /// Ties keep their input order.
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub fn classify(&self, records: &mut [SkuRecord]) -> ClassificationSummary {
        let total_sales_value: f64 = records.iter().map(SkuRecord::sales_value).sum();

        records.sort_by(|a, b| {
            b.sales_value()
                .partial_cmp(&a.sales_value())
                .unwrap_or(Ordering::Equal)
        });

        let mut running = 0.0;
        let mut matrix = HealthMatrix::new();
        let mut class_counts: BTreeMap<String, usize> = BTreeMap::new();

        for record in records.iter_mut() {
            running += record.sales_value();
            let fraction = if total_sales_value != 0.0 {
                running / total_sales_value
            } else {
                0.0
            };

            let value_class = self.value_class(fraction);
            let variability =
                VariabilityClass::from(record.stability.unwrap_or(StabilityClass::NoData));
            let combined = format!("{}{}", value_class, variability);
            *class_counts.entry(combined.clone()).or_insert(0) += 1;

            let health = self.health_bucket(record.days_of_stock);
            matrix.add(value_class, health, record.stock_value());

            record.value_class = Some(value_class);
            record.abc_xyz = Some(combined);
            record.health = Some(health);
        }

        info!(
            total_sales_value,
            classes = class_counts.len(),
            "ABC/XYZ classification done"
        );

        ClassificationSummary {
            total_sales_value,
            matrix,
            class_counts,
        }
    }

    pub fn value_class(&self, cumulative_fraction: f64) -> ValueClass {
        if cumulative_fraction <= self.config.class_a_cutoff {
            ValueClass::A
        } else if cumulative_fraction <= self.config.class_b_cutoff {
            ValueClass::B
        } else {
            ValueClass::C
        }
    }

    /// Unassigned runway falls through every threshold into Obsolete
    pub fn health_bucket(&self, days_of_stock: Option<f64>) -> HealthBucket {
        let Some(days) = days_of_stock else {
            return HealthBucket::Obsolete;
        };
        let [critical, low, healthy, excess] = self.config.health_thresholds;
        if days <= critical {
            HealthBucket::CriticalLow
        } else if days <= low {
            HealthBucket::Low
        } else if days <= healthy {
            HealthBucket::Healthy
        } else if days <= excess {
            HealthBucket::Excess
        } else {
            HealthBucket::Obsolete
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sku: &str, demand: f64, cost: f64, stock: f64, days: f64) -> SkuRecord {
        let mut r = SkuRecord::new(sku);
        r.demand_total = demand;
        r.unit_cost = cost;
        r.stock_total = stock;
        r.days_of_stock = Some(days);
        r.stability = Some(StabilityClass::Stable);
        r
    }

    #[test]
    fn test_health_buckets_boundaries() {
        let config = AnalysisConfig::default();
        let c = AbcXyzClassifier::new(&config);
        assert_eq!(c.health_bucket(Some(10.0)), HealthBucket::CriticalLow);
        assert_eq!(c.health_bucket(Some(10.5)), HealthBucket::Low);
        assert_eq!(c.health_bucket(Some(17.0)), HealthBucket::Low);
        assert_eq!(c.health_bucket(Some(30.0)), HealthBucket::Healthy);
        assert_eq!(c.health_bucket(Some(45.0)), HealthBucket::Excess);
        assert_eq!(c.health_bucket(Some(45.1)), HealthBucket::Obsolete);
        assert_eq!(c.health_bucket(None), HealthBucket::Obsolete);
    }

    #[test]
    fn test_sorted_descending_and_stable_on_ties() {
        let config = AnalysisConfig::default();
        let mut records = vec![
            record("LOW", 1.0, 1.0, 0.0, 5.0),
            record("TIE1", 5.0, 2.0, 0.0, 5.0),
            record("HIGH", 100.0, 1.0, 0.0, 5.0),
            record("TIE2", 10.0, 1.0, 0.0, 5.0),
        ];
        AbcXyzClassifier::new(&config).classify(&mut records);
        let order: Vec<&str> = records.iter().map(|r| r.sku.as_str()).collect();
        assert_eq!(order, vec!["HIGH", "TIE1", "TIE2", "LOW"]);
    }

    #[test]
    fn test_uniform_values_hit_boundaries_exactly() {
        // 20 equal records: fractions 0.05, 0.10, ... 1.0
        let config = AnalysisConfig::default();
        let mut records: Vec<SkuRecord> = (0..20)
            .map(|i| record(&format!("S{i:02}"), 1.0, 1.0, 1.0, 20.0))
            .collect();
        let summary = AbcXyzClassifier::new(&config).classify(&mut records);

        let classes: Vec<ValueClass> = records.iter().map(|r| r.value_class.unwrap()).collect();
        assert_eq!(classes.iter().filter(|c| **c == ValueClass::A).count(), 16);
        assert_eq!(classes.iter().filter(|c| **c == ValueClass::B).count(), 3);
        assert_eq!(classes.iter().filter(|c| **c == ValueClass::C).count(), 1);
        assert_eq!(classes[15], ValueClass::A); // 16/20 = 0.8
        assert_eq!(classes[18], ValueClass::B); // 19/20 = 0.95
        assert_eq!(summary.count("AX"), 16);
        assert_eq!(summary.count("BX"), 3);
        assert_eq!(summary.count("CX"), 1);
    }

    #[test]
    fn test_matrix_total_equals_stock_value() {
        let config = AnalysisConfig::default();
        let mut records = vec![
            record("A", 100.0, 2.0, 40.0, 5.0),
            record("B", 10.0, 3.0, 7.0, 20.0),
            record("C", 1.0, 5.0, 9.0, 90.0),
        ];
        let expected: f64 = records.iter().map(|r| r.stock_value()).sum();
        let summary = AbcXyzClassifier::new(&config).classify(&mut records);
        assert!((summary.matrix.total() - expected).abs() < 1e-9);
        assert_eq!(summary.total_sales_value, 235.0);
    }

    #[test]
    fn test_zero_total_value_is_all_class_a() {
        let config = AnalysisConfig::default();
        let mut records = vec![record("A", 0.0, 1.0, 1.0, 5.0), record("B", 3.0, 0.0, 1.0, 5.0)];
        let summary = AbcXyzClassifier::new(&config).classify(&mut records);
        assert!(records.iter().all(|r| r.value_class == Some(ValueClass::A)));
        assert_eq!(summary.count("AX"), 2);
    }

    #[test]
    fn test_variability_from_stability() {
        let config = AnalysisConfig::default();
        let mut a = record("A", 10.0, 1.0, 0.0, 5.0);
        a.stability = Some(StabilityClass::Variable);
        let mut b = record("B", 5.0, 1.0, 0.0, 5.0);
        b.stability = None;
        let mut records = vec![a, b];
        AbcXyzClassifier::new(&config).classify(&mut records);
        assert_eq!(records[0].abc_xyz.as_deref(), Some("AY"));
        assert!(records[1].abc_xyz.as_deref().unwrap().ends_with('Z'));
    }
}
