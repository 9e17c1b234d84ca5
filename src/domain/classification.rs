// ==========================================
// Inventory Analytics - Classification Output
// ==========================================
// HealthMatrix: stock value by [value class][health bucket]
// ==========================================

use crate::domain::types::{HealthBucket, ValueClass};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// HealthMatrix (3 x 5)
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthMatrix {
    cells: [[f64; 5]; 3],
}

impl HealthMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, class: ValueClass, bucket: HealthBucket, stock_value: f64) {
        self.cells[class.index()][bucket.index()] += stock_value;
    }

    pub fn get(&self, class: ValueClass, bucket: HealthBucket) -> f64 {
        self.cells[class.index()][bucket.index()]
    }

    /// Sum of one value-class row
    pub fn row_total(&self, class: ValueClass) -> f64 {
        HealthBucket::ALL.iter().map(|b| self.get(class, *b)).sum()
    }

    /// Sum of one health-bucket column
    pub fn bucket_total(&self, bucket: HealthBucket) -> f64 {
        ValueClass::ALL.iter().map(|c| self.get(*c, bucket)).sum()
    }

    /// Sum over every cell
    pub fn total(&self) -> f64 {
        self.cells.iter().flat_map(|row| row.iter()).sum()
    }
}

// ==========================================
// ClassificationSummary
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationSummary {
    pub total_sales_value: f64,
    pub matrix: HealthMatrix,
    /// Count per combined class ("AX", "BZ", ...)
    pub class_counts: BTreeMap<String, usize>,
}

impl ClassificationSummary {
    pub fn count(&self, class: &str) -> usize {
        self.class_counts.get(class).copied().unwrap_or(0)
    }
}
