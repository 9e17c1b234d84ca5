// ==========================================
// Inventory Analytics - SKU Records
// ==========================================
// SkuRecord: one aggregated record per normalized SKU
// FlatRow:   one denormalized row per primary-sheet data row
// SkuTable:  SKU-keyed records in first-seen order
// ==========================================

use crate::domain::types::{HealthBucket, StabilityClass, ValueClass};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

// ==========================================
// RollingAverages - recent daily demand averages
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RollingAverages {
    pub last_15: f64,
    pub last_30: f64,
    pub last_45: f64,
    pub last_60: f64,
}

impl RollingAverages {
    pub const WINDOWS: [usize; 4] = [15, 30, 45, 60];

    /// Averages over the most recent values of a recent-first series.
    ///
    /// The sum always divides by the full window length, so a series shorter
    /// than the window is pulled toward zero. An empty series yields zeros.
    pub fn from_recent_first(series: &[f64]) -> Self {
        let avg = |days: usize| -> f64 {
            let window = &series[..series.len().min(days)];
            if window.is_empty() {
                return 0.0;
            }
            window.iter().sum::<f64>() / days as f64
        };

        Self {
            last_15: avg(15),
            last_30: avg(30),
            last_45: avg(45),
            last_60: avg(60),
        }
    }
}

// ==========================================
// SkuRecord
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuRecord {
    // Identity
    pub sku: String,

    // Descriptive fields (first row wins)
    pub description: String,
    pub brand: String,
    pub supplier: String,
    pub analyst: String,
    pub profile: String,

    // Unit economics
    pub unit_cost: f64,
    pub lead_time_days: f64,
    pub units_per_box: f64,
    pub purchase_velocity: f64,

    // Accumulators (order independent sums)
    pub demand_total: f64,
    pub demand_full: f64,
    pub demand_central: f64,
    pub demand_branch: f64,
    pub stock_total: f64,
    pub in_transit: f64,
    pub sold_59d: f64,
    pub depot_breakdown: BTreeMap<String, f64>,

    // History, most recent day first (offset -1 at index 0)
    pub history: Vec<f64>,
    pub rolling: RollingAverages,

    // Analytics
    pub forecast: f64,
    pub anomaly: bool,
    pub std_dev: f64,
    pub cv: f64,
    pub stability: Option<StabilityClass>,

    // Classification
    pub days_of_stock: Option<f64>,
    pub value_class: Option<ValueClass>,
    pub abc_xyz: Option<String>,
    pub health: Option<HealthBucket>,
}

impl SkuRecord {
    /// Empty record with the documented defaults
    pub fn new(sku: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            description: "-".to_string(),
            brand: "-".to_string(),
            supplier: "-".to_string(),
            analyst: "-".to_string(),
            profile: "Sin Clasificar".to_string(),
            unit_cost: 0.0,
            lead_time_days: 30.0,
            units_per_box: 1.0,
            purchase_velocity: 0.0,
            demand_total: 0.0,
            demand_full: 0.0,
            demand_central: 0.0,
            demand_branch: 0.0,
            stock_total: 0.0,
            in_transit: 0.0,
            sold_59d: 0.0,
            depot_breakdown: BTreeMap::new(),
            history: Vec::new(),
            rolling: RollingAverages::default(),
            forecast: 0.0,
            anomaly: false,
            std_dev: 0.0,
            cv: 0.0,
            stability: None,
            days_of_stock: None,
            value_class: None,
            abc_xyz: None,
            health: None,
        }
    }

    /// Demand valued at unit cost
    pub fn sales_value(&self) -> f64 {
        self.demand_total * self.unit_cost
    }

    /// Stock valued at unit cost
    pub fn stock_value(&self) -> f64 {
        self.stock_total * self.unit_cost
    }

    /// History oldest-to-most-recent
    pub fn chronological_history(&self) -> Vec<f64> {
        self.history.iter().rev().copied().collect()
    }
}

// ==========================================
// RowId - opaque per-process row identifier
// ==========================================
// Only for list diffing in views; never compared across runs
static NEXT_ROW_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(u64);

impl RowId {
    pub fn next() -> Self {
        RowId(NEXT_ROW_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

// ==========================================
// FlatRow - per-row detail
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRow {
    pub id: RowId,
    pub sku: String,
    pub description: String,
    pub brand: String,
    pub supplier: String,
    pub depot: String,
    pub demand: f64,
    pub stock: f64,
    pub sold_59d: f64,
    pub depot_days_of_stock: f64,
    pub unit_cost: f64,
    pub analyst: String,
}

// ==========================================
// SkuTable - SKU-keyed records, first-seen order
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<SkuRecord>", into = "Vec<SkuRecord>")]
pub struct SkuTable {
    records: Vec<SkuRecord>,
    index: HashMap<String, usize>,
}

impl SkuTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, sku: &str) -> bool {
        self.index.contains_key(sku)
    }

    pub fn get(&self, sku: &str) -> Option<&SkuRecord> {
        self.index.get(sku).map(|&i| &self.records[i])
    }

    pub fn get_mut(&mut self, sku: &str) -> Option<&mut SkuRecord> {
        match self.index.get(sku) {
            Some(&i) => Some(&mut self.records[i]),
            None => None,
        }
    }

    /// Returns the record for `sku`, creating it with `init` on first sight.
    /// The flag is true when the record was just created.
    pub fn get_or_insert_with<F>(&mut self, sku: &str, init: F) -> (&mut SkuRecord, bool)
    where
        F: FnOnce() -> SkuRecord,
    {
        if let Some(&i) = self.index.get(sku) {
            return (&mut self.records[i], false);
        }
        let i = self.records.len();
        self.records.push(init());
        self.index.insert(sku.to_string(), i);
        (&mut self.records[i], true)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SkuRecord> {
        self.records.iter()
    }

    /// Mutable access for in-place enrichment; keys are not editable through this
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, SkuRecord> {
        self.records.iter_mut()
    }

    pub fn skus(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.sku.as_str())
    }

    pub fn into_records(self) -> Vec<SkuRecord> {
        self.records
    }
}

impl From<Vec<SkuRecord>> for SkuTable {
    fn from(records: Vec<SkuRecord>) -> Self {
        let mut table = SkuTable::new();
        for record in records {
            match table.index.get(&record.sku) {
                Some(&i) => table.records[i] = record,
                None => {
                    table.index.insert(record.sku.clone(), table.records.len());
                    table.records.push(record);
                }
            }
        }
        table
    }
}

impl From<SkuTable> for Vec<SkuRecord> {
    fn from(table: SkuTable) -> Self {
        table.records
    }
}
