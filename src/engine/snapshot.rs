// ==========================================
// Inventory Analytics - Demand Snapshot
// ==========================================
// Responsibility: SKU -> total demand, for dated history kept by callers
// Never fails: no SKU column gives an empty snapshot, no VTAR column
// lists every SKU at 0
// ==========================================

use crate::domain::sheet::{cell_at, Sheet};
use crate::importer::column_resolver::ColumnResolver;
use crate::importer::value_normalizer::{clean_string, parse_number};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandSnapshot {
    pub demand: BTreeMap<String, f64>,
}

impl DemandSnapshot {
    pub fn from_sheet(sheet: &Sheet) -> Self {
        let cols = ColumnResolver::new(sheet.header());
        let Some(sku_col) = cols.find(&["SKU"]) else {
            warn!(sheet = %sheet.name, "snapshot skipped, SKU column missing");
            return Self::default();
        };
        let demand_col = cols.find(&["VTAR"]);
        if demand_col.is_none() {
            warn!(sheet = %sheet.name, "VTAR column missing, snapshot demand is zero");
        }

        let mut demand = BTreeMap::new();
        for row in sheet.data_rows() {
            let sku = clean_string(cell_at(row, Some(sku_col)));
            if sku.is_empty() || sku == "TOTAL" {
                continue;
            }
            *demand.entry(sku).or_insert(0.0) += parse_number(cell_at(row, demand_col));
        }
        Self { demand }
    }

    pub fn get(&self, sku: &str) -> Option<f64> {
        self.demand.get(sku).copied()
    }

    pub fn len(&self) -> usize {
        self.demand.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demand.is_empty()
    }
}
