// ==========================================
// Inventory Analytics - Grafana Consolidator
// ==========================================
// Responsibility: single pass over the primary sheet
// Output: one SkuRecord per SKU (first-seen order) + one FlatRow per data row
// Fatal: empty/header-only sheet, missing SKU/VTAR/Stock columns
// ==========================================

use crate::config::AnalysisConfig;
use crate::domain::sheet::{cell_at, Cell, Sheet};
use crate::domain::sku::{FlatRow, RollingAverages, RowId, SkuRecord, SkuTable};
use crate::domain::types::DepotBucket;
use crate::importer::column_resolver::{ColumnResolver, HistoryColumn};
use crate::importer::error::{AnalyticsError, AnalyticsResult};
use crate::importer::value_normalizer::{clean_string, parse_number};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Marker row the export appends at the bottom
const TOTAL_MARKER: &str = "TOTAL";

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("SKU", &["SKU"]),
    ("VTAR", &["VTAR"]),
    ("Stock", &["Stock"]),
];

// ==========================================
// GrafanaColumns - positions resolved once per sheet
// ==========================================
#[derive(Debug, Clone)]
pub struct GrafanaColumns {
    pub sku: usize,
    pub demand: usize,
    pub stock: usize,
    pub depot: Option<usize>,
    pub purchase_velocity: Option<usize>,
    pub description: Option<usize>,
    pub brand: Option<usize>,
    pub supplier: Option<usize>,
    pub analyst: Option<usize>,
    pub unit_cost: Option<usize>,
    pub lead_time: Option<usize>,
    pub units_per_box: Option<usize>,
    pub in_transit: Option<usize>,
    pub sold_59d: Option<usize>,
    pub profile: Option<usize>,
    pub history: Vec<HistoryColumn>,
}

impl GrafanaColumns {
    /// Validates the required columns (all misses reported together) and
    /// resolves the optional ones
    pub fn resolve(sheet: &Sheet, history_days: usize) -> AnalyticsResult<Self> {
        let cols = ColumnResolver::new(sheet.header());
        let required = cols.require(&sheet.name, REQUIRED_COLUMNS)?;
        let name = sheet.name.as_str();

        Ok(Self {
            sku: required[0],
            demand: required[1],
            stock: required[2],
            depot: cols.optional(name, "Deposito", &["Deposito"]),
            purchase_velocity: cols.optional(name, "VPD_Cpra", &["VPD_Cpra"]),
            description: cols.optional(name, "Descripcion", &["Descripcion"]),
            brand: cols.optional(name, "Marca", &["Marca"]),
            supplier: cols.optional(name, "Proveedor", &["Proveedor", "Prov"]),
            analyst: cols.optional(name, "Analista", &["Analista"]),
            unit_cost: cols.optional(name, "Costo", &["Costo", "Reposición"]),
            lead_time: cols.optional(name, "Lead", &["Lead"]),
            units_per_box: cols.optional(name, "UXB", &["UXB"]),
            in_transit: cols.optional(name, "COMPRAS", &["COMPRAS"]),
            sold_59d: cols.optional(
                name,
                "TOTAL VENDIDO",
                &["TOTAL VENDIDO", "59 DÍAS", "VENDIDO 59"],
            ),
            profile: cols.optional(name, "Perfil", &["Perfil"]),
            history: cols.history_columns(history_days),
        })
    }
}

// ==========================================
// ConsolidationResult
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsolidationResult {
    pub skus: SkuTable,
    pub flat_rows: Vec<FlatRow>,
}

// ==========================================
// GrafanaConsolidator
// ==========================================
pub struct GrafanaConsolidator<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> GrafanaConsolidator<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Aggregates the primary sheet. Either the whole sheet succeeds or the
    /// call fails; there is no partial result.
    #[instrument(skip(self, sheet), fields(sheet = %sheet.name, rows = sheet.rows.len()))]
    pub fn consolidate(&self, sheet: &Sheet) -> AnalyticsResult<ConsolidationResult> {
        if !sheet.has_data() {
            return Err(AnalyticsError::EmptySheet {
                sheet: sheet.name.clone(),
            });
        }

        let cols = GrafanaColumns::resolve(sheet, self.config.history_days)?;
        debug!(history_columns = cols.history.len(), "columns resolved");

        let mut skus = SkuTable::new();
        let mut flat_rows = Vec::with_capacity(sheet.data_rows().len());

        for row in sheet.data_rows() {
            let sku = clean_string(cell_at(row, Some(cols.sku)));
            if sku.is_empty() || sku == TOTAL_MARKER {
                continue;
            }

            let depot = clean_string(cell_at(row, cols.depot));
            let demand = parse_number(cell_at(row, Some(cols.demand)));
            let stock = parse_number(cell_at(row, Some(cols.stock)));
            let sold_59d = parse_number(cell_at(row, cols.sold_59d));

            let (record, created) =
                skus.get_or_insert_with(&sku, || self.new_record(&sku, row, &cols));
            if created {
                self.capture_history(record, row, &cols.history);
            }

            // Accumulators
            record.demand_total += demand;
            record.stock_total += stock;
            record.sold_59d += sold_59d;
            if cols.in_transit.is_some() {
                record.in_transit += parse_number(cell_at(row, cols.in_transit));
            }

            match DepotBucket::classify(&depot) {
                DepotBucket::Full => record.demand_full += demand,
                DepotBucket::Central => record.demand_central += demand,
                DepotBucket::Branch => record.demand_branch += demand,
            }
            if let Some(code) = depot_code(&depot) {
                if self.config.breakdown_depots.iter().any(|d| d == code) {
                    *record
                        .depot_breakdown
                        .entry(code.to_string())
                        .or_insert(0.0) += demand;
                }
            }

            let description = {
                let cell = cell_at(row, cols.description);
                if cell.is_truthy() {
                    cell.to_string()
                } else {
                    record.description.clone()
                }
            };

            flat_rows.push(FlatRow {
                id: RowId::next(),
                sku,
                description,
                brand: cell_at(row, cols.brand).text_or("-"),
                supplier: cell_at(row, cols.supplier).text_or("-"),
                depot,
                demand,
                stock,
                sold_59d,
                depot_days_of_stock: self.depot_days_of_stock(stock, demand),
                unit_cost: parse_number(cell_at(row, cols.unit_cost)),
                analyst: cell_at(row, cols.analyst).text_or("-"),
            });
        }

        info!(skus = skus.len(), flat_rows = flat_rows.len(), "primary sheet consolidated");
        Ok(ConsolidationResult { skus, flat_rows })
    }

    fn new_record(&self, sku: &str, row: &[Cell], cols: &GrafanaColumns) -> SkuRecord {
        let mut record = SkuRecord::new(sku);
        record.description = cell_at(row, cols.description).text_or("-");
        record.brand = cell_at(row, cols.brand).text_or("-");
        record.supplier = cell_at(row, cols.supplier).text_or("-");
        record.analyst = cell_at(row, cols.analyst).text_or("-");
        record.profile = cell_at(row, cols.profile).text_or("Sin Clasificar");
        record.unit_cost = parse_number(cell_at(row, cols.unit_cost));
        record.lead_time_days = non_zero_or(
            parse_number(cell_at(row, cols.lead_time)),
            self.config.default_lead_time_days,
        );
        record.purchase_velocity = parse_number(cell_at(row, cols.purchase_velocity));
        record.units_per_box = non_zero_or(
            parse_number(cell_at(row, cols.units_per_box)),
            self.config.default_units_per_box,
        );
        record
    }

    /// History is taken from the first row seen for the SKU only
    fn capture_history(&self, record: &mut SkuRecord, row: &[Cell], history: &[HistoryColumn]) {
        if history.is_empty() || !record.history.is_empty() {
            return;
        }
        record.history = history
            .iter()
            .map(|col| parse_number(cell_at(row, Some(col.index))))
            .collect();
        record.rolling = RollingAverages::from_recent_first(&record.history);
    }

    /// stock / demand; sentinel when only stock exists; 0 when both are zero
    fn depot_days_of_stock(&self, stock: f64, demand: f64) -> f64 {
        if demand > 0.0 {
            stock / demand
        } else if stock > 0.0 {
            self.config.days_of_stock_sentinel
        } else {
            0.0
        }
    }
}

static DEPOT_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid pattern"));

/// First run of ASCII digits in a depot label ("DEPOSITO 86 - NORTE" -> "86")
pub fn depot_code(depot: &str) -> Option<&str> {
    DEPOT_CODE.find(depot).map(|m| m.as_str())
}

fn non_zero_or(value: f64, default: f64) -> f64 {
    if value == 0.0 || value.is_nan() {
        default
    } else {
        value
    }
}
