// ==========================================
// Inventory Analytics - Lookup Builder
// ==========================================
// Responsibility: auxiliary sheet -> SKU-keyed mapping
// Each sheet kind is independent; a missing or broken sheet gives an
// empty mapping and never blocks the primary consolidation.
// ==========================================

use crate::domain::lookup::{
    AiRecommendation, ChargeEntry, ChargesLookup, ListingStatus, LookupTables, MarketplaceListing,
};
use crate::domain::sheet::{cell_at, Cell, Sheet, SheetKind, Workbook};
use crate::importer::column_resolver::ColumnResolver;
use crate::importer::value_normalizer::{clean_str, clean_string, parse_number};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

const SKU_COLUMN: &[&str] = &["SKU"];

/// Recommendation keywords that mark a SKU as urgent (any one is enough)
const URGENCY_KEYWORDS: &[&str] = &["urgencia", "perdiendo"];

/// Flag values read as "blocked"
const BLOCKED_FLAGS: &[&str] = &["SI", "SÍ", "S"];

// ==========================================
// LookupBuilder
// ==========================================
pub struct LookupBuilder;

impl LookupBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Builds all six lookups from whatever auxiliary sheets the workbook holds
    #[instrument(skip(self, workbook), fields(sheets = workbook.len()))]
    pub fn build(&self, workbook: &Workbook) -> LookupTables {
        let tables = LookupTables {
            listing_status: self.listing_status(workbook.get(SheetKind::ListingStatus)),
            charges: self.charges(workbook.get(SheetKind::Charges)),
            ai_plan: self.ai_plan(workbook.get(SheetKind::AiPlan)),
            shipments: self.shipments(workbook.get(SheetKind::Shipments)),
            basket_blocked: self.basket_blocked(workbook.get(SheetKind::Basket)),
            marketplace_codes: self.marketplace_codes(workbook.get(SheetKind::MarketplaceCodes)),
        };

        info!(
            listing_status = tables.listing_status.len(),
            charges = tables.charges.entries.len(),
            ai_plan = tables.ai_plan.len(),
            shipments = tables.shipments.len(),
            basket = tables.basket_blocked.len(),
            marketplace_codes = tables.marketplace_codes.len(),
            "lookups built"
        );
        tables
    }

    // ==========================================
    // Marketplace listing status
    // ==========================================
    pub fn listing_status(&self, sheet: Option<&Sheet>) -> BTreeMap<String, ListingStatus> {
        let mut map = BTreeMap::new();
        let Some((sheet, cols, sku)) = prepare(sheet, SheetKind::ListingStatus) else {
            return map;
        };
        let boost = cols.find(&["IMPULSAR"]);
        let status = cols.find(&["ESTADO DE PUBLICACION"]);
        let quality = cols.find(&["Calidad ok"]);

        for (key, row) in keyed_rows(sheet, sku) {
            map.insert(
                key,
                ListingStatus {
                    boost: cell_at(row, boost).to_string().contains("SI"),
                    status: cell_at(row, status).to_string(),
                    quality: cell_at(row, quality).to_string(),
                },
            );
        }
        map
    }

    // ==========================================
    // Charges (latest date only)
    // ==========================================
    /// Keeps only rows of the most recent serial date; older periods are
    /// dropped, not merged. Without a date column every row counts.
    pub fn charges(&self, sheet: Option<&Sheet>) -> ChargesLookup {
        let mut lookup = ChargesLookup::default();
        let Some((sheet, cols, sku)) = prepare(sheet, SheetKind::Charges) else {
            return lookup;
        };
        let units_col = cols.find(&["Unidades"]);
        let unit_charge_col = cols.find(&["Cargo por unidad"]);
        let date_col = cols.find(&["FECHA"]);
        let age_col = cols.find(&["Antigüedad"]);

        // Starts at 0: rows dated 0 still match when nothing is later
        let latest = date_col.map(|_| {
            let dates: Vec<f64> = sheet
                .data_rows()
                .iter()
                .filter_map(|row| match cell_at(row, date_col) {
                    Cell::Number(d) => Some(*d),
                    _ => None,
                })
                .collect();
            if dates.is_empty() {
                warn!(sheet = %sheet.name, "charges date column holds no numeric dates, no row kept");
            }
            dates.into_iter().fold(0.0_f64, f64::max)
        });
        lookup.latest_date = latest.filter(|d| *d > 0.0);

        for (key, row) in keyed_rows(sheet, sku) {
            if let Some(latest) = latest {
                let same_period = matches!(cell_at(row, date_col), Cell::Number(d) if *d == latest);
                if !same_period {
                    continue;
                }
            }

            let units = parse_number(cell_at(row, units_col));
            let unit_charge = parse_number(cell_at(row, unit_charge_col));
            let entry = lookup.entries.entry(key).or_insert_with(ChargeEntry::default);
            entry.units += units;
            entry.amount += units * unit_charge;

            let age = cell_at(row, age_col);
            if age.is_truthy() {
                entry.age = age.to_string();
            }
        }
        lookup
    }

    // ==========================================
    // AI replenishment plan
    // ==========================================
    pub fn ai_plan(&self, sheet: Option<&Sheet>) -> BTreeMap<String, AiRecommendation> {
        let mut map = BTreeMap::new();
        let Some((sheet, cols, sku)) = prepare(sheet, SheetKind::AiPlan) else {
            return map;
        };
        let rec_col = cols.find(&["Recomendación"]);
        let suggested_col = cols.find(&["Unidades sugeridas", "sugeridas"]);

        for (key, row) in keyed_rows(sheet, sku) {
            let recommendation = cell_at(row, rec_col).raw_text();
            let urgent = is_urgent(&recommendation);
            map.insert(
                key,
                AiRecommendation {
                    suggested_units: parse_number(cell_at(row, suggested_col)),
                    urgent,
                    recommendation,
                },
            );
        }
        map
    }

    // ==========================================
    // Shipment history (summed)
    // ==========================================
    pub fn shipments(&self, sheet: Option<&Sheet>) -> BTreeMap<String, f64> {
        let mut map = BTreeMap::new();
        let Some((sheet, cols, sku)) = prepare(sheet, SheetKind::Shipments) else {
            return map;
        };
        let qty_col = cols.find(&["ENVIO REALIZADO"]);

        for (key, row) in keyed_rows(sheet, sku) {
            *map.entry(key).or_insert(0.0) += parse_number(cell_at(row, qty_col));
        }
        map
    }

    // ==========================================
    // Basket block flags
    // ==========================================
    pub fn basket_blocked(&self, sheet: Option<&Sheet>) -> BTreeMap<String, bool> {
        let mut map = BTreeMap::new();
        let Some((sheet, cols, sku)) = prepare(sheet, SheetKind::Basket) else {
            return map;
        };
        let flag_col = cols.find(&["FLAG BLOQUEADOS", "BLOQUEADOS", "BLOQUEADO"]);

        for (key, row) in keyed_rows(sheet, sku) {
            let flag = clean_str(&cell_at(row, flag_col).raw_text());
            map.insert(key, BLOCKED_FLAGS.contains(&flag.as_str()));
        }
        map
    }

    // ==========================================
    // Marketplace publication codes
    // ==========================================
    pub fn marketplace_codes(&self, sheet: Option<&Sheet>) -> BTreeMap<String, MarketplaceListing> {
        let mut map = BTreeMap::new();
        let Some((sheet, cols, sku)) = prepare(sheet, SheetKind::MarketplaceCodes) else {
            return map;
        };
        let code_col = cols.find(&["MLA"]);
        let status_col = cols.find(&["ESTADO"]);

        for (key, row) in keyed_rows(sheet, sku) {
            map.insert(
                key,
                MarketplaceListing {
                    code: clean_string(cell_at(row, code_col)),
                    status: clean_string(cell_at(row, status_col)),
                },
            );
        }
        map
    }
}

impl Default for LookupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive keyword containment, OR semantics
pub fn is_urgent(recommendation: &str) -> bool {
    let lower = recommendation.to_lowercase();
    URGENCY_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Returns the sheet, its resolver and SKU column, or None when the lookup
/// must stay empty.
fn prepare(sheet: Option<&Sheet>, kind: SheetKind) -> Option<(&Sheet, ColumnResolver, usize)> {
    let Some(sheet) = sheet else {
        debug!(kind = %kind, "auxiliary sheet absent, empty lookup");
        return None;
    };
    if !sheet.has_data() {
        debug!(kind = %kind, sheet = %sheet.name, "auxiliary sheet has no data rows");
        return None;
    }
    let cols = ColumnResolver::new(sheet.header());
    match cols.find(SKU_COLUMN) {
        Some(sku) => Some((sheet, cols, sku)),
        None => {
            warn!(kind = %kind, sheet = %sheet.name, "auxiliary sheet has no SKU column, skipped");
            None
        }
    }
}

/// Data rows paired with their normalized SKU; blank SKUs are skipped
fn keyed_rows(sheet: &Sheet, sku_col: usize) -> impl Iterator<Item = (String, &Vec<Cell>)> {
    sheet.data_rows().iter().filter_map(move |row| {
        let key = clean_string(cell_at(row, Some(sku_col)));
        if key.is_empty() {
            None
        } else {
            Some((key, row))
        }
    })
}
