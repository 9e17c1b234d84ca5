// ==========================================
// Inventory Analytics - Pipeline Orchestrator
// ==========================================
// Order: lookups (independent) -> consolidation (fatal on error)
//        -> enrichment -> days-of-stock (caller) -> classification
// ==========================================

use crate::config::AnalysisConfig;
use crate::domain::classification::ClassificationSummary;
use crate::domain::lookup::LookupTables;
use crate::domain::sheet::{SheetKind, Workbook};
use crate::domain::sku::{FlatRow, SkuRecord};
use crate::engine::{AbcXyzClassifier, AnalyticsEnricher, DemandSnapshot, GrafanaConsolidator};
use crate::importer::error::{AnalyticsError, AnalyticsResult};
use crate::importer::lookup_builder::LookupBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// ==========================================
// AnalysisReport
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Sorted by sales value, descending
    pub records: Vec<SkuRecord>,
    pub flat_rows: Vec<FlatRow>,
    pub lookups: LookupTables,
    pub snapshot: DemandSnapshot,
    pub summary: ClassificationSummary,
}

// ==========================================
// AnalysisPipeline
// ==========================================
pub struct AnalysisPipeline {
    config: AnalysisConfig,
}

impl AnalysisPipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Runs the full analysis over a workbook.
    ///
    /// `days_of_stock` supplies each record's runway before classification;
    /// returning `None` leaves it unassigned.
    pub fn run<F>(&self, workbook: &Workbook, days_of_stock: F) -> AnalyticsResult<AnalysisReport>
    where
        F: Fn(&SkuRecord) -> Option<f64>,
    {
        info!(sheets = workbook.len(), "analysis started");

        // Step 1: lookups never fail and never block consolidation
        let lookups = LookupBuilder::new().build(workbook);

        // Step 2: consolidation
        let primary = workbook.primary().ok_or_else(|| AnalyticsError::EmptySheet {
            sheet: SheetKind::Primary.to_string(),
        })?;
        let consolidated = GrafanaConsolidator::new(&self.config).consolidate(primary)?;
        let snapshot = DemandSnapshot::from_sheet(primary);

        // Step 3: enrichment
        let mut skus = consolidated.skus;
        AnalyticsEnricher::new(&self.config).enrich_all(skus.iter_mut());

        // Step 4: runway, computed by the caller
        let mut records = skus.into_records();
        for record in records.iter_mut() {
            record.days_of_stock = days_of_stock(record);
        }
        debug!(records = records.len(), "days of stock assigned");

        // Step 5: classification
        let summary = AbcXyzClassifier::new(&self.config).classify(&mut records);

        info!(
            skus = records.len(),
            flat_rows = consolidated.flat_rows.len(),
            "analysis finished"
        );

        Ok(AnalysisReport {
            records,
            flat_rows: consolidated.flat_rows,
            lookups,
            snapshot,
            summary,
        })
    }
}

/// Runway in days from the 30-day rolling daily average.
/// Stock without demand gets `sentinel`; no stock and no demand gets 0.
pub fn runway_days(record: &SkuRecord, sentinel: f64) -> f64 {
    let daily = record.rolling.last_30;
    if daily > 0.0 {
        record.stock_total / daily
    } else if record.stock_total > 0.0 {
        sentinel
    } else {
        0.0
    }
}
