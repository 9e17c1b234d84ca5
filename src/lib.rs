// ==========================================
// Inventory Analytics - Core Library
// ==========================================
// Input: multi-sheet inventory workbook (Excel / CSV)
// Output: per-SKU records, per-depot flat rows, lookups,
//         ABC/XYZ classification and health matrix
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and types
pub mod domain;

// Engine layer - business rules
pub mod engine;

// Import layer - external data
pub mod importer;

// Configuration layer
pub mod config;

// Logging
pub mod logging;

// ==========================================
// Core re-exports
// ==========================================

pub use config::{AnalysisConfig, SheetAliases};

pub use domain::{
    Cell, ClassificationSummary, FlatRow, HealthBucket, HealthMatrix, LookupTables, Sheet,
    SheetKind, SkuRecord, SkuTable, StabilityClass, ValueClass, VariabilityClass, Workbook,
};

pub use engine::{
    runway_days, AbcXyzClassifier, AnalysisPipeline, AnalysisReport, AnalyticsEnricher,
    DemandSnapshot, GrafanaConsolidator,
};

pub use importer::{AnalyticsError, AnalyticsResult, LookupBuilder, WorkbookReader};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "inventory-analytics";
