// ==========================================
// Inventory Analytics - Engine Layer
// ==========================================
// Responsibility: consolidation, analytics, classification rules
// Boundary: pure in-memory transforms, no I/O
// ==========================================

pub mod analytics;
pub mod classifier;
pub mod consolidator;
pub mod orchestrator;
pub mod snapshot;

pub use analytics::{detect_anomaly, linear_regression, standard_deviation, AnalyticsEnricher, Regression};
pub use classifier::AbcXyzClassifier;
pub use consolidator::{ConsolidationResult, GrafanaColumns, GrafanaConsolidator};
pub use orchestrator::{runway_days, AnalysisPipeline, AnalysisReport};
pub use snapshot::DemandSnapshot;
