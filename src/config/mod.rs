// ==========================================
// Inventory Analytics - Configuration Layer
// ==========================================
// Responsibility: analysis thresholds, sheet routing aliases
// ==========================================

pub mod analysis_config;

pub use analysis_config::{AnalysisConfig, SheetAliases};
