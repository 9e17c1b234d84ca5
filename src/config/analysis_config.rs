// ==========================================
// Inventory Analytics - Analysis Configuration
// ==========================================
// Responsibility: thresholds and sheet-name aliases
// Storage: optional JSON document, missing keys fall back to defaults
// ==========================================

use crate::domain::sheet::SheetKind;
use crate::importer::error::{AnalyticsError, AnalyticsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Z-score above which the latest point is an anomaly
    pub anomaly_z_threshold: f64,

    /// A forecast needs strictly more history points than this
    pub min_history_points: usize,

    /// CV cut-offs: below `stable_cv` is Stable, below `variable_cv` is Variable
    pub stable_cv: f64,
    pub variable_cv: f64,

    /// Cumulative sales-value cut-offs for classes A and B
    pub class_a_cutoff: f64,
    pub class_b_cutoff: f64,

    /// Days-of-stock upper bounds: critical-low, low, healthy, excess
    pub health_thresholds: [f64; 4],

    /// Depot codes tracked in the per-depot breakdown
    pub breakdown_depots: Vec<String>,

    /// Deepest day-offset column scanned ("-1" ..= "-N")
    pub history_days: usize,

    pub default_lead_time_days: f64,
    pub default_units_per_box: f64,

    /// Days-of-stock reported when there is stock but no demand
    pub days_of_stock_sentinel: f64,

    /// Tab-name fragments routing workbook tabs to sheet kinds
    pub sheet_aliases: SheetAliases,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            anomaly_z_threshold: 2.5,
            min_history_points: 5,
            stable_cv: 0.3,
            variable_cv: 0.7,
            class_a_cutoff: 0.8,
            class_b_cutoff: 0.95,
            health_thresholds: [10.0, 17.0, 30.0, 45.0],
            breakdown_depots: ["82", "86", "87", "89"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            history_days: 60,
            default_lead_time_days: 30.0,
            default_units_per_box: 1.0,
            days_of_stock_sentinel: 999.0,
            sheet_aliases: SheetAliases::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parses a JSON document; absent keys keep their defaults
    pub fn from_json_str(raw: &str) -> AnalyticsResult<Self> {
        let config: AnalysisConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> AnalyticsResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AnalyticsError::FileNotFound(path.display().to_string()));
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Rejects cut-offs that are out of order
    pub fn validate(&self) -> AnalyticsResult<()> {
        if !(self.stable_cv <= self.variable_cv) {
            return Err(config_error(
                "variable_cv",
                "must be greater than or equal to stable_cv",
            ));
        }
        if !(0.0 <= self.class_a_cutoff
            && self.class_a_cutoff <= self.class_b_cutoff
            && self.class_b_cutoff <= 1.0)
        {
            return Err(config_error(
                "class_b_cutoff",
                "cut-offs must satisfy 0 <= class_a_cutoff <= class_b_cutoff <= 1",
            ));
        }
        if self.health_thresholds.windows(2).any(|w| !(w[0] <= w[1])) {
            return Err(config_error(
                "health_thresholds",
                "thresholds must be non-decreasing",
            ));
        }
        if !(self.anomaly_z_threshold > 0.0) {
            return Err(config_error("anomaly_z_threshold", "must be positive"));
        }
        Ok(())
    }
}

fn config_error(key: &str, message: &str) -> AnalyticsError {
    AnalyticsError::ConfigError {
        key: key.to_string(),
        message: message.to_string(),
    }
}

// ==========================================
// SheetAliases - tab name fragments per kind
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetAliases {
    pub primary: Vec<String>,
    pub listing_status: Vec<String>,
    pub charges: Vec<String>,
    pub ai_plan: Vec<String>,
    pub shipments: Vec<String>,
    pub basket: Vec<String>,
    pub marketplace_codes: Vec<String>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for SheetAliases {
    fn default() -> Self {
        Self {
            primary: strings(&["GRAFANA"]),
            listing_status: strings(&["STOCK ML", "SML"]),
            charges: strings(&["CARGOS"]),
            ai_plan: strings(&["PLAN ML", "PML"]),
            shipments: strings(&["ENVIADOS", "ENVIOS"]),
            basket: strings(&["CANASTA"]),
            marketplace_codes: strings(&["MLA"]),
        }
    }
}

impl SheetAliases {
    pub fn for_kind(&self, kind: SheetKind) -> &[String] {
        match kind {
            SheetKind::Primary => &self.primary,
            SheetKind::ListingStatus => &self.listing_status,
            SheetKind::Charges => &self.charges,
            SheetKind::AiPlan => &self.ai_plan,
            SheetKind::Shipments => &self.shipments,
            SheetKind::Basket => &self.basket,
            SheetKind::MarketplaceCodes => &self.marketplace_codes,
        }
    }

    /// Routes a tab name to a sheet kind; the first kind with a matching alias wins
    pub fn classify(&self, tab_name: &str) -> Option<SheetKind> {
        let name = tab_name.trim().to_uppercase();
        SheetKind::ALL.into_iter().find(|kind| {
            self.for_kind(*kind)
                .iter()
                .any(|alias| name.contains(&alias.to_uppercase()))
        })
    }
}
