// ==========================================
// Inventory Analytics - Domain Types
// ==========================================
// Classification enums shared by the enricher and the classifier
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Stability class (demand variability)
// ==========================================
// Ordered by CV cut-offs; NoData means the SKU has no history columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StabilityClass {
    Inactive, // no demand at all
    Stable,   // cv < stable cut-off
    Variable, // cv < variable cut-off
    Erratic,  // everything else
    #[serde(rename = "No-data")]
    NoData,
}

impl fmt::Display for StabilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StabilityClass::Inactive => write!(f, "Inactive"),
            StabilityClass::Stable => write!(f, "Stable"),
            StabilityClass::Variable => write!(f, "Variable"),
            StabilityClass::Erratic => write!(f, "Erratic"),
            StabilityClass::NoData => write!(f, "No-data"),
        }
    }
}

// ==========================================
// Value class (ABC, Pareto on sales value)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ValueClass {
    A,
    B,
    C,
}

impl ValueClass {
    pub const ALL: [ValueClass; 3] = [ValueClass::A, ValueClass::B, ValueClass::C];

    /// Row position inside the health matrix
    pub fn index(self) -> usize {
        match self {
            ValueClass::A => 0,
            ValueClass::B => 1,
            ValueClass::C => 2,
        }
    }
}

impl fmt::Display for ValueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueClass::A => write!(f, "A"),
            ValueClass::B => write!(f, "B"),
            ValueClass::C => write!(f, "C"),
        }
    }
}

// ==========================================
// Variability class (XYZ)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VariabilityClass {
    X,
    Y,
    Z,
}

impl From<StabilityClass> for VariabilityClass {
    fn from(stability: StabilityClass) -> Self {
        match stability {
            StabilityClass::Stable => VariabilityClass::X,
            StabilityClass::Variable => VariabilityClass::Y,
            _ => VariabilityClass::Z,
        }
    }
}

impl fmt::Display for VariabilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariabilityClass::X => write!(f, "X"),
            VariabilityClass::Y => write!(f, "Y"),
            VariabilityClass::Z => write!(f, "Z"),
        }
    }
}

// ==========================================
// Stock health bucket (days of stock)
// ==========================================
// Order: CriticalLow < Low < Healthy < Excess < Obsolete
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HealthBucket {
    CriticalLow,
    Low,
    Healthy,
    Excess,
    Obsolete,
}

impl HealthBucket {
    pub const ALL: [HealthBucket; 5] = [
        HealthBucket::CriticalLow,
        HealthBucket::Low,
        HealthBucket::Healthy,
        HealthBucket::Excess,
        HealthBucket::Obsolete,
    ];

    /// Column position inside the health matrix
    pub fn index(self) -> usize {
        match self {
            HealthBucket::CriticalLow => 0,
            HealthBucket::Low => 1,
            HealthBucket::Healthy => 2,
            HealthBucket::Excess => 3,
            HealthBucket::Obsolete => 4,
        }
    }
}

impl fmt::Display for HealthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthBucket::CriticalLow => write!(f, "critical-low"),
            HealthBucket::Low => write!(f, "low"),
            HealthBucket::Healthy => write!(f, "healthy"),
            HealthBucket::Excess => write!(f, "excess"),
            HealthBucket::Obsolete => write!(f, "obsolete"),
        }
    }
}

// ==========================================
// Depot bucket (three-way demand split)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepotBucket {
    Full,    // "80" / FULL warehouse
    Central, // "1" / CENTRAL
    Branch,  // every other store
}

impl DepotBucket {
    /// Classifies a normalized depot label by substring rules, first match wins
    pub fn classify(depot: &str) -> Self {
        if depot.contains("80") || depot.contains("FULL") {
            DepotBucket::Full
        } else if depot.contains('1') || depot.contains("CENTRAL") {
            DepotBucket::Central
        } else {
            DepotBucket::Branch
        }
    }
}

impl fmt::Display for DepotBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepotBucket::Full => write!(f, "FULL"),
            DepotBucket::Central => write!(f, "CENTRAL"),
            DepotBucket::Branch => write!(f, "BRANCH"),
        }
    }
}
