// ==========================================
// Inventory Analytics - Lookup Tables
// ==========================================
// Six SKU-keyed mappings built from the auxiliary sheets.
// A missing sheet always means an empty mapping.
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Marketplace listing status (stock sheet of the marketplace)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingStatus {
    pub boost: bool,
    pub status: String,
    pub quality: String,
}

/// Freight/storage charges for one SKU, latest period only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeEntry {
    pub amount: f64,
    pub units: f64,
    pub age: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargesLookup {
    /// Serial date of the period that was kept, when a date column resolved
    pub latest_date: Option<f64>,
    pub entries: BTreeMap<String, ChargeEntry>,
}

impl ChargesLookup {
    pub fn get(&self, sku: &str) -> Option<&ChargeEntry> {
        self.entries.get(sku)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Calendar date of the kept period
    pub fn latest_calendar_date(&self) -> Option<chrono::NaiveDate> {
        self.latest_date
            .and_then(crate::importer::value_normalizer::excel_serial_to_date)
    }
}

/// AI replenishment recommendation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiRecommendation {
    pub recommendation: String,
    pub suggested_units: f64,
    pub urgent: bool,
}

/// Marketplace publication code and its status
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceListing {
    pub code: String,
    pub status: String,
}

// ==========================================
// LookupTables - all six mappings
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupTables {
    pub listing_status: BTreeMap<String, ListingStatus>,
    pub charges: ChargesLookup,
    pub ai_plan: BTreeMap<String, AiRecommendation>,
    pub shipments: BTreeMap<String, f64>,
    pub basket_blocked: BTreeMap<String, bool>,
    pub marketplace_codes: BTreeMap<String, MarketplaceListing>,
}

impl LookupTables {
    /// True when the SKU is flagged as blocked in the basket sheet
    pub fn is_blocked(&self, sku: &str) -> bool {
        self.basket_blocked.get(sku).copied().unwrap_or(false)
    }

    /// Historical shipped quantity, zero when unknown
    pub fn shipped(&self, sku: &str) -> f64 {
        self.shipments.get(sku).copied().unwrap_or(0.0)
    }
}
