// ==========================================
// Inventory Analytics - Domain Layer
// ==========================================
// Responsibility: sheet model, SKU records, lookups, classification output
// Boundary: no parsing logic, no engine logic
// ==========================================

pub mod classification;
pub mod lookup;
pub mod sheet;
pub mod sku;
pub mod types;

pub use classification::{ClassificationSummary, HealthMatrix};
pub use lookup::{
    AiRecommendation, ChargeEntry, ChargesLookup, ListingStatus, LookupTables, MarketplaceListing,
};
pub use sheet::{cell_at, Cell, Sheet, SheetKind, Workbook};
pub use sku::{FlatRow, RollingAverages, RowId, SkuRecord, SkuTable};
pub use types::{DepotBucket, HealthBucket, StabilityClass, ValueClass, VariabilityClass};
