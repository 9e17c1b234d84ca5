// ==========================================
// Inventory Analytics - Sheet Model
// ==========================================
// A sheet is row 0 = headers, then data rows of heterogeneous cells.
// Sheets are only read; nothing in the crate mutates them.
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ==========================================
// Cell - raw spreadsheet value
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Cell {
    /// Falsy cells: empty, blank text, zero/NaN, false
    pub fn is_truthy(&self) -> bool {
        match self {
            Cell::Empty => false,
            Cell::Number(n) => *n != 0.0 && !n.is_nan(),
            Cell::Text(s) => !s.is_empty(),
            Cell::Bool(b) => *b,
        }
    }

    /// Text form of the cell; falsy cells render as an empty string
    pub fn raw_text(&self) -> String {
        if self.is_truthy() {
            self.to_string()
        } else {
            String::new()
        }
    }

    /// Text form, or `default` when the cell is falsy
    pub fn text_or(&self, default: &str) -> String {
        if self.is_truthy() {
            self.to_string()
        } else {
            default.to_string()
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

/// Reads a cell by optional column position; short rows and unresolved columns read as empty
pub fn cell_at(row: &[Cell], column: Option<usize>) -> &Cell {
    const EMPTY: &Cell = &Cell::Empty;
    column.and_then(|idx| row.get(idx)).unwrap_or(EMPTY)
}

// ==========================================
// SheetKind - role of a workbook tab
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetKind {
    Primary,          // sales/stock sheet (Grafana export)
    ListingStatus,    // marketplace stock / publication status
    Charges,          // freight/storage charges
    AiPlan,           // AI replenishment recommendations
    Shipments,        // shipment history
    Basket,           // basket block flags
    MarketplaceCodes, // marketplace publication codes
}

impl SheetKind {
    pub const ALL: [SheetKind; 7] = [
        SheetKind::Primary,
        SheetKind::ListingStatus,
        SheetKind::Charges,
        SheetKind::AiPlan,
        SheetKind::Shipments,
        SheetKind::Basket,
        SheetKind::MarketplaceCodes,
    ];
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SheetKind::Primary => "primary",
            SheetKind::ListingStatus => "listing_status",
            SheetKind::Charges => "charges",
            SheetKind::AiPlan => "ai_plan",
            SheetKind::Shipments => "shipments",
            SheetKind::Basket => "basket",
            SheetKind::MarketplaceCodes => "marketplace_codes",
        };
        write!(f, "{}", name)
    }
}

// ==========================================
// Sheet
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Header row (row 0)
    pub fn header(&self) -> &[Cell] {
        self.rows.first().map(|r| r.as_slice()).unwrap_or(&[])
    }

    /// Every row after the header
    pub fn data_rows(&self) -> &[Vec<Cell>] {
        if self.rows.len() > 1 {
            &self.rows[1..]
        } else {
            &[]
        }
    }

    /// True when there is at least one row beyond the header
    pub fn has_data(&self) -> bool {
        self.rows.len() > 1
    }
}

// ==========================================
// Workbook - sheets routed by kind
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: HashMap<SheetKind, Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, kind: SheetKind, sheet: Sheet) -> Self {
        self.insert(kind, sheet);
        self
    }

    /// Inserts a sheet; the last sheet routed to a kind wins
    pub fn insert(&mut self, kind: SheetKind, sheet: Sheet) {
        self.sheets.insert(kind, sheet);
    }

    pub fn get(&self, kind: SheetKind) -> Option<&Sheet> {
        self.sheets.get(&kind)
    }

    pub fn primary(&self) -> Option<&Sheet> {
        self.get(SheetKind::Primary)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}
