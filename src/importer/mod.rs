// ==========================================
// Inventory Analytics - Import Layer
// ==========================================
// Responsibility: raw sheets -> normalized values, resolved columns, lookups
// Supports: Excel, CSV
// ==========================================

pub mod column_resolver;
pub mod error;
pub mod file_parser;
pub mod lookup_builder;
pub mod value_normalizer;

pub use column_resolver::{find_column_index, ColumnResolver, HistoryColumn};
pub use error::{AnalyticsError, AnalyticsResult};
pub use file_parser::{read_csv_sheet, WorkbookReader};
pub use lookup_builder::LookupBuilder;
pub use value_normalizer::{clean_str, clean_string, excel_serial_to_date, parse_number, parse_number_str};
