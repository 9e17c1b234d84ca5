// ==========================================
// Inventory Analytics - Error Types
// ==========================================
// Tool: thiserror derive
// Fatal: empty primary sheet, missing required columns, unreadable files
// ==========================================

use thiserror::Error;

/// Errors raised by sheet reading and consolidation
#[derive(Error, Debug)]
pub enum AnalyticsError {
    // ===== File errors =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (only .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("failed to read file: {0}")]
    FileReadError(String),

    #[error("failed to parse Excel workbook: {0}")]
    ExcelParseError(String),

    #[error("failed to parse CSV: {0}")]
    CsvParseError(String),

    // ===== Sheet validation errors =====
    #[error("sheet {sheet} is empty or has no data rows")]
    EmptySheet { sheet: String },

    #[error("sheet {sheet} is missing required columns: {}", columns.join(", "))]
    MissingColumns { sheet: String, columns: Vec<String> },

    // ===== Configuration errors =====
    #[error("invalid configuration (key: {key}): {message}")]
    ConfigError { key: String, message: String },
}

impl From<std::io::Error> for AnalyticsError {
    fn from(err: std::io::Error) -> Self {
        AnalyticsError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for AnalyticsError {
    fn from(err: csv::Error) -> Self {
        AnalyticsError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for AnalyticsError {
    fn from(err: calamine::Error) -> Self {
        AnalyticsError::ExcelParseError(err.to_string())
    }
}

impl From<serde_json::Error> for AnalyticsError {
    fn from(err: serde_json::Error) -> Self {
        AnalyticsError::ConfigError {
            key: "<document>".to_string(),
            message: err.to_string(),
        }
    }
}

/// Result alias
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
