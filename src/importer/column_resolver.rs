// ==========================================
// Inventory Analytics - Column Resolver
// ==========================================
// Responsibility: header cell -> column position, by candidate names
// Rule: case-insensitive substring; the leftmost matching header wins
// ==========================================

use crate::domain::sheet::Cell;
use crate::importer::error::{AnalyticsError, AnalyticsResult};
use tracing::debug;

/// Finds the first header cell containing any candidate (case-insensitive).
///
/// Candidate order does not matter: only the leftmost matching column wins.
pub fn find_column_index(header: &[Cell], candidates: &[&str]) -> Option<usize> {
    ColumnResolver::new(header).find(candidates)
}

// ==========================================
// ColumnResolver - header normalized once per sheet
// ==========================================
#[derive(Debug, Clone)]
pub struct ColumnResolver {
    headers: Vec<String>,
}

impl ColumnResolver {
    pub fn new(header: &[Cell]) -> Self {
        Self {
            headers: header
                .iter()
                .map(|cell| cell.to_string().trim().to_uppercase())
                .collect(),
        }
    }

    pub fn find(&self, candidates: &[&str]) -> Option<usize> {
        let wanted: Vec<String> = candidates.iter().map(|c| c.to_uppercase()).collect();
        self.headers
            .iter()
            .position(|h| wanted.iter().any(|w| h.contains(w.as_str())))
    }

    /// Resolves an optional column, logging when it is absent
    pub fn optional(&self, sheet: &str, name: &str, candidates: &[&str]) -> Option<usize> {
        let found = self.find(candidates);
        if found.is_none() {
            debug!(sheet, column = name, "optional column not found, using defaults");
        }
        found
    }

    /// Resolves every required column; all misses are reported together
    pub fn require(
        &self,
        sheet: &str,
        required: &[(&str, &[&str])],
    ) -> AnalyticsResult<Vec<usize>> {
        let mut found = Vec::with_capacity(required.len());
        let mut missing = Vec::new();

        for (name, candidates) in required {
            match self.find(candidates) {
                Some(idx) => found.push(idx),
                None => missing.push((*name).to_string()),
            }
        }

        if missing.is_empty() {
            Ok(found)
        } else {
            Err(AnalyticsError::MissingColumns {
                sheet: sheet.to_string(),
                columns: missing,
            })
        }
    }

    /// Day-offset columns "-1" ..= "-max_days", in day order.
    /// Offsets that do not resolve are left out.
    pub fn history_columns(&self, max_days: usize) -> Vec<HistoryColumn> {
        (1..=max_days)
            .filter_map(|day| {
                let label = format!("-{}", day);
                self.find(&[label.as_str()])
                    .map(|index| HistoryColumn { day, index })
            })
            .collect()
    }
}

/// A historical demand column tagged with its day offset (1 = most recent)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryColumn {
    pub day: usize,
    pub index: usize,
}
