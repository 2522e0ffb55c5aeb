use super::model::{CellValue, Table};

/// Default marker the source workbooks use as a visual section break.
pub const DEFAULT_SEPARATOR: &str = "-----";

/// Row-cleaning settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanConfig {
    /// A row with any cell containing this text is dropped. Empty disables the rule.
    pub separator: String,
}

impl Default for CleanConfig {
    fn default() -> Self {
        CleanConfig {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl CleanConfig {
    /// Whether the (un-normalized) row carries the separator marker.
    pub fn is_separator_row(&self, row: &[CellValue]) -> bool {
        if self.separator.is_empty() {
            return false;
        }
        row.iter()
            .filter_map(CellValue::as_str)
            .any(|s| s.contains(self.separator.as_str()))
    }
}

/// How many rows each rule removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub empty: usize,
    pub blank: usize,
    pub separator: usize,
}

impl CleanStats {
    pub fn dropped(&self) -> usize {
        self.empty + self.blank + self.separator
    }
}

/// Remove rows that carry no content, in three passes:
///
/// 1. rows where every cell is missing;
/// 2. rows that become all-missing once whitespace-only cells are nulled;
/// 3. rows where any original cell contains the separator marker.
///
/// Surviving rows keep their order, columns keep theirs, and whitespace-only
/// cells in them come out as `Null`.
pub fn clean(table: &Table, config: &CleanConfig) -> Table {
    clean_with_stats(table, config).0
}

pub fn clean_with_stats(table: &Table, config: &CleanConfig) -> (Table, CleanStats) {
    let mut stats = CleanStats::default();
    let mut rows = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        if row.iter().all(CellValue::is_missing) {
            stats.empty += 1;
            continue;
        }
        if row.iter().all(CellValue::is_blank) {
            stats.blank += 1;
            continue;
        }
        // Checked against the original cells, not the normalized ones.
        if config.is_separator_row(row) {
            stats.separator += 1;
            continue;
        }
        rows.push(row.iter().map(normalize_cell).collect());
    }

    let cleaned = Table {
        columns: table.columns.clone(),
        rows,
    };
    (cleaned, stats)
}

fn normalize_cell(cell: &CellValue) -> CellValue {
    if cell.is_blank() {
        CellValue::Null
    } else {
        cell.clone()
    }
}
