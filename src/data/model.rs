use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a sheet
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common spreadsheet dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Date or date-time kept as text for simplicity.
    Date(String),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl CellValue {
    /// Missing means `Null` or the empty string.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Missing, or a string made only of whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Text content of string-like cells.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) | CellValue::Date(s) => Some(s),
            _ => None,
        }
    }

    /// The value used when this cell takes part in a join.
    ///
    /// Numbers compare by value across integer and float storage, so an ID
    /// read as `1.0` from a workbook matches `1` read from a CSV file. Text
    /// never equals a number, and `Null` is never a key.
    pub fn key(&self) -> Option<Key> {
        match self {
            CellValue::Null => None,
            CellValue::Integer(i) => Some(Key::Int(*i)),
            CellValue::Float(f) => Some(Key::from_f64(*f)),
            CellValue::Bool(b) => Some(Key::Bool(*b)),
            CellValue::String(s) | CellValue::Date(s) => Some(Key::Text(s.clone())),
        }
    }
}

// ---------------------------------------------------------------------------
// Key – normalized join value
// ---------------------------------------------------------------------------

/// Normalized form of an ID cell. Whole floats collapse onto `Int`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Bool(bool),
    Int(i64),
    /// Non-integral float, stored as raw bits.
    Float(u64),
    Text(String),
}

impl Key {
    pub fn from_f64(f: f64) -> Self {
        if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
            Key::Int(f as i64)
        } else {
            Key::Float(f.to_bits())
        }
    }

    /// Coarse type family, used to spot joins that can never match.
    pub fn kind(&self) -> KeyKind {
        match self {
            Key::Bool(_) => KeyKind::Bool,
            Key::Int(_) | Key::Float(_) => KeyKind::Numeric,
            Key::Text(_) => KeyKind::Text,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Bool(b) => write!(f, "{b}"),
            Key::Int(i) => write!(f, "{i}"),
            Key::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            Key::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyKind {
    Bool,
    Numeric,
    Text,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Bool => write!(f, "bool"),
            KeyKind::Numeric => write!(f, "numeric"),
            KeyKind::Text => write!(f, "text"),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – one sheet
// ---------------------------------------------------------------------------

/// An ordered sequence of rows sharing one ordered column list.
///
/// Every row holds exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

static EMPTY_TABLE: Table = Table {
    columns: Vec::new(),
    rows: Vec::new(),
};

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table, padding short rows with `Null` and truncating long ones.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();
        Table { columns, rows }
    }

    /// Same columns, no rows.
    pub fn empty_like(&self) -> Self {
        Table::new(self.columns.clone())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// All values of a column in row order; empty when the column is absent.
    pub fn column_values<'a>(&'a self, column: &str) -> impl Iterator<Item = &'a CellValue> + 'a {
        let idx = self.column_index(column);
        self.rows
            .iter()
            .filter_map(move |row| idx.and_then(|i| row.get(i)))
    }

    /// Copy out the rows at `positions`, in the order given.
    pub fn select_rows(&self, positions: &[usize]) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: positions
                .iter()
                .filter_map(|&i| self.rows.get(i).cloned())
                .collect(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Field/value view: one output row per column, one output column per row.
    pub fn transpose(&self) -> Table {
        let mut columns = vec!["Field".to_string()];
        if self.rows.len() == 1 {
            columns.push("Value".to_string());
        } else {
            columns.extend((1..=self.rows.len()).map(|i| format!("Row {i}")));
        }
        let rows = self
            .columns
            .iter()
            .enumerate()
            .map(|(c, name)| {
                let mut out = Vec::with_capacity(self.rows.len() + 1);
                out.push(CellValue::String(name.clone()));
                out.extend(
                    self.rows
                        .iter()
                        .map(|r| r.get(c).cloned().unwrap_or(CellValue::Null)),
                );
                out
            })
            .collect();
        Table { columns, rows }
    }
}

// ---------------------------------------------------------------------------
// TableSet – one consistent snapshot of all sheets
// ---------------------------------------------------------------------------

/// Named tables loaded together. Built once per load, then only read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSet {
    tables: BTreeMap<String, Table>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, table: Table) {
        self.tables.insert(name.into(), table);
    }

    pub fn with(mut self, name: impl Into<String>, table: Table) -> Self {
        self.insert(name, table);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Absent tables read as empty.
    pub fn table_or_empty(&self, name: &str) -> &Table {
        self.tables.get(name).unwrap_or(&EMPTY_TABLE)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
