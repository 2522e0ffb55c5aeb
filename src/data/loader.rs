use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type};
use calamine::{open_workbook_auto, Data, ExcelDateTime, Reader, Sheets};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::clean::{clean_with_stats, CleanConfig};
use super::error::LoadError;
use super::model::{CellValue, Table, TableSet};
use super::schema;

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Something that can hand back a raw (uncleaned) table per sheet name.
pub trait SheetSource {
    /// Human-readable origin, for logs.
    fn describe(&self) -> String;

    fn read_sheet(&mut self, name: &str) -> Result<Table, LoadError>;
}

/// Raw tables already in memory, keyed by sheet name.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: BTreeMap<String, Table>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: impl Into<String>, table: Table) -> Self {
        self.sheets.insert(name.into(), table);
        self
    }
}

impl SheetSource for MemorySource {
    fn describe(&self) -> String {
        format!("{} in-memory sheets", self.sheets.len())
    }

    fn read_sheet(&mut self, name: &str) -> Result<Table, LoadError> {
        self.sheets
            .get(name)
            .cloned()
            .ok_or_else(|| LoadError::unavailable(name, "no such sheet"))
    }
}

/// A multi-sheet spreadsheet (`.xlsx`, `.xlsm`, `.xls`, `.ods`).
pub struct WorkbookSource {
    path: PathBuf,
    workbook: Sheets<BufReader<File>>,
}

impl WorkbookSource {
    pub fn open(path: &Path) -> Result<Self> {
        let workbook = open_workbook_auto(path)
            .with_context(|| format!("opening workbook {}", path.display()))?;
        Ok(WorkbookSource {
            path: path.to_path_buf(),
            workbook,
        })
    }
}

impl SheetSource for WorkbookSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read_sheet(&mut self, name: &str) -> Result<Table, LoadError> {
        if !self.workbook.sheet_names().iter().any(|s| s == name) {
            return Err(LoadError::unavailable(name, "sheet not found in workbook"));
        }
        let range = self
            .workbook
            .worksheet_range(name)
            .map_err(|e| LoadError::unavailable(name, e))?;

        let mut rows = range.rows();
        let header = rows.next().ok_or_else(|| LoadError::MissingHeader {
            sheet: name.to_string(),
        })?;
        let columns = header_names(header.iter().map(|c| workbook_cell(c).to_string()));
        let body = rows.map(|r| r.iter().map(workbook_cell).collect()).collect();
        Ok(Table::from_rows(columns, body))
    }
}

/// A directory holding one file per sheet: `<Sheet>.csv`, `.json`, `.parquet` or `.pq`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub const EXTENSIONS: [&'static str; 4] = ["csv", "json", "parquet", "pq"];

    pub fn new(dir: &Path) -> Self {
        DirectorySource {
            dir: dir.to_path_buf(),
        }
    }

    fn sheet_path(&self, name: &str) -> Option<PathBuf> {
        Self::EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{name}.{ext}")))
            .find(|p| p.is_file())
    }
}

impl SheetSource for DirectorySource {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    fn read_sheet(&mut self, name: &str) -> Result<Table, LoadError> {
        let path = self.sheet_path(name).ok_or_else(|| {
            LoadError::unavailable(name, format!("no file for sheet in {}", self.dir.display()))
        })?;
        load_file(&path).map_err(|e| LoadError::unavailable(name, format!("{e:#}")))
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Outcome of one load: whatever loaded, plus one diagnostic per failure.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub tables: TableSet,
    pub diagnostics: Vec<LoadError>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Read and clean every expected sheet. A sheet that fails is recorded and
/// skipped; it never stops the others.
pub fn load(source: &mut dyn SheetSource, expected: &[&str], config: &CleanConfig) -> LoadReport {
    let mut report = LoadReport::default();
    for &name in expected {
        match source.read_sheet(name) {
            Ok(raw) => {
                let (table, stats) = clean_with_stats(&raw, config);
                log::debug!(
                    "{name}: {} raw rows, dropped {} empty, {} blank, {} separator",
                    raw.len(),
                    stats.empty,
                    stats.blank,
                    stats.separator
                );
                report.tables.insert(name, table);
            }
            Err(e) => {
                log::warn!("{}: {e}", source.describe());
                report.diagnostics.push(e);
            }
        }
    }
    report
}

/// Load a workbook or sheet directory at `path`, then the optional resources
/// file at `resources`.
pub fn load_source(
    path: &Path,
    expected: &[&str],
    resources: Option<&Path>,
    config: &CleanConfig,
) -> LoadReport {
    let mut report = if path.is_dir() {
        load(&mut DirectorySource::new(path), expected, config)
    } else {
        match WorkbookSource::open(path) {
            Ok(mut wb) => load(&mut wb, expected, config),
            Err(e) => {
                log::warn!("{e:#}");
                LoadReport {
                    tables: TableSet::new(),
                    diagnostics: expected
                        .iter()
                        .map(|name| LoadError::unavailable(name, format!("{e:#}")))
                        .collect(),
                }
            }
        }
    };

    if let Some(resources) = resources {
        match load_resources(resources, config) {
            Ok(Some(table)) => report.tables.insert(schema::RESOURCES, table),
            Ok(None) => log::info!("no resources file at {}", resources.display()),
            Err(e) => {
                log::warn!("{e}");
                report.diagnostics.push(e);
            }
        }
    }

    log::info!(
        "Loaded {} tables from {} ({} problems)",
        report.tables.len(),
        path.display(),
        report.diagnostics.len()
    );
    report
}

/// The flat resources CSV. A file that does not exist is `Ok(None)`.
pub fn load_resources(path: &Path, config: &CleanConfig) -> Result<Option<Table>, LoadError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = load_csv(path).map_err(|e| LoadError::unavailable(schema::RESOURCES, format!("{e:#}")))?;
    Ok(Some(clean_with_stats(&raw, config).0))
}

/// Every file a load of `path` reads, apart from the resources file.
///
/// A sheet directory lists itself (its mtime moves when sheet files appear or
/// vanish) followed by each sheet file that currently resolves.
pub fn input_files(path: &Path, expected: &[&str]) -> Vec<PathBuf> {
    let mut files = vec![path.to_path_buf()];
    if path.is_dir() {
        let source = DirectorySource::new(path);
        files.extend(expected.iter().filter_map(|name| source.sheet_path(name)));
    }
    files
}

/// Workbook files and sheet directories directly under `dir`, sorted by name.
pub fn discover_sources(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut found: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| {
            if p.is_dir() {
                schema::SHEETS.iter().any(|s| DirectorySource::new(p).sheet_path(s).is_some())
            } else {
                is_workbook(p)
            }
        })
        .collect();
    found.sort();
    found
}

pub fn is_workbook(path: &Path) -> bool {
    let ext = extension(path);
    matches!(ext.as_str(), "xlsx" | "xlsm" | "xlsb" | "xls" | "ods")
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Load a single-sheet file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, values type-guessed
/// * `.json`    – `[{ "Project ID": 1, "Project Name": "Alpha" }, ...]`
/// * `.parquet` / `.pq` – any flat schema of scalar columns
pub fn load_file(path: &Path) -> Result<Table> {
    match extension(path).as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        _ => bail!(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Dataframe-style header names: trimmed, blanks become `Unnamed: N`.
fn header_names(raw: impl Iterator<Item = String>) -> Vec<String> {
    raw.enumerate()
        .map(|(i, h)| {
            let h = h.trim();
            if h.is_empty() {
                format!("Unnamed: {i}")
            } else {
                h.to_string()
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Workbook cells
// ---------------------------------------------------------------------------

fn workbook_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(v) => CellValue::Integer(*v),
        // Spreadsheets store every number as a float.
        Data::Float(v) if v.fract() == 0.0 && v.abs() < 9.0e15 => CellValue::Integer(*v as i64),
        Data::Float(v) => CellValue::Float(*v),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Date(s.clone()),
        Data::DateTime(dt) => {
            CellValue::Date(excel_date(dt).unwrap_or_else(|| dt.as_f64().to_string()))
        }
        Data::Error(e) => CellValue::String(format!("#{e:?}")),
    }
}

/// `YYYY-MM-DD`, with a time part only when it is not midnight. Durations
/// and out-of-range serials have no calendar form.
fn excel_date(dt: &ExcelDateTime) -> Option<String> {
    if dt.is_duration() {
        return None;
    }
    let stamp = dt.as_datetime()?;
    let pattern = if stamp.date().and_hms_opt(0, 0, 0) == Some(stamp) {
        "%Y-%m-%d"
    } else {
        "%Y-%m-%d %H:%M:%S"
    };
    Some(stamp.format(pattern).to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`). Columns appear in
/// first-seen order across records.
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            columns
                .iter()
                .map(|c| obj.get(c).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(Table::from_rows(columns, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header row with column names; ragged rows are padded.
fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let columns = header_names(
        reader
            .headers()
            .context("reading CSV headers")?
            .iter()
            .map(|h| h.to_string()),
    );

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(Table::from_rows(columns, rows))
}

/// Tokens a dataframe reader treats as a missing value.
const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() || NA_TOKENS.contains(&s) {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of scalar columns. Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| arrow_cell(col, row))
                    .collect(),
            );
        }
    }

    Ok(Table::from_rows(columns, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int8 => CellValue::Integer(col.as_primitive::<Int8Type>().value(row) as i64),
        DataType::Int16 => CellValue::Integer(col.as_primitive::<Int16Type>().value(row) as i64),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
            arrow_display(col, row).map_or(CellValue::Null, CellValue::Date)
        }
        _ => arrow_display(col, row).map_or(CellValue::Null, CellValue::String),
    }
}

fn arrow_display(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    match arrow::util::display::array_value_to_string(col, row) {
        Ok(s) => Some(s),
        Err(e) => {
            log::warn!("unreadable {:?} cell at row {row}: {e}", col.data_type());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::{ExcelDateTime as XlsxDateTime, Format, Workbook};
    use tempfile::TempDir;

    fn write_xlsx(path: &Path, sheet_name: &str, headers: &[&str], rows: &[Vec<&str>]) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name).unwrap();
        for (col, header) in headers.iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        for (row_idx, row) in rows.iter().enumerate() {
            let excel_row = (row_idx + 1) as u32;
            for (col, value) in row.iter().enumerate() {
                if let Ok(n) = value.parse::<f64>() {
                    sheet.write_number(excel_row, col as u16, n).unwrap();
                } else if !value.is_empty() {
                    sheet.write_string(excel_row, col as u16, *value).unwrap();
                }
            }
        }
        workbook.save(path).unwrap();
    }

    #[test]
    fn workbook_missing_sheet_is_reported_and_others_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("projects.xlsx");
        write_xlsx(
            &path,
            schema::PROJECTS,
            &[schema::PROJECT_ID, schema::PROJECT_NAME],
            &[vec!["1", "Alpha"], vec!["", ""], vec!["2", "Beta"]],
        );

        let report = load_source(&path, &schema::SHEETS, None, &CleanConfig::default());
        let projects = report.tables.get(schema::PROJECTS).unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects.rows[0][0], CellValue::Integer(1));
        assert_eq!(report.diagnostics.len(), 4);
        assert!(report
            .diagnostics
            .iter()
            .any(|d| d.sheet() == schema::STAKEHOLDERS_DETAILS));
        assert!(!report.tables.contains(schema::TASKS));
    }

    #[test]
    fn workbook_dates_load_as_calendar_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dates.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(schema::TASKS).unwrap();
        sheet.write_string(0, 0, "Task").unwrap();
        sheet.write_string(0, 1, "Due Date").unwrap();
        sheet.write_string(1, 0, "Kickoff").unwrap();
        sheet
            .write_datetime_with_format(
                1,
                1,
                &XlsxDateTime::from_ymd(2024, 1, 15).unwrap(),
                &Format::new().set_num_format("yyyy-mm-dd"),
            )
            .unwrap();
        sheet.write_string(2, 0, "Review").unwrap();
        sheet
            .write_datetime_with_format(
                2,
                1,
                &XlsxDateTime::from_ymd(2024, 3, 1).unwrap().and_hms(9, 30, 0).unwrap(),
                &Format::new().set_num_format("yyyy-mm-dd hh:mm:ss"),
            )
            .unwrap();
        workbook.save(&path).unwrap();

        let report = load_source(&path, &[schema::TASKS], None, &CleanConfig::default());
        let tasks = report.tables.get(schema::TASKS).unwrap();
        assert_eq!(tasks.rows[0][1], CellValue::Date("2024-01-15".to_string()));
        assert_eq!(tasks.rows[1][1], CellValue::Date("2024-03-01 09:30:00".to_string()));
    }

    #[test]
    fn unopenable_workbook_reports_every_sheet() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip").unwrap();
        let report = load_source(&path, &schema::SHEETS, None, &CleanConfig::default());
        assert!(report.tables.is_empty());
        assert_eq!(report.diagnostics.len(), schema::SHEETS.len());
    }

    #[test]
    fn directory_source_reads_csv_and_json() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("Tasks.csv"),
            "Project ID,Task\n1,A\n,\n  ,  \n2,-----\n2,B\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("Goals.json"),
            r#"[{"Project ID": 1, "Goal": "Ship"}, {"Project ID": null, "Goal": null}]"#,
        )
        .unwrap();

        let report = load(
            &mut DirectorySource::new(dir.path()),
            &[schema::TASKS, schema::GOALS, schema::PROJECTS],
            &CleanConfig::default(),
        );
        let tasks = report.tables.get(schema::TASKS).unwrap();
        assert_eq!(tasks.columns, vec!["Project ID", "Task"]);
        assert_eq!(
            tasks.rows,
            vec![
                vec![CellValue::Integer(1), CellValue::from("A")],
                vec![CellValue::Integer(2), CellValue::from("B")],
            ]
        );
        assert_eq!(report.tables.get(schema::GOALS).unwrap().len(), 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].sheet(), schema::PROJECTS);
    }

    #[test]
    fn absent_resources_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("Resources.csv");
        assert_eq!(load_resources(&missing, &CleanConfig::default()), Ok(None));
    }

    #[test]
    fn resources_rows_are_cleaned() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Resources.csv");
        std::fs::write(&path, "Name,Role\nAda,Eng\n,\n-----,-----\nBob,PM\n").unwrap();
        let table = load_resources(&path, &CleanConfig::default()).unwrap().unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn na_tokens_in_resources_count_as_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Resources.csv");
        std::fs::write(&path, "Name,Role,Hours\nAda,Eng,40\nNA,N/A,NaN\nnull,,None\nBob,PM,nan\n").unwrap();
        let table = load_resources(&path, &CleanConfig::default()).unwrap().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1][2], CellValue::Null);
        assert_eq!(guess_cell_type("NAME"), CellValue::from("NAME"));
    }

    #[test]
    fn short_parquet_extension_is_probed() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Goals.pq"), b"").unwrap();
        let source = DirectorySource::new(dir.path());
        assert_eq!(source.sheet_path(schema::GOALS), Some(dir.path().join("Goals.pq")));
        assert!(matches!(
            load_file(&dir.path().join("Goals.txt"))
                .unwrap_err()
                .downcast_ref::<LoadError>(),
            Some(LoadError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn input_files_cover_each_resolved_sheet() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Projects.csv"), "Project ID\n1\n").unwrap();
        std::fs::write(dir.path().join("Tasks.json"), "[]").unwrap();
        let files = input_files(dir.path(), &schema::SHEETS);
        assert_eq!(
            files,
            vec![
                dir.path().to_path_buf(),
                dir.path().join("Projects.csv"),
                dir.path().join("Tasks.json"),
            ]
        );
        let workbook = dir.path().join("q4.xlsx");
        assert_eq!(input_files(&workbook, &schema::SHEETS), vec![workbook.clone()]);
    }

    #[test]
    fn memory_source_is_cleaned_on_load() {
        let raw = Table::from_rows(
            vec!["a".into()],
            vec![vec![CellValue::from("  ")], vec![CellValue::from("x")]],
        );
        let report = load(
            &mut MemorySource::new().with_sheet("S", raw),
            &["S"],
            &CleanConfig::default(),
        );
        assert_eq!(report.tables.get("S").unwrap().len(), 1);
        assert!(report.is_complete());
    }

    #[test]
    fn blank_headers_get_positional_names() {
        let names = header_names(["ID".to_string(), " ".to_string(), " Name ".to_string()].into_iter());
        assert_eq!(names, vec!["ID", "Unnamed: 1", "Name"]);
    }

    #[test]
    fn discovery_lists_workbooks_and_sheet_directories() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.xlsx"), b"").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();
        let sheets = dir.path().join("a_sheets");
        std::fs::create_dir(&sheets).unwrap();
        std::fs::write(sheets.join("Projects.csv"), "Project ID\n1\n").unwrap();
        std::fs::create_dir(dir.path().join("empty")).unwrap();

        let found = discover_sources(dir.path());
        assert_eq!(found, vec![sheets, dir.path().join("b.xlsx")]);
    }
}
