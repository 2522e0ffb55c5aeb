use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use project_lens::data::clean::CleanConfig;
use project_lens::data::filter::{self, KeySet};
use project_lens::data::index::IndexedTables;
use project_lens::data::loader::load_source;
use project_lens::data::model::{CellValue, Key};
use project_lens::data::schema::{self, SHEETS};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

enum V<'a> {
    N(f64),
    S(&'a str),
    E,
}

struct SheetSpec<'a> {
    name: &'a str,
    headers: &'a [&'a str],
    rows: Vec<Vec<V<'a>>>,
}

fn write_workbook(path: &Path, sheets: &[SheetSpec]) {
    let mut workbook = Workbook::new();
    for SheetSpec { name, headers, rows } in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name).unwrap();
        for (col, header) in headers.iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            for (c, v) in row.iter().enumerate() {
                let (r, c) = ((r + 1) as u32, c as u16);
                match v {
                    V::N(n) => {
                        sheet.write_number(r, c, *n).unwrap();
                    }
                    V::S(s) => {
                        sheet.write_string(r, c, *s).unwrap();
                    }
                    V::E => {}
                }
            }
        }
    }
    workbook.save(path).unwrap();
}

fn project_workbook(dir: &Path) -> std::path::PathBuf {
    use V::*;
    let path = dir.join("portfolio.xlsx");
    write_workbook(
        &path,
        &[
            SheetSpec {
                name: schema::PROJECTS,
                headers: &["Project ID", "Project Name", "Owner"],
                rows: vec![
                    vec![N(1.0), S("Alpha"), S("Ada")],
                    vec![S("-----"), S("-----"), S("-----")],
                    vec![N(2.0), S("Beta"), S("Bob")],
                    vec![E, S("   "), E],
                ],
            },
            SheetSpec {
                name: schema::TASKS,
                headers: &["Task ID", "Project ID", "Task"],
                rows: vec![
                    vec![N(100.0), N(1.0), S("Kickoff")],
                    vec![N(101.0), N(2.0), S("Design")],
                    vec![E, E, E],
                    vec![N(102.0), N(1.0), S("Build")],
                ],
            },
            SheetSpec {
                name: schema::GOALS,
                headers: &["Goal ID", "Project ID", "Goal"],
                rows: vec![vec![N(1.0), N(2.0), S("Launch")]],
            },
            SheetSpec {
                name: schema::STAKEHOLDERS_PROJECTS,
                headers: &["Project ID", "Stakeholder ID"],
                rows: vec![
                    vec![N(1.0), N(10.0)],
                    vec![N(1.0), N(10.0)],
                    vec![N(1.0), N(30.0)],
                    vec![N(2.0), N(20.0)],
                ],
            },
            SheetSpec {
                name: schema::STAKEHOLDERS_DETAILS,
                headers: &["ID", "Name"],
                rows: vec![
                    vec![N(30.0), S("Zed")],
                    vec![N(10.0), S("Xia")],
                    vec![N(20.0), S("Yan")],
                    vec![S("----------"), E],
                ],
            },
        ],
    );
    std::fs::write(
        dir.join("Resources.csv"),
        "Resource,Type\nR-1,Engineer\n-----,-----\n , \nR-2,Crane\n",
    )
    .unwrap();
    path
}

#[test]
fn workbook_selection_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = project_workbook(dir.path());
    let report = load_source(
        &path,
        &SHEETS,
        Some(&dir.path().join("Resources.csv")),
        &CleanConfig::default(),
    );
    assert!(report.is_complete(), "{:?}", report.diagnostics);

    let tables = &report.tables;
    let view = filter::project_view(tables, "Alpha");

    assert_eq!(view.active_ids, KeySet::from([Key::Int(1)]));
    assert_eq!(view.summary.project_count, 2);
    assert_eq!(view.summary.resource_count, 2);

    let task_names: Vec<String> = view
        .tasks
        .column_values("Task")
        .map(|v| v.to_string())
        .collect();
    assert_eq!(task_names, vec!["Kickoff", "Build"]);
    assert!(view.goals.is_empty());

    assert_eq!(view.stakeholders.linked.len(), 3);
    let names: Vec<String> = view
        .stakeholders
        .details
        .column_values("Name")
        .map(|v| v.to_string())
        .collect();
    assert_eq!(names, vec!["Zed", "Xia"]);

    let details = view.project_details();
    assert_eq!(details.rows[1], vec![CellValue::from("Project Name"), CellValue::from("Alpha")]);

    assert_eq!(IndexedTables::new(tables.clone()).project_view("Alpha"), view);
}

#[test]
fn missing_resources_count_as_zero() {
    let dir = TempDir::new().unwrap();
    let path = project_workbook(dir.path());
    std::fs::remove_file(dir.path().join("Resources.csv")).unwrap();
    let report = load_source(
        &path,
        &SHEETS,
        Some(&dir.path().join("Resources.csv")),
        &CleanConfig::default(),
    );
    assert!(report.is_complete());
    assert_eq!(filter::summary(&report.tables).resource_count, 0);
}

fn write_parquet(path: &Path, columns: Vec<(&str, ArrayRef)>) {
    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, arr)| Field::new(*name, arr.data_type().clone(), true))
        .collect();
    let batch = RecordBatch::try_new(
        Arc::new(Schema::new(fields)),
        columns.into_iter().map(|(_, a)| a).collect(),
    )
    .unwrap();
    let file = std::fs::File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

#[test]
fn parquet_directory_matches_text_ids_only_to_text() {
    let dir = TempDir::new().unwrap();
    write_parquet(
        &dir.path().join("Projects.parquet"),
        vec![
            ("Project ID", Arc::new(Int64Array::from(vec![Some(1), None, Some(2)])) as ArrayRef),
            (
                "Project Name",
                Arc::new(StringArray::from(vec![Some("Alpha"), Some("-----"), Some("Beta")])) as ArrayRef,
            ),
        ],
    );
    // Task IDs stored as text never join against integer project IDs.
    write_parquet(
        &dir.path().join("Tasks.parquet"),
        vec![
            ("Project ID", Arc::new(StringArray::from(vec![Some("1"), Some("2")])) as ArrayRef),
            ("Task", Arc::new(StringArray::from(vec![Some("A"), Some("B")])) as ArrayRef),
        ],
    );
    let report = load_source(dir.path(), &SHEETS, None, &CleanConfig::default());
    assert_eq!(report.diagnostics.len(), 3);
    assert_eq!(report.tables.get(schema::PROJECTS).unwrap().len(), 2);

    let view = filter::project_view(&report.tables, "Alpha");
    assert_eq!(view.active_ids, KeySet::from([Key::Int(1)]));
    assert!(view.tasks.is_empty());

    let warnings = schema::check_key_types(&report.tables);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].relation, schema::TASK_PROJECT);
}
