use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

// ---------------------------------------------------------------------------
// Sheet assembly
// ---------------------------------------------------------------------------

#[derive(Clone)]
enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
    Null,
}

fn text(s: impl Into<String>) -> Cell {
    Cell::Text(s.into())
}

#[derive(Clone, Copy)]
enum Kind {
    Int,
    Float,
    Text,
}

struct Sheet {
    name: &'static str,
    columns: Vec<(&'static str, Kind)>,
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    fn new(name: &'static str, columns: &[(&'static str, Kind)]) -> Self {
        Sheet {
            name,
            columns: columns.to_vec(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// The clutter the cleaner is expected to remove.
    fn push_noise(&mut self) {
        let width = self.columns.len();
        self.rows.push(vec![Cell::Null; width]);
        self.rows.push(
            self.columns
                .iter()
                .map(|(_, k)| match k {
                    Kind::Text => text("   "),
                    _ => Cell::Null,
                })
                .collect(),
        );
        self.rows.push(
            self.columns
                .iter()
                .map(|(_, k)| match k {
                    Kind::Text => text("----------"),
                    _ => Cell::Null,
                })
                .collect(),
        );
    }

    fn to_batch(&self) -> Result<RecordBatch> {
        let fields: Vec<Field> = self
            .columns
            .iter()
            .map(|(name, kind)| {
                let dt = match kind {
                    Kind::Int => DataType::Int64,
                    Kind::Float => DataType::Float64,
                    Kind::Text => DataType::Utf8,
                };
                Field::new(*name, dt, true)
            })
            .collect();

        let arrays: Vec<ArrayRef> = self
            .columns
            .iter()
            .enumerate()
            .map(|(c, (_, kind))| -> ArrayRef {
                let cells = self.rows.iter().map(|r| &r[c]);
                match kind {
                    Kind::Int => Arc::new(Int64Array::from(
                        cells
                            .map(|v| match v {
                                Cell::Int(i) => Some(*i),
                                _ => None,
                            })
                            .collect::<Vec<_>>(),
                    )),
                    Kind::Float => Arc::new(Float64Array::from(
                        cells
                            .map(|v| match v {
                                Cell::Float(f) => Some(*f),
                                _ => None,
                            })
                            .collect::<Vec<_>>(),
                    )),
                    Kind::Text => Arc::new(StringArray::from(
                        cells
                            .map(|v| match v {
                                Cell::Text(s) => Some(s.as_str()),
                                _ => None,
                            })
                            .collect::<Vec<_>>(),
                    )),
                }
            })
            .collect();

        RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
            .with_context(|| format!("building {} batch", self.name))
    }

    fn write_parquet(&self, dir: &Path) -> Result<PathBuf> {
        let batch = self.to_batch()?;
        let path = dir.join(format!("{}.parquet", self.name));
        let file = std::fs::File::create(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
        writer.write(&batch)?;
        writer.close()?;
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Synthetic content
// ---------------------------------------------------------------------------

const PROJECT_NAMES: [&str; 6] = [
    "Harbor Bridge Retrofit",
    "Clinic Scheduling Portal",
    "Solar Farm Phase II",
    "ERP Migration",
    "Campus Wi-Fi Upgrade",
    "Water Treatment Audit",
];
const STATUSES: [&str; 4] = ["Not Started", "In Progress", "Blocked", "Done"];
const PRIORITIES: [&str; 3] = ["High", "Medium", "Low"];
const FIRST_NAMES: [&str; 8] = ["Amina", "Bruno", "Chen", "Dana", "Elif", "Farid", "Grace", "Hugo"];
const LAST_NAMES: [&str; 6] = ["Okafor", "Silva", "Wei", "Kowalski", "Yilmaz", "Haddad"];
const ORGS: [&str; 5] = ["City Council", "Northwind Ltd", "Contoso", "Fabrikam", "Internal"];
const ROLES: [&str; 4] = ["Sponsor", "Owner", "Reviewer", "Consultant"];
const VERBS: [&str; 6] = ["Draft", "Review", "Approve", "Procure", "Install", "Test"];
const OBJECTS: [&str; 6] = ["requirements", "budget", "vendor contract", "site survey", "pilot", "handover"];

fn date(rng: &mut SimpleRng) -> String {
    format!("2024-{:02}-{:02}", 1 + rng.below(12), 1 + rng.below(28))
}

fn main() -> Result<()> {
    let out_dir = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| "sample_data".to_string()),
    );
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);

    let mut projects = Sheet::new(
        "Projects",
        &[
            ("Project ID", Kind::Int),
            ("Project Name", Kind::Text),
            ("Start Date", Kind::Text),
            ("Status", Kind::Text),
            ("Budget", Kind::Float),
        ],
    );
    let mut goals = Sheet::new(
        "Goals",
        &[
            ("Goal ID", Kind::Int),
            ("Project ID", Kind::Int),
            ("Goal", Kind::Text),
            ("Priority", Kind::Text),
        ],
    );
    let mut tasks = Sheet::new(
        "Tasks",
        &[
            ("Task ID", Kind::Int),
            ("Project ID", Kind::Int),
            ("Task", Kind::Text),
            ("Assignee", Kind::Text),
            ("Due Date", Kind::Text),
            ("Status", Kind::Text),
        ],
    );
    let mut links = Sheet::new(
        "Stakeholders_Projects",
        &[
            ("Project ID", Kind::Int),
            ("Stakeholder ID", Kind::Int),
            ("Role", Kind::Text),
        ],
    );
    let mut details = Sheet::new(
        "Stakeholders_Details",
        &[
            ("ID", Kind::Int),
            ("Name", Kind::Text),
            ("Organisation", Kind::Text),
            ("Email", Kind::Text),
        ],
    );

    let n_stakeholders = 12;
    for id in 1..=n_stakeholders {
        let first = rng.pick(&FIRST_NAMES);
        let last = rng.pick(&LAST_NAMES);
        details.push(vec![
            Cell::Int(id),
            text(format!("{first} {last}")),
            text(rng.pick(&ORGS)),
            text(format!("{}.{}@example.org", first.to_lowercase(), last.to_lowercase())),
        ]);
    }
    details.push_noise();

    let (mut goal_id, mut task_id) = (1, 1);
    for (p, name) in PROJECT_NAMES.iter().enumerate() {
        let pid = p as i64 + 1;
        projects.push(vec![
            Cell::Int(pid),
            text(*name),
            text(date(&mut rng)),
            text(rng.pick(&STATUSES)),
            Cell::Float(50_000.0 + rng.below(200) as f64 * 2_500.0),
        ]);

        for _ in 0..2 + rng.below(3) {
            goals.push(vec![
                Cell::Int(goal_id),
                Cell::Int(pid),
                text(format!("{} {}", rng.pick(&VERBS), rng.pick(&OBJECTS))),
                text(rng.pick(&PRIORITIES)),
            ]);
            goal_id += 1;
        }

        for _ in 0..3 + rng.below(5) {
            tasks.push(vec![
                Cell::Int(task_id),
                Cell::Int(pid),
                text(format!("{} {}", rng.pick(&VERBS), rng.pick(&OBJECTS))),
                text(rng.pick(&FIRST_NAMES)),
                text(date(&mut rng)),
                text(rng.pick(&STATUSES)),
            ]);
            task_id += 1;
        }

        for _ in 0..2 + rng.below(3) {
            // Duplicate links are possible on purpose.
            links.push(vec![
                Cell::Int(pid),
                Cell::Int(1 + rng.below(n_stakeholders as usize) as i64),
                text(rng.pick(&ROLES)),
            ]);
        }

        if p % 2 == 1 {
            projects.push_noise();
            tasks.push_noise();
            goals.push_noise();
            links.push_noise();
        }
    }

    for sheet in [&projects, &goals, &tasks, &links, &details] {
        let path = sheet.write_parquet(&out_dir)?;
        println!("Wrote {} rows to {}", sheet.rows.len(), path.display());
    }

    let resources_path = out_dir.join("Resources.csv");
    let mut csv_out = csv::Writer::from_path(&resources_path)
        .with_context(|| format!("creating {}", resources_path.display()))?;
    csv_out.write_record(["Resource", "Type", "Availability"])?;
    for i in 0..15 {
        let kind = rng.pick(&["Engineer", "Analyst", "Crane", "Server", "Designer"]);
        csv_out.write_record([
            format!("R-{:03}", i + 1),
            kind.to_string(),
            format!("{}%", 25 * (1 + rng.below(4))),
        ])?;
        if i == 7 {
            csv_out.write_record(["-----", "-----", "-----"])?;
            csv_out.write_record(["", "  ", ""])?;
        }
    }
    csv_out.flush()?;
    println!("Wrote resources to {}", resources_path.display());

    Ok(())
}
