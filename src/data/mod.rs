/// Data layer: core types, loading, cleaning, and relational filtering.
///
/// Architecture:
/// ```text
///  .xlsx / sheet directory (.csv / .json / .parquet) + Resources.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read each expected sheet → raw Table, per-sheet diagnostics
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  drop empty / blank / separator rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ TableSet  │  immutable snapshot of named tables
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ filter/index  │  project name → IDs → Tasks, Goals, Stakeholders
///   └──────────────┘
/// ```

pub mod clean;
pub mod error;
pub mod filter;
pub mod index;
pub mod loader;
pub mod model;
pub mod schema;
