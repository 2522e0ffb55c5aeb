//! Sheet names, key columns, and the relations between sheets.
//!
//! The source workbooks declare no keys; these descriptors are the single
//! place the joins are written down.

use std::collections::BTreeSet;
use std::fmt;

use super::model::{KeyKind, TableSet};

pub const PROJECTS: &str = "Projects";
pub const GOALS: &str = "Goals";
pub const TASKS: &str = "Tasks";
pub const STAKEHOLDERS_PROJECTS: &str = "Stakeholders_Projects";
pub const STAKEHOLDERS_DETAILS: &str = "Stakeholders_Details";
pub const RESOURCES: &str = "Resources";

/// Sheets expected in a project workbook, in display order.
pub const SHEETS: [&str; 5] = [
    PROJECTS,
    GOALS,
    TASKS,
    STAKEHOLDERS_PROJECTS,
    STAKEHOLDERS_DETAILS,
];

pub const PROJECT_ID: &str = "Project ID";
pub const PROJECT_NAME: &str = "Project Name";
pub const STAKEHOLDER_ID: &str = "Stakeholder ID";
pub const DETAIL_ID: &str = "ID";

/// A foreign key: `table.column` holds values of `references.referenced_column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub table: &'static str,
    pub column: &'static str,
    pub references: &'static str,
    pub referenced_column: &'static str,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} -> {}.{}",
            self.table, self.column, self.references, self.referenced_column
        )
    }
}

pub const TASK_PROJECT: Relation = Relation {
    table: TASKS,
    column: PROJECT_ID,
    references: PROJECTS,
    referenced_column: PROJECT_ID,
};

pub const GOAL_PROJECT: Relation = Relation {
    table: GOALS,
    column: PROJECT_ID,
    references: PROJECTS,
    referenced_column: PROJECT_ID,
};

pub const LINK_PROJECT: Relation = Relation {
    table: STAKEHOLDERS_PROJECTS,
    column: PROJECT_ID,
    references: PROJECTS,
    referenced_column: PROJECT_ID,
};

pub const LINK_STAKEHOLDER: Relation = Relation {
    table: STAKEHOLDERS_PROJECTS,
    column: STAKEHOLDER_ID,
    references: STAKEHOLDERS_DETAILS,
    referenced_column: DETAIL_ID,
};

pub const RELATIONS: [Relation; 4] = [TASK_PROJECT, GOAL_PROJECT, LINK_PROJECT, LINK_STAKEHOLDER];

/// Two sides of a relation whose key values can never compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTypeMismatch {
    pub relation: Relation,
    pub column_kinds: BTreeSet<KeyKind>,
    pub referenced_kinds: BTreeSet<KeyKind>,
}

impl fmt::Display for KeyTypeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds = |set: &BTreeSet<KeyKind>| {
            set.iter().map(|k| k.to_string()).collect::<Vec<_>>().join("/")
        };
        write!(
            f,
            "{}: {} keys never match {} keys, join will be empty",
            self.relation,
            kinds(&self.column_kinds),
            kinds(&self.referenced_kinds)
        )
    }
}

/// Report relations whose two columns share no key type at all.
///
/// Joins on such relations still run and come back empty; this only makes
/// the cause visible.
pub fn check_key_types(tables: &TableSet) -> Vec<KeyTypeMismatch> {
    let kinds_of = |table: &str, column: &str| -> BTreeSet<KeyKind> {
        tables
            .table_or_empty(table)
            .column_values(column)
            .filter_map(|v| v.key())
            .map(|k| k.kind())
            .collect()
    };

    RELATIONS
        .iter()
        .filter_map(|rel| {
            let column_kinds = kinds_of(rel.table, rel.column);
            let referenced_kinds = kinds_of(rel.references, rel.referenced_column);
            let disjoint = !column_kinds.is_empty()
                && !referenced_kinds.is_empty()
                && column_kinds.is_disjoint(&referenced_kinds);
            disjoint.then(|| KeyTypeMismatch {
                relation: *rel,
                column_kinds,
                referenced_kinds,
            })
        })
        .collect()
}
