use std::collections::BTreeSet;

use super::model::{CellValue, Key, Table, TableSet};
use super::schema::{self, Relation};

// ---------------------------------------------------------------------------
// Key sets
// ---------------------------------------------------------------------------

/// The IDs currently selected in one table, as normalized join keys.
pub type KeySet = BTreeSet<Key>;

/// Collect the distinct keys among `values`, skipping `Null`.
pub fn key_set<'a>(values: impl IntoIterator<Item = &'a CellValue>) -> KeySet {
    values.into_iter().filter_map(CellValue::key).collect()
}

// ---------------------------------------------------------------------------
// Row filters
// ---------------------------------------------------------------------------

/// Rows of `table` whose `column` value is in `keys`, in table order.
///
/// A missing column or an empty key set gives an empty table with the same
/// columns.
pub fn filter_by_key(table: &Table, column: &str, keys: &KeySet) -> Table {
    let Some(idx) = table.column_index(column) else {
        return table.empty_like();
    };
    if keys.is_empty() {
        return table.empty_like();
    }
    Table {
        columns: table.columns.clone(),
        rows: table
            .rows
            .iter()
            .filter(|row| {
                row.get(idx)
                    .and_then(CellValue::key)
                    .is_some_and(|k| keys.contains(&k))
            })
            .cloned()
            .collect(),
    }
}

/// Rows whose `Project ID` is one of the active IDs. Used for Tasks, Goals
/// and Stakeholders_Projects alike.
pub fn filter_by_project(table: &Table, active_ids: &KeySet) -> Table {
    filter_by_key(table, schema::PROJECT_ID, active_ids)
}

/// Filter the referencing side of `relation` by keys of the referenced side.
pub fn filter_relation(tables: &TableSet, relation: &Relation, keys: &KeySet) -> Table {
    filter_by_key(tables.table_or_empty(relation.table), relation.column, keys)
}

/// Post-cleaning row count.
pub fn count(table: &Table) -> usize {
    table.len()
}

// ---------------------------------------------------------------------------
// Project selection
// ---------------------------------------------------------------------------

/// IDs of every project whose name equals `name`.
///
/// No match gives an empty set. Duplicate names contribute all their IDs.
pub fn resolve_project(tables: &TableSet, name: &str) -> KeySet {
    let projects = tables.table_or_empty(schema::PROJECTS);
    let (Some(name_idx), Some(id_idx)) = (
        projects.column_index(schema::PROJECT_NAME),
        projects.column_index(schema::PROJECT_ID),
    ) else {
        return KeySet::new();
    };
    key_set(
        projects
            .rows
            .iter()
            .filter(|row| row.get(name_idx).is_some_and(|c| name_matches(c, name)))
            .filter_map(|row| row.get(id_idx)),
    )
}

pub(crate) fn name_matches(cell: &CellValue, name: &str) -> bool {
    !cell.is_missing() && cell.to_string() == name
}

/// Distinct project names, first occurrence order, for the selector.
pub fn project_names(tables: &TableSet) -> Vec<String> {
    let mut seen = BTreeSet::new();
    tables
        .table_or_empty(schema::PROJECTS)
        .column_values(schema::PROJECT_NAME)
        .filter(|v| !v.is_missing())
        .map(|v| v.to_string())
        .filter(|n| seen.insert(n.clone()))
        .collect()
}

/// The selected project's own rows.
pub fn project_rows(tables: &TableSet, name: &str) -> Table {
    let projects = tables.table_or_empty(schema::PROJECTS);
    let Some(name_idx) = projects.column_index(schema::PROJECT_NAME) else {
        return projects.empty_like();
    };
    Table {
        columns: projects.columns.clone(),
        rows: projects
            .rows
            .iter()
            .filter(|row| row.get(name_idx).is_some_and(|c| name_matches(c, name)))
            .cloned()
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Stakeholder join
// ---------------------------------------------------------------------------

/// Result of walking Projects → Stakeholders_Projects → Stakeholders_Details.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StakeholderJoin {
    /// Association rows for the active projects.
    pub linked: Table,
    /// Detail rows for the linked stakeholders, in Stakeholders_Details order.
    pub details: Table,
}

pub fn join_stakeholders(
    stakeholders_projects: &Table,
    stakeholders_details: &Table,
    active_ids: &KeySet,
) -> StakeholderJoin {
    let linked = filter_by_key(
        stakeholders_projects,
        schema::LINK_PROJECT.column,
        active_ids,
    );
    let stakeholder_ids = key_set(linked.column_values(schema::LINK_STAKEHOLDER.column));
    let details = filter_by_key(
        stakeholders_details,
        schema::LINK_STAKEHOLDER.referenced_column,
        &stakeholder_ids,
    );
    log::debug!(
        "stakeholder join: {} links, {} distinct ids, {} details",
        linked.len(),
        stakeholder_ids.len(),
        details.len()
    );
    StakeholderJoin { linked, details }
}

// ---------------------------------------------------------------------------
// ProjectView – everything the dashboard shows for one selection
// ---------------------------------------------------------------------------

/// Headline numbers shown above the tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub project_count: usize,
    pub resource_count: usize,
}

pub fn summary(tables: &TableSet) -> Summary {
    Summary {
        project_count: count(tables.table_or_empty(schema::PROJECTS)),
        resource_count: count(tables.table_or_empty(schema::RESOURCES)),
    }
}

/// Filtered tables for one selected project name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectView {
    pub name: String,
    pub active_ids: KeySet,
    pub project: Table,
    pub tasks: Table,
    pub goals: Table,
    pub stakeholders: StakeholderJoin,
    pub summary: Summary,
}

impl ProjectView {
    /// Single-record view of the selected project.
    pub fn project_details(&self) -> Table {
        self.project.transpose()
    }
}

/// Full recompute of every dependent table for `name`.
pub fn project_view(tables: &TableSet, name: &str) -> ProjectView {
    let active_ids = resolve_project(tables, name);
    if active_ids.is_empty() {
        log::debug!("no project named {name:?}");
    }
    ProjectView {
        name: name.to_string(),
        project: project_rows(tables, name),
        tasks: filter_relation(tables, &schema::TASK_PROJECT, &active_ids),
        goals: filter_relation(tables, &schema::GOAL_PROJECT, &active_ids),
        stakeholders: join_stakeholders(
            tables.table_or_empty(schema::STAKEHOLDERS_PROJECTS),
            tables.table_or_empty(schema::STAKEHOLDERS_DETAILS),
            &active_ids,
        ),
        summary: summary(tables),
        active_ids,
    }
}
