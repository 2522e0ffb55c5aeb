//! Precomputed lookups so repeated selections skip the full scans in
//! [`filter`](super::filter). Every lookup returns exactly what the scan
//! would.

use std::collections::BTreeMap;

use super::filter::{self, KeySet, ProjectView, StakeholderJoin};
use super::model::{Key, Table, TableSet};
use super::schema;

/// Key → ascending row positions for one column of one table.
#[derive(Debug, Clone, Default)]
pub struct TableIndex {
    positions: BTreeMap<Key, Vec<usize>>,
}

impl TableIndex {
    pub fn build(table: &Table, column: &str) -> Self {
        let mut positions: BTreeMap<Key, Vec<usize>> = BTreeMap::new();
        if let Some(idx) = table.column_index(column) {
            for (pos, row) in table.rows.iter().enumerate() {
                if let Some(key) = row.get(idx).and_then(|c| c.key()) {
                    positions.entry(key).or_default().push(pos);
                }
            }
        }
        TableIndex { positions }
    }

    /// Same rows, same order as [`filter::filter_by_key`].
    pub fn filter(&self, table: &Table, keys: &KeySet) -> Table {
        let mut hits: Vec<usize> = keys
            .iter()
            .filter_map(|k| self.positions.get(k))
            .flatten()
            .copied()
            .collect();
        hits.sort_unstable();
        table.select_rows(&hits)
    }
}

/// A snapshot plus the indices needed to answer project selections.
#[derive(Debug, Clone, Default)]
pub struct IndexedTables {
    tables: TableSet,
    by_name: BTreeMap<String, KeySet>,
    project_rows: BTreeMap<String, Vec<usize>>,
    tasks: TableIndex,
    goals: TableIndex,
    links: TableIndex,
    details: TableIndex,
}

impl IndexedTables {
    pub fn new(tables: TableSet) -> Self {
        let mut by_name: BTreeMap<String, KeySet> = BTreeMap::new();
        let mut project_rows: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        let projects = tables.table_or_empty(schema::PROJECTS);
        if let Some(name_idx) = projects.column_index(schema::PROJECT_NAME) {
            let id_idx = projects.column_index(schema::PROJECT_ID);
            for (pos, row) in projects.rows.iter().enumerate() {
                let Some(cell) = row.get(name_idx).filter(|c| !c.is_missing()) else {
                    continue;
                };
                let name = cell.to_string();
                project_rows.entry(name.clone()).or_default().push(pos);
                let ids = by_name.entry(name).or_default();
                if let Some(key) = id_idx.and_then(|i| row.get(i)).and_then(|c| c.key()) {
                    ids.insert(key);
                }
            }
        }

        let rel_index = |rel: &schema::Relation| {
            TableIndex::build(tables.table_or_empty(rel.table), rel.column)
        };
        let tasks = rel_index(&schema::TASK_PROJECT);
        let goals = rel_index(&schema::GOAL_PROJECT);
        let links = rel_index(&schema::LINK_PROJECT);
        let details = TableIndex::build(
            tables.table_or_empty(schema::STAKEHOLDERS_DETAILS),
            schema::LINK_STAKEHOLDER.referenced_column,
        );

        IndexedTables {
            tables,
            by_name,
            project_rows,
            tasks,
            goals,
            links,
            details,
        }
    }

    pub fn tables(&self) -> &TableSet {
        &self.tables
    }

    /// Indexed [`filter::resolve_project`].
    pub fn resolve_project(&self, name: &str) -> KeySet {
        self.by_name.get(name).cloned().unwrap_or_default()
    }

    /// Indexed [`filter::project_view`].
    pub fn project_view(&self, name: &str) -> ProjectView {
        let active_ids = self.resolve_project(name);
        let t = |n: &str| self.tables.table_or_empty(n);

        let projects = t(schema::PROJECTS);
        let project = match self.project_rows.get(name) {
            Some(rows) => projects.select_rows(rows),
            None => projects.empty_like(),
        };

        let sp = t(schema::STAKEHOLDERS_PROJECTS);
        let linked = self.links.filter(sp, &active_ids);
        let stakeholder_ids = filter::key_set(linked.column_values(schema::LINK_STAKEHOLDER.column));
        let details = self
            .details
            .filter(t(schema::STAKEHOLDERS_DETAILS), &stakeholder_ids);

        ProjectView {
            name: name.to_string(),
            project,
            tasks: self.tasks.filter(t(schema::TASKS), &active_ids),
            goals: self.goals.filter(t(schema::GOALS), &active_ids),
            stakeholders: StakeholderJoin { linked, details },
            summary: filter::summary(&self.tables),
            active_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;
    use crate::data::schema::*;
    use proptest::prelude::*;

    fn table(columns: &[&str], rows: Vec<Vec<CellValue>>) -> Table {
        Table::from_rows(columns.iter().map(|c| c.to_string()).collect(), rows)
    }

    fn id_cell() -> impl Strategy<Value = CellValue> {
        prop_oneof![
            (0i64..4).prop_map(CellValue::Integer),
            (0i64..4).prop_map(|v| CellValue::Float(v as f64)),
            (0i64..4).prop_map(|v| CellValue::String(v.to_string())),
            Just(CellValue::Null),
        ]
    }

    fn name_cell() -> impl Strategy<Value = CellValue> {
        prop_oneof![
            Just(CellValue::from("Alpha")),
            Just(CellValue::from("Beta")),
            Just(CellValue::Null),
        ]
    }

    fn arb_tables() -> impl Strategy<Value = TableSet> {
        let pairs = |a: BoxedStrategy<CellValue>, b: BoxedStrategy<CellValue>| {
            prop::collection::vec((a, b).prop_map(|(x, y)| vec![x, y]), 0..12)
        };
        (
            pairs(id_cell().boxed(), name_cell().boxed()),
            pairs(id_cell().boxed(), Just(CellValue::from("t")).boxed()),
            pairs(id_cell().boxed(), id_cell().boxed()),
            pairs(id_cell().boxed(), Just(CellValue::from("d")).boxed()),
        )
            .prop_map(|(projects, tasks, links, details)| {
                TableSet::new()
                    .with(PROJECTS, table(&[PROJECT_ID, PROJECT_NAME], projects))
                    .with(TASKS, table(&[PROJECT_ID, "Task"], tasks))
                    .with(STAKEHOLDERS_PROJECTS, table(&[PROJECT_ID, STAKEHOLDER_ID], links))
                    .with(STAKEHOLDERS_DETAILS, table(&[DETAIL_ID, "Name"], details))
            })
    }

    #[test]
    fn index_filter_keeps_table_order() {
        let t = table(
            &[PROJECT_ID],
            vec![
                vec![CellValue::Integer(2)],
                vec![CellValue::Integer(1)],
                vec![CellValue::Integer(2)],
            ],
        );
        let index = TableIndex::build(&t, PROJECT_ID);
        let keys = KeySet::from([Key::Int(1), Key::Int(2)]);
        assert_eq!(index.filter(&t, &keys), filter::filter_by_key(&t, PROJECT_ID, &keys));
    }

    proptest! {
        #[test]
        fn indexed_view_matches_full_recompute(tables in arb_tables()) {
            let indexed = IndexedTables::new(tables.clone());
            for name in ["Alpha", "Beta", "Gamma"] {
                prop_assert_eq!(indexed.project_view(name), filter::project_view(&tables, name));
            }
        }
    }
}
