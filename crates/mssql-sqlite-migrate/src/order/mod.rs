//! Table dependency ordering for safe row insertion.
//!
//! Computes an ordering in which every table appears after all tables it
//! references by foreign key, using an in-degree-counting topological sort.
//! Ties between tables that become eligible at the same point are broken by
//! stable input order, keeping the output deterministic.

use std::collections::{BTreeSet, BinaryHeap, HashMap};
use std::cmp::Reverse;

use crate::core::schema::TableSchema;
use crate::error::{MigrateError, Result};

/// Outcome of dependency ordering.
#[derive(Debug, Clone, Default)]
pub struct TableOrder {
    /// Indices into the input slice, in safe insertion order.
    pub indices: Vec<usize>,

    /// Self-referencing foreign keys, as `(table, column)` pairs. These are
    /// excluded from the ordering constraint; their integrity remains covered
    /// by the guard triggers.
    pub self_references: Vec<(String, String)>,

    /// Foreign keys whose parent table is absent from the schema, as
    /// `(table, foreign_table)` pairs. Treated as externally satisfied.
    pub unresolved: Vec<(String, String)>,
}

/// Order tables so that every foreign-key parent precedes its children.
///
/// Fails with [`MigrateError::CyclicDependency`] when a genuine reference
/// cycle between two or more tables leaves part of the schema unplaceable.
pub fn order_tables(tables: &[TableSchema]) -> Result<TableOrder> {
    let position: HashMap<String, usize> = tables
        .iter()
        .enumerate()
        .map(|(i, t)| (t.name.to_lowercase(), i))
        .collect();

    let mut outcome = TableOrder::default();

    // Distinct parent sets per table; duplicates from composite keys must not
    // inflate the in-degree.
    let mut parents: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); tables.len()];
    for (child_idx, table) in tables.iter().enumerate() {
        for fk in &table.foreign_keys {
            if fk.is_self_referencing() {
                outcome
                    .self_references
                    .push((table.name.clone(), fk.column.clone()));
                continue;
            }
            match position.get(&fk.foreign_table.to_lowercase()) {
                Some(&parent_idx) => {
                    parents[child_idx].insert(parent_idx);
                }
                None => outcome
                    .unresolved
                    .push((table.name.clone(), fk.foreign_table.clone())),
            }
        }
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); tables.len()];
    let mut in_degree: Vec<usize> = vec![0; tables.len()];
    for (child_idx, parent_set) in parents.iter().enumerate() {
        in_degree[child_idx] = parent_set.len();
        for &parent_idx in parent_set {
            children[parent_idx].push(child_idx);
        }
    }

    // Min-heap on the input index keeps eligible tables in stable input order.
    let mut ready: BinaryHeap<Reverse<usize>> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, &deg)| deg == 0)
        .map(|(i, _)| Reverse(i))
        .collect();

    while let Some(Reverse(idx)) = ready.pop() {
        outcome.indices.push(idx);
        for &child_idx in &children[idx] {
            in_degree[child_idx] -= 1;
            if in_degree[child_idx] == 0 {
                ready.push(Reverse(child_idx));
            }
        }
    }

    if outcome.indices.len() < tables.len() {
        let placed: BTreeSet<usize> = outcome.indices.iter().copied().collect();
        let remaining = tables
            .iter()
            .enumerate()
            .filter(|(i, _)| !placed.contains(i))
            .map(|(_, t)| t.name.clone())
            .collect();
        return Err(MigrateError::CyclicDependency { tables: remaining });
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::ForeignKeySchema;

    fn table(name: &str, refs: &[&str]) -> TableSchema {
        TableSchema {
            name: name.to_string(),
            foreign_keys: refs
                .iter()
                .map(|parent| ForeignKeySchema {
                    table: name.to_string(),
                    column: format!("{}Id", parent),
                    foreign_table: parent.to_string(),
                    foreign_column: "Id".to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn names(tables: &[TableSchema], order: &TableOrder) -> Vec<String> {
        order
            .indices
            .iter()
            .map(|&i| tables[i].name.clone())
            .collect()
    }

    #[test]
    fn test_chain_orders_parents_first() {
        let tables = vec![table("C", &["B"]), table("B", &["A"]), table("A", &[])];
        let order = order_tables(&tables).unwrap();
        assert_eq!(names(&tables, &order), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_order_is_independent_of_input_permutation() {
        let permutations: Vec<Vec<TableSchema>> = vec![
            vec![table("A", &[]), table("B", &["A"]), table("C", &["B"])],
            vec![table("B", &["A"]), table("C", &["B"]), table("A", &[])],
            vec![table("C", &["B"]), table("A", &[]), table("B", &["A"])],
        ];
        for tables in permutations {
            let order = order_tables(&tables).unwrap();
            assert_eq!(names(&tables, &order), vec!["A", "B", "C"]);
        }
    }

    #[test]
    fn test_ties_break_by_input_order() {
        let tables = vec![
            table("Zebra", &[]),
            table("Apple", &[]),
            table("Mango", &["Zebra"]),
        ];
        let order = order_tables(&tables).unwrap();
        assert_eq!(names(&tables, &order), vec!["Zebra", "Apple", "Mango"]);
    }

    #[test]
    fn test_topological_validity() {
        let tables = vec![
            table("Lines", &["Orders", "Products"]),
            table("Orders", &["Customers"]),
            table("Products", &[]),
            table("Customers", &[]),
        ];
        let order = order_tables(&tables).unwrap();
        let rank: HashMap<&str, usize> = order
            .indices
            .iter()
            .enumerate()
            .map(|(rank, &i)| (tables[i].name.as_str(), rank))
            .collect();
        for t in &tables {
            for fk in &t.foreign_keys {
                assert!(rank[fk.foreign_table.as_str()] < rank[t.name.as_str()]);
            }
        }
    }

    #[test]
    fn test_self_reference_is_deferred_not_cyclic() {
        let tables = vec![table("Employees", &["Employees"])];
        let order = order_tables(&tables).unwrap();
        assert_eq!(order.indices, vec![0]);
        assert_eq!(
            order.self_references,
            vec![("Employees".to_string(), "EmployeesId".to_string())]
        );
    }

    #[test]
    fn test_unknown_parent_is_reported_not_blocking() {
        let tables = vec![table("Orders", &["Archived"])];
        let order = order_tables(&tables).unwrap();
        assert_eq!(order.indices, vec![0]);
        assert_eq!(
            order.unresolved,
            vec![("Orders".to_string(), "Archived".to_string())]
        );
    }

    #[test]
    fn test_cycle_fails_naming_participants() {
        let tables = vec![table("A", &["B"]), table("B", &["A"]), table("C", &[])];
        let err = order_tables(&tables).unwrap_err();
        match err {
            MigrateError::CyclicDependency { tables } => {
                assert_eq!(tables, vec!["A".to_string(), "B".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_foreign_keys_to_same_parent() {
        // Composite keys produce one row per column pair; the in-degree must
        // still count the parent once.
        let tables = vec![table("Lines", &["Orders", "Orders"]), table("Orders", &[])];
        let order = order_tables(&tables).unwrap();
        assert_eq!(names(&tables, &order), vec!["Orders", "Lines"]);
    }
}
