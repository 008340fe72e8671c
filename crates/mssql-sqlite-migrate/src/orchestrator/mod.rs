//! Conversion plan assembly - main workflow coordinator.
//!
//! [`ConversionPlan::build`] turns a populated [`DatabaseSchema`] into the
//! ordered sequence of executable statements and insert templates an external
//! execution collaborator runs against the target, together with a
//! [`ConversionReport`] of everything noteworthy that happened on the way.
//!
//! The core transforms stay pure; all `tracing` emission happens here, and
//! every logged condition is also returned as a structured
//! [`ConversionEvent`] so callers without a subscriber still see it.

use tracing::{debug, info, warn};

use crate::cast::cast_value;
use crate::config::Config;
use crate::core::schema::{DatabaseSchema, TableSchema};
use crate::core::value::SqlValue;
use crate::ddl;
use crate::ddl::InsertTemplate;
use crate::error::Result;
use crate::order::order_tables;

/// Kind of an emitted statement, in execution-phase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Table,
    Index,
    Trigger,
    View,
}

/// One executable statement of the conversion script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// What the statement creates.
    pub kind: StatementKind,

    /// Executable SQL text.
    pub sql: String,
}

/// Structured record of a noteworthy condition during plan assembly or row
/// preparation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionEvent {
    /// A table's DDL was rendered.
    TableRendered { table: String },

    /// An index was dropped because it references a column the table does
    /// not declare.
    IndexSkipped {
        table: String,
        index: String,
        reason: String,
    },

    /// A self-referencing foreign key was excluded from the insertion-order
    /// constraint; its guard triggers still apply.
    SelfReferenceDeferred { table: String, column: String },

    /// A foreign key points at a table absent from the schema; treated as
    /// externally satisfied.
    UnresolvedReference {
        table: String,
        foreign_table: String,
    },

    /// A row was skipped because one of its values could not be coerced.
    RowSkipped { table: String, detail: String },
}

/// Accumulated events of one conversion run.
#[derive(Debug, Clone, Default)]
pub struct ConversionReport {
    /// Events in occurrence order.
    pub events: Vec<ConversionEvent>,
}

impl ConversionReport {
    /// Number of rows skipped during row preparation.
    pub fn rows_skipped(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ConversionEvent::RowSkipped { .. }))
            .count()
    }

    fn push(&mut self, event: ConversionEvent) {
        self.events.push(event);
    }
}

/// Counts describing an assembled plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSummary {
    pub tables: usize,
    pub indexes: usize,
    pub triggers: usize,
    pub views: usize,
}

/// The full executable output of schema translation.
#[derive(Debug, Clone)]
pub struct ConversionPlan {
    /// DDL statements in safe execution order: tables (with their indexes),
    /// then triggers, then views.
    pub statements: Vec<Statement>,

    /// Names of the converted tables, in safe row-insertion order.
    pub table_order: Vec<String>,

    /// One insert template per converted table, in `table_order`.
    pub inserts: Vec<InsertTemplate>,

    /// Everything noteworthy that happened during assembly.
    pub report: ConversionReport,
}

impl ConversionPlan {
    /// Assemble the conversion plan for a schema under the given
    /// configuration.
    pub fn build(schema: &DatabaseSchema, config: &Config) -> Result<ConversionPlan> {
        let selected: Vec<&TableSchema> = schema
            .tables
            .iter()
            .filter(|t| config.migration.table_selected(&t.name))
            .collect();
        for table in &selected {
            crate::core::identifier::validate_identifier(&table.name)?;
            for col in &table.columns {
                crate::core::identifier::validate_identifier(&col.name)?;
            }
            table.check_invariants()?;
        }

        info!(
            "Assembling conversion plan for {} of {} tables",
            selected.len(),
            schema.tables.len()
        );

        let owned: Vec<TableSchema> = selected.iter().map(|t| (*t).clone()).collect();
        let order = order_tables(&owned)?;

        let mut report = ConversionReport::default();
        for (table, column) in &order.self_references {
            warn!(
                "Self-referencing foreign key on [{}].[{}] excluded from insertion ordering",
                table, column
            );
            report.push(ConversionEvent::SelfReferenceDeferred {
                table: table.clone(),
                column: column.clone(),
            });
        }
        for (table, foreign_table) in &order.unresolved {
            warn!(
                "Foreign key on [{}] references [{}], which is not part of the schema",
                table, foreign_table
            );
            report.push(ConversionEvent::UnresolvedReference {
                table: table.clone(),
                foreign_table: foreign_table.clone(),
            });
        }

        let mut statements = Vec::new();
        let mut table_order = Vec::with_capacity(order.indices.len());
        let mut inserts = Vec::with_capacity(order.indices.len());

        for &idx in &order.indices {
            let table = &owned[idx];
            statements.push(Statement {
                kind: StatementKind::Table,
                sql: ddl::build_table_ddl(table),
            });
            debug!("Rendered CREATE TABLE for [{}]", table.name);
            report.push(ConversionEvent::TableRendered {
                table: table.name.clone(),
            });

            if config.migration.create_indexes {
                for index in &table.indexes {
                    if let Some(missing) = index
                        .columns
                        .iter()
                        .find(|c| table.column(&c.name).is_none())
                    {
                        warn!(
                            "Skipping index [{}] on [{}]: unknown column [{}]",
                            index.name, table.name, missing.name
                        );
                        report.push(ConversionEvent::IndexSkipped {
                            table: table.name.clone(),
                            index: index.name.clone(),
                            reason: format!("unknown column [{}]", missing.name),
                        });
                        continue;
                    }
                    statements.push(Statement {
                        kind: StatementKind::Index,
                        sql: ddl::build_create_index(&table.name, index),
                    });
                }
            }

            table_order.push(table.name.clone());
            inserts.push(ddl::build_insert(table)?);
        }

        if config.migration.create_triggers {
            for &idx in &order.indices {
                for trigger in ddl::foreign_key_triggers(&owned[idx]) {
                    statements.push(Statement {
                        kind: StatementKind::Trigger,
                        sql: ddl::write_trigger(&trigger),
                    });
                }
            }
        }

        if config.migration.copy_views {
            for view in &schema.views {
                let rewritten = ddl::rewrite_view(view, &config.source.schema);
                statements.push(Statement {
                    kind: StatementKind::View,
                    sql: rewritten.sql,
                });
            }
        }

        let plan = ConversionPlan {
            statements,
            table_order,
            inserts,
            report,
        };
        let summary = plan.summary();
        info!(
            "Plan ready: {} tables, {} indexes, {} triggers, {} views",
            summary.tables, summary.indexes, summary.triggers, summary.views
        );
        Ok(plan)
    }

    /// Count the plan's statements by kind.
    pub fn summary(&self) -> ConversionSummary {
        let count = |kind: StatementKind| {
            self.statements.iter().filter(|s| s.kind == kind).count()
        };
        ConversionSummary {
            tables: count(StatementKind::Table),
            indexes: count(StatementKind::Index),
            triggers: count(StatementKind::Trigger),
            views: count(StatementKind::View),
        }
    }
}

/// Statement toggling the target's own constraint enforcement.
///
/// Guard triggers fire during bulk load even though rows arrive in
/// dependency order, so enforcement is switched off for the load and back on
/// afterwards.
pub fn constraint_check_statement(enabled: bool) -> String {
    format!(
        "PRAGMA ignore_check_constraints = {};",
        if enabled { 0 } else { 1 }
    )
}

/// Coerce one source row for insertion, in column order.
///
/// Fails with the first value that cannot be coerced; callers decide the
/// row's fate (see [`cast_rows`]).
pub fn prepare_row<'a>(table: &TableSchema, row: Vec<SqlValue<'a>>) -> Result<Vec<SqlValue<'a>>> {
    row.into_iter()
        .zip(table.columns.iter())
        .map(|(value, column)| cast_value(value, column))
        .collect()
}

/// Coerce a batch of rows, skipping the ones that fail.
///
/// A bad row must not block the rest of the migration: each failure is
/// logged, recorded in the report with its table and column context, and the
/// remaining rows proceed.
pub fn cast_rows<'a>(
    table: &TableSchema,
    rows: Vec<Vec<SqlValue<'a>>>,
    report: &mut ConversionReport,
) -> Vec<Vec<SqlValue<'a>>> {
    let mut prepared = Vec::with_capacity(rows.len());
    for row in rows {
        if row.len() != table.columns.len() {
            let detail = format!(
                "expected {} values, got {}",
                table.columns.len(),
                row.len()
            );
            warn!("Skipping row for [{}]: {}", table.name, detail);
            report.push(ConversionEvent::RowSkipped {
                table: table.name.clone(),
                detail,
            });
            continue;
        }
        match prepare_row(table, row) {
            Ok(values) => prepared.push(values),
            Err(err) => {
                warn!("Skipping row for [{}]: {}", table.name, err);
                report.push(ConversionEvent::RowSkipped {
                    table: table.name.clone(),
                    detail: err.to_string(),
                });
            }
        }
    }
    prepared
}
