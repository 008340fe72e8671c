//! Foreign-key emulation triggers.
//!
//! The target engine does not enforce declarative foreign keys by default, so
//! every foreign key is compiled into three triggers: an insert guard and an
//! update guard on the child table, and a delete trigger on the parent that
//! either cascades or guards. Trigger names are deterministic, which keeps
//! regeneration idempotent and diffable.

use crate::core::identifier::quote;
use crate::core::schema::{
    ForeignKeySchema, TableSchema, TriggerEvent, TriggerSchema, TriggerTiming,
};

/// Generate the integrity-emulation triggers for every foreign key of a
/// table: exactly three per key.
pub fn foreign_key_triggers(table: &TableSchema) -> Vec<TriggerSchema> {
    let mut triggers = Vec::with_capacity(table.foreign_keys.len() * 3);
    for fk in &table.foreign_keys {
        triggers.push(insert_trigger(fk));
        triggers.push(update_trigger(fk));
        triggers.push(delete_trigger(fk));
    }
    triggers
}

/// Build the deterministic trigger name for a foreign key.
pub fn make_trigger_name(fk: &ForeignKeySchema, prefix: &str) -> String {
    format!(
        "{}_{}_{}_{}_{}",
        prefix, fk.table, fk.column, fk.foreign_table, fk.foreign_column
    )
}

/// Guard trigger: reject an INSERT whose new child value has no matching
/// parent row. Nullable child columns get a NULL escape hatch.
pub fn insert_trigger(fk: &ForeignKeySchema) -> TriggerSchema {
    let name = make_trigger_name(fk, "fki");
    TriggerSchema {
        body: guard_body("insert", &name, fk),
        name,
        event: TriggerEvent::Insert,
        timing: TriggerTiming::Before,
        table: fk.table.clone(),
    }
}

/// Guard trigger: reject an UPDATE whose new child value has no matching
/// parent row.
pub fn update_trigger(fk: &ForeignKeySchema) -> TriggerSchema {
    let name = make_trigger_name(fk, "fku");
    TriggerSchema {
        body: guard_body("update", &name, fk),
        name,
        event: TriggerEvent::Update,
        timing: TriggerTiming::Before,
        table: fk.table.clone(),
    }
}

/// Delete trigger on the parent table: cascades to the child rows when the
/// key is marked ON DELETE CASCADE, otherwise rejects deletes that would
/// orphan child rows.
pub fn delete_trigger(fk: &ForeignKeySchema) -> TriggerSchema {
    let name = make_trigger_name(fk, "fkd");
    let body = if fk.cascade_on_delete {
        format!(
            "DELETE FROM {} WHERE {} = OLD.{}; ",
            quote(&fk.table),
            fk.column,
            fk.foreign_column
        )
    } else {
        format!(
            "SELECT RAISE(ROLLBACK, 'delete on table {} violates foreign key constraint {}') \
             WHERE (SELECT {} FROM {} WHERE {} = OLD.{}) IS NOT NULL; ",
            fk.foreign_table, name, fk.column, fk.table, fk.column, fk.foreign_column
        )
    };
    TriggerSchema {
        name,
        event: TriggerEvent::Delete,
        timing: TriggerTiming::Before,
        body,
        table: fk.foreign_table.clone(),
    }
}

fn guard_body(event: &str, name: &str, fk: &ForeignKeySchema) -> String {
    // A nullable child column legitimately holds NULL; only non-null values
    // must resolve against the parent.
    let null_guard = if fk.is_nullable {
        format!(" NEW.{} IS NOT NULL AND", fk.column)
    } else {
        String::new()
    };
    format!(
        "SELECT RAISE(ROLLBACK, '{} on table {} violates foreign key constraint {}') \
         WHERE{} (SELECT {} FROM {} WHERE {} = NEW.{}) IS NULL; ",
        event,
        fk.table,
        name,
        null_guard,
        fk.foreign_column,
        fk.foreign_table,
        fk.foreign_column,
        fk.column
    )
}

/// Render a trigger definition as executable DDL.
pub fn write_trigger(trigger: &TriggerSchema) -> String {
    format!(
        "CREATE TRIGGER {} {} {} ON {} BEGIN {} END;",
        quote(&trigger.name),
        trigger.timing,
        trigger.event,
        quote(&trigger.table),
        trigger.body
    )
}
