//! DDL rendering for the target engine.
//!
//! Every builder in this module is a pure transform from schema metadata to
//! SQL text: no I/O, and identical input yields byte-identical output.

pub mod default_value;
pub mod insert;
pub mod table;
pub mod trigger;
pub mod view;

pub use insert::{build_insert, build_select, InsertParameter, InsertTemplate};
pub use table::{build_create_index, build_create_table, build_table_ddl};
pub use trigger::{foreign_key_triggers, make_trigger_name, write_trigger};
pub use view::{rewrite_view, strip_schema_qualifier};
