//! View pass-through with schema-qualifier stripping.
//!
//! View bodies are not translated; the single rewrite applied is removal of
//! the source namespace qualifier (`dbo.`), which the target engine does not
//! understand.

use regex::Regex;

use crate::core::schema::ViewSchema;

/// Strip every `<qualifier>.` occurrence from a view definition,
/// case-insensitively.
pub fn strip_schema_qualifier(sql: &str, qualifier: &str) -> String {
    let pattern = format!(r"(?i){}\.", regex::escape(qualifier));
    let rx = Regex::new(&pattern).expect("qualifier regex");
    rx.replace_all(sql, "").into_owned()
}

/// Rewrite a view for the target engine.
pub fn rewrite_view(view: &ViewSchema, qualifier: &str) -> ViewSchema {
    ViewSchema {
        name: view.name.clone(),
        sql: strip_schema_qualifier(&view.sql, qualifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_qualifier_case_insensitively() {
        assert_eq!(
            strip_schema_qualifier("SELECT * FROM dbo.Orders JOIN DBO.Lines", "dbo"),
            "SELECT * FROM Orders JOIN Lines"
        );
    }

    #[test]
    fn test_leaves_unqualified_sql_alone() {
        let sql = "SELECT OrderId FROM Orders";
        assert_eq!(strip_schema_qualifier(sql, "dbo"), sql);
    }

    #[test]
    fn test_rewrite_view_keeps_name() {
        let view = ViewSchema {
            name: "ActiveOrders".to_string(),
            sql: "CREATE VIEW ActiveOrders AS SELECT * FROM dbo.Orders".to_string(),
        };
        let rewritten = rewrite_view(&view, "dbo");
        assert_eq!(rewritten.name, "ActiveOrders");
        assert_eq!(
            rewritten.sql,
            "CREATE VIEW ActiveOrders AS SELECT * FROM Orders"
        );
    }
}
