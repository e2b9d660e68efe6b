use crate::dialect::traits::DatabaseEngine;

/// SQLite engine: test namespaces are in-memory attachments.
pub struct SqliteEngine;

impl DatabaseEngine for SqliteEngine {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn initialize(&self) -> Vec<String> {
        Vec::new()
    }

    // A fresh in-memory attachment is empty, so there is nothing to drop.
    fn drop_database(&self, _name: &str) -> Option<String> {
        None
    }

    fn create_database(&self, name: &str) -> String {
        format!("ATTACH DATABASE ':memory:' AS {};", name)
    }

    // Temporary views live in the temp schema, not in main.
    fn drop_view(&self, name: &str) -> String {
        format!("DROP VIEW IF EXISTS temp.{};", name)
    }

    fn create_view(&self, name: &str) -> String {
        format!("CREATE TEMP VIEW {} AS", name)
    }

    fn use_database(&self, _name: &str) -> Option<String> {
        None
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }

    fn auto_increment_column(&self, name: &str) -> Option<String> {
        Some(format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", name))
    }
}
