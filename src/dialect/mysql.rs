use crate::dialect::traits::DatabaseEngine;

/// MySQL engine: each test namespace is a separate database.
pub struct MysqlEngine;

impl DatabaseEngine for MysqlEngine {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn initialize(&self) -> Vec<String> {
        Vec::new()
    }

    fn drop_database(&self, name: &str) -> Option<String> {
        Some(format!("DROP DATABASE IF EXISTS {};", name))
    }

    fn create_database(&self, name: &str) -> String {
        format!("CREATE DATABASE {};", name)
    }

    fn drop_view(&self, name: &str) -> String {
        format!("DROP VIEW IF EXISTS {};", name)
    }

    fn create_view(&self, name: &str) -> String {
        format!("CREATE VIEW {} AS", name)
    }

    fn use_database(&self, name: &str) -> Option<String> {
        Some(format!("USE {};", name))
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value { "TRUE" } else { "FALSE" }
    }

    fn auto_increment_column(&self, _name: &str) -> Option<String> {
        None
    }
}
