use crate::dialect::traits::DatabaseEngine;

/// PostgreSQL engine: test namespaces are schemas of the connected database.
pub struct PostgresEngine;

impl DatabaseEngine for PostgresEngine {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn initialize(&self) -> Vec<String> {
        // Silence the notices IF EXISTS produces for missing objects
        vec![
            "\\set ON_ERROR_STOP true".to_string(),
            "SET client_min_messages='ERROR';".to_string(),
        ]
    }

    fn drop_database(&self, name: &str) -> Option<String> {
        Some(format!("DROP SCHEMA IF EXISTS {} CASCADE;", name))
    }

    fn create_database(&self, name: &str) -> String {
        format!("CREATE SCHEMA {};", name)
    }

    fn drop_view(&self, name: &str) -> String {
        format!("DROP VIEW IF EXISTS {};", name)
    }

    fn create_view(&self, name: &str) -> String {
        format!("CREATE VIEW {} AS", name)
    }

    fn use_database(&self, name: &str) -> Option<String> {
        Some(format!("SET search_path TO {};", name))
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value { "TRUE" } else { "FALSE" }
    }

    fn auto_increment_column(&self, _name: &str) -> Option<String> {
        None
    }
}
