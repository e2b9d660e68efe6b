//! Table DDL and DML built from column names and data rows.

use crate::classifier::{ColumnType, classify};
use crate::dialect::DatabaseEngine;
use crate::error::{RdbResult, RdbUnitError};

/// Table holding the rows a RESULT block expects.
pub const EXPECTED_TABLE: &str = "test_expected";

/// View capturing the output of a SELECT under test.
pub const SELECT_RESULT_TABLE: &str = "test_select_result";

/// Leading rank column of ordered comparisons.
pub const RANK_COLUMN: &str = "test_rank";

/// A table being declared in a SETUP or RESULT block.
///
/// The table is created lazily: the first data row fixes the column types
/// and triggers `DROP TABLE` / `CREATE TABLE`. Later rows reuse those types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    name: String,
    columns: Vec<String>,
    types: Option<Vec<ColumnType>>,
    ranked: bool,
}

impl TableSpec {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            types: None,
            ranked: false,
        }
    }

    /// Prepend an auto-incrementing rank column, filled by the engine.
    pub fn ranked(mut self, ranked: bool) -> Self {
        self.ranked = ranked;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Column types, once the table has been created.
    pub fn types(&self) -> Option<&[ColumnType]> {
        self.types.as_deref()
    }

    pub fn is_created(&self) -> bool {
        self.types.is_some()
    }

    /// Statements adding one row, creating the table first if needed.
    pub fn add_row(
        &mut self,
        row: &[String],
        engine: &dyn DatabaseEngine,
        line: usize,
        state: &'static str,
    ) -> RdbResult<Vec<String>> {
        if row.len() != self.columns.len() {
            return Err(RdbUnitError::ColumnCountMismatch {
                line,
                state,
                expected: self.columns.len(),
                found: row.len(),
            });
        }

        let mut statements = Vec::with_capacity(3);
        if !self.is_created() {
            statements.extend(self.create(row, engine, line)?);
        }
        statements.push(self.insert(row, engine));
        Ok(statements)
    }

    /// Statements creating the table without rows.
    ///
    /// With no data to go by, the column names serve as type hints.
    pub fn create_empty(
        &mut self,
        engine: &dyn DatabaseEngine,
        line: usize,
    ) -> RdbResult<Vec<String>> {
        let hints = self.columns.clone();
        self.create(&hints, engine, line)
    }

    fn create(
        &mut self,
        hints: &[String],
        engine: &dyn DatabaseEngine,
        line: usize,
    ) -> RdbResult<Vec<String>> {
        let types: Vec<ColumnType> = hints.iter().map(|v| classify(v)).collect();

        let mut definitions = Vec::with_capacity(self.columns.len() + 1);
        if self.ranked {
            let rank = engine.auto_increment_column(RANK_COLUMN).ok_or(
                RdbUnitError::UnsupportedCapability {
                    line,
                    engine: engine.name(),
                    capability: "ORDERED RESULT",
                },
            )?;
            definitions.push(rank);
        }
        definitions.extend(
            self.columns
                .iter()
                .zip(&types)
                .map(|(name, ty)| format!("{} {}", name, ty.sql_name())),
        );

        tracing::debug!(table = %self.name, ?types, "creating table");
        self.types = Some(types);

        Ok(vec![
            format!("DROP TABLE IF EXISTS {};", self.name),
            format!("CREATE TABLE {}({});", self.name, definitions.join(", ")),
        ])
    }

    fn insert(&self, row: &[String], engine: &dyn DatabaseEngine) -> String {
        let mut values: Vec<String> = Vec::with_capacity(row.len() + 1);
        if self.ranked {
            values.push("NULL".to_string());
        }
        values.extend(
            self.types
                .iter()
                .flatten()
                .zip(row)
                .map(|(ty, value)| ty.render(value, engine)),
        );
        format!("INSERT INTO {} VALUES ({});", self.name, values.join(", "))
    }
}
