//! States of the line-driven script automaton.

use crate::table::TableSpec;

/// Where a column list leads back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resume {
    Setup,
    Result,
}

/// The table under test and the rows it should hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResultTarget {
    pub case_name: String,
    pub expected: TableSpec,
}

/// Each state carries exactly the data it works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum State {
    /// Between blocks; only directives are accepted.
    Initial,
    /// Inside `BEGIN SETUP`, possibly filling a declared table.
    Setup { table: Option<TableSpec> },
    /// Inside `BEGIN CREATE` / `BEGIN SELECT`, buffering the statement.
    Sql { lines: Vec<String> },
    /// Right after a table declaration, expecting its column names.
    TableColumns { table: String, resume: Resume },
    /// Inside `BEGIN RESULT`, possibly filling the expected table.
    Result { target: Option<ResultTarget> },
}

impl State {
    pub fn name(&self) -> &'static str {
        match self {
            State::Initial => "initial",
            State::Setup { .. } => "setup",
            State::Sql { .. } => "sql",
            State::TableColumns { .. } => "table_columns",
            State::Result { .. } => "result",
        }
    }
}
