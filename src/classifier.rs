//! Value classification.
//!
//! Column types are never declared in a test script. They are inferred from
//! the textual shape of the values in the first data row of each table.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::dialect::DatabaseEngine;

static INTEGER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());
static REAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:\d+\.\d*|\d*\.\d+)(?:[Ee]-?\d+)?|\d+[Ee]-?\d+)$").unwrap()
});
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d\d-\d\d$").unwrap());
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+:\d\d:\d\d$").unwrap());
static TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d\d-\d\d \d\d:\d\d:\d\d$").unwrap());
static BOOLEAN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^(?:true|false)$").unwrap());

/// SQL column type inferred from a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Real,
    Date,
    Time,
    Timestamp,
    Boolean,
    Varchar,
}

/// Infer the column type of a dequoted token. The first matching shape wins.
pub fn classify(token: &str) -> ColumnType {
    if INTEGER_RE.is_match(token) {
        ColumnType::Integer
    } else if REAL_RE.is_match(token) {
        ColumnType::Real
    } else if DATE_RE.is_match(token) {
        ColumnType::Date
    } else if TIME_RE.is_match(token) {
        ColumnType::Time
    } else if TIMESTAMP_RE.is_match(token) {
        ColumnType::Timestamp
    } else if BOOLEAN_RE.is_match(token) {
        ColumnType::Boolean
    } else {
        ColumnType::Varchar
    }
}

/// Quote text as an SQL string literal, doubling embedded quotes.
pub fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

fn is_null(value: &str) -> bool {
    value.eq_ignore_ascii_case("null")
}

impl ColumnType {
    /// The type name used in `CREATE TABLE`.
    pub fn sql_name(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Date => "DATE",
            ColumnType::Time => "TIME",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Varchar => "VARCHAR(255)",
        }
    }

    /// Render a value of this column as SQL text.
    ///
    /// `NULL` in any letter case is always the bare keyword.
    pub fn render(&self, value: &str, engine: &dyn DatabaseEngine) -> String {
        if is_null(value) {
            return "NULL".to_string();
        }
        match self {
            ColumnType::Integer | ColumnType::Real => value.to_string(),
            ColumnType::Boolean => engine
                .boolean_literal(!value.eq_ignore_ascii_case("false"))
                .to_string(),
            ColumnType::Date | ColumnType::Time | ColumnType::Timestamp | ColumnType::Varchar => {
                quote(value)
            }
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_name())
    }
}
