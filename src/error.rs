//! Error types for rdbunit.

use thiserror::Error;

/// The main error type for rdbunit operations.
///
/// Every error is fatal: compilation of the current script stops at the first one.
#[derive(Debug, Error)]
pub enum RdbUnitError {
    /// A line that no directive of the current state accepts.
    #[error("Syntax error in line {line}: {text} (state: {state})")]
    UnknownDirective {
        line: usize,
        state: &'static str,
        text: String,
    },

    /// Data supplied before any table was declared.
    #[error(
        "Syntax error in line {line}: attempt to provide data without specifying a table name (state: {state})"
    )]
    MissingTableName { line: usize, state: &'static str },

    /// A RESULT block not preceded by a CREATE or SELECT statement.
    #[error("Syntax error in line {line}: CREATE or SELECT not specified (state: initial)")]
    UnspecifiedStatementKind { line: usize },

    /// The script ended inside a block.
    #[error("Syntax error in line {line}: unterminated block (state: {state})")]
    UnterminatedBlock { line: usize, state: &'static str },

    /// Unknown target database engine.
    #[error("Unsupported database: {0}")]
    UnsupportedEngine(String),

    /// A feature the target engine cannot express.
    #[error("Error in line {line}: {capability} is not supported by {engine}")]
    UnsupportedCapability {
        line: usize,
        engine: &'static str,
        capability: &'static str,
    },

    /// A data row whose token count differs from the declared columns.
    #[error(
        "Syntax error in line {line}: expected {expected} values, found {found} (state: {state})"
    )]
    ColumnCountMismatch {
        line: usize,
        state: &'static str,
        expected: usize,
        found: usize,
    },

    /// A data row that cannot be split into tokens.
    #[error("Syntax error in line {line}: {message}")]
    Tokenize { line: usize, message: String },

    /// An INCLUDEd file could not be read.
    #[error("Cannot include '{path}': {source}")]
    Include {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RdbUnitError {
    /// Create an unknown directive error.
    pub fn unknown(line: usize, state: &'static str, text: impl Into<String>) -> Self {
        Self::UnknownDirective {
            line,
            state,
            text: text.into(),
        }
    }

    /// Create a missing table name error.
    pub fn missing_table(line: usize, state: &'static str) -> Self {
        Self::MissingTableName { line, state }
    }
}

/// Result type alias for rdbunit operations.
pub type RdbResult<T> = Result<T, RdbUnitError>;
