//! # rdbunit — unit testing for relational database queries
//!
//! rdbunit compiles declarative test scripts into plain SQL scripts. The
//! generated SQL builds isolated test databases, fills them with fixture
//! rows, runs the statements under test and prints one TAP line per test
//! case (`ok 1 - ...` / `not ok 1 - ...`) when fed to the database client.
//!
//! ## Quick Example
//!
//! ```
//! use rdbunit::prelude::*;
//!
//! let script = "
//! BEGIN SETUP
//! people:
//! name  age
//! Ada   36
//! END
//!
//! BEGIN SELECT
//! SELECT name FROM people WHERE age > 30;
//! END
//!
//! BEGIN RESULT
//! name
//! Ada
//! END
//! ";
//!
//! let sql = rdbunit::transpile("people.rdbu", script, &Options::with_dialect(Dialect::Sqlite)).unwrap();
//! assert!(sql.contains("CREATE TABLE people(name VARCHAR(255), age INTEGER);"));
//! assert!(sql.ends_with("SELECT '1..1';\n"));
//! ```
//!
//! ## Script Syntax
//!
//! | Directive              | Content                                       |
//! |------------------------|-----------------------------------------------|
//! | `BEGIN SETUP`          | `table:` declarations, column names, rows     |
//! | `BEGIN CREATE`         | SQL creating the table under test             |
//! | `BEGIN SELECT`         | one query whose result is under test          |
//! | `INCLUDE CREATE path`  | like `BEGIN CREATE`, SQL read from `path`     |
//! | `INCLUDE SELECT path`  | like `BEGIN SELECT`, SQL read from `path`     |
//! | `BEGIN RESULT`         | expected rows of the preceding statement      |
//! | `BEGIN ORDERED RESULT` | expected rows, in order                       |
//!
//! Blocks end with `END`; lines starting with `#` are comments.

pub mod classifier;
pub mod config;
pub mod dialect;
pub mod error;
pub mod include;
pub mod ordered;
pub mod parser;
pub mod references;
pub mod table;
pub mod transpiler;
pub mod verdict;

pub mod prelude {
    pub use crate::classifier::{ColumnType, classify};
    pub use crate::config::Config;
    pub use crate::dialect::{DatabaseEngine, Dialect};
    pub use crate::error::*;
    pub use crate::include::{FsResolver, IncludeResolver};
    pub use crate::transpiler::{Options, Transpiler};
    pub use crate::verdict::Diagnostics;
}

/// Header printed once at the top of the command line output.
pub const OUTPUT_HEADER: &str = "-- Auto generated test script file from rdbunit";

/// Compile one test script, resolving includes against the working directory.
///
/// # Example
///
/// ```
/// use rdbunit::transpiler::Options;
///
/// let sql = rdbunit::transpile("empty", "", &Options::default()).unwrap();
/// assert!(sql.ends_with("SELECT '1..0';\n"));
/// ```
pub fn transpile(
    test_name: &str,
    script: &str,
    options: &transpiler::Options,
) -> error::RdbResult<String> {
    transpiler::Transpiler::new(options.clone()).transpile_to_string(test_name, script)
}
