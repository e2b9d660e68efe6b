//! Test script transpiler.
//!
//! Compiles one test script into a self-contained SQL script. The script is
//! buffered completely: two pre-scans (ordered mode and referenced databases)
//! run before the line-by-line pass that generates the SQL.

mod context;
mod state;

#[cfg(test)]
mod tests;

use std::io::{self, Write};

use crate::dialect::Dialect;
use crate::error::{RdbResult, RdbUnitError};
use crate::include::{FsResolver, IncludeResolver};
use crate::verdict::Diagnostics;
use context::Context;

/// Database used for unqualified tables unless overridden.
pub const DEFAULT_DATABASE: &str = "test_default";

/// How scripts are compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Target engine.
    pub dialect: Dialect,
    /// Work in the current database instead of creating the default one.
    pub existing_database: bool,
    /// Name of the default test database.
    pub default_database: String,
    /// Extra output accompanying each verdict.
    pub diagnostics: Diagnostics,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            existing_database: false,
            default_database: DEFAULT_DATABASE.to_string(),
            diagnostics: Diagnostics::default(),
        }
    }
}

impl Options {
    pub fn with_dialect(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }
}

/// Compiles test scripts with fixed options.
///
/// Each call compiles one script in isolation; a transpiler can be reused
/// for any number of scripts.
pub struct Transpiler<R = FsResolver> {
    options: Options,
    resolver: R,
}

impl Transpiler<FsResolver> {
    pub fn new(options: Options) -> Self {
        Self::with_resolver(options, FsResolver::new())
    }
}

impl<R: IncludeResolver> Transpiler<R> {
    /// Use `resolver` to load `INCLUDE`d files.
    pub fn with_resolver(options: Options, resolver: R) -> Self {
        Self { options, resolver }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Write the SQL for `script` to `out`, returning the number of test cases.
    ///
    /// `test_name` identifies the script in the verdict lines.
    pub fn transpile<W: Write>(&self, test_name: &str, script: &str, out: &mut W) -> RdbResult<usize> {
        let engine = self.options.dialect.engine();
        let lines: Vec<&str> = script.lines().collect();

        Context::new(
            engine.as_ref(),
            &self.options,
            &self.resolver,
            out,
            test_name,
            &lines,
        )
        .run(&lines)
    }

    /// Compile `script` into a string.
    ///
    /// Nothing is returned for a script that fails part way.
    pub fn transpile_to_string(&self, test_name: &str, script: &str) -> RdbResult<String> {
        let mut buffer = Vec::new();
        self.transpile(test_name, script, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| RdbUnitError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}
