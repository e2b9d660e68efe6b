//! Transpiler test modules.
//!
//! Tests are organized by category:
//! - `setup`: SETUP blocks, type inference and database creation
//! - `statements`: CREATE/SELECT blocks, INCLUDE and reference rewriting
//! - `results`: RESULT blocks and verdicts
//! - `ordered`: ORDERED RESULT handling per engine
//! - `errors`: fatal script errors


use std::collections::HashMap;

use crate::dialect::Dialect;
use crate::error::{RdbResult, RdbUnitError};
use crate::include::IncludeResolver;
use crate::transpiler::{Options, Transpiler};

/// Included files kept in memory.
#[derive(Default)]
struct MemoryResolver {
    files: HashMap<String, String>,
}

impl MemoryResolver {
    fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }
}

impl IncludeResolver for MemoryResolver {
    fn load(&self, path: &str) -> RdbResult<String> {
        self.files.get(path).cloned().ok_or_else(|| RdbUnitError::Include {
            path: path.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        })
    }
}

fn transpiler(dialect: Dialect) -> Transpiler<MemoryResolver> {
    Transpiler::with_resolver(Options::with_dialect(dialect), MemoryResolver::default())
}

fn compile(dialect: Dialect, script: &str) -> String {
    transpiler(dialect).transpile_to_string("test.rdbu", script).unwrap()
}

fn compile_err(dialect: Dialect, script: &str) -> RdbUnitError {
    transpiler(dialect)
        .transpile_to_string("test.rdbu", script)
        .unwrap_err()
}
