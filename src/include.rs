//! SQL sourced from external files with `INCLUDE CREATE` / `INCLUDE SELECT`.
//!
//! Included files are often schema dumps or production queries. Index
//! creation and `ATTACH` statements make no sense inside the isolated test
//! namespace, so they are stripped before the SQL is emitted.

use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{RdbResult, RdbUnitError};

static FULL_CREATE_INDEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)CREATE\s+INDEX\s+[^;]+;").unwrap());
static PARTIAL_CREATE_INDEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)CREATE\s+INDEX\b[^;]*$").unwrap());
static CLEAR_TO_SEMICOLON_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^;]*;").unwrap());
static FULL_ATTACH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ATTACH\s+[^;]+;").unwrap());

/// Source of included SQL files.
pub trait IncludeResolver {
    fn load(&self, path: &str) -> RdbResult<String>;
}

/// Reads included files from the file system.
///
/// Relative paths resolve against `base`, or the working directory if unset.
#[derive(Debug, Clone, Default)]
pub struct FsResolver {
    base: Option<PathBuf>,
}

impl FsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }
}

impl IncludeResolver for FsResolver {
    fn load(&self, path: &str) -> RdbResult<String> {
        let full = match &self.base {
            Some(base) => base.join(path),
            None => PathBuf::from(path),
        };
        fs::read_to_string(&full).map_err(|source| RdbUnitError::Include {
            path: path.to_string(),
            source,
        })
    }
}

/// Lines of `content` with index creation and attachments removed.
pub fn strip_unsupported(content: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let line = line.trim_end();
        let line = FULL_CREATE_INDEX_RE.replace_all(line, "");
        let line = FULL_ATTACH_RE.replace_all(&line, "").into_owned();

        if !PARTIAL_CREATE_INDEX_RE.is_match(&line) {
            result.push(line);
            continue;
        }

        // CREATE INDEX continues until the next semicolon
        let head = PARTIAL_CREATE_INDEX_RE.replace(&line, "").into_owned();
        let tail = match lines.find(|l| l.contains(';')) {
            Some(last) => CLEAR_TO_SEMICOLON_RE.replace(last.trim_end(), "").into_owned(),
            None => {
                tracing::warn!("CREATE INDEX without terminating ';' at end of included file");
                String::new()
            }
        };
        result.push(head + &tail);
    }

    result
}
