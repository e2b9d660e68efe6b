//! Cross-database references.
//!
//! Scripts may mention tables as `db.table`. Every such database is
//! recreated as `test_db` and every reference in embedded SQL is redirected
//! there, so a test never touches the real data.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// `db.table` at the start of a line; group 1 is the database.
static DB_TABLESPEC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_]\w*)\.([A-Za-z_]\w*)").unwrap());

/// Prefix of every isolated database.
pub const TEST_PREFIX: &str = "test_";

/// Expression used when nothing is referenced; `\b` cannot sit between two letters.
const MATCH_NOTHING: &str = r"(A\bB)";

/// Databases referenced by the script, without prefix, in first-seen order.
pub fn referenced_databases<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut databases: Vec<String> = Vec::new();
    for line in lines {
        if let Some(caps) = DB_TABLESPEC_RE.captures(line.as_ref()) {
            let db = &caps[1];
            if !databases.iter().any(|seen| seen == db) {
                databases.push(db.to_string());
            }
        }
    }
    databases
}

/// Name of the table a `name:` declaration refers to.
///
/// Qualified names move into the isolated database; plain names stay as they
/// are and live in the default test database.
pub fn isolated_table_name(declaration: &str) -> String {
    if DB_TABLESPEC_RE.is_match(declaration) {
        format!("{}{}", TEST_PREFIX, declaration)
    } else {
        declaration.to_string()
    }
}

/// Redirects `db.` prefixes in SQL text to `test_db.`.
#[derive(Debug, Clone)]
pub struct ReferenceRewriter {
    re: Regex,
    empty: bool,
}

impl ReferenceRewriter {
    pub fn new(databases: &[String]) -> Self {
        let pattern = if databases.is_empty() {
            MATCH_NOTHING.to_string()
        } else {
            let names: Vec<String> = databases.iter().map(|db| regex::escape(db)).collect();
            format!(r"\b({})\.", names.join("|"))
        };
        let re = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .expect("escaped identifiers form a valid pattern");

        Self {
            re,
            empty: databases.is_empty(),
        }
    }

    /// The substitution expression.
    pub fn pattern(&self) -> &str {
        self.re.as_str()
    }

    /// Whether any database is being redirected.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn rewrite<'a>(&self, line: &'a str) -> Cow<'a, str> {
        self.re.replace_all(line, "test_${1}.")
    }
}
