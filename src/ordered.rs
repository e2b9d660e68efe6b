//! Ordered result comparison.
//!
//! The verdict compares row sets, which ignores order. To check order, each
//! row gets an explicit rank before it is compared: SELECT statements
//! project `ROW_NUMBER() OVER (<their ORDER BY>)` and the expected table
//! numbers its rows as they are inserted.
//!
//! This is a textual transform over the simple statements test scripts
//! contain (one projection, an optional trailing `ORDER BY col [ASC|DESC], ...`),
//! not an SQL parser. `--` comment lines are skipped. A statement opening
//! with a `WITH` clause gets the rank in the first SELECT of its CTE, so
//! such queries cannot be checked in ordered mode.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::table::RANK_COLUMN;

/// Directive that switches a script to ordered mode.
pub const ORDERED_RESULT: &str = "BEGIN ORDERED RESULT";

static ORDER_BY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bORDER\s+BY\s+([\w.]+(?:\s+(?:ASC|DESC)\b)?(?:\s*,\s*[\w.]+(?:\s+(?:ASC|DESC)\b)?)*)",
    )
    .unwrap()
});
static TERM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([\w.]+)(?:\s+(ASC|DESC)\b)?").unwrap());
static SELECT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bSELECT\b").unwrap());

/// Whether any RESULT block of the script asks for ordered comparison.
pub fn requests_ordered<S: AsRef<str>>(lines: &[S]) -> bool {
    lines
        .iter()
        .any(|line| line.as_ref().trim_end() == ORDERED_RESULT)
}

/// The ordering of a statement as an `ORDER BY` clause.
///
/// Uses the last `ORDER BY` of the statement; directions default to ASC.
/// Falls back to `ORDER BY 1` when no plain column list is found.
pub fn order_clause(statement: &str) -> String {
    let terms: Option<Vec<String>> = ORDER_BY_RE
        .captures_iter(statement)
        .last()
        .and_then(|caps| {
            let list = caps.get(1)?;
            // ORDER BY f(x) is an expression, not a column list
            if statement[list.end()..].trim_start().starts_with('(') {
                return None;
            }
            Some(
                TERM_RE
                    .captures_iter(list.as_str())
                    .map(|term| {
                        let direction = term
                            .get(2)
                            .map_or("ASC".to_string(), |d| d.as_str().to_ascii_uppercase());
                        format!("{} {}", &term[1], direction)
                    })
                    .collect(),
            )
        });

    match terms {
        Some(terms) if !terms.is_empty() => format!("ORDER BY {}", terms.join(", ")),
        _ => "ORDER BY 1".to_string(),
    }
}

/// Inject the rank projection into every statement of a block.
///
/// Statements end at lines containing `;`. The rank goes right after the
/// first `SELECT` keyword of each statement.
pub fn rank_statements(lines: &[String]) -> Vec<String> {
    let mut ranked = Vec::with_capacity(lines.len());
    let mut start = 0;
    for (i, line) in lines.iter().enumerate() {
        if line.contains(';') || i + 1 == lines.len() {
            ranked.extend(rank_statement(&lines[start..=i]));
            start = i + 1;
        }
    }
    ranked
}

fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with("--")
}

fn rank_statement(lines: &[String]) -> Vec<String> {
    let code: Vec<&str> = lines
        .iter()
        .map(String::as_str)
        .filter(|line| !is_comment(line))
        .collect();
    let order = order_clause(&code.join("\n"));
    let mut injected = false;
    lines
        .iter()
        .map(|line| {
            if injected || is_comment(line) || !SELECT_RE.is_match(line) {
                return line.clone();
            }
            injected = true;
            SELECT_RE
                .replacen(line, 1, |caps: &Captures| {
                    format!("{} ROW_NUMBER() OVER ({}) AS {},", &caps[0], order, RANK_COLUMN)
                })
                .into_owned()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_requests_ordered() {
        assert!(requests_ordered(&["BEGIN SELECT", "BEGIN ORDERED RESULT  "]));
        assert!(!requests_ordered(&["BEGIN RESULT", "# BEGIN ORDERED RESULT"]));
    }

    #[test]
    fn test_order_clause_terms() {
        assert_eq!(
            order_clause("SELECT a, b FROM t ORDER BY a DESC, t.b;"),
            "ORDER BY a DESC, t.b ASC"
        );
        assert_eq!(
            order_clause("SELECT a FROM t\norder by a asc\nLIMIT 3"),
            "ORDER BY a ASC"
        );
    }

    #[test]
    fn test_order_clause_fallback() {
        assert_eq!(order_clause("SELECT a FROM t"), "ORDER BY 1");
        assert_eq!(order_clause("SELECT a FROM t ORDER BY count(*) DESC"), "ORDER BY 1");
    }

    #[test]
    fn test_order_clause_uses_last() {
        assert_eq!(
            order_clause("SELECT x FROM (SELECT x FROM t ORDER BY y) s ORDER BY x DESC"),
            "ORDER BY x DESC"
        );
    }

    #[test]
    fn test_rank_single_line() {
        assert_eq!(
            rank_statements(&lines("SELECT name FROM t ORDER BY name DESC;")),
            vec!["SELECT ROW_NUMBER() OVER (ORDER BY name DESC) AS test_rank, name FROM t ORDER BY name DESC;"]
        );
    }

    #[test]
    fn test_rank_multi_line_statement() {
        let block = lines("select name, total\nFROM t\nWHERE total > (SELECT 1)\nORDER BY total;");
        assert_eq!(
            rank_statements(&block),
            vec![
                "select ROW_NUMBER() OVER (ORDER BY total ASC) AS test_rank, name, total",
                "FROM t",
                "WHERE total > (SELECT 1)",
                "ORDER BY total;",
            ]
        );
    }

    #[test]
    fn test_rank_each_statement() {
        let block = lines("SELECT a FROM t ORDER BY a;\nSELECT b FROM u;");
        assert_eq!(
            rank_statements(&block),
            vec![
                "SELECT ROW_NUMBER() OVER (ORDER BY a ASC) AS test_rank, a FROM t ORDER BY a;",
                "SELECT ROW_NUMBER() OVER (ORDER BY 1) AS test_rank, b FROM u;",
            ]
        );
    }

    #[test]
    fn test_rank_skips_comment_lines() {
        let block = lines("-- SELECT all names, ORDER BY id\nSELECT name FROM t\nORDER BY name;");
        assert_eq!(
            rank_statements(&block),
            vec![
                "-- SELECT all names, ORDER BY id",
                "SELECT ROW_NUMBER() OVER (ORDER BY name ASC) AS test_rank, name FROM t",
                "ORDER BY name;",
            ]
        );
    }

    #[test]
    fn test_rank_leaves_other_statements() {
        let block = lines("DELETE FROM t;");
        assert_eq!(rank_statements(&block), block);
        assert!(rank_statements(&[]).is_empty());
    }
}
