//! Runs generated scripts on an in-memory SQLite database.

use rdbunit::prelude::*;
use sqlx::sqlite::SqliteConnection;
use sqlx::{Connection, Row};

/// Split a generated script into statements, dropping comment lines between them.
fn statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut pending = String::new();
    for line in sql.lines() {
        if pending.is_empty() && (line.trim().is_empty() || line.starts_with("--")) {
            continue;
        }
        pending.push_str(line);
        pending.push('\n');
        if line.trim_end().ends_with(';') {
            statements.push(std::mem::take(&mut pending));
        }
    }
    assert!(pending.is_empty(), "unterminated statement: {}", pending);
    statements
}

/// Run `script` and collect the text lines it prints.
async fn run(script: &str) -> Vec<String> {
    let sql = rdbunit::transpile("e2e.rdbu", script, &Options::with_dialect(Dialect::Sqlite))
        .expect("script compiles");
    let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();

    let mut output = Vec::new();
    for statement in statements(&sql) {
        let rows = sqlx::query(&statement)
            .fetch_all(&mut conn)
            .await
            .unwrap_or_else(|e| panic!("{}\n{}", e, statement));
        for row in rows {
            if let Ok(text) = row.try_get::<String, _>(0) {
                output.push(text);
            }
        }
    }
    output
}

const PEOPLE: &str = "
BEGIN SETUP
people:
name   age  active
Ada    36   true
Alan   41   false
Grace  85   true
END
";

#[tokio::test]
async fn test_select_passes() {
    let script = format!(
        "{}
BEGIN SELECT
SELECT name FROM people WHERE active;
END
BEGIN RESULT
name
Grace
Ada
END
",
        PEOPLE
    );
    assert_eq!(run(&script).await, vec!["ok 1 - e2e.rdbu: test_select_result", "1..1"]);
}

#[tokio::test]
async fn test_select_fails_on_missing_row() {
    let script = format!(
        "{}
BEGIN SELECT
SELECT name FROM people;
END
BEGIN RESULT
name
Ada
Grace
END
",
        PEOPLE
    );
    assert_eq!(
        run(&script).await,
        vec!["not ok 1 - e2e.rdbu: test_select_result", "1..1"]
    );
}

#[tokio::test]
async fn test_create_in_other_database() {
    let script = "
BEGIN SETUP
hr.staff:
name  salary
Ada   10
Alan  20
END

BEGIN CREATE
CREATE TABLE hr.payroll AS SELECT SUM(salary) AS total FROM hr.staff;
END

BEGIN RESULT
hr.payroll:
total
30
END
";
    assert_eq!(run(script).await, vec!["ok 1 - e2e.rdbu: test_hr.payroll", "1..1"]);
}

#[tokio::test]
async fn test_ordered_result() {
    let select = "
BEGIN SELECT
SELECT name FROM people ORDER BY age DESC;
END
";
    let in_order = format!("{}{}BEGIN ORDERED RESULT\nname\nGrace\nAlan\nAda\nEND\n", PEOPLE, select);
    assert_eq!(
        run(&in_order).await,
        vec!["ok 1 - e2e.rdbu: test_select_result", "1..1"]
    );

    let out_of_order = format!("{}{}BEGIN ORDERED RESULT\nname\nAda\nAlan\nGrace\nEND\n", PEOPLE, select);
    assert_eq!(
        run(&out_of_order).await,
        vec!["not ok 1 - e2e.rdbu: test_select_result", "1..1"]
    );
}

#[tokio::test]
async fn test_two_select_cases() {
    let script = format!(
        "{}
BEGIN SELECT
SELECT name FROM people WHERE age < 40;
END
BEGIN RESULT
name
Ada
END

BEGIN SELECT
SELECT name FROM people WHERE NOT active;
END
BEGIN RESULT
name
Alan
END
",
        PEOPLE
    );
    assert_eq!(
        run(&script).await,
        vec![
            "ok 1 - e2e.rdbu: test_select_result",
            "ok 2 - e2e.rdbu: test_select_result",
            "1..2",
        ]
    );
}
