use std::fs;

use rdbunit::prelude::*;

const SALES: &str = r#"
# Customers with orders above the threshold
BEGIN SETUP
sales.customers:
id  name          vip
1   "Jane Doe"    true
2   'O''Brien'    false

sales.orders:
customer_id  total   placed
1            250.5   2024-01-15
2            12      2024-02-01
END

BEGIN SELECT
SELECT name FROM sales.customers
  JOIN sales.orders ON customers.id = orders.customer_id
  WHERE total > 100;
END

BEGIN RESULT
name
"Jane Doe"
END
"#;

#[test]
fn test_transpile_public_api() {
    let sql = rdbunit::transpile("sales.rdbu", SALES, &Options::with_dialect(Dialect::PostgreSql))
        .expect("script compiles");

    assert!(sql.starts_with("-- Input from sales.rdbu\n\\set ON_ERROR_STOP true\n"));
    assert!(sql.contains("CREATE SCHEMA test_sales;"));
    assert!(sql.contains("CREATE TABLE test_sales.customers(id INTEGER, name VARCHAR(255), vip BOOLEAN);"));
    assert!(sql.contains("INSERT INTO test_sales.customers VALUES (1, 'Jane Doe', TRUE);"));
    assert!(sql.contains("INSERT INTO test_sales.orders VALUES (1, 250.5, '2024-01-15');"));
    assert!(sql.contains("SELECT name FROM test_sales.customers\n  JOIN test_sales.orders ON"));
    assert!(sql.contains("'ok 1 - sales.rdbu: test_select_result'"));
    assert!(sql.ends_with("SELECT '1..1';\n"));
}

#[test]
fn test_includes_resolve_against_base() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("totals.sql"),
        "CREATE INDEX o_c ON orders(customer_id);\nCREATE TABLE totals AS SELECT 1 AS n;\n",
    )
    .unwrap();

    let script = "INCLUDE CREATE totals.sql\nBEGIN RESULT\ntotals:\nn\n1\nEND\n";
    let transpiler = Transpiler::with_resolver(Options::default(), FsResolver::with_base(dir.path()));
    let sql = transpiler.transpile_to_string("totals.rdbu", script).unwrap();

    assert!(!sql.contains("CREATE INDEX"));
    assert!(sql.contains("CREATE TABLE totals AS SELECT 1 AS n;"));
    assert!(sql.contains("'ok 1 - totals.rdbu: totals'"));
}

#[test]
fn test_errors_name_the_line() {
    let err = rdbunit::transpile("bad.rdbu", "BEGIN SETUP\nt:\na\n1\nBEGIN SELECT\n", &Options::default())
        .unwrap_err();
    // BEGIN SELECT inside SETUP is data for table t with the wrong width
    assert_eq!(
        err.to_string(),
        "Syntax error in line 5: expected 1 values, found 2 (state: setup)"
    );
}

#[test]
fn test_dialect_names() {
    assert_eq!("SQLite".parse::<Dialect>().unwrap(), Dialect::Sqlite);
    assert_eq!("postgres".parse::<Dialect>().unwrap(), Dialect::PostgreSql);
    assert!(matches!(
        "oracle".parse::<Dialect>(),
        Err(RdbUnitError::UnsupportedEngine(ref name)) if name == "oracle"
    ));
}
