//! rdbunit — compile relational database unit tests to SQL
//!
//! # Usage
//!
//! ```bash
//! # Compile a test and run it on SQLite
//! rdbunit --database=sqlite sales.rdbu | sqlite3
//!
//! # Several scripts, PostgreSQL, with differing rows on failure
//! rdbunit -d postgresql --diff a.rdbu b.rdbu | psql -q -t
//!
//! # Read the script from standard input
//! cat sales.rdbu | rdbunit -
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use rdbunit::prelude::*;
use rdbunit::transpiler::DEFAULT_DATABASE;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rdbunit")]
#[command(version)]
#[command(about = "Unit testing for relational database queries", long_about = None)]
#[command(after_help = "EXAMPLES:
    rdbunit --database=sqlite sales.rdbu | sqlite3
    rdbunit -d postgresql --diff a.rdbu b.rdbu | psql -q -t
    rdbunit -e -d mysql sales.rdbu | mysql -N")]
struct Cli {
    /// Test scripts to compile ("-" reads standard input)
    #[arg(default_value = "-")]
    scripts: Vec<String>,

    /// Database engine to generate SQL for (mysql, postgresql, sqlite)
    #[arg(short, long)]
    database: Option<String>,

    /// Run the tests in the current database instead of a fresh default one
    #[arg(short, long)]
    existing_database: bool,

    /// Show the rows of each table under test
    #[arg(short, long)]
    results: bool,

    /// Show rows that differ from the expected ones
    #[arg(long)]
    diff: bool,

    /// Name of the default test database
    #[arg(long, env = "ROLAPDB")]
    default_database: Option<String>,

    /// Configuration file (default: ./rdbunit.toml, then the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log compilation progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "rdbunit=debug" } else { "rdbunit=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::load()?,
    };
    let options = options(cli, &config)?;
    tracing::debug!(dialect = %options.dialect, diagnostics = ?options.diagnostics, "options resolved");

    let transpiler = Transpiler::new(options);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", rdbunit::OUTPUT_HEADER)?;

    for script in &cli.scripts {
        let (name, content) = read_script(script)?;
        let sql = transpiler
            .transpile_to_string(&name, &content)
            .with_context(|| name.clone())?;
        out.write_all(sql.as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

/// Command line options over config file values over defaults.
fn options(cli: &Cli, config: &Config) -> Result<Options> {
    let dialect = match cli.database.as_deref().or(config.database.as_deref()) {
        Some(name) => name.parse::<Dialect>()?,
        None => Dialect::default(),
    };
    let default_database = cli
        .default_database
        .clone()
        .or_else(|| config.default_database.clone())
        .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

    Ok(Options {
        dialect,
        existing_database: cli.existing_database || config.existing_database,
        default_database,
        diagnostics: Diagnostics {
            show_results: cli.results || config.results,
            show_diff: cli.diff || config.diff,
        },
    })
}

fn read_script(path: &str) -> Result<(String, String)> {
    if path == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("reading standard input")?;
        return Ok(("<stdin>".to_string(), content));
    }
    let content = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    Ok((path.to_string(), content))
}
