//! Target database engines.
//!
//! The generated script only differs between engines in a handful of places,
//! all of them behind [`DatabaseEngine`].

pub mod mysql;
pub mod postgres;
pub mod sqlite;
pub mod traits;

use std::fmt;
use std::str::FromStr;

use crate::error::RdbUnitError;
use mysql::MysqlEngine;
use postgres::PostgresEngine;
use sqlite::SqliteEngine;
pub use traits::DatabaseEngine;

/// Supported database engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    MySql,
    PostgreSql,
    Sqlite,
}

impl Dialect {
    pub fn engine(&self) -> Box<dyn DatabaseEngine> {
        match self {
            Dialect::MySql => Box::new(MysqlEngine),
            Dialect::PostgreSql => Box::new(PostgresEngine),
            Dialect::Sqlite => Box::new(SqliteEngine),
        }
    }
}

impl FromStr for Dialect {
    type Err = RdbUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(Dialect::MySql),
            "postgresql" | "postgres" => Ok(Dialect::PostgreSql),
            "sqlite" => Ok(Dialect::Sqlite),
            _ => Err(RdbUnitError::UnsupportedEngine(s.to_string())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.engine().name())
    }
}
