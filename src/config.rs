//! `rdbunit.toml` defaults for the command line.
//!
//! ```toml
//! database = "postgresql"
//! existing-database = false
//! results = false
//! diff = true
//! default-database = "test_default"
//! ```
//!
//! Every key is optional; options given on the command line win.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{RdbResult, RdbUnitError};

pub const FILE_NAME: &str = "rdbunit.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Target engine name.
    pub database: Option<String>,
    pub existing_database: bool,
    pub results: bool,
    pub diff: bool,
    pub default_database: Option<String>,
}

impl Config {
    /// Load the first config file found, or defaults if there is none.
    ///
    /// Looks in the working directory, then in `<config dir>/rdbunit/`.
    pub fn load() -> RdbResult<Self> {
        match Self::locate() {
            Some(path) => Self::from_path(&path),
            None => Ok(Self::default()),
        }
    }

    fn locate() -> Option<PathBuf> {
        let local = PathBuf::from(FILE_NAME);
        if local.is_file() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|dir| dir.join("rdbunit").join(FILE_NAME))
            .filter(|path| path.is_file())
    }

    pub fn from_path(path: &Path) -> RdbResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| RdbUnitError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> RdbResult<Self> {
        toml::from_str(content).map_err(|e| RdbUnitError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full() {
        let config = Config::parse(
            r#"
database = "sqlite"
existing-database = true
results = true
diff = true
default-database = "scratch"
"#,
        )
        .unwrap();
        assert_eq!(
            config,
            Config {
                database: Some("sqlite".to_string()),
                existing_database: true,
                results: true,
                diff: true,
                default_database: Some("scratch".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        let err = Config::parse("databse = \"mysql\"").unwrap_err();
        assert!(matches!(err, RdbUnitError::Config(_)));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "diff = true\n").unwrap();

        let config = Config::from_path(&path).unwrap();
        assert!(config.diff);
        assert_eq!(config.database, None);

        let missing = Config::from_path(&dir.path().join("none.toml")).unwrap_err();
        assert!(missing.to_string().starts_with("Configuration error: "));
    }
}
