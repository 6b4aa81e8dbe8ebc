mod file_config;

pub use file_config::FileConfig;

use crate::dialect::Dialect;
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

/// CLI arguments that can be overridden by the TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_path: Option<PathBuf>,
    pub dialect: Option<Dialect>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: Option<PathBuf>,
    pub dialect: Dialect,
    pub log_level: LevelFilter,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .or_else(|| cli.db_path.clone());

        let dialect = match file.dialect {
            Some(name) => {
                Dialect::parse(&name).ok_or_else(|| anyhow!("Unknown SQL dialect: {}", name))?
            }
            None => cli.dialect.unwrap_or_default(),
        };

        let log_level = match file.log_level.or_else(|| cli.log_level.clone()) {
            Some(level) => parse_log_level(&level)?,
            None => LevelFilter::INFO,
        };

        Ok(Self {
            db_path,
            dialect,
            log_level,
        })
    }

    /// The warehouse database, required by every command that touches one.
    pub fn require_db_path(&self) -> Result<&Path> {
        self.db_path
            .as_deref()
            .ok_or_else(|| anyhow!("db_path must be specified via --db or in config file"))
    }
}

fn parse_log_level(level: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(level).map_err(|_| anyhow!("Invalid log level: {}", level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_resolve_defaults() {
        let config = AppConfig::resolve(&CliConfig::default(), None).unwrap();
        assert_eq!(config.db_path, None);
        assert_eq!(config.dialect, Dialect::Postgres);
        assert_eq!(config.log_level, LevelFilter::INFO);
        assert!(config.require_db_path().is_err());
    }

    #[test]
    fn test_resolve_cli_only() {
        let cli = CliConfig {
            db_path: Some(PathBuf::from("/tmp/warehouse.db")),
            dialect: Some(Dialect::Sqlite),
            log_level: Some("debug".to_string()),
        };
        let config = AppConfig::resolve(&cli, None).unwrap();
        assert_eq!(
            config.require_db_path().unwrap(),
            Path::new("/tmp/warehouse.db")
        );
        assert_eq!(config.dialect, Dialect::Sqlite);
        assert_eq!(config.log_level, LevelFilter::DEBUG);
    }

    #[test]
    fn test_file_overrides_cli() {
        let file = write_config(
            r#"
            db_path = "/data/sparkify.db"
            dialect = "sqlite"
            log_level = "warn"
            "#,
        );
        let cli = CliConfig {
            db_path: Some(PathBuf::from("/tmp/warehouse.db")),
            dialect: Some(Dialect::Postgres),
            log_level: Some("debug".to_string()),
        };

        let file_config = FileConfig::load(file.path()).unwrap();
        let config = AppConfig::resolve(&cli, Some(file_config)).unwrap();
        assert_eq!(config.db_path, Some(PathBuf::from("/data/sparkify.db")));
        assert_eq!(config.dialect, Dialect::Sqlite);
        assert_eq!(config.log_level, LevelFilter::WARN);
    }

    #[test]
    fn test_partial_file_keeps_cli_values() {
        let file = write_config("log_level = \"error\"\n");
        let cli = CliConfig {
            db_path: Some(PathBuf::from("/tmp/warehouse.db")),
            dialect: Some(Dialect::Sqlite),
            log_level: None,
        };

        let config = AppConfig::resolve(&cli, Some(FileConfig::load(file.path()).unwrap())).unwrap();
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/warehouse.db")));
        assert_eq!(config.dialect, Dialect::Sqlite);
        assert_eq!(config.log_level, LevelFilter::ERROR);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let file = FileConfig {
            dialect: Some("oracle".to_string()),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&CliConfig::default(), Some(file)).is_err());

        let cli = CliConfig {
            log_level: Some("loud".to_string()),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&cli, None).is_err());
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let file = write_config("db_path = [not toml");
        assert!(FileConfig::load(file.path()).is_err());
    }
}
