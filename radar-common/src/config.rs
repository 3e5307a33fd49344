//! Configuration file loading and resolution
//!
//! The radar tools read an optional TOML file. Every key is optional; tools
//! layer their own command-line arguments and environment variables on top of
//! it and fall back to compiled defaults for anything still missing.
//!
//! # Settings Sources Priority
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Built-in defaults (code constants)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the TOML configuration file
pub const CONFIG_ENV_VAR: &str = "RADAR_CONFIG";

/// Contents of a radar TOML configuration file
///
/// ```toml
/// database_path = "/data/radar.db"
/// update_file = "/data/reports/radarPreprocess.sql"
/// organism_tax_id = 10090
/// table = "DP_EntrezGene_Accession"
///
/// [assemblies]
/// primary = "Reference assembly (C57BL/6J)"
/// secondary = "Reference assembly"
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TomlConfig {
    /// Path to the radar SQLite database
    pub database_path: Option<PathBuf>,

    /// Path of the SQL update batch to produce
    pub update_file: Option<PathBuf>,

    /// NCBI taxonomy id of the organism being curated
    pub organism_tax_id: Option<i64>,

    /// Accession table to read candidates from
    pub table: Option<String>,

    /// Assembly label strings that denote the primary and secondary tiers
    pub assemblies: AssembliesConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Assembly label configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AssembliesConfig {
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,
}

impl TomlConfig {
    /// Parse a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        Self::parse(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load the resolved configuration file, or defaults if there is none
    ///
    /// A file named explicitly (CLI or environment) must exist and parse.
    /// The platform default location is optional: when it is absent the
    /// tool starts with built-in defaults. The returned source tells the
    /// caller which case applied so it can be logged once logging is up.
    pub fn load_or_default(cli_arg: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let source = resolve_config_file(cli_arg, CONFIG_ENV_VAR);
        let config = match &source {
            ConfigSource::Explicit(path) => Self::load(path)?,
            ConfigSource::Default(path) if path.exists() => Self::load(path)?,
            ConfigSource::Default(_) | ConfigSource::None => Self::default(),
        };
        Ok((config, source))
    }
}

/// Where the configuration file location came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named by command-line argument or environment variable
    Explicit(PathBuf),
    /// Platform default location (may not exist)
    Default(PathBuf),
    /// No location could be determined
    None,
}

impl ConfigSource {
    /// Human-readable description for startup logging
    pub fn describe(&self) -> String {
        match self {
            ConfigSource::Explicit(path) => format!("{}", path.display()),
            ConfigSource::Default(path) if path.exists() => format!("{}", path.display()),
            ConfigSource::Default(path) => {
                format!("none ({} not found, using defaults)", path.display())
            }
            ConfigSource::None => "none (no config directory, using defaults)".to_string(),
        }
    }
}

/// Resolve the configuration file location
///
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. `<config dir>/radar/preprocess.toml`, falling back to
///    `/etc/radar/preprocess.toml` on Linux
pub fn resolve_config_file(cli_arg: Option<&Path>, env_var_name: &str) -> ConfigSource {
    if let Some(path) = cli_arg {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return ConfigSource::Explicit(PathBuf::from(path));
        }
    }

    let user_config = dirs::config_dir().map(|d| d.join("radar").join("preprocess.toml"));

    if cfg!(target_os = "linux") {
        if let Some(path) = &user_config {
            if path.exists() {
                return ConfigSource::Default(path.clone());
            }
        }
        let system_config = PathBuf::from("/etc/radar/preprocess.toml");
        if system_config.exists() {
            return ConfigSource::Default(system_config);
        }
    }

    match user_config {
        Some(path) => ConfigSource::Default(path),
        None => ConfigSource::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_file() {
        let config = TomlConfig::parse(
            r#"
            database_path = "/data/radar.db"
            update_file = "/tmp/update.sql"
            organism_tax_id = 9606
            table = "Accessions"

            [assemblies]
            primary = "GRCh38"
            secondary = "GRCh37"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.database_path, Some(PathBuf::from("/data/radar.db")));
        assert_eq!(config.update_file, Some(PathBuf::from("/tmp/update.sql")));
        assert_eq!(config.organism_tax_id, Some(9606));
        assert_eq!(config.table.as_deref(), Some("Accessions"));
        assert_eq!(config.assemblies.primary.as_deref(), Some("GRCh38"));
        assert_eq!(config.assemblies.secondary.as_deref(), Some("GRCh37"));
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_parse_empty_file() {
        let config = TomlConfig::parse("").unwrap();
        assert_eq!(config, TomlConfig::default());
    }

    #[test]
    fn test_parse_rejects_wrong_type() {
        assert!(TomlConfig::parse("organism_tax_id = \"mouse\"").is_err());
    }

    #[test]
    fn test_cli_arg_wins() {
        let source = resolve_config_file(Some(Path::new("/opt/radar.toml")), "RADAR_TEST_UNSET_VAR");
        assert_eq!(source, ConfigSource::Explicit(PathBuf::from("/opt/radar.toml")));
    }
}
