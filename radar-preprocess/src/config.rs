//! Validated run configuration
//!
//! Built once at startup from command-line arguments (which clap already
//! merges with their environment variables), the TOML file and the built-in
//! defaults, in that priority order. Nothing reads the environment after
//! this point.

use crate::candidate::AssemblyLabels;
use crate::cli::Cli;
use crate::loader::is_plain_identifier;
use radar_common::config::TomlConfig;
use radar_common::{Error, Result};
use std::path::PathBuf;

/// Mouse
pub const DEFAULT_ORGANISM_TAX_ID: i64 = 10090;
pub const DEFAULT_PRIMARY_ASSEMBLY: &str = "Reference assembly (C57BL/6J)";
pub const DEFAULT_SECONDARY_ASSEMBLY: &str = "Reference assembly";
pub const DEFAULT_TABLE: &str = "DP_EntrezGene_Accession";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Everything one preprocessing run needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessConfig {
    pub database_path: PathBuf,
    pub update_file: PathBuf,
    pub organism_tax_id: i64,
    pub assemblies: AssemblyLabels,
    pub table: String,
}

impl PreprocessConfig {
    /// Merge sources and validate
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if:
    /// - the database or output path is missing
    /// - the organism id is not positive
    /// - an assembly label is empty, or both labels are equal
    /// - the table name is not a plain identifier
    pub fn resolve(cli: &Cli, file: &TomlConfig) -> Result<Self> {
        let database_path = cli
            .database
            .clone()
            .or_else(|| file.database_path.clone())
            .ok_or_else(|| {
                Error::Config(
                    "No database given (--database, RADAR_DATABASE or database_path)".to_string(),
                )
            })?;

        let update_file = cli
            .output
            .clone()
            .or_else(|| file.update_file.clone())
            .ok_or_else(|| {
                Error::Config(
                    "No output file given (--output, UPDATE_FILE or update_file)".to_string(),
                )
            })?;

        let organism_tax_id = cli
            .organism
            .or(file.organism_tax_id)
            .unwrap_or(DEFAULT_ORGANISM_TAX_ID);

        let primary = cli
            .primary_assembly
            .clone()
            .or_else(|| file.assemblies.primary.clone())
            .unwrap_or_else(|| DEFAULT_PRIMARY_ASSEMBLY.to_string());

        let secondary = cli
            .secondary_assembly
            .clone()
            .or_else(|| file.assemblies.secondary.clone())
            .unwrap_or_else(|| DEFAULT_SECONDARY_ASSEMBLY.to_string());

        let table = cli
            .table
            .clone()
            .or_else(|| file.table.clone())
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());

        let config = Self {
            database_path,
            update_file,
            organism_tax_id,
            assemblies: AssemblyLabels::new(primary, secondary),
            table,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.organism_tax_id <= 0 {
            return Err(Error::Config(format!(
                "Organism taxonomy id must be positive, got {}",
                self.organism_tax_id
            )));
        }
        if self.assemblies.primary.trim().is_empty() || self.assemblies.secondary.trim().is_empty() {
            return Err(Error::Config("Assembly labels must not be empty".to_string()));
        }
        if self.assemblies.primary == self.assemblies.secondary {
            return Err(Error::Config(format!(
                "Primary and secondary assembly labels are both {:?}",
                self.assemblies.primary
            )));
        }
        if !is_plain_identifier(&self.table) {
            return Err(Error::Config(format!("Invalid table name: {:?}", self.table)));
        }
        if self.update_file.as_os_str().is_empty() {
            return Err(Error::Config("Output file path is empty".to_string()));
        }
        Ok(())
    }
}

/// Environment variable holding the log filter
pub const LOG_ENV_VAR: &str = "RUST_LOG";

/// Log filter: `--log-level`, then `RUST_LOG`, then TOML, then default
///
/// `env_filter` is the value of [`LOG_ENV_VAR`]; empty values are ignored.
pub fn resolve_log_level(cli: &Cli, env_filter: Option<&str>, file: &TomlConfig) -> String {
    cli.log_level
        .clone()
        .or_else(|| {
            env_filter
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
        .or_else(|| file.logging.level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}
