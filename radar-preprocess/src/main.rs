//! radar-preprocess - keep one NT/NW contig per gene
//!
//! Reads the EntrezGene accession table of the radar staging database and
//! writes the SQL batch that retracts every non-canonical contig. The batch
//! is executed later by the load pipeline.

use anyhow::Result;
use clap::Parser;
use radar_common::config::{ConfigSource, TomlConfig};
use radar_preprocess::cli::Cli;
use radar_preprocess::build_info;
use radar_preprocess::config::{resolve_log_level, PreprocessConfig, DEFAULT_LOG_LEVEL, LOG_ENV_VAR};
use radar_preprocess::ContigPreprocessor;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The TOML file carries the log level, so read it before tracing is up
    // and report where it came from afterwards
    let loaded = TomlConfig::load_or_default(cli.config.as_deref());
    let file_config = loaded.as_ref().map(|(c, _)| c.clone()).unwrap_or_default();

    let env_filter = std::env::var(LOG_ENV_VAR).ok();
    let log_level = resolve_log_level(&cli, env_filter.as_deref(), &file_config);
    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting {}", build_info::banner());
    info!("Log filter: {}", log_level);

    let (file_config, source) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };
    match &source {
        ConfigSource::Explicit(_) => info!("Configuration file: {}", source.describe()),
        ConfigSource::Default(path) if path.exists() => {
            info!("Configuration file: {}", source.describe())
        }
        _ => warn!("Configuration file: {}", source.describe()),
    }

    let config = match PreprocessConfig::resolve(&cli, &file_config) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };
    info!(
        organism_tax_id = config.organism_tax_id,
        table = %config.table,
        primary = %config.assemblies.primary,
        secondary = %config.assemblies.secondary,
        "Database: {}, output: {}",
        config.database_path.display(),
        config.update_file.display()
    );

    let pool = match radar_common::db::connect_readonly(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    let preprocessor = ContigPreprocessor::new(pool, config);
    if let Err(e) = preprocessor.run().await {
        error!("Contig selection failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
