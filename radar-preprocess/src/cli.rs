//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

/// Pick one canonical NT/NW contig per gene and write a SQL batch
/// retracting the others
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "radar-preprocess", version)]
pub struct Cli {
    /// TOML configuration file (default: $RADAR_CONFIG, then the platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Radar staging database (SQLite)
    #[arg(long, env = "RADAR_DATABASE")]
    pub database: Option<PathBuf>,

    /// Where to write the SQL update batch
    #[arg(long, env = "UPDATE_FILE")]
    pub output: Option<PathBuf>,

    /// NCBI taxonomy id of the organism to curate
    #[arg(long, env = "RADAR_ORGANISM")]
    pub organism: Option<i64>,

    /// Assembly label of the primary tier
    #[arg(long)]
    pub primary_assembly: Option<String>,

    /// Assembly label of the secondary tier
    #[arg(long)]
    pub secondary_assembly: Option<String>,

    /// Accession table holding the candidates
    #[arg(long)]
    pub table: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}
