//! radar-preprocess library - canonical contig selection
//!
//! During the EntrezGene load a gene can pick up several `NT_`/`NW_` genomic
//! contig accessions. This crate keeps one per gene and writes a SQL batch
//! that sets the stored accession of every other candidate to `-`.
//!
//! Modules, leaves first:
//! - [`candidate`]: contig type, assembly tier and candidate model
//! - [`loader`]: candidate query and grouping by gene
//! - [`policy`]: canonical selection
//! - [`emitter`]: retraction statements and the update file
//! - [`orchestrator`]: one full run

pub mod build_info;
pub mod candidate;
pub mod cli;
pub mod config;
pub mod emitter;
pub mod loader;
pub mod orchestrator;
pub mod policy;
pub mod statistics;

pub use candidate::{AssemblyLabels, AssemblyTier, ContigType, SequenceCandidate};
pub use config::PreprocessConfig;
pub use orchestrator::ContigPreprocessor;
pub use policy::{select, Selection};
pub use statistics::RunSummary;
