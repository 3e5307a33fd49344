//! One preprocessing run: load, select, emit
//!
//! **Sequence:**
//! 1. Load every candidate for the organism (one query)
//! 2. Select a canonical contig per gene, in lexicographic gene order
//! 3. Write retractions for all other candidates to the update file
//!
//! The update file is only created once the load has succeeded, and only
//! moved into place once every statement has been written.

use crate::config::PreprocessConfig;
use crate::emitter::UpdateFile;
use crate::loader::{load_candidates, GroupedCandidates};
use crate::policy::select;
use crate::statistics::RunSummary;
use radar_common::Result;
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Canonical contig selection over the radar staging database
pub struct ContigPreprocessor {
    db: SqlitePool,
    config: PreprocessConfig,
}

impl ContigPreprocessor {
    pub fn new(db: SqlitePool, config: PreprocessConfig) -> Self {
        Self { db, config }
    }

    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    /// Run the whole batch once
    ///
    /// # Errors
    ///
    /// - [`radar_common::Error::DataSource`] if the candidate query fails;
    ///   no update file is created
    /// - [`radar_common::Error::OutputWrite`] if the update file cannot be
    ///   written; any partial output is removed
    pub async fn run(&self) -> Result<RunSummary> {
        let grouped = load_candidates(
            &self.db,
            &self.config.table,
            self.config.organism_tax_id,
            &self.config.assemblies,
        )
        .await?;

        let mut update_file = UpdateFile::create(&self.config.update_file, &self.config.table)?;
        let mut summary = process_genes(&grouped, &mut update_file)?;
        summary.retractions = update_file.commit()?;

        if summary.classification_warnings > 0 {
            warn!(
                count = summary.classification_warnings,
                "Some candidates had an unrecognized contig prefix or assembly label"
            );
        }
        info!("Contig selection complete: {}", summary.display_string());

        Ok(summary)
    }
}

/// Select and write retractions for every gene
///
/// Genes are visited in the map's key order, so the batch is reproducible
/// for a given load. Genes without candidates produce no output.
pub fn process_genes(grouped: &GroupedCandidates, update_file: &mut UpdateFile) -> Result<RunSummary> {
    let mut summary = RunSummary {
        update_file: update_file.path().to_path_buf(),
        ..RunSummary::default()
    };

    for (gene_id, candidates) in grouped {
        let Some(selection) = select(gene_id, candidates) else {
            continue;
        };

        summary.genes += 1;
        summary.candidates += candidates.len();
        summary.canonical_picks += 1;
        summary.classification_warnings += selection.classification_warnings;
        summary.retractions += update_file.write_selection(&selection)?;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::{AssemblyTier, SequenceCandidate};
    use std::fs;

    fn gene(specs: &[(&str, AssemblyTier)]) -> Vec<SequenceCandidate> {
        specs
            .iter()
            .map(|(id, tier)| SequenceCandidate::with_tier(*id, *tier))
            .collect()
    }

    #[test]
    fn test_process_genes_orders_output_and_skips_empty() {
        use AssemblyTier::{Primary, Secondary};

        let mut grouped = GroupedCandidates::new();
        grouped.insert("G3".into(), gene(&[("NW_100", Primary), ("NW_200", Primary)]));
        grouped.insert("G1".into(), gene(&[("NW_001", Secondary), ("NT_002", Primary)]));
        grouped.insert("G5".into(), Vec::new());
        grouped.insert("G4".into(), gene(&[("NT_300", Primary)]));
        grouped.insert("G2".into(), gene(&[("NT_010", Secondary), ("NT_020", Primary)]));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("update.sql");
        let mut update_file = UpdateFile::create(&path, "DP_EntrezGene_Accession").unwrap();

        let summary = process_genes(&grouped, &mut update_file).unwrap();
        assert_eq!(update_file.commit().unwrap(), 3);

        assert_eq!(summary.genes, 4);
        assert_eq!(summary.candidates, 7);
        assert_eq!(summary.canonical_picks, 4);
        assert_eq!(summary.retractions, 3);
        assert_eq!(summary.classification_warnings, 0);

        let text = fs::read_to_string(&path).unwrap();
        let retracted: Vec<&str> = text
            .lines()
            .filter(|l| l.starts_with("update"))
            .collect();
        assert_eq!(retracted.len(), 3);
        assert!(retracted[0].ends_with(r#"geneId = "G1" and genomic = "NW_001""#));
        assert!(retracted[1].ends_with(r#"geneId = "G2" and genomic = "NT_010""#));
        assert!(retracted[2].ends_with(r#"geneId = "G3" and genomic = "NW_200""#));
        assert!(!text.contains("G4"));
        assert!(!text.contains("G5"));
    }
}
