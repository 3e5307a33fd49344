//! Run statistics

use std::path::PathBuf;

/// Totals for one preprocessing run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Genes with at least one candidate
    pub genes: usize,
    /// Candidates loaded across all genes
    pub candidates: usize,
    /// Canonical contigs kept (one per gene)
    pub canonical_picks: usize,
    /// Update statements written
    pub retractions: usize,
    /// Candidates whose type or assembly could not be classified
    pub classification_warnings: usize,
    /// Where the batch was written
    pub update_file: PathBuf,
}

impl RunSummary {
    pub fn display_string(&self) -> String {
        format!(
            "{} genes, {} candidates: kept {}, retracted {} ({} unclassified) -> {}",
            self.genes,
            self.candidates,
            self.canonical_picks,
            self.retractions,
            self.classification_warnings,
            self.update_file.display()
        )
    }
}
