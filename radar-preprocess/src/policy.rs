//! Canonical contig selection
//!
//! For each gene exactly one candidate is kept and the rest are retracted.
//!
//! **Priority (highest first):**
//! 1. `NT` contigs outrank `NW` contigs regardless of assembly tier
//! 2. Within one contig type, the primary assembly outranks the secondary
//! 3. Among fully tied candidates the first one in input order wins
//!
//! Candidates whose type or tier could not be classified still take part,
//! ranked below every recognized value of that category, and are reported
//! with a warning.

use crate::candidate::SequenceCandidate;
use tracing::{debug, warn};

/// Outcome of selection for one gene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    pub gene_id: &'a str,
    /// The candidate to keep
    pub canonical: &'a SequenceCandidate,
    /// Every other candidate, in input order
    pub retracted: Vec<&'a SequenceCandidate>,
    /// Number of candidates that could not be fully classified
    pub classification_warnings: usize,
}

/// Index of the canonical candidate, or `None` for an empty slice
///
/// **Algorithm:** single left-to-right pass; a candidate replaces the current
/// best only if its priority is strictly greater, so ties keep the first seen.
pub fn canonical_index(candidates: &[SequenceCandidate]) -> Option<usize> {
    let mut best: Option<usize> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        match best {
            None => best = Some(index),
            Some(current) if candidate.priority() > candidates[current].priority() => {
                best = Some(index)
            }
            Some(_) => {}
        }
    }

    best
}

/// Pick the canonical candidate for a gene and partition the rest
///
/// The partition is by position, not value: a candidate with the same
/// accession and label as the canonical one is still retracted.
///
/// Returns `None` when the gene has no candidates.
pub fn select<'a>(gene_id: &'a str, candidates: &'a [SequenceCandidate]) -> Option<Selection<'a>> {
    let winner = canonical_index(candidates)?;

    let mut classification_warnings = 0;
    for candidate in candidates.iter().filter(|c| !c.is_classified()) {
        classification_warnings += 1;
        warn!(
            gene_id = %gene_id,
            sequence_id = %candidate.sequence_id,
            assembly = %candidate.assembly_label,
            contig_type = %candidate.contig_type,
            assembly_tier = %candidate.assembly_tier,
            "Unclassified candidate, ranking it lowest"
        );
    }

    let canonical = &candidates[winner];
    let retracted: Vec<&SequenceCandidate> = candidates
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != winner)
        .map(|(_, candidate)| candidate)
        .collect();

    debug!(
        gene_id = %gene_id,
        canonical = %canonical.sequence_id,
        contig_type = %canonical.contig_type,
        assembly_tier = %canonical.assembly_tier,
        retracted = retracted.len(),
        "Selected canonical contig"
    );

    Some(Selection {
        gene_id,
        canonical,
        retracted,
        classification_warnings,
    })
}
