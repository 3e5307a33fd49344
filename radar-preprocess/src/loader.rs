//! Candidate loading from the radar staging database
//!
//! Reads every distinct (gene, genomic accession, assembly) tuple for one
//! organism whose accession is an `NT_` or `NW_` contig, and groups the rows
//! by gene. Within a gene the row order returned by the store is kept as-is;
//! the selection tie-break depends on it.

use crate::candidate::{AssemblyLabels, ContigType, SequenceCandidate};
use radar_common::{Error, Result};
use sqlx::SqlitePool;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Candidates per gene, iterated in lexicographic gene order
pub type GroupedCandidates = BTreeMap<String, Vec<SequenceCandidate>>;

/// One row of the candidate query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRow {
    pub gene_id: String,
    pub sequence_id: String,
    pub assembly: String,
}

impl CandidateRow {
    pub fn new(
        gene_id: impl Into<String>,
        sequence_id: impl Into<String>,
        assembly: impl Into<String>,
    ) -> Self {
        Self {
            gene_id: gene_id.into(),
            sequence_id: sequence_id.into(),
            assembly: assembly.into(),
        }
    }
}

/// True if `name` can be interpolated into SQL as a bare table name
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Build the candidate query for `table`
///
/// The table name has been checked by [`is_plain_identifier`]; the organism
/// id is bound as a parameter. Rows without a gene id are left out, since
/// no retraction could address them.
pub fn candidate_query(table: &str) -> String {
    let prefixes: Vec<String> = [ContigType::Nt, ContigType::Nw]
        .iter()
        .filter_map(|t| t.prefix())
        .map(|p| format!("substr(genomic, 1, 3) = '{}'", p))
        .collect();

    format!(
        "SELECT DISTINCT geneID, genomic, assembly FROM {} \
         WHERE taxID = ? AND geneID IS NOT NULL AND ({}) ORDER BY geneID",
        table,
        prefixes.join(" OR ")
    )
}

/// Group rows by gene, trimming values and classifying each candidate
///
/// Row order within each gene is preserved.
pub fn group_rows<I>(rows: I, labels: &AssemblyLabels) -> GroupedCandidates
where
    I: IntoIterator<Item = CandidateRow>,
{
    let mut grouped = GroupedCandidates::new();

    for row in rows {
        let candidate =
            SequenceCandidate::classify(row.sequence_id.trim(), row.assembly.trim(), labels);
        grouped
            .entry(row.gene_id.trim().to_string())
            .or_default()
            .push(candidate);
    }

    grouped
}

/// Load and group all candidates for `organism_tax_id`
///
/// A query failure is returned as [`Error::DataSource`]; there are no retries.
pub async fn load_candidates(
    db: &SqlitePool,
    table: &str,
    organism_tax_id: i64,
    labels: &AssemblyLabels,
) -> Result<GroupedCandidates> {
    if !is_plain_identifier(table) {
        return Err(Error::Config(format!("Invalid table name: {:?}", table)));
    }

    let query = candidate_query(table);
    debug!(query = %query, organism_tax_id, "Loading candidates");

    let rows: Vec<(String, String, Option<String>)> = sqlx::query_as(&query)
        .bind(organism_tax_id)
        .fetch_all(db)
        .await?;

    let row_count = rows.len();
    let grouped = group_rows(
        rows.into_iter()
            .map(|(gene_id, sequence_id, assembly)| {
                CandidateRow::new(gene_id, sequence_id, assembly.unwrap_or_default())
            }),
        labels,
    );

    info!(
        rows = row_count,
        genes = grouped.len(),
        organism_tax_id,
        "Loaded contig candidates"
    );

    Ok(grouped)
}
