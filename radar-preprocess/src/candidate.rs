//! Sequence candidate model
//!
//! A candidate is one genomic contig accession attached to a gene during the
//! EntrezGene load. Its contig type comes from the accession prefix and its
//! assembly tier from an exact match of the assembly label against the
//! configured label pair.
//!
//! Both enums are declared lowest priority first so that the derived `Ord`
//! is the selection ordering: comparing `(ContigType, AssemblyTier)` tuples
//! ranks type before tier.

use std::fmt;

/// Contig class derived from the accession prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContigType {
    /// Prefix is neither `NT_` nor `NW_`
    Unrecognized,
    /// `NW_`: WGS-derived contig
    Nw,
    /// `NT_`: curated contig
    Nt,
}

impl ContigType {
    /// Classify an accession by its prefix
    pub fn from_accession(sequence_id: &str) -> Self {
        if sequence_id.starts_with("NT_") {
            ContigType::Nt
        } else if sequence_id.starts_with("NW_") {
            ContigType::Nw
        } else {
            ContigType::Unrecognized
        }
    }

    /// Accession prefix for recognized types
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            ContigType::Nt => Some("NT_"),
            ContigType::Nw => Some("NW_"),
            ContigType::Unrecognized => None,
        }
    }
}

impl fmt::Display for ContigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContigType::Nt => write!(f, "NT"),
            ContigType::Nw => write!(f, "NW"),
            ContigType::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// Assembly build tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssemblyTier {
    /// Label matches neither configured assembly
    Unrecognized,
    /// Alternate or older reference assembly
    Secondary,
    /// Reference assembly
    Primary,
}

impl fmt::Display for AssemblyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblyTier::Primary => write!(f, "primary"),
            AssemblyTier::Secondary => write!(f, "secondary"),
            AssemblyTier::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// The pair of assembly label strings that define the tiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyLabels {
    pub primary: String,
    pub secondary: String,
}

impl AssemblyLabels {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    /// Exact-match lookup of an assembly label
    pub fn classify(&self, label: &str) -> AssemblyTier {
        if label == self.primary {
            AssemblyTier::Primary
        } else if label == self.secondary {
            AssemblyTier::Secondary
        } else {
            AssemblyTier::Unrecognized
        }
    }
}

/// Selection priority; larger wins
pub type Priority = (ContigType, AssemblyTier);

/// One contig accession attached to a gene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceCandidate {
    /// Accession, e.g. `NT_039170`
    pub sequence_id: String,
    /// Raw assembly label from the load
    pub assembly_label: String,
    pub contig_type: ContigType,
    pub assembly_tier: AssemblyTier,
}

impl SequenceCandidate {
    /// Build a candidate from raw load values
    pub fn classify(
        sequence_id: impl Into<String>,
        assembly_label: impl Into<String>,
        labels: &AssemblyLabels,
    ) -> Self {
        let sequence_id = sequence_id.into();
        let assembly_label = assembly_label.into();
        Self {
            contig_type: ContigType::from_accession(&sequence_id),
            assembly_tier: labels.classify(&assembly_label),
            sequence_id,
            assembly_label,
        }
    }

    /// Build a candidate with an already known tier
    #[cfg(test)]
    pub(crate) fn with_tier(sequence_id: impl Into<String>, assembly_tier: AssemblyTier) -> Self {
        let sequence_id = sequence_id.into();
        Self {
            contig_type: ContigType::from_accession(&sequence_id),
            assembly_tier,
            assembly_label: assembly_tier.to_string(),
            sequence_id,
        }
    }

    pub fn priority(&self) -> Priority {
        (self.contig_type, self.assembly_tier)
    }

    /// True when both type and tier were recognized
    pub fn is_classified(&self) -> bool {
        self.contig_type != ContigType::Unrecognized
            && self.assembly_tier != AssemblyTier::Unrecognized
    }
}
