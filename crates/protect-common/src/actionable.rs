//! Knowledge-base rules ("actionable events"), one struct per category.
//! These are loaded once per run and never mutated.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::evidence::{EvidenceDirection, EvidenceLevel, Intervention, Knowledgebase};
use crate::genomic::CodingEffect;

// ---------------------------------------------------------------------------
// Shared rule fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CancerType {
    pub name: String,
    pub doid: String,
}

/// Fields common to every actionable event, flattened into each category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionableEvent {
    pub knowledgebase: Knowledgebase,
    pub source_event: String,
    #[serde(default)]
    pub source_urls: BTreeSet<String>,
    pub intervention: Intervention,
    pub applicable_cancer_type: CancerType,
    #[serde(default)]
    pub blacklist_cancer_types: BTreeSet<CancerType>,
    pub level: EvidenceLevel,
    pub direction: EvidenceDirection,
    #[serde(default)]
    pub evidence_urls: BTreeSet<String>,
}

// ---------------------------------------------------------------------------
// Hotspots
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionableHotspot {
    pub gene: String,
    pub chromosome: String,
    pub position: u64,
    #[serde(rename = "ref")]
    pub ref_allele: String,
    #[serde(rename = "alt")]
    pub alt_allele: String,
    #[serde(flatten)]
    pub event: ActionableEvent,
}

// ---------------------------------------------------------------------------
// Codon / exon ranges
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MutationTypeFilter {
    #[default]
    Any,
    Missense,
    NonsenseOrFrameshift,
    Inframe,
    Splice,
}

impl MutationTypeFilter {
    pub fn accepts(&self, effect: CodingEffect) -> bool {
        match self {
            MutationTypeFilter::Any                  => effect != CodingEffect::Synonymous,
            MutationTypeFilter::Missense             => effect == CodingEffect::Missense,
            MutationTypeFilter::NonsenseOrFrameshift => effect == CodingEffect::NonsenseOrFrameshift,
            MutationTypeFilter::Inframe              => effect == CodingEffect::Inframe,
            MutationTypeFilter::Splice               => effect == CodingEffect::Splice,
        }
    }
}

/// Inclusive codon or exon interval on a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionableRange {
    pub gene: String,
    pub transcript: String,
    pub start: u32,
    pub end: u32,
    /// Codon or exon number the rule was curated against.
    pub rank: u32,
    #[serde(default)]
    pub applicable_mutation_type: MutationTypeFilter,
    #[serde(flatten)]
    pub event: ActionableEvent,
}

impl ActionableRange {
    pub fn contains(&self, value: u32) -> bool {
        value >= self.start && value <= self.end
    }
}

// ---------------------------------------------------------------------------
// Gene-level events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeneEvent {
    Amplification,
    OverExpression,
    PresenceOfProtein,
    Deletion,
    UnderExpression,
    AbsenceOfProtein,
    Activation,
    Inactivation,
    AnyMutation,
    Fusion,
    WildType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionableGene {
    pub gene: String,
    pub gene_event: GeneEvent,
    #[serde(flatten)]
    pub event: ActionableEvent,
}

// ---------------------------------------------------------------------------
// Fusions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionableFusion {
    pub gene_up: String,
    pub gene_down: String,
    pub min_exon_up: Option<u32>,
    pub max_exon_up: Option<u32>,
    pub min_exon_down: Option<u32>,
    pub max_exon_down: Option<u32>,
    #[serde(flatten)]
    pub event: ActionableEvent,
}

// ---------------------------------------------------------------------------
// Tumor characteristics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TumorCharacteristicType {
    MicrosatelliteUnstable,
    MicrosatelliteStable,
    HighTumorMutationalLoad,
    LowTumorMutationalLoad,
    HighTumorMutationalBurden,
    LowTumorMutationalBurden,
    HomologousRecombinationDeficient,
    HpvPositive,
    EbvPositive,
    McvPositive,
    HbvPositive,
    Hhv8Positive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CutoffType {
    EqualOrGreater,
    Greater,
    EqualOrLower,
    Lower,
}

impl CutoffType {
    pub fn passes(&self, value: f64, cutoff: f64) -> bool {
        match self {
            CutoffType::EqualOrGreater => value >= cutoff,
            CutoffType::Greater        => value > cutoff,
            CutoffType::EqualOrLower   => value <= cutoff,
            CutoffType::Lower          => value < cutoff,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cutoff {
    #[serde(rename = "type")]
    pub cutoff_type: CutoffType,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionableCharacteristic {
    pub characteristic: TumorCharacteristicType,
    pub cutoff: Option<Cutoff>,
    #[serde(flatten)]
    pub event: ActionableEvent,
}

impl ActionableCharacteristic {
    /// A rule without cutoff accepts any measured value.
    pub fn passes_cutoff(&self, measured: f64) -> bool {
        self.cutoff
            .map(|c| c.cutoff_type.passes(measured, c.value))
            .unwrap_or(true)
    }
}

// ---------------------------------------------------------------------------
// HLA
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionableHla {
    pub hla_allele: String,
    #[serde(flatten)]
    pub event: ActionableEvent,
}
