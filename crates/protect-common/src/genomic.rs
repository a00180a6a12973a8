//! Genomic findings of one tumor sample, grouped per upstream tool output.
//! Produced by external parsers; the engine only reads them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identity fields every finding contributes to an evidence record.
pub trait GenomicFinding {
    fn gene(&self) -> Option<&str>;

    fn transcript(&self) -> Option<&str> {
        None
    }

    fn is_canonical(&self) -> Option<bool> {
        None
    }

    /// Human-readable event description, e.g. "p.Val600Glu" or "full loss".
    fn event(&self) -> String;

    fn event_is_high_driver(&self) -> Option<bool> {
        None
    }

    fn germline(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverLikelihood {
    High,
    Medium,
    Low,
}

// ---------------------------------------------------------------------------
// Small variants
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CodingEffect {
    Missense,
    NonsenseOrFrameshift,
    Inframe,
    Splice,
    Synonymous,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariantOrigin {
    #[default]
    Somatic,
    Germline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub gene: String,
    pub transcript: String,
    pub is_canonical: bool,
    /// Protein (or coding) impact, e.g. "p.Val600Glu".
    pub event: String,
    pub chromosome: String,
    pub position: u64,
    #[serde(rename = "ref")]
    pub ref_allele: String,
    #[serde(rename = "alt")]
    pub alt_allele: String,
    pub coding_effect: CodingEffect,
    pub affected_codon: Option<u32>,
    pub affected_exon: Option<u32>,
    pub driver_likelihood: DriverLikelihood,
    #[serde(default)]
    pub origin: VariantOrigin,
}

impl Variant {
    pub fn is_high_driver(&self) -> bool {
        self.driver_likelihood == DriverLikelihood::High
    }
}

impl GenomicFinding for Variant {
    fn gene(&self) -> Option<&str> {
        Some(&self.gene)
    }

    fn transcript(&self) -> Option<&str> {
        Some(&self.transcript)
    }

    fn is_canonical(&self) -> Option<bool> {
        Some(self.is_canonical)
    }

    fn event(&self) -> String {
        self.event.clone()
    }

    fn event_is_high_driver(&self) -> Option<bool> {
        Some(self.is_high_driver())
    }

    fn germline(&self) -> bool {
        self.origin == VariantOrigin::Germline
    }
}

// ---------------------------------------------------------------------------
// Copy number
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CopyNumberInterpretation {
    FullGain,
    PartialGain,
    FullLoss,
    PartialLoss,
}

impl CopyNumberInterpretation {
    pub fn display(&self) -> &'static str {
        match self {
            CopyNumberInterpretation::FullGain    => "full gain",
            CopyNumberInterpretation::PartialGain => "partial gain",
            CopyNumberInterpretation::FullLoss    => "full loss",
            CopyNumberInterpretation::PartialLoss => "partial loss",
        }
    }

    pub fn is_gain(&self) -> bool {
        matches!(self, CopyNumberInterpretation::FullGain | CopyNumberInterpretation::PartialGain)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainLoss {
    pub gene: String,
    pub transcript: String,
    pub is_canonical: bool,
    pub interpretation: CopyNumberInterpretation,
    pub min_copies: f64,
    pub max_copies: f64,
}

impl GenomicFinding for GainLoss {
    fn gene(&self) -> Option<&str> {
        Some(&self.gene)
    }

    fn transcript(&self) -> Option<&str> {
        Some(&self.transcript)
    }

    fn is_canonical(&self) -> Option<bool> {
        Some(self.is_canonical)
    }

    fn event(&self) -> String {
        self.interpretation.display().to_string()
    }
}

// ---------------------------------------------------------------------------
// Structural variants
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinxFusion {
    pub gene_start: String,
    pub gene_transcript_start: String,
    pub gene_end: String,
    pub gene_transcript_end: String,
    pub fused_exon_up: u32,
    pub fused_exon_down: u32,
    pub driver_likelihood: DriverLikelihood,
}

impl LinxFusion {
    pub fn is_high_driver(&self) -> bool {
        self.driver_likelihood == DriverLikelihood::High
    }
}

impl GenomicFinding for LinxFusion {
    // A fusion spans two genes and is identified by its event only.
    fn gene(&self) -> Option<&str> {
        None
    }

    fn event(&self) -> String {
        format!("{} - {} fusion", self.gene_start, self.gene_end)
    }

    fn event_is_high_driver(&self) -> Option<bool> {
        Some(self.is_high_driver())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomozygousDisruption {
    pub gene: String,
    pub transcript: String,
    pub is_canonical: bool,
    pub chromosome: String,
    pub chromosome_band: String,
}

impl GenomicFinding for HomozygousDisruption {
    fn gene(&self) -> Option<&str> {
        Some(&self.gene)
    }

    fn transcript(&self) -> Option<&str> {
        Some(&self.transcript)
    }

    fn is_canonical(&self) -> Option<bool> {
        Some(self.is_canonical)
    }

    fn event(&self) -> String {
        "homozygous disruption".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneDisruption {
    pub gene: String,
    pub transcript: String,
    pub is_canonical: bool,
    pub undisrupted_copy_number: f64,
}

impl GenomicFinding for GeneDisruption {
    fn gene(&self) -> Option<&str> {
        Some(&self.gene)
    }

    fn transcript(&self) -> Option<&str> {
        Some(&self.transcript)
    }

    fn is_canonical(&self) -> Option<bool> {
        Some(self.is_canonical)
    }

    fn event(&self) -> String {
        "disruption".to_string()
    }
}

// ---------------------------------------------------------------------------
// Viruses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VirusInterpretation {
    Hpv,
    Ebv,
    Mcv,
    Hbv,
    Hhv8,
}

impl VirusInterpretation {
    pub fn as_str(&self) -> &'static str {
        match self {
            VirusInterpretation::Hpv  => "HPV",
            VirusInterpretation::Ebv  => "EBV",
            VirusInterpretation::Mcv  => "MCV",
            VirusInterpretation::Hbv  => "HBV",
            VirusInterpretation::Hhv8 => "HHV8",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedVirus {
    pub name: String,
    pub interpretation: Option<VirusInterpretation>,
    pub integrations: u32,
    pub driver_likelihood: DriverLikelihood,
    pub reported: bool,
}

impl GenomicFinding for AnnotatedVirus {
    fn gene(&self) -> Option<&str> {
        None
    }

    fn event(&self) -> String {
        match self.interpretation {
            Some(interpretation) => format!("{} positive", interpretation.as_str()),
            None => format!("{} positive", self.name),
        }
    }

    fn event_is_high_driver(&self) -> Option<bool> {
        Some(self.driver_likelihood == DriverLikelihood::High)
    }
}

// ---------------------------------------------------------------------------
// Signatures and HR deficiency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MicrosatelliteStatus {
    Msi,
    Mss,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TumorMutationalStatus {
    High,
    Low,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurpleCharacteristics {
    pub microsatellite_status: MicrosatelliteStatus,
    pub microsatellite_indels_per_mb: f64,
    pub tumor_mutational_load_status: TumorMutationalStatus,
    pub tumor_mutational_load: u32,
    pub tumor_mutational_burden_status: TumorMutationalStatus,
    pub tumor_mutational_burden_per_mb: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChordStatus {
    HrDeficient,
    HrProficient,
    CannotBeDetermined,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordData {
    pub hr_status: ChordStatus,
    pub hrd_value: f64,
}

// ---------------------------------------------------------------------------
// HLA typing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LilacAllele {
    /// Allele in "A*02:01" form.
    pub allele: String,
    pub tumor_copy_number: f64,
    pub reported: bool,
}

impl GenomicFinding for LilacAllele {
    fn gene(&self) -> Option<&str> {
        None
    }

    fn event(&self) -> String {
        format!("HLA-{}", self.allele)
    }

    // HLA typing is derived from the germline genome.
    fn germline(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LilacData {
    pub qc_status: String,
    pub alleles: Vec<LilacAllele>,
}

impl LilacData {
    pub fn is_qc_pass(&self) -> bool {
        self.qc_status == "PASS"
    }
}

// ---------------------------------------------------------------------------
// Per-tool groupings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurpleQcStatus {
    Pass,
    WarnDeletedGenes,
    WarnHighCopyNumberNoise,
    WarnGenderMismatch,
    WarnLowPurity,
    FailContamination,
    FailNoTumor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurpleData {
    pub qc_status: BTreeSet<PurpleQcStatus>,
    pub characteristics: PurpleCharacteristics,
    pub reportable_somatic_variants: Vec<Variant>,
    pub all_somatic_variants: Vec<Variant>,
    pub reportable_germline_variants: Vec<Variant>,
    pub all_germline_variants: Vec<Variant>,
    pub reportable_gains_losses: Vec<GainLoss>,
    pub all_gains_losses: Vec<GainLoss>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinxData {
    pub reportable_fusions: Vec<LinxFusion>,
    pub all_fusions: Vec<LinxFusion>,
    pub homozygous_disruptions: Vec<HomozygousDisruption>,
    pub reportable_gene_disruptions: Vec<GeneDisruption>,
}

/// All findings of one sample. Every collection is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenomicRecord {
    pub sample_id: String,
    pub purple: PurpleData,
    pub linx: LinxData,
    pub viruses: Vec<AnnotatedVirus>,
    pub chord: ChordData,
    pub lilac: LilacData,
    /// Driver gene panel used for wild-type calls.
    pub driver_genes: BTreeSet<String>,
}

/// Items of `all` that are not part of `reportable`.
pub fn unreported<'a, T: PartialEq>(reportable: &'a [T], all: &'a [T]) -> impl Iterator<Item = &'a T> {
    all.iter().filter(move |item| !reportable.contains(item))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fusion_event_names_both_partners() {
        let fusion = LinxFusion {
            gene_start: "EML4".to_string(),
            gene_transcript_start: "ENST00000318522".to_string(),
            gene_end: "ALK".to_string(),
            gene_transcript_end: "ENST00000389048".to_string(),
            fused_exon_up: 6,
            fused_exon_down: 20,
            driver_likelihood: DriverLikelihood::High,
        };
        assert_eq!(fusion.event(), "EML4 - ALK fusion");
        assert_eq!(fusion.gene(), None);
        assert_eq!(fusion.event_is_high_driver(), Some(true));
    }

    #[test]
    fn test_virus_event_uses_interpretation() {
        let virus = AnnotatedVirus {
            name: "Human papillomavirus type 16".to_string(),
            interpretation: Some(VirusInterpretation::Hpv),
            integrations: 3,
            driver_likelihood: DriverLikelihood::High,
            reported: true,
        };
        assert_eq!(virus.event(), "HPV positive");
    }

    #[test]
    fn test_unreported_excludes_reportable() {
        let reportable = vec![1, 2];
        let all = vec![1, 2, 3, 4];
        let rest: Vec<_> = unreported(&reportable, &all).copied().collect();
        assert_eq!(rest, vec![3, 4]);
    }

    #[test]
    fn test_copy_number_event() {
        assert_eq!(CopyNumberInterpretation::PartialLoss.display(), "partial loss");
        assert!(CopyNumberInterpretation::FullGain.is_gain());
        assert!(!CopyNumberInterpretation::FullLoss.is_gain());
    }
}
