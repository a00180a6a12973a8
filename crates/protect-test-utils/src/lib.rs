//! protect-test-utils: Fixtures shared by the PROTECT crates' tests.
//!
//! Every builder returns a plain, fully-populated value; tests mutate the
//! fields they care about.

use std::collections::BTreeSet;

use protect_common::actionable::{ActionableEvent, CancerType};
use protect_common::genomic::{
    ChordData, ChordStatus, CodingEffect, CopyNumberInterpretation, DriverLikelihood, GainLoss,
    GenomicRecord, LilacData, LinxData, LinxFusion, MicrosatelliteStatus, PurpleCharacteristics,
    PurpleData, PurpleQcStatus, TumorMutationalStatus, Variant, VariantOrigin,
};
use protect_common::{
    ClinicalTrial, EvidenceDirection, EvidenceLevel, EvidenceType, Intervention, Knowledgebase,
    KnowledgebaseSource, ProtectEvidence, Treatment,
};

/// Patient tumor type used throughout the tests (melanoma).
pub const PATIENT_DOID: &str = "1909";

/// An unrelated tumor type (lung cancer).
pub const OTHER_DOID: &str = "1324";

pub fn canonical_transcript(gene: &str) -> String {
    match gene {
        "BRAF"  => "ENST00000646891",
        "KRAS"  => "ENST00000311936",
        "BRCA2" => "ENST00000380152",
        "EGFR"  => "ENST00000275493",
        "PTEN"  => "ENST00000371953",
        "ERBB2" => "ENST00000269571",
        _       => "ENST00000000000",
    }
    .to_string()
}

// ---------------------------------------------------------------------------
// Catalog rules
// ---------------------------------------------------------------------------

/// A responsive level-A CKB treatment rule, applicable to `PATIENT_DOID`.
pub fn actionable_event(source_event: &str) -> ActionableEvent {
    ActionableEvent {
        knowledgebase: Knowledgebase::CkbEvidence,
        source_event: source_event.to_string(),
        source_urls: BTreeSet::new(),
        intervention: Intervention::Treatment(Treatment::new("Vemurafenib")),
        applicable_cancer_type: CancerType { name: "Melanoma".to_string(), doid: PATIENT_DOID.to_string() },
        blacklist_cancer_types: BTreeSet::new(),
        level: EvidenceLevel::A,
        direction: EvidenceDirection::Responsive,
        evidence_urls: BTreeSet::new(),
    }
}

pub fn clinical_trial(nct_id: &str, acronym: Option<&str>) -> ClinicalTrial {
    ClinicalTrial {
        study_nct_id: nct_id.to_string(),
        study_title: format!("Study {nct_id}"),
        study_acronym: acronym.map(str::to_string),
        gender_criterium: None,
        countries_of_study: BTreeSet::from(["Netherlands".to_string()]),
        therapy_names: BTreeSet::from(["Dabrafenib".to_string()]),
    }
}

// ---------------------------------------------------------------------------
// Genomic findings
// ---------------------------------------------------------------------------

/// A high-driver somatic missense variant on the canonical transcript.
pub fn variant(gene: &str, event: &str) -> Variant {
    Variant {
        gene: gene.to_string(),
        transcript: canonical_transcript(gene),
        is_canonical: true,
        event: event.to_string(),
        chromosome: "7".to_string(),
        position: 140753336,
        ref_allele: "A".to_string(),
        alt_allele: "T".to_string(),
        coding_effect: CodingEffect::Missense,
        affected_codon: Some(600),
        affected_exon: Some(15),
        driver_likelihood: DriverLikelihood::High,
        origin: VariantOrigin::Somatic,
    }
}

pub fn gain_loss(gene: &str, interpretation: CopyNumberInterpretation) -> GainLoss {
    let copies = if interpretation.is_gain() { 12.0 } else { 0.1 };
    GainLoss {
        gene: gene.to_string(),
        transcript: canonical_transcript(gene),
        is_canonical: true,
        interpretation,
        min_copies: copies,
        max_copies: copies,
    }
}

/// A high-driver fusion between two genes.
pub fn fusion(gene_start: &str, gene_end: &str, fused_exon_up: u32, fused_exon_down: u32) -> LinxFusion {
    LinxFusion {
        gene_start: gene_start.to_string(),
        gene_transcript_start: canonical_transcript(gene_start),
        gene_end: gene_end.to_string(),
        gene_transcript_end: canonical_transcript(gene_end),
        fused_exon_up,
        fused_exon_down,
        driver_likelihood: DriverLikelihood::High,
    }
}

/// Microsatellite stable, low TML and TMB.
pub fn neutral_characteristics() -> PurpleCharacteristics {
    PurpleCharacteristics {
        microsatellite_status: MicrosatelliteStatus::Mss,
        microsatellite_indels_per_mb: 0.1,
        tumor_mutational_load_status: TumorMutationalStatus::Low,
        tumor_mutational_load: 80,
        tumor_mutational_burden_status: TumorMutationalStatus::Low,
        tumor_mutational_burden_per_mb: 2.5,
    }
}

/// QC-passing purple output with the given somatic variants only.
pub fn purple_data(reportable: Vec<Variant>, all: Vec<Variant>) -> PurpleData {
    PurpleData {
        qc_status: BTreeSet::from([PurpleQcStatus::Pass]),
        characteristics: neutral_characteristics(),
        reportable_somatic_variants: reportable,
        all_somatic_variants: all,
        reportable_germline_variants: Vec::new(),
        all_germline_variants: Vec::new(),
        reportable_gains_losses: Vec::new(),
        all_gains_losses: Vec::new(),
    }
}

pub fn linx_data() -> LinxData {
    LinxData {
        reportable_fusions: Vec::new(),
        all_fusions: Vec::new(),
        homozygous_disruptions: Vec::new(),
        reportable_gene_disruptions: Vec::new(),
    }
}

/// An empty, QC-passing sample with no driver panel.
pub fn genomic_record() -> GenomicRecord {
    GenomicRecord {
        sample_id: "COLO829T".to_string(),
        purple: purple_data(Vec::new(), Vec::new()),
        linx: linx_data(),
        viruses: Vec::new(),
        chord: ChordData { hr_status: ChordStatus::HrProficient, hrd_value: 0.02 },
        lilac: LilacData { qc_status: "PASS".to_string(), alleles: Vec::new() },
        driver_genes: BTreeSet::new(),
    }
}

// ---------------------------------------------------------------------------
// Evidence
// ---------------------------------------------------------------------------

pub fn source(name: Knowledgebase, source_event: &str, evidence_type: EvidenceType) -> KnowledgebaseSource {
    KnowledgebaseSource {
        name,
        source_event: source_event.to_string(),
        source_urls: BTreeSet::new(),
        evidence_type,
        range_rank: None,
        evidence_urls: BTreeSet::new(),
    }
}

/// A reported, on-label treatment record with a single CKB citation.
pub fn evidence(gene: &str, event: &str, treatment: &str, level: EvidenceLevel) -> ProtectEvidence {
    ProtectEvidence {
        gene: Some(gene.to_string()),
        transcript: Some(canonical_transcript(gene)),
        is_canonical: Some(true),
        event: event.to_string(),
        event_is_high_driver: Some(true),
        germline: false,
        reported: true,
        intervention: Intervention::Treatment(Treatment::new(treatment)),
        match_gender: None,
        on_label: true,
        level,
        direction: EvidenceDirection::Responsive,
        sources: BTreeSet::from([source(Knowledgebase::CkbEvidence, event, EvidenceType::HotspotMutation)]),
    }
}

/// Same as [`evidence`] but backed by a clinical trial.
pub fn trial_evidence(gene: &str, event: &str, trial: ClinicalTrial, on_label: bool) -> ProtectEvidence {
    ProtectEvidence {
        intervention: Intervention::ClinicalTrial(trial),
        on_label,
        level: EvidenceLevel::B,
        sources: BTreeSet::from([source(Knowledgebase::CkbTrial, event, EvidenceType::HotspotMutation)]),
        ..evidence(gene, event, "unused", EvidenceLevel::B)
    }
}
