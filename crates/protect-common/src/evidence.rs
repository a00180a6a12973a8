//! Evidence records produced by the matching engine, plus the citation,
//! treatment and trial types they carry.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::ProtectError;

// ---------------------------------------------------------------------------
// Knowledgebase
// ---------------------------------------------------------------------------

/// Named source catalog of curated actionable events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Knowledgebase {
    CkbEvidence,
    CkbTrial,
    ViccCgi,
    ViccCivic,
    ViccJax,
    ViccOncokb,
    Iclusion,
    Actin,
    Docm,
    HartwigCurated,
    HartwigCohort,
    Unknown,
}

impl Knowledgebase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Knowledgebase::CkbEvidence    => "CKB_EVIDENCE",
            Knowledgebase::CkbTrial       => "CKB_TRIAL",
            Knowledgebase::ViccCgi        => "VICC_CGI",
            Knowledgebase::ViccCivic      => "VICC_CIVIC",
            Knowledgebase::ViccJax        => "VICC_JAX",
            Knowledgebase::ViccOncokb     => "VICC_ONCOKB",
            Knowledgebase::Iclusion       => "ICLUSION",
            Knowledgebase::Actin          => "ACTIN",
            Knowledgebase::Docm           => "DOCM",
            Knowledgebase::HartwigCurated => "HARTWIG_CURATED",
            Knowledgebase::HartwigCohort  => "HARTWIG_COHORT",
            Knowledgebase::Unknown        => "UNKNOWN",
        }
    }
}

impl FromStr for Knowledgebase {
    type Err = ProtectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "CKB_EVIDENCE"    => Knowledgebase::CkbEvidence,
            "CKB_TRIAL"       => Knowledgebase::CkbTrial,
            "VICC_CGI"        => Knowledgebase::ViccCgi,
            "VICC_CIVIC"      => Knowledgebase::ViccCivic,
            "VICC_JAX"        => Knowledgebase::ViccJax,
            "VICC_ONCOKB"     => Knowledgebase::ViccOncokb,
            "ICLUSION"        => Knowledgebase::Iclusion,
            "ACTIN"           => Knowledgebase::Actin,
            "DOCM"            => Knowledgebase::Docm,
            "HARTWIG_CURATED" => Knowledgebase::HartwigCurated,
            "HARTWIG_COHORT"  => Knowledgebase::HartwigCohort,
            "UNKNOWN"         => Knowledgebase::Unknown,
            other => return Err(ProtectError::Parse(format!("unknown knowledgebase '{other}'"))),
        })
    }
}

impl fmt::Display for Knowledgebase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Ordered by name, not by declaration order.
impl Ord for Knowledgebase {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Knowledgebase {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Evidence type
// ---------------------------------------------------------------------------

/// Category of the rule that produced a piece of evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceType {
    HotspotMutation,
    CodonMutation,
    ExonMutation,
    FusionPair,
    PromiscuousFusion,
    Amplification,
    OverExpression,
    Deletion,
    UnderExpression,
    PresenceOfProtein,
    AbsenceOfProtein,
    Activation,
    Inactivation,
    AnyMutation,
    WildType,
    Signature,
    ViralPresence,
    Hla,
}

impl EvidenceType {
    /// Human-readable label, also the sort key for citations.
    pub fn display(&self) -> &'static str {
        match self {
            EvidenceType::HotspotMutation   => "Hotspot mutation",
            EvidenceType::CodonMutation     => "Codon mutation",
            EvidenceType::ExonMutation      => "Exon mutation",
            EvidenceType::FusionPair        => "Fusion pair",
            EvidenceType::PromiscuousFusion => "Promiscuous fusion",
            EvidenceType::Amplification     => "Amplification",
            EvidenceType::OverExpression    => "Over-expression",
            EvidenceType::Deletion          => "Deletion",
            EvidenceType::UnderExpression   => "Under-expression",
            EvidenceType::PresenceOfProtein => "Presence of protein",
            EvidenceType::AbsenceOfProtein  => "Absence of protein",
            EvidenceType::Activation        => "Activation",
            EvidenceType::Inactivation      => "Inactivation",
            EvidenceType::AnyMutation       => "Any mutation",
            EvidenceType::WildType          => "Wild type",
            EvidenceType::Signature         => "Signature",
            EvidenceType::ViralPresence     => "Viral presence",
            EvidenceType::Hla               => "HLA",
        }
    }

    /// Serialize to the string stored in the evidence file.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceType::HotspotMutation   => "HOTSPOT_MUTATION",
            EvidenceType::CodonMutation     => "CODON_MUTATION",
            EvidenceType::ExonMutation      => "EXON_MUTATION",
            EvidenceType::FusionPair        => "FUSION_PAIR",
            EvidenceType::PromiscuousFusion => "PROMISCUOUS_FUSION",
            EvidenceType::Amplification     => "AMPLIFICATION",
            EvidenceType::OverExpression    => "OVER_EXPRESSION",
            EvidenceType::Deletion          => "DELETION",
            EvidenceType::UnderExpression   => "UNDER_EXPRESSION",
            EvidenceType::PresenceOfProtein => "PRESENCE_OF_PROTEIN",
            EvidenceType::AbsenceOfProtein  => "ABSENCE_OF_PROTEIN",
            EvidenceType::Activation        => "ACTIVATION",
            EvidenceType::Inactivation      => "INACTIVATION",
            EvidenceType::AnyMutation       => "ANY_MUTATION",
            EvidenceType::WildType          => "WILD_TYPE",
            EvidenceType::Signature         => "SIGNATURE",
            EvidenceType::ViralPresence     => "VIRAL_PRESENCE",
            EvidenceType::Hla               => "HLA",
        }
    }
}

impl FromStr for EvidenceType {
    type Err = ProtectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "HOTSPOT_MUTATION"    => EvidenceType::HotspotMutation,
            "CODON_MUTATION"      => EvidenceType::CodonMutation,
            "EXON_MUTATION"       => EvidenceType::ExonMutation,
            "FUSION_PAIR"         => EvidenceType::FusionPair,
            "PROMISCUOUS_FUSION"  => EvidenceType::PromiscuousFusion,
            "AMPLIFICATION"       => EvidenceType::Amplification,
            "OVER_EXPRESSION"     => EvidenceType::OverExpression,
            "DELETION"            => EvidenceType::Deletion,
            "UNDER_EXPRESSION"    => EvidenceType::UnderExpression,
            "PRESENCE_OF_PROTEIN" => EvidenceType::PresenceOfProtein,
            "ABSENCE_OF_PROTEIN"  => EvidenceType::AbsenceOfProtein,
            "ACTIVATION"          => EvidenceType::Activation,
            "INACTIVATION"        => EvidenceType::Inactivation,
            "ANY_MUTATION"        => EvidenceType::AnyMutation,
            "WILD_TYPE"           => EvidenceType::WildType,
            "SIGNATURE"           => EvidenceType::Signature,
            "VIRAL_PRESENCE"      => EvidenceType::ViralPresence,
            "HLA"                 => EvidenceType::Hla,
            other => return Err(ProtectError::Parse(format!("unknown evidence type '{other}'"))),
        })
    }
}

impl Ord for EvidenceType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.display().cmp(other.display())
    }
}

impl PartialOrd for EvidenceType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Level / direction
// ---------------------------------------------------------------------------

/// Evidence strength, A strongest. Declaration order is the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EvidenceLevel {
    A,
    B,
    C,
    D,
}

impl EvidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceLevel::A => "A",
            EvidenceLevel::B => "B",
            EvidenceLevel::C => "C",
            EvidenceLevel::D => "D",
        }
    }

    /// Is this level at least as strong as `other`?
    pub fn is_at_least(&self, other: EvidenceLevel) -> bool {
        *self <= other
    }
}

impl FromStr for EvidenceLevel {
    type Err = ProtectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(EvidenceLevel::A),
            "B" => Ok(EvidenceLevel::B),
            "C" => Ok(EvidenceLevel::C),
            "D" => Ok(EvidenceLevel::D),
            other => Err(ProtectError::Parse(format!("unknown evidence level '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceDirection {
    Responsive,
    PredictedResponsive,
    NoBenefit,
    Resistant,
    PredictedResistant,
    DecreasedResponse,
}

impl EvidenceDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceDirection::Responsive          => "RESPONSIVE",
            EvidenceDirection::PredictedResponsive => "PREDICTED_RESPONSIVE",
            EvidenceDirection::NoBenefit           => "NO_BENEFIT",
            EvidenceDirection::Resistant           => "RESISTANT",
            EvidenceDirection::PredictedResistant  => "PREDICTED_RESISTANT",
            EvidenceDirection::DecreasedResponse   => "DECREASED_RESPONSE",
        }
    }
}

impl FromStr for EvidenceDirection {
    type Err = ProtectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "RESPONSIVE"           => EvidenceDirection::Responsive,
            "PREDICTED_RESPONSIVE" => EvidenceDirection::PredictedResponsive,
            "NO_BENEFIT"           => EvidenceDirection::NoBenefit,
            "RESISTANT"            => EvidenceDirection::Resistant,
            "PREDICTED_RESISTANT"  => EvidenceDirection::PredictedResistant,
            "DECREASED_RESPONSE"   => EvidenceDirection::DecreasedResponse,
            other => return Err(ProtectError::Parse(format!("unknown evidence direction '{other}'"))),
        })
    }
}

impl Ord for EvidenceDirection {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for EvidenceDirection {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Gender restriction of a clinical trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenderCriterium {
    Both,
    Male,
    Female,
}

impl GenderCriterium {
    pub fn admits(&self, gender: Gender) -> bool {
        match self {
            GenderCriterium::Both   => true,
            GenderCriterium::Male   => gender == Gender::Male,
            GenderCriterium::Female => gender == Gender::Female,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GenderCriterium::Both   => "BOTH",
            GenderCriterium::Male   => "MALE",
            GenderCriterium::Female => "FEMALE",
        }
    }
}

impl FromStr for GenderCriterium {
    type Err = ProtectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BOTH"   => Ok(GenderCriterium::Both),
            "MALE"   => Ok(GenderCriterium::Male),
            "FEMALE" => Ok(GenderCriterium::Female),
            other => Err(ProtectError::Parse(format!("unknown gender criterium '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Treatment / clinical trial
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Treatment {
    pub name: String,
    /// Approaches as attributed by the matching source (drug classes).
    #[serde(default)]
    pub source_relevant_treatment_approaches: BTreeSet<String>,
    /// Canonicalised approaches used for display (therapies).
    #[serde(default)]
    pub relevant_treatment_approaches: BTreeSet<String>,
}

impl Treatment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_relevant_treatment_approaches: BTreeSet::new(),
            relevant_treatment_approaches: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClinicalTrial {
    pub study_nct_id: String,
    pub study_title: String,
    pub study_acronym: Option<String>,
    pub gender_criterium: Option<GenderCriterium>,
    #[serde(default)]
    pub countries_of_study: BTreeSet<String>,
    #[serde(default)]
    pub therapy_names: BTreeSet<String>,
}

/// What an actionable event recommends: a treatment or a trial, never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intervention {
    Treatment(Treatment),
    ClinicalTrial(ClinicalTrial),
}

impl Intervention {
    pub fn treatment(&self) -> Option<&Treatment> {
        match self {
            Intervention::Treatment(t) => Some(t),
            Intervention::ClinicalTrial(_) => None,
        }
    }

    pub fn clinical_trial(&self) -> Option<&ClinicalTrial> {
        match self {
            Intervention::Treatment(_) => None,
            Intervention::ClinicalTrial(t) => Some(t),
        }
    }

    /// Display name of the therapy: treatment name, or trial acronym
    /// falling back to the study title.
    pub fn therapy_name(&self) -> &str {
        match self {
            Intervention::Treatment(t) => &t.name,
            Intervention::ClinicalTrial(t) => t.study_acronym.as_deref().unwrap_or(&t.study_title),
        }
    }

    pub fn drug_classes(&self) -> Option<&BTreeSet<String>> {
        self.treatment().map(|t| &t.source_relevant_treatment_approaches)
    }

    pub fn therapies(&self) -> Option<&BTreeSet<String>> {
        self.treatment().map(|t| &t.relevant_treatment_approaches)
    }
}

// ---------------------------------------------------------------------------
// Knowledgebase source citation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KnowledgebaseSource {
    pub name: Knowledgebase,
    pub source_event: String,
    pub source_urls: BTreeSet<String>,
    pub evidence_type: EvidenceType,
    /// Codon or exon rank for range rules.
    pub range_rank: Option<u32>,
    pub evidence_urls: BTreeSet<String>,
}

// ---------------------------------------------------------------------------
// Protect evidence
// ---------------------------------------------------------------------------

/// One clinically-labelled evidence item for a patient.
///
/// `sources` is never empty: records are only built by personalizing a
/// matched rule, and consolidation only ever unions source sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProtectEvidence {
    pub gene: Option<String>,
    pub transcript: Option<String>,
    pub is_canonical: Option<bool>,
    pub event: String,
    pub event_is_high_driver: Option<bool>,
    pub germline: bool,
    pub reported: bool,
    pub intervention: Intervention,
    pub match_gender: Option<bool>,
    pub on_label: bool,
    pub level: EvidenceLevel,
    pub direction: EvidenceDirection,
    pub sources: BTreeSet<KnowledgebaseSource>,
}

impl ProtectEvidence {
    pub fn treatment(&self) -> Option<&Treatment> {
        self.intervention.treatment()
    }

    pub fn clinical_trial(&self) -> Option<&ClinicalTrial> {
        self.intervention.clinical_trial()
    }

    pub fn is_trial(&self) -> bool {
        self.clinical_trial().is_some()
    }
}
