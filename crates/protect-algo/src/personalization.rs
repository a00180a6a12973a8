//! Personalization of matched rules for one patient.
//!
//! Decides on-label status against the patient's expanded tumor doids and
//! trial gender applicability, then builds the evidence record.

use std::collections::BTreeSet;

use protect_common::actionable::ActionableEvent;
use protect_common::{
    EvidenceType, Gender, GenomicFinding, KnowledgebaseSource, ProtectEvidence,
};

pub struct PersonalizedEvidenceFactory {
    patient_tumor_doids: BTreeSet<String>,
    patient_gender: Option<Gender>,
}

impl PersonalizedEvidenceFactory {
    /// `patient_tumor_doids` must already include all ontology ancestors.
    pub fn new(patient_tumor_doids: BTreeSet<String>, patient_gender: Option<Gender>) -> Self {
        Self { patient_tumor_doids, patient_gender }
    }

    pub fn patient_tumor_doids(&self) -> &BTreeSet<String> {
        &self.patient_tumor_doids
    }

    /// On-label iff the applicable type is in the patient's closure and no
    /// blacklisted type is. The blacklist wins when both match.
    pub fn is_on_label(&self, event: &ActionableEvent) -> bool {
        let applicable = self.patient_tumor_doids.contains(&event.applicable_cancer_type.doid);
        let blacklisted = event
            .blacklist_cancer_types
            .iter()
            .any(|cancer_type| self.patient_tumor_doids.contains(&cancer_type.doid));
        applicable && !blacklisted
    }

    /// `None` when the patient's gender is unknown or the event is no trial.
    /// A trial without gender criterium admits everyone.
    pub fn match_gender(&self, event: &ActionableEvent) -> Option<bool> {
        let trial = event.intervention.clinical_trial()?;
        let gender = self.patient_gender?;
        Some(trial.gender_criterium.map_or(true, |criterium| criterium.admits(gender)))
    }

    /// Build the evidence record for one (finding, rule) match.
    pub fn evidence<F>(
        &self,
        finding: &F,
        reported: bool,
        event: &ActionableEvent,
        evidence_type: EvidenceType,
        range_rank: Option<u32>,
    ) -> ProtectEvidence
    where
        F: GenomicFinding + ?Sized,
    {
        ProtectEvidence {
            gene: finding.gene().map(str::to_string),
            transcript: finding.transcript().map(str::to_string),
            is_canonical: finding.is_canonical(),
            event: finding.event(),
            event_is_high_driver: finding.event_is_high_driver(),
            germline: finding.germline(),
            reported,
            intervention: event.intervention.clone(),
            match_gender: self.match_gender(event),
            on_label: self.is_on_label(event),
            level: event.level,
            direction: event.direction,
            sources: BTreeSet::from([source(event, evidence_type, range_rank)]),
        }
    }
}

fn source(event: &ActionableEvent, evidence_type: EvidenceType, range_rank: Option<u32>) -> KnowledgebaseSource {
    KnowledgebaseSource {
        name: event.knowledgebase,
        source_event: event.source_event.clone(),
        source_urls: event.source_urls.clone(),
        evidence_type,
        range_rank,
        evidence_urls: event.evidence_urls.clone(),
    }
}
