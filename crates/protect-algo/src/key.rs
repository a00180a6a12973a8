//! Identity of a clinical claim, used to merge duplicate evidence.

use std::collections::BTreeSet;

use protect_common::ProtectEvidence;

/// Two evidence records with equal keys assert the same clinical claim and
/// differ at most in their citations and reportability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EvidenceKey {
    pub gene: Option<String>,
    pub event: String,
    pub study_nct_id: Option<String>,
    pub therapy: String,
    pub drug_classes: Option<BTreeSet<String>>,
    pub therapies: Option<BTreeSet<String>>,
}

impl EvidenceKey {
    pub fn create(evidence: &ProtectEvidence) -> Self {
        let intervention = &evidence.intervention;
        Self {
            gene: evidence.gene.clone(),
            event: evidence.event.clone(),
            study_nct_id: evidence.clinical_trial().map(|t| t.study_nct_id.clone()),
            therapy: intervention.therapy_name().to_string(),
            drug_classes: intervention.drug_classes().cloned(),
            therapies: intervention.therapies().cloned(),
        }
    }
}
