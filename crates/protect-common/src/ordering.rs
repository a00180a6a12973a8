//! Deterministic total orders over evidence records and source citations.
//!
//! Set iteration order is never relied upon; every output path sorts with
//! these orders first.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::evidence::{KnowledgebaseSource, ProtectEvidence};

/// `Some` values first, `None` last.
fn nulls_last<T: Ord>(a: Option<&T>, b: Option<&T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// `true` before `false`.
fn true_first(a: bool, b: bool) -> Ordering {
    b.cmp(&a)
}

/// `Some(true)`, then `Some(false)`, then `None`.
fn true_first_nulls_last(a: Option<bool>, b: Option<bool>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => true_first(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Comma-joined form of an optional set, used as its sort key.
pub fn stringify(set: Option<&BTreeSet<String>>) -> String {
    set.map(|s| s.iter().cloned().collect::<Vec<_>>().join(","))
        .unwrap_or_default()
}

/// Clinical ordering of evidence: reported, gene, transcript, canonical,
/// event, level, on-label, trial, therapy, approaches, direction.
pub fn compare_evidence(a: &ProtectEvidence, b: &ProtectEvidence) -> Ordering {
    true_first(a.reported, b.reported)
        .then_with(|| nulls_last(a.gene.as_ref(), b.gene.as_ref()))
        .then_with(|| nulls_last(a.transcript.as_ref(), b.transcript.as_ref()))
        .then_with(|| true_first_nulls_last(a.is_canonical, b.is_canonical))
        .then_with(|| a.event.cmp(&b.event))
        .then_with(|| a.level.cmp(&b.level))
        .then_with(|| true_first(a.on_label, b.on_label))
        // A missing NCT id sorts last; treating it as equal is not transitive.
        .then_with(|| {
            nulls_last(
                a.clinical_trial().map(|t| &t.study_nct_id),
                b.clinical_trial().map(|t| &t.study_nct_id),
            )
        })
        .then_with(|| a.intervention.therapy_name().cmp(b.intervention.therapy_name()))
        .then_with(|| stringify(a.intervention.drug_classes()).cmp(&stringify(b.intervention.drug_classes())))
        .then_with(|| stringify(a.intervention.therapies()).cmp(&stringify(b.intervention.therapies())))
        .then_with(|| a.direction.cmp(&b.direction))
}

/// Citation ordering: knowledgebase name, source event, evidence type label.
pub fn compare_sources(a: &KnowledgebaseSource, b: &KnowledgebaseSource) -> Ordering {
    a.name
        .cmp(&b.name)
        .then_with(|| a.source_event.cmp(&b.source_event))
        .then_with(|| a.evidence_type.cmp(&b.evidence_type))
}

// The remaining fields only break ties so that `Ord` agrees with `Eq`.

impl Ord for KnowledgebaseSource {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_sources(self, other)
            .then_with(|| self.range_rank.cmp(&other.range_rank))
            .then_with(|| self.source_urls.cmp(&other.source_urls))
            .then_with(|| self.evidence_urls.cmp(&other.evidence_urls))
    }
}

impl PartialOrd for KnowledgebaseSource {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProtectEvidence {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_evidence(self, other)
            .then_with(|| self.germline.cmp(&other.germline))
            .then_with(|| self.event_is_high_driver.cmp(&other.event_is_high_driver))
            .then_with(|| self.match_gender.cmp(&other.match_gender))
            .then_with(|| self.intervention.cmp(&other.intervention))
            .then_with(|| self.sources.cmp(&other.sources))
    }
}

impl PartialOrd for ProtectEvidence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort evidence in place into its deterministic output order.
pub fn sort_evidence(evidences: &mut [ProtectEvidence]) {
    evidences.sort();
}
