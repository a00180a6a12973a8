//! Reporting policy over consolidated evidence.

use std::collections::BTreeMap;

use tracing::debug;

use protect_common::{EvidenceLevel, ProtectEvidence};

use crate::config::ReportingConfig;

pub struct EvidenceReportingFilter<'a> {
    config: &'a ReportingConfig,
}

impl<'a> EvidenceReportingFilter<'a> {
    pub fn new(config: &'a ReportingConfig) -> Self {
        Self { config }
    }

    /// Applies the policies in order: level cap, strongest level per
    /// molecular event, off-label trial restriction. Only `reported` changes.
    pub fn apply(&self, mut evidences: Vec<ProtectEvidence>) -> Vec<ProtectEvidence> {
        self.cap_level(&mut evidences);
        highest_level_per_event(&mut evidences);
        if !self.config.report_off_label_trials {
            restrict_trials_to_on_label(&mut evidences);
        }
        evidences
    }

    fn cap_level(&self, evidences: &mut [ProtectEvidence]) {
        let max = self.config.max_reportable_level;
        for evidence in evidences.iter_mut().filter(|e| e.reported && !e.level.is_at_least(max)) {
            debug!(event = %evidence.event, level = evidence.level.as_str(), "Above max reportable level");
            evidence.reported = false;
        }
    }
}

/// Among reported records for the same (gene, event), only those at the
/// strongest level stay reported.
fn highest_level_per_event(evidences: &mut [ProtectEvidence]) {
    let mut strongest: BTreeMap<(Option<&str>, &str), EvidenceLevel> = BTreeMap::new();
    for evidence in evidences.iter().filter(|e| e.reported) {
        strongest
            .entry((evidence.gene.as_deref(), evidence.event.as_str()))
            .and_modify(|level| *level = (*level).min(evidence.level))
            .or_insert(evidence.level);
    }

    let demote: Vec<bool> = evidences
        .iter()
        .map(|e| {
            e.reported
                && strongest
                    .get(&(e.gene.as_deref(), e.event.as_str()))
                    .is_some_and(|level| e.level > *level)
        })
        .collect();

    for (evidence, demote) in evidences.iter_mut().zip(demote) {
        if demote {
            evidence.reported = false;
        }
    }
}

fn restrict_trials_to_on_label(evidences: &mut [ProtectEvidence]) {
    for evidence in evidences.iter_mut().filter(|e| e.is_trial() && !e.on_label) {
        evidence.reported = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protect_test_utils::{clinical_trial, evidence, trial_evidence};

    #[test]
    fn test_only_strongest_level_stays_reported() {
        let config = ReportingConfig::default();
        let filter = EvidenceReportingFilter::new(&config);

        let a = evidence("BRAF", "p.Val600Glu", "Vemurafenib", EvidenceLevel::A);
        let c = evidence("BRAF", "p.Val600Glu", "Cobimetinib", EvidenceLevel::C);
        let other = evidence("KRAS", "p.Gly12Asp", "Cobimetinib", EvidenceLevel::C);

        let filtered = filter.apply(vec![a, c, other]);
        assert!(filtered[0].reported);
        assert!(!filtered[1].reported);
        assert!(filtered[2].reported);
    }

    #[test]
    fn test_unreported_records_do_not_set_the_bar() {
        let config = ReportingConfig::default();
        let filter = EvidenceReportingFilter::new(&config);

        let mut a = evidence("BRAF", "p.Val600Glu", "Vemurafenib", EvidenceLevel::A);
        a.reported = false;
        let c = evidence("BRAF", "p.Val600Glu", "Cobimetinib", EvidenceLevel::C);

        let filtered = filter.apply(vec![a, c]);
        assert!(filtered[1].reported);
    }

    #[test]
    fn test_off_label_trial_is_never_reported() {
        let config = ReportingConfig::default();
        let filter = EvidenceReportingFilter::new(&config);

        let mut trial = trial_evidence("BRAF", "p.Val600Glu", clinical_trial("NCT0001", None), false);
        trial.level = EvidenceLevel::A;
        let mut off_label_treatment = evidence("KRAS", "p.Gly12Asp", "Sotorasib", EvidenceLevel::A);
        off_label_treatment.on_label = false;

        let filtered = filter.apply(vec![trial, off_label_treatment]);
        assert!(!filtered[0].reported);
        assert!(filtered[1].reported);
    }

    #[test]
    fn test_off_label_trials_kept_when_configured() {
        let config = ReportingConfig { report_off_label_trials: true, ..Default::default() };
        let filter = EvidenceReportingFilter::new(&config);

        let trial = trial_evidence("BRAF", "p.Val600Glu", clinical_trial("NCT0001", None), false);
        assert!(filter.apply(vec![trial])[0].reported);
    }

    #[test]
    fn test_level_cap() {
        let config = ReportingConfig { max_reportable_level: EvidenceLevel::B, ..Default::default() };
        let filter = EvidenceReportingFilter::new(&config);

        let c = evidence("BRAF", "p.Val600Glu", "Cobimetinib", EvidenceLevel::C);
        assert!(!filter.apply(vec![c])[0].reported);
    }
}
