//! HLA allele evidence from LILAC typing.

use protect_common::actionable::ActionableHla;
use protect_common::genomic::LilacData;
use protect_common::{EvidenceType, ProtectEvidence};
use protect_kb::ActionableEvents;

use crate::personalization::PersonalizedEvidenceFactory;

pub struct HlaEvidence<'a> {
    factory: &'a PersonalizedEvidenceFactory,
    hla: &'a [ActionableHla],
}

impl<'a> HlaEvidence<'a> {
    pub fn new(factory: &'a PersonalizedEvidenceFactory, catalog: &'a ActionableEvents) -> Self {
        Self { factory, hla: &catalog.hla }
    }

    pub fn evidence(&self, lilac: &LilacData) -> Vec<ProtectEvidence> {
        let qc_pass = lilac.is_qc_pass();
        let mut result = Vec::new();
        for allele in &lilac.alleles {
            for rule in self.hla.iter().filter(|h| h.hla_allele == allele.allele) {
                result.push(self.factory.evidence(
                    allele,
                    allele.reported && qc_pass,
                    &rule.event,
                    EvidenceType::Hla,
                    None,
                ));
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protect_common::genomic::LilacAllele;
    use protect_test_utils::{actionable_event, PATIENT_DOID};
    use std::collections::BTreeSet;

    fn lilac(qc_status: &str) -> LilacData {
        LilacData {
            qc_status: qc_status.to_string(),
            alleles: vec![
                LilacAllele { allele: "A*02:01".to_string(), tumor_copy_number: 1.0, reported: true },
                LilacAllele { allele: "B*07:02".to_string(), tumor_copy_number: 1.0, reported: true },
            ],
        }
    }

    fn catalog() -> ActionableEvents {
        ActionableEvents {
            hla: vec![ActionableHla { hla_allele: "A*02:01".to_string(), event: actionable_event("HLA-A*02:01") }],
            ..Default::default()
        }
    }

    #[test]
    fn test_allele_equality_and_germline() {
        let catalog = catalog();
        let factory = PersonalizedEvidenceFactory::new(BTreeSet::from([PATIENT_DOID.to_string()]), None);
        let matcher = HlaEvidence::new(&factory, &catalog);

        let evidence = matcher.evidence(&lilac("PASS"));
        assert_eq!(evidence.len(), 1);
        assert_eq!(evidence[0].event, "HLA-A*02:01");
        assert!(evidence[0].germline);
        assert!(evidence[0].reported);
    }

    #[test]
    fn test_failed_qc_is_not_reported() {
        let catalog = catalog();
        let factory = PersonalizedEvidenceFactory::new(BTreeSet::from([PATIENT_DOID.to_string()]), None);
        let matcher = HlaEvidence::new(&factory, &catalog);

        let evidence = matcher.evidence(&lilac("WARN_UNMATCHED_HAPLOTYPE"));
        assert_eq!(evidence.len(), 1);
        assert!(!evidence[0].reported);
    }
}
