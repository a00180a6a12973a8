//! Structural-variant disruption evidence.
//!
//! Homozygous disruptions are reportable; partial gene disruptions may
//! license evidence but are never reported.

use protect_common::actionable::{ActionableGene, GeneEvent};
use protect_common::genomic::LinxData;
use protect_common::ProtectEvidence;
use protect_kb::ActionableEvents;

use super::evidence_type_for;
use crate::personalization::PersonalizedEvidenceFactory;

const HOMOZYGOUS_EVENTS: [GeneEvent; 3] =
    [GeneEvent::Inactivation, GeneEvent::Deletion, GeneEvent::AnyMutation];
const DISRUPTION_EVENTS: [GeneEvent; 2] = [GeneEvent::Inactivation, GeneEvent::AnyMutation];

pub struct DisruptionEvidence<'a> {
    factory: &'a PersonalizedEvidenceFactory,
    genes: Vec<&'a ActionableGene>,
}

impl<'a> DisruptionEvidence<'a> {
    pub fn new(factory: &'a PersonalizedEvidenceFactory, catalog: &'a ActionableEvents) -> Self {
        Self { factory, genes: catalog.genes_with_events(&HOMOZYGOUS_EVENTS).collect() }
    }

    pub fn evidence(&self, linx: &LinxData) -> Vec<ProtectEvidence> {
        let mut result = Vec::new();

        for disruption in &linx.homozygous_disruptions {
            for gene in self.genes.iter().filter(|g| g.gene == disruption.gene) {
                result.push(self.factory.evidence(
                    disruption,
                    true,
                    &gene.event,
                    evidence_type_for(gene.gene_event),
                    None,
                ));
            }
        }

        for disruption in &linx.reportable_gene_disruptions {
            for gene in self
                .genes
                .iter()
                .filter(|g| g.gene == disruption.gene && DISRUPTION_EVENTS.contains(&g.gene_event))
            {
                result.push(self.factory.evidence(
                    disruption,
                    false,
                    &gene.event,
                    evidence_type_for(gene.gene_event),
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
    use protect_common::genomic::{GeneDisruption, HomozygousDisruption};
    use protect_test_utils::{actionable_event, canonical_transcript, linx_data, PATIENT_DOID};
    use std::collections::BTreeSet;

    fn factory() -> PersonalizedEvidenceFactory {
        PersonalizedEvidenceFactory::new(BTreeSet::from([PATIENT_DOID.to_string()]), None)
    }

    fn catalog() -> ActionableEvents {
        ActionableEvents {
            genes: vec![
                ActionableGene {
                    gene: "PTEN".to_string(),
                    gene_event: GeneEvent::Deletion,
                    event: actionable_event("PTEN deletion"),
                },
                ActionableGene {
                    gene: "PTEN".to_string(),
                    gene_event: GeneEvent::Inactivation,
                    event: actionable_event("PTEN inactivation"),
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_homozygous_disruption_is_reported() {
        let catalog = catalog();
        let factory = factory();
        let matcher = DisruptionEvidence::new(&factory, &catalog);

        let mut linx = linx_data();
        linx.homozygous_disruptions = vec![HomozygousDisruption {
            gene: "PTEN".to_string(),
            transcript: canonical_transcript("PTEN"),
            is_canonical: true,
            chromosome: "10".to_string(),
            chromosome_band: "q23.31".to_string(),
        }];

        let evidence = matcher.evidence(&linx);
        assert_eq!(evidence.len(), 2);
        assert!(evidence.iter().all(|e| e.reported && e.event == "homozygous disruption"));
    }

    #[test]
    fn test_gene_disruption_never_reported_and_skips_deletion() {
        let catalog = catalog();
        let factory = factory();
        let matcher = DisruptionEvidence::new(&factory, &catalog);

        let mut linx = linx_data();
        linx.reportable_gene_disruptions = vec![GeneDisruption {
            gene: "PTEN".to_string(),
            transcript: canonical_transcript("PTEN"),
            is_canonical: true,
            undisrupted_copy_number: 1.0,
        }];

        let evidence = matcher.evidence(&linx);
        assert_eq!(evidence.len(), 1);
        assert!(!evidence[0].reported);
    }
}
