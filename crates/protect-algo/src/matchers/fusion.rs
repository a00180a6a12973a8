//! Fusion evidence: exact gene pairs and promiscuous single-gene rules.

use protect_common::actionable::{ActionableFusion, ActionableGene, GeneEvent};
use protect_common::genomic::{unreported, LinxData, LinxFusion};
use protect_common::{EvidenceType, ProtectEvidence};
use protect_kb::ActionableEvents;

use super::evidence_type_for;
use crate::personalization::PersonalizedEvidenceFactory;

const PROMISCUOUS_EVENTS: [GeneEvent; 3] =
    [GeneEvent::Fusion, GeneEvent::Activation, GeneEvent::AnyMutation];

pub struct FusionEvidence<'a> {
    factory: &'a PersonalizedEvidenceFactory,
    fusions: &'a [ActionableFusion],
    promiscuous: Vec<&'a ActionableGene>,
}

impl<'a> FusionEvidence<'a> {
    pub fn new(factory: &'a PersonalizedEvidenceFactory, catalog: &'a ActionableEvents) -> Self {
        Self {
            factory,
            fusions: &catalog.fusions,
            promiscuous: catalog.genes_with_events(&PROMISCUOUS_EVENTS).collect(),
        }
    }

    pub fn evidence(&self, linx: &LinxData) -> Vec<ProtectEvidence> {
        let reportable = linx.reportable_fusions.iter().map(|f| (f, true));
        let rest = unreported(&linx.reportable_fusions, &linx.all_fusions).map(|f| (f, false));

        reportable
            .chain(rest)
            .flat_map(|(fusion, may_report)| self.fusion_evidence(fusion, may_report))
            .collect()
    }

    fn fusion_evidence(&self, fusion: &LinxFusion, may_report: bool) -> Vec<ProtectEvidence> {
        let reported = may_report && fusion.is_high_driver();
        let mut result = Vec::new();

        for pair in self.fusions.iter().filter(|p| pair_match(p, fusion)) {
            result.push(self.factory.evidence(fusion, reported, &pair.event, EvidenceType::FusionPair, None));
        }

        for gene in self
            .promiscuous
            .iter()
            .filter(|g| g.gene == fusion.gene_start || g.gene == fusion.gene_end)
        {
            result.push(self.factory.evidence(
                fusion,
                reported,
                &gene.event,
                evidence_type_for(gene.gene_event),
                None,
            ));
        }

        result
    }
}

fn pair_match(pair: &ActionableFusion, fusion: &LinxFusion) -> bool {
    pair.gene_up == fusion.gene_start
        && pair.gene_down == fusion.gene_end
        && within(fusion.fused_exon_up, pair.min_exon_up, pair.max_exon_up)
        && within(fusion.fused_exon_down, pair.min_exon_down, pair.max_exon_down)
}

fn within(exon: u32, min: Option<u32>, max: Option<u32>) -> bool {
    min.map_or(true, |min| exon >= min) && max.map_or(true, |max| exon <= max)
}
