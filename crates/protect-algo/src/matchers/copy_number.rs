//! Copy-number evidence: gains against amplification rules, losses against
//! deletion and inactivation rules.

use protect_common::actionable::{ActionableGene, GeneEvent};
use protect_common::genomic::{unreported, GainLoss, PurpleData};
use protect_common::ProtectEvidence;
use protect_kb::ActionableEvents;

use super::evidence_type_for;
use crate::personalization::PersonalizedEvidenceFactory;

const GAIN_EVENTS: [GeneEvent; 2] = [GeneEvent::Amplification, GeneEvent::OverExpression];
const LOSS_EVENTS: [GeneEvent; 3] =
    [GeneEvent::Deletion, GeneEvent::UnderExpression, GeneEvent::Inactivation];

pub struct CopyNumberEvidence<'a> {
    factory: &'a PersonalizedEvidenceFactory,
    genes: Vec<&'a ActionableGene>,
}

impl<'a> CopyNumberEvidence<'a> {
    pub fn new(factory: &'a PersonalizedEvidenceFactory, catalog: &'a ActionableEvents) -> Self {
        let genes = catalog
            .genes
            .iter()
            .filter(|g| GAIN_EVENTS.contains(&g.gene_event) || LOSS_EVENTS.contains(&g.gene_event))
            .collect();
        Self { factory, genes }
    }

    pub fn evidence(&self, purple: &PurpleData) -> Vec<ProtectEvidence> {
        let reportable = purple.reportable_gains_losses.iter().map(|gl| (gl, true));
        let rest = unreported(&purple.reportable_gains_losses, &purple.all_gains_losses).map(|gl| (gl, false));

        reportable
            .chain(rest)
            .flat_map(|(gain_loss, may_report)| self.gain_loss_evidence(gain_loss, may_report))
            .collect()
    }

    fn gain_loss_evidence(&self, gain_loss: &GainLoss, may_report: bool) -> Vec<ProtectEvidence> {
        self.genes
            .iter()
            .filter(|gene| gene.gene == gain_loss.gene && is_type_match(gene.gene_event, gain_loss))
            .map(|gene| {
                self.factory.evidence(
                    gain_loss,
                    may_report,
                    &gene.event,
                    evidence_type_for(gene.gene_event),
                    None,
                )
            })
            .collect()
    }
}

fn is_type_match(gene_event: GeneEvent, gain_loss: &GainLoss) -> bool {
    if gain_loss.interpretation.is_gain() {
        GAIN_EVENTS.contains(&gene_event)
    } else {
        LOSS_EVENTS.contains(&gene_event)
    }
}
