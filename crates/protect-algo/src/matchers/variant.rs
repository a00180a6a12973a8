//! Small-variant evidence: hotspots, codon and exon ranges, gene-level rules.

use protect_common::actionable::{ActionableGene, ActionableHotspot, ActionableRange, GeneEvent};
use protect_common::genomic::{unreported, PurpleData, Variant};
use protect_common::{EvidenceType, ProtectEvidence};
use protect_kb::ActionableEvents;

use super::evidence_type_for;
use crate::personalization::PersonalizedEvidenceFactory;

const VARIANT_GENE_EVENTS: [GeneEvent; 3] =
    [GeneEvent::Activation, GeneEvent::Inactivation, GeneEvent::AnyMutation];

pub struct VariantEvidence<'a> {
    factory: &'a PersonalizedEvidenceFactory,
    hotspots: &'a [ActionableHotspot],
    codons: &'a [ActionableRange],
    exons: &'a [ActionableRange],
    genes: Vec<&'a ActionableGene>,
}

impl<'a> VariantEvidence<'a> {
    pub fn new(factory: &'a PersonalizedEvidenceFactory, catalog: &'a ActionableEvents) -> Self {
        Self {
            factory,
            hotspots: &catalog.hotspots,
            codons: &catalog.codons,
            exons: &catalog.exons,
            genes: catalog.genes_with_events(&VARIANT_GENE_EVENTS).collect(),
        }
    }

    pub fn evidence(&self, purple: &PurpleData) -> Vec<ProtectEvidence> {
        let mut result = Vec::new();
        for variant in purple
            .reportable_somatic_variants
            .iter()
            .chain(purple.reportable_germline_variants.iter())
        {
            result.extend(self.variant_evidence(variant, true));
        }
        for variant in unreported(&purple.reportable_somatic_variants, &purple.all_somatic_variants)
            .chain(unreported(&purple.reportable_germline_variants, &purple.all_germline_variants))
        {
            result.extend(self.variant_evidence(variant, false));
        }
        result
    }

    fn variant_evidence(&self, variant: &Variant, may_report: bool) -> Vec<ProtectEvidence> {
        let mut result = Vec::new();
        // Range and gene-level rules only report high-likelihood drivers.
        let report_driver = may_report && variant.is_high_driver();

        for hotspot in self.hotspots.iter().filter(|h| hotspot_match(h, variant)) {
            result.push(self.factory.evidence(
                variant,
                may_report,
                &hotspot.event,
                EvidenceType::HotspotMutation,
                None,
            ));
        }

        for codon in self.codons.iter().filter(|r| range_match(r, variant, variant.affected_codon)) {
            result.push(self.factory.evidence(
                variant,
                report_driver,
                &codon.event,
                EvidenceType::CodonMutation,
                Some(codon.rank),
            ));
        }

        for exon in self.exons.iter().filter(|r| range_match(r, variant, variant.affected_exon)) {
            result.push(self.factory.evidence(
                variant,
                report_driver,
                &exon.event,
                EvidenceType::ExonMutation,
                Some(exon.rank),
            ));
        }

        for gene in self.genes.iter().filter(|g| g.gene == variant.gene) {
            result.push(self.factory.evidence(
                variant,
                report_driver,
                &gene.event,
                evidence_type_for(gene.gene_event),
                None,
            ));
        }

        result
    }
}

fn hotspot_match(hotspot: &ActionableHotspot, variant: &Variant) -> bool {
    hotspot.gene == variant.gene
        && hotspot.chromosome == variant.chromosome
        && hotspot.position == variant.position
        && hotspot.ref_allele == variant.ref_allele
        && hotspot.alt_allele == variant.alt_allele
}

fn range_match(range: &ActionableRange, variant: &Variant, affected: Option<u32>) -> bool {
    range.gene == variant.gene
        && range.transcript == variant.transcript
        && affected.map_or(false, |value| range.contains(value))
        && range.applicable_mutation_type.accepts(variant.coding_effect)
}
