//! Wild-type evidence: driver genes without any reportable alteration.
//!
//! Suppressed entirely when the sample's QC indicates contamination or
//! insufficient tumor content.

use std::collections::BTreeSet;

use tracing::debug;

use protect_common::actionable::{ActionableGene, GeneEvent};
use protect_common::{EvidenceType, GenomicFinding, GenomicRecord, ProtectEvidence};
use protect_kb::ActionableEvents;

use crate::config::WildTypeConfig;
use crate::personalization::PersonalizedEvidenceFactory;

const WILD_TYPE_EVENTS: [GeneEvent; 1] = [GeneEvent::WildType];

struct WildTypeGene<'a> {
    gene: &'a str,
}

impl GenomicFinding for WildTypeGene<'_> {
    fn gene(&self) -> Option<&str> {
        Some(self.gene)
    }

    fn event(&self) -> String {
        "wild-type".to_string()
    }
}

pub struct WildTypeEvidence<'a> {
    factory: &'a PersonalizedEvidenceFactory,
    genes: Vec<&'a ActionableGene>,
    config: &'a WildTypeConfig,
}

impl<'a> WildTypeEvidence<'a> {
    pub fn new(
        factory: &'a PersonalizedEvidenceFactory,
        catalog: &'a ActionableEvents,
        config: &'a WildTypeConfig,
    ) -> Self {
        Self { factory, genes: catalog.genes_with_events(&WILD_TYPE_EVENTS).collect(), config }
    }

    pub fn evidence(&self, record: &GenomicRecord) -> Vec<ProtectEvidence> {
        if !self.config.allows(&record.purple.qc_status) {
            debug!(sample = %record.sample_id, qc = ?record.purple.qc_status, "Wild-type calling suppressed");
            return Vec::new();
        }

        let altered = altered_genes(record);
        self.genes
            .iter()
            .filter(|rule| record.driver_genes.contains(&rule.gene) && !altered.contains(rule.gene.as_str()))
            .map(|rule| {
                let finding = WildTypeGene { gene: &rule.gene };
                self.factory.evidence(&finding, true, &rule.event, EvidenceType::WildType, None)
            })
            .collect()
    }
}

/// Genes with at least one reportable alteration in this sample.
fn altered_genes(record: &GenomicRecord) -> BTreeSet<&str> {
    let purple = &record.purple;
    let linx = &record.linx;

    let mut altered: BTreeSet<&str> = purple
        .reportable_somatic_variants
        .iter()
        .chain(purple.reportable_germline_variants.iter())
        .map(|v| v.gene.as_str())
        .collect();
    altered.extend(purple.reportable_gains_losses.iter().map(|gl| gl.gene.as_str()));
    for fusion in &linx.reportable_fusions {
        altered.insert(&fusion.gene_start);
        altered.insert(&fusion.gene_end);
    }
    altered.extend(linx.homozygous_disruptions.iter().map(|d| d.gene.as_str()));
    altered.extend(linx.reportable_gene_disruptions.iter().map(|d| d.gene.as_str()));
    altered
}

#[cfg(test)]
mod tests {
    use super::*;
    use protect_common::genomic::PurpleQcStatus;
    use protect_test_utils::{actionable_event, genomic_record, variant, PATIENT_DOID};

    fn catalog() -> ActionableEvents {
        ActionableEvents {
            genes: ["KRAS", "NRAS", "BRAF"]
                .iter()
                .map(|gene| ActionableGene {
                    gene: gene.to_string(),
                    gene_event: GeneEvent::WildType,
                    event: actionable_event(&format!("{gene} wild-type")),
                })
                .collect(),
            ..Default::default()
        }
    }

    fn factory() -> PersonalizedEvidenceFactory {
        PersonalizedEvidenceFactory::new(BTreeSet::from([PATIENT_DOID.to_string()]), None)
    }

    #[test]
    fn test_unaltered_driver_genes_are_wild_type() {
        let catalog = catalog();
        let factory = factory();
        let config = WildTypeConfig::default();
        let matcher = WildTypeEvidence::new(&factory, &catalog, &config);

        let mut record = genomic_record();
        record.driver_genes = BTreeSet::from(["KRAS".to_string(), "BRAF".to_string()]);
        let braf = variant("BRAF", "p.Val600Glu");
        record.purple.reportable_somatic_variants = vec![braf.clone()];
        record.purple.all_somatic_variants = vec![braf];

        let evidence = matcher.evidence(&record);
        assert_eq!(evidence.len(), 1);
        assert_eq!(evidence[0].gene.as_deref(), Some("KRAS"));
        assert_eq!(evidence[0].event, "wild-type");
        assert!(evidence[0].reported);
    }

    #[test]
    fn test_failed_qc_suppresses_wild_type() {
        let catalog = catalog();
        let factory = factory();
        let config = WildTypeConfig::default();
        let matcher = WildTypeEvidence::new(&factory, &catalog, &config);

        let mut record = genomic_record();
        record.driver_genes = BTreeSet::from(["KRAS".to_string(), "NRAS".to_string()]);
        record.purple.qc_status = BTreeSet::from([PurpleQcStatus::FailContamination]);
        assert!(matcher.evidence(&record).is_empty());

        record.purple.qc_status = BTreeSet::from([PurpleQcStatus::WarnLowPurity, PurpleQcStatus::FailNoTumor]);
        assert!(matcher.evidence(&record).is_empty());
    }

    #[test]
    fn test_disabled_config_suppresses_wild_type() {
        let catalog = catalog();
        let factory = factory();
        let config = WildTypeConfig { enabled: false, ..Default::default() };
        let matcher = WildTypeEvidence::new(&factory, &catalog, &config);

        let mut record = genomic_record();
        record.driver_genes = BTreeSet::from(["KRAS".to_string()]);
        assert!(matcher.evidence(&record).is_empty());
    }
}
