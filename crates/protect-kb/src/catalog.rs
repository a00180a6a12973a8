//! Knowledge catalog: the loaded actionable events, partitioned by category.
//! Read-only to the matching engine.

use serde::{Deserialize, Serialize};
use tracing::info;

use protect_common::actionable::{
    ActionableCharacteristic, ActionableEvent, ActionableFusion, ActionableGene, ActionableHla,
    ActionableHotspot, ActionableRange, GeneEvent, TumorCharacteristicType,
};
use protect_common::{ProtectError, Result};

/// All catalog partitions. Every partition is required when deserializing;
/// an empty partition must be given as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionableEvents {
    pub hotspots: Vec<ActionableHotspot>,
    pub codons: Vec<ActionableRange>,
    pub exons: Vec<ActionableRange>,
    pub genes: Vec<ActionableGene>,
    pub fusions: Vec<ActionableFusion>,
    pub characteristics: Vec<ActionableCharacteristic>,
    pub hla: Vec<ActionableHla>,
}

impl ActionableEvents {
    /// Total number of rules across all partitions.
    pub fn len(&self) -> usize {
        self.hotspots.len()
            + self.codons.len()
            + self.exons.len()
            + self.genes.len()
            + self.fusions.len()
            + self.characteristics.len()
            + self.hla.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gene-level rules of the given kinds.
    pub fn genes_with_events<'a>(
        &'a self,
        events: &'a [GeneEvent],
    ) -> impl Iterator<Item = &'a ActionableGene> + 'a {
        self.genes.iter().filter(move |g| events.contains(&g.gene_event))
    }

    /// Characteristic rules of the given types.
    pub fn characteristics_of<'a>(
        &'a self,
        types: &'a [TumorCharacteristicType],
    ) -> impl Iterator<Item = &'a ActionableCharacteristic> + 'a {
        self.characteristics.iter().filter(move |c| types.contains(&c.characteristic))
    }

    /// Check structural consistency of every rule.
    pub fn validate(&self) -> Result<()> {
        for range in self.codons.iter().chain(self.exons.iter()) {
            if range.start > range.end {
                return Err(ProtectError::InvalidCatalog(format!(
                    "range {}:{}-{} on {} has start after end",
                    range.gene, range.start, range.end, range.transcript
                )));
            }
            validate_event(&range.event)?;
        }

        for fusion in &self.fusions {
            if !window_is_ordered(fusion.min_exon_up, fusion.max_exon_up)
                || !window_is_ordered(fusion.min_exon_down, fusion.max_exon_down)
            {
                return Err(ProtectError::InvalidCatalog(format!(
                    "fusion {} - {} has an inverted exon window",
                    fusion.gene_up, fusion.gene_down
                )));
            }
            validate_event(&fusion.event)?;
        }

        for hotspot in &self.hotspots {
            validate_event(&hotspot.event)?;
        }
        for gene in &self.genes {
            validate_event(&gene.event)?;
        }
        for characteristic in &self.characteristics {
            validate_event(&characteristic.event)?;
        }
        for hla in &self.hla {
            validate_event(&hla.event)?;
        }
        Ok(())
    }

    pub fn log_summary(&self) {
        info!(
            "Knowledge catalog: {} hotspots, {} codons, {} exons, {} genes, {} fusions, {} characteristics, {} HLA",
            self.hotspots.len(),
            self.codons.len(),
            self.exons.len(),
            self.genes.len(),
            self.fusions.len(),
            self.characteristics.len(),
            self.hla.len()
        );
    }
}

fn window_is_ordered(min: Option<u32>, max: Option<u32>) -> bool {
    match (min, max) {
        (Some(min), Some(max)) => min <= max,
        _ => true,
    }
}

fn validate_event(event: &ActionableEvent) -> Result<()> {
    if event.applicable_cancer_type.doid.trim().is_empty() {
        return Err(ProtectError::InvalidCatalog(format!(
            "event '{}' from {} has no applicable cancer doid",
            event.source_event, event.knowledgebase
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use protect_common::actionable::{CancerType, MutationTypeFilter};
    use protect_common::{EvidenceDirection, EvidenceLevel, Intervention, Knowledgebase, Treatment};
    use std::collections::BTreeSet;

    fn event(doid: &str) -> ActionableEvent {
        ActionableEvent {
            knowledgebase: Knowledgebase::ViccCivic,
            source_event: "BRAF V600E".to_string(),
            source_urls: BTreeSet::new(),
            intervention: Intervention::Treatment(Treatment::new("Vemurafenib")),
            applicable_cancer_type: CancerType { name: "Melanoma".to_string(), doid: doid.to_string() },
            blacklist_cancer_types: BTreeSet::new(),
            level: EvidenceLevel::A,
            direction: EvidenceDirection::Responsive,
            evidence_urls: BTreeSet::new(),
        }
    }

    fn codon(start: u32, end: u32) -> ActionableRange {
        ActionableRange {
            gene: "BRAF".to_string(),
            transcript: "ENST00000288602".to_string(),
            start,
            end,
            rank: 600,
            applicable_mutation_type: MutationTypeFilter::Any,
            event: event("1909"),
        }
    }

    #[test]
    fn test_valid_catalog_passes() {
        let catalog = ActionableEvents { codons: vec![codon(600, 600)], ..Default::default() };
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let catalog = ActionableEvents { codons: vec![codon(601, 600)], ..Default::default() };
        assert!(matches!(catalog.validate(), Err(ProtectError::InvalidCatalog(_))));
    }

    #[test]
    fn test_missing_doid_rejected() {
        let mut range = codon(600, 600);
        range.event = event(" ");
        let catalog = ActionableEvents { exons: vec![range], ..Default::default() };
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_missing_partition_fails_to_deserialize() {
        let json = r#"{"hotspots": [], "codons": [], "exons": [], "genes": [], "fusions": [], "characteristics": []}"#;
        assert!(serde_json::from_str::<ActionableEvents>(json).is_err());
    }
}
