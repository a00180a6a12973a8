//! Evidence pipeline: match, consolidate, filter, sort.

use std::collections::BTreeSet;

use tracing::{debug, info};

use protect_common::ordering::sort_evidence;
use protect_common::{Gender, GenomicRecord, ProtectError, ProtectEvidence, Result};
use protect_kb::{ActionableEvents, DoidParents};

use crate::config::AlgoConfig;
use crate::consolidation::consolidate;
use crate::matchers::EvidenceProducer;
use crate::personalization::PersonalizedEvidenceFactory;
use crate::reporting::EvidenceReportingFilter;

/// The matching engine for one patient. Holds no per-sample state, so one
/// instance can process any number of records.
pub struct ProtectAlgo {
    catalog: ActionableEvents,
    factory: PersonalizedEvidenceFactory,
    config: AlgoConfig,
}

impl ProtectAlgo {
    pub fn builder() -> ProtectAlgoBuilder {
        ProtectAlgoBuilder::default()
    }

    pub fn patient_tumor_doids(&self) -> &BTreeSet<String> {
        self.factory.patient_tumor_doids()
    }

    /// Final, sorted evidence for one sample.
    pub fn run(&self, record: &GenomicRecord) -> Vec<ProtectEvidence> {
        let mut raw = Vec::new();
        for producer in EvidenceProducer::all(&self.factory, &self.catalog, &self.config.wild_type) {
            let evidences = producer.produce(record);
            debug!(sample = %record.sample_id, "{} evidence: {}", producer.name(), evidences.len());
            raw.extend(evidences);
        }

        let raw_count = raw.len();
        let consolidated = consolidate(raw);
        let mut evidences = EvidenceReportingFilter::new(&self.config.reporting).apply(consolidated);
        sort_evidence(&mut evidences);

        info!(
            sample = %record.sample_id,
            raw = raw_count,
            consolidated = evidences.len(),
            reported = evidences.iter().filter(|e| e.reported).count(),
            "Evidence generated"
        );
        evidences
    }
}

#[derive(Default)]
pub struct ProtectAlgoBuilder {
    catalog: Option<ActionableEvents>,
    patient_tumor_doids: Option<BTreeSet<String>>,
    patient_gender: Option<Gender>,
    config: AlgoConfig,
}

impl ProtectAlgoBuilder {
    pub fn catalog(mut self, catalog: ActionableEvents) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Expand the patient's primary tumor doids to all ontology ancestors.
    pub fn primary_tumor_doids(self, doids: &DoidParents, primary: &BTreeSet<String>) -> Self {
        self.patient_tumor_doids(doids.expanded_tumor_types(primary))
    }

    /// Already-expanded tumor doids.
    pub fn patient_tumor_doids(mut self, expanded: BTreeSet<String>) -> Self {
        self.patient_tumor_doids = Some(expanded);
        self
    }

    pub fn gender(mut self, gender: Option<Gender>) -> Self {
        self.patient_gender = gender;
        self
    }

    pub fn config(mut self, config: AlgoConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<ProtectAlgo> {
        let catalog = self.catalog.ok_or(ProtectError::MissingInput("actionable events"))?;
        let doids = self.patient_tumor_doids.ok_or(ProtectError::MissingInput("patient tumor doids"))?;
        catalog.validate()?;
        catalog.log_summary();
        info!("Patient tumor doids: {}", doids.iter().cloned().collect::<Vec<_>>().join(";"));

        Ok(ProtectAlgo {
            catalog,
            factory: PersonalizedEvidenceFactory::new(doids, self.patient_gender),
            config: self.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_catalog_and_doids() {
        let missing_catalog = ProtectAlgo::builder().patient_tumor_doids(BTreeSet::new()).build();
        assert!(matches!(missing_catalog, Err(ProtectError::MissingInput("actionable events"))));

        let missing_doids = ProtectAlgo::builder().catalog(ActionableEvents::default()).build();
        assert!(matches!(missing_doids, Err(ProtectError::MissingInput("patient tumor doids"))));
    }

    #[test]
    fn test_primary_doids_are_expanded() {
        let doids = DoidParents::from_edges([
            protect_kb::DoidEdge::new("1909", "4159"),
            protect_kb::DoidEdge::new("4159", "162"),
        ]);
        let algo = ProtectAlgo::builder()
            .catalog(ActionableEvents::default())
            .primary_tumor_doids(&doids, &BTreeSet::from(["1909".to_string()]))
            .build()
            .unwrap();

        let expected: BTreeSet<String> = ["1909", "4159", "162"].iter().map(|s| s.to_string()).collect();
        assert_eq!(algo.patient_tumor_doids(), &expected);
    }
}
