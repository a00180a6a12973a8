//! Mutational-signature evidence: microsatellite status, tumor mutational
//! load and burden.

use protect_common::actionable::{ActionableCharacteristic, TumorCharacteristicType};
use protect_common::genomic::{MicrosatelliteStatus, PurpleCharacteristics, TumorMutationalStatus};
use protect_common::{EvidenceType, GenomicFinding, ProtectEvidence};
use protect_kb::ActionableEvents;

use crate::personalization::PersonalizedEvidenceFactory;

const SIGNATURE_TYPES: [TumorCharacteristicType; 6] = [
    TumorCharacteristicType::MicrosatelliteUnstable,
    TumorCharacteristicType::MicrosatelliteStable,
    TumorCharacteristicType::HighTumorMutationalLoad,
    TumorCharacteristicType::LowTumorMutationalLoad,
    TumorCharacteristicType::HighTumorMutationalBurden,
    TumorCharacteristicType::LowTumorMutationalBurden,
];

/// A sample-level signature call. Carries no gene identity.
pub(crate) struct SignatureFinding {
    pub(crate) event: &'static str,
}

impl GenomicFinding for SignatureFinding {
    fn gene(&self) -> Option<&str> {
        None
    }

    fn event(&self) -> String {
        self.event.to_string()
    }
}

pub struct SignatureEvidence<'a> {
    factory: &'a PersonalizedEvidenceFactory,
    characteristics: Vec<&'a ActionableCharacteristic>,
}

impl<'a> SignatureEvidence<'a> {
    pub fn new(factory: &'a PersonalizedEvidenceFactory, catalog: &'a ActionableEvents) -> Self {
        Self { factory, characteristics: catalog.characteristics_of(&SIGNATURE_TYPES).collect() }
    }

    pub fn evidence(&self, purple: &PurpleCharacteristics) -> Vec<ProtectEvidence> {
        self.characteristics
            .iter()
            .filter_map(|rule| {
                let event = signature_event(rule, purple)?;
                let finding = SignatureFinding { event };
                Some(self.factory.evidence(&finding, true, &rule.event, EvidenceType::Signature, None))
            })
            .collect()
    }
}

/// Event label when the sample carries the rule's signature, `None` otherwise.
/// The sample's status must agree with the rule, and a cutoff, if any, must
/// pass against the measured value.
fn signature_event(rule: &ActionableCharacteristic, purple: &PurpleCharacteristics) -> Option<&'static str> {
    let (matches, measured, event) = match rule.characteristic {
        TumorCharacteristicType::MicrosatelliteUnstable => (
            purple.microsatellite_status == MicrosatelliteStatus::Msi,
            purple.microsatellite_indels_per_mb,
            "Microsatellite unstable",
        ),
        TumorCharacteristicType::MicrosatelliteStable => (
            purple.microsatellite_status == MicrosatelliteStatus::Mss,
            purple.microsatellite_indels_per_mb,
            "Microsatellite stable",
        ),
        TumorCharacteristicType::HighTumorMutationalLoad => (
            purple.tumor_mutational_load_status == TumorMutationalStatus::High,
            f64::from(purple.tumor_mutational_load),
            "High tumor mutational load",
        ),
        TumorCharacteristicType::LowTumorMutationalLoad => (
            purple.tumor_mutational_load_status == TumorMutationalStatus::Low,
            f64::from(purple.tumor_mutational_load),
            "Low tumor mutational load",
        ),
        TumorCharacteristicType::HighTumorMutationalBurden => (
            purple.tumor_mutational_burden_status == TumorMutationalStatus::High,
            purple.tumor_mutational_burden_per_mb,
            "High tumor mutational burden",
        ),
        TumorCharacteristicType::LowTumorMutationalBurden => (
            purple.tumor_mutational_burden_status == TumorMutationalStatus::Low,
            purple.tumor_mutational_burden_per_mb,
            "Low tumor mutational burden",
        ),
        _ => return None,
    };

    (matches && rule.passes_cutoff(measured)).then_some(event)
}
