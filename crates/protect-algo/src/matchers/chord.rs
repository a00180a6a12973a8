//! Homologous-recombination deficiency evidence from CHORD.

use protect_common::actionable::{ActionableCharacteristic, TumorCharacteristicType};
use protect_common::genomic::{ChordData, ChordStatus};
use protect_common::{EvidenceType, ProtectEvidence};
use protect_kb::ActionableEvents;

use super::signature::SignatureFinding;
use crate::personalization::PersonalizedEvidenceFactory;

const HR_DEFICIENCY_EVENT: &str = "HR deficiency";
const HRD_TYPES: [TumorCharacteristicType; 1] = [TumorCharacteristicType::HomologousRecombinationDeficient];

pub struct ChordEvidence<'a> {
    factory: &'a PersonalizedEvidenceFactory,
    characteristics: Vec<&'a ActionableCharacteristic>,
}

impl<'a> ChordEvidence<'a> {
    pub fn new(factory: &'a PersonalizedEvidenceFactory, catalog: &'a ActionableEvents) -> Self {
        Self { factory, characteristics: catalog.characteristics_of(&HRD_TYPES).collect() }
    }

    pub fn evidence(&self, chord: &ChordData) -> Vec<ProtectEvidence> {
        if chord.hr_status != ChordStatus::HrDeficient {
            return Vec::new();
        }

        let finding = SignatureFinding { event: HR_DEFICIENCY_EVENT };
        self.characteristics
            .iter()
            .filter(|rule| rule.passes_cutoff(chord.hrd_value))
            .map(|rule| self.factory.evidence(&finding, true, &rule.event, EvidenceType::Signature, None))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protect_common::actionable::{Cutoff, CutoffType};
    use protect_test_utils::{actionable_event, PATIENT_DOID};
    use std::collections::BTreeSet;

    fn catalog(cutoff: Option<Cutoff>) -> ActionableEvents {
        ActionableEvents {
            characteristics: vec![ActionableCharacteristic {
                characteristic: TumorCharacteristicType::HomologousRecombinationDeficient,
                cutoff,
                event: actionable_event("HRD pos"),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_deficient_sample_matches() {
        let catalog = catalog(None);
        let factory = PersonalizedEvidenceFactory::new(BTreeSet::from([PATIENT_DOID.to_string()]), None);
        let matcher = ChordEvidence::new(&factory, &catalog);

        let evidence = matcher.evidence(&ChordData { hr_status: ChordStatus::HrDeficient, hrd_value: 0.9 });
        assert_eq!(evidence.len(), 1);
        assert_eq!(evidence[0].event, "HR deficiency");
        assert!(evidence[0].reported);
    }

    #[test]
    fn test_proficient_or_below_cutoff_yields_nothing() {
        let cutoff = Cutoff { cutoff_type: CutoffType::EqualOrGreater, value: 0.5 };
        let catalog = catalog(Some(cutoff));
        let factory = PersonalizedEvidenceFactory::new(BTreeSet::from([PATIENT_DOID.to_string()]), None);
        let matcher = ChordEvidence::new(&factory, &catalog);

        assert!(matcher
            .evidence(&ChordData { hr_status: ChordStatus::HrProficient, hrd_value: 0.9 })
            .is_empty());
        assert!(matcher
            .evidence(&ChordData { hr_status: ChordStatus::HrDeficient, hrd_value: 0.4 })
            .is_empty());
    }
}
