//! Viral-presence evidence.

use protect_common::actionable::{ActionableCharacteristic, TumorCharacteristicType};
use protect_common::genomic::{AnnotatedVirus, VirusInterpretation};
use protect_common::{EvidenceType, ProtectEvidence};
use protect_kb::ActionableEvents;

use crate::personalization::PersonalizedEvidenceFactory;

const VIRUS_TYPES: [TumorCharacteristicType; 5] = [
    TumorCharacteristicType::HpvPositive,
    TumorCharacteristicType::EbvPositive,
    TumorCharacteristicType::McvPositive,
    TumorCharacteristicType::HbvPositive,
    TumorCharacteristicType::Hhv8Positive,
];

pub struct VirusEvidence<'a> {
    factory: &'a PersonalizedEvidenceFactory,
    characteristics: Vec<&'a ActionableCharacteristic>,
}

impl<'a> VirusEvidence<'a> {
    pub fn new(factory: &'a PersonalizedEvidenceFactory, catalog: &'a ActionableEvents) -> Self {
        Self { factory, characteristics: catalog.characteristics_of(&VIRUS_TYPES).collect() }
    }

    pub fn evidence(&self, viruses: &[AnnotatedVirus]) -> Vec<ProtectEvidence> {
        let mut result = Vec::new();
        for virus in viruses {
            let Some(interpretation) = virus.interpretation else {
                continue;
            };
            for rule in self
                .characteristics
                .iter()
                .filter(|c| interpretation_for(c.characteristic) == Some(interpretation))
            {
                result.push(self.factory.evidence(
                    virus,
                    virus.reported,
                    &rule.event,
                    EvidenceType::ViralPresence,
                    None,
                ));
            }
        }
        result
    }
}

fn interpretation_for(characteristic: TumorCharacteristicType) -> Option<VirusInterpretation> {
    match characteristic {
        TumorCharacteristicType::HpvPositive  => Some(VirusInterpretation::Hpv),
        TumorCharacteristicType::EbvPositive  => Some(VirusInterpretation::Ebv),
        TumorCharacteristicType::McvPositive  => Some(VirusInterpretation::Mcv),
        TumorCharacteristicType::HbvPositive  => Some(VirusInterpretation::Hbv),
        TumorCharacteristicType::Hhv8Positive => Some(VirusInterpretation::Hhv8),
        _ => None,
    }
}
