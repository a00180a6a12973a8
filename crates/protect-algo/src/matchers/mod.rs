//! Category matchers. Each pairs one category of genomic findings with the
//! matching catalog partition and emits raw evidence.
//!
//! The set of producers is closed: `EvidenceProducer` has one variant per
//! category, run by the orchestrator in a fixed sequence.

pub mod chord;
pub mod copy_number;
pub mod disruption;
pub mod fusion;
pub mod hla;
pub mod signature;
pub mod variant;
pub mod virus;
pub mod wild_type;

use protect_common::actionable::GeneEvent;
use protect_common::{EvidenceType, GenomicRecord, ProtectEvidence};
use protect_kb::ActionableEvents;

use crate::config::WildTypeConfig;
use crate::personalization::PersonalizedEvidenceFactory;

pub use chord::ChordEvidence;
pub use copy_number::CopyNumberEvidence;
pub use disruption::DisruptionEvidence;
pub use fusion::FusionEvidence;
pub use hla::HlaEvidence;
pub use signature::SignatureEvidence;
pub use variant::VariantEvidence;
pub use virus::VirusEvidence;
pub use wild_type::WildTypeEvidence;

/// Evidence type recorded for a gene-level rule.
pub fn evidence_type_for(gene_event: GeneEvent) -> EvidenceType {
    match gene_event {
        GeneEvent::Amplification     => EvidenceType::Amplification,
        GeneEvent::OverExpression    => EvidenceType::OverExpression,
        GeneEvent::PresenceOfProtein => EvidenceType::PresenceOfProtein,
        GeneEvent::Deletion          => EvidenceType::Deletion,
        GeneEvent::UnderExpression   => EvidenceType::UnderExpression,
        GeneEvent::AbsenceOfProtein  => EvidenceType::AbsenceOfProtein,
        GeneEvent::Activation        => EvidenceType::Activation,
        GeneEvent::Inactivation      => EvidenceType::Inactivation,
        GeneEvent::AnyMutation       => EvidenceType::AnyMutation,
        GeneEvent::Fusion            => EvidenceType::PromiscuousFusion,
        GeneEvent::WildType          => EvidenceType::WildType,
    }
}

pub enum EvidenceProducer<'a> {
    Variant(VariantEvidence<'a>),
    CopyNumber(CopyNumberEvidence<'a>),
    Disruption(DisruptionEvidence<'a>),
    Fusion(FusionEvidence<'a>),
    Signature(SignatureEvidence<'a>),
    Virus(VirusEvidence<'a>),
    Chord(ChordEvidence<'a>),
    Hla(HlaEvidence<'a>),
    WildType(WildTypeEvidence<'a>),
}

impl<'a> EvidenceProducer<'a> {
    /// All producers, in the order the orchestrator runs them.
    pub fn all(
        factory: &'a PersonalizedEvidenceFactory,
        catalog: &'a ActionableEvents,
        wild_type: &'a WildTypeConfig,
    ) -> Vec<EvidenceProducer<'a>> {
        vec![
            EvidenceProducer::Variant(VariantEvidence::new(factory, catalog)),
            EvidenceProducer::CopyNumber(CopyNumberEvidence::new(factory, catalog)),
            EvidenceProducer::Disruption(DisruptionEvidence::new(factory, catalog)),
            EvidenceProducer::Fusion(FusionEvidence::new(factory, catalog)),
            EvidenceProducer::Signature(SignatureEvidence::new(factory, catalog)),
            EvidenceProducer::Virus(VirusEvidence::new(factory, catalog)),
            EvidenceProducer::Chord(ChordEvidence::new(factory, catalog)),
            EvidenceProducer::Hla(HlaEvidence::new(factory, catalog)),
            EvidenceProducer::WildType(WildTypeEvidence::new(factory, catalog, wild_type)),
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EvidenceProducer::Variant(_)    => "variant",
            EvidenceProducer::CopyNumber(_) => "copy number",
            EvidenceProducer::Disruption(_) => "disruption",
            EvidenceProducer::Fusion(_)     => "fusion",
            EvidenceProducer::Signature(_)  => "signature",
            EvidenceProducer::Virus(_)      => "virus",
            EvidenceProducer::Chord(_)      => "HR deficiency",
            EvidenceProducer::Hla(_)        => "HLA",
            EvidenceProducer::WildType(_)   => "wild-type",
        }
    }

    /// Raw evidence for this producer's category. Never fails: a finding
    /// without a matching rule simply contributes nothing.
    pub fn produce(&self, record: &GenomicRecord) -> Vec<ProtectEvidence> {
        match self {
            EvidenceProducer::Variant(p)    => p.evidence(&record.purple),
            EvidenceProducer::CopyNumber(p) => p.evidence(&record.purple),
            EvidenceProducer::Disruption(p) => p.evidence(&record.linx),
            EvidenceProducer::Fusion(p)     => p.evidence(&record.linx),
            EvidenceProducer::Signature(p)  => p.evidence(&record.purple.characteristics),
            EvidenceProducer::Virus(p)      => p.evidence(&record.viruses),
            EvidenceProducer::Chord(p)      => p.evidence(&record.chord),
            EvidenceProducer::Hla(p)        => p.evidence(&record.lilac),
            EvidenceProducer::WildType(p)   => p.evidence(record),
        }
    }
}
