//! protect-common: Shared data model, errors and orderings used across all PROTECT crates.

pub mod error;
pub mod evidence;
pub mod actionable;
pub mod genomic;
pub mod ordering;

// Re-export commonly used types
pub use error::{ProtectError, Result};
pub use evidence::{
    ClinicalTrial, EvidenceDirection, EvidenceLevel, EvidenceType, Gender, GenderCriterium,
    Intervention, Knowledgebase, KnowledgebaseSource, ProtectEvidence, Treatment,
};
pub use genomic::{GenomicFinding, GenomicRecord};
