//! protect-algo: Evidence matching engine.
//! Matches a sample's genomic findings against the knowledge catalog, then
//! personalizes, consolidates and filters the resulting evidence.

pub mod algo;
pub mod config;
pub mod consolidation;
pub mod key;
pub mod matchers;
pub mod personalization;
pub mod reporting;

pub use algo::{ProtectAlgo, ProtectAlgoBuilder};
pub use config::{AlgoConfig, ReportingConfig, WildTypeConfig};
pub use key::EvidenceKey;
pub use personalization::PersonalizedEvidenceFactory;
