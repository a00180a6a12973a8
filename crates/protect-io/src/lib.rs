//! protect-io: File formats at the engine boundary.
//!
//! JSON loaders for the knowledge catalog, the sample's genomic record and
//! the disease-ontology edges, plus the tab-separated evidence file.

pub mod json;
pub mod tsv;

pub use json::{load_actionable_events, load_doid_edges, load_genomic_record};
pub use tsv::{read_evidence, read_evidence_from, write_evidence, write_evidence_to};
