//! protect-kb: Knowledge catalog and disease-ontology closure.

pub mod catalog;
pub mod doid;

pub use catalog::ActionableEvents;
pub use doid::{DoidEdge, DoidParents};
