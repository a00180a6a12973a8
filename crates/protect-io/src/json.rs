//! JSON loaders for the engine inputs.
//!
//! Every collection in these documents is required; a missing one fails the
//! load before any matching starts.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use protect_common::{GenomicRecord, Result};
use protect_kb::{ActionableEvents, DoidEdge};

fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_actionable_events(path: &Path) -> Result<ActionableEvents> {
    let catalog: ActionableEvents = load(path)?;
    info!("Loaded {} actionable events from {}", catalog.len(), path.display());
    Ok(catalog)
}

pub fn load_genomic_record(path: &Path) -> Result<GenomicRecord> {
    let record: GenomicRecord = load(path)?;
    info!(
        "Loaded sample {}: {} somatic variants, {} gains/losses, {} fusions",
        record.sample_id,
        record.purple.all_somatic_variants.len(),
        record.purple.all_gains_losses.len(),
        record.linx.all_fusions.len()
    );
    Ok(record)
}

pub fn load_doid_edges(path: &Path) -> Result<Vec<DoidEdge>> {
    let edges: Vec<DoidEdge> = load(path)?;
    info!("Loaded {} disease ontology edges from {}", edges.len(), path.display());
    Ok(edges)
}
