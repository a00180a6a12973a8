//! PROTECT: Personalized oncology treatment evidence.
//! Entry point for the batch binary: one sample per invocation.

mod config;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use protect_algo::ProtectAlgo;
use protect_kb::DoidParents;

fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("protect=info,info")),
        )
        .init();

    info!("PROTECT starting up...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::load().context("Failed to load configuration")?;
    let inputs = &config.inputs;

    let catalog = protect_io::load_actionable_events(&inputs.actionable_events)
        .with_context(|| format!("Failed to load actionable events from {}", inputs.actionable_events.display()))?;
    let record = protect_io::load_genomic_record(&inputs.genomic_record)
        .with_context(|| format!("Failed to load genomic record from {}", inputs.genomic_record.display()))?;
    let edges = protect_io::load_doid_edges(&inputs.doid_edges)
        .with_context(|| format!("Failed to load doid edges from {}", inputs.doid_edges.display()))?;

    if inputs.patient_gender.is_none() {
        warn!("Patient gender unknown; trial gender applicability will not be evaluated");
    }

    let doids = DoidParents::from_edges(edges);
    let algo = ProtectAlgo::builder()
        .catalog(catalog)
        .primary_tumor_doids(&doids, &inputs.primary_tumor_doids)
        .gender(inputs.patient_gender)
        .config(config.algo_config())
        .build()
        .context("Failed to initialise evidence engine")?;

    let evidences = algo.run(&record);

    let output = &config.output.evidence_tsv;
    protect_io::write_evidence(output, &evidences)
        .with_context(|| format!("Failed to write evidence to {}", output.display()))?;

    info!(
        "Sample {}: {} evidence items, {} reported, written to {}",
        record.sample_id,
        evidences.len(),
        evidences.iter().filter(|e| e.reported).count(),
        output.display()
    );
    Ok(())
}
