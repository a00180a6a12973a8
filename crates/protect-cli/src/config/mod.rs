//! Configuration loading for PROTECT.
//! Reads protect.toml from the current directory or path in PROTECT_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use protect_algo::{AlgoConfig, ReportingConfig, WildTypeConfig};
use protect_common::Gender;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub inputs: InputsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub reporting: ReportingConfig,
    #[serde(default)]
    pub wild_type: WildTypeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputsConfig {
    /// Knowledge catalog, JSON.
    pub actionable_events: PathBuf,
    /// The sample's genomic findings, JSON.
    pub genomic_record: PathBuf,
    /// Disease-ontology (child, parent) edges, JSON.
    pub doid_edges: PathBuf,
    #[serde(default)]
    pub primary_tumor_doids: BTreeSet<String>,
    #[serde(default)]
    pub patient_gender: Option<Gender>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_evidence_tsv")]
    pub evidence_tsv: PathBuf,
}

fn default_evidence_tsv() -> PathBuf { PathBuf::from("protect.tsv") }

impl Default for OutputConfig {
    fn default() -> Self {
        Self { evidence_tsv: default_evidence_tsv() }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("PROTECT_CONFIG")
            .unwrap_or_else(|_| "protect.toml".to_string());

        if !Path::new(&path).exists() {
            anyhow::bail!(
                "Config file not found: {}\n\
                 Copy protect.example.toml to protect.toml and edit it.",
                path
            );
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn algo_config(&self) -> AlgoConfig {
        AlgoConfig {
            reporting: self.reporting.clone(),
            wild_type: self.wild_type.clone(),
        }
    }
}
