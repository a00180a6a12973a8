//! Engine configuration handed to `ProtectAlgo` at construction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use protect_common::genomic::PurpleQcStatus;
use protect_common::EvidenceLevel;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlgoConfig {
    #[serde(default)]
    pub reporting: ReportingConfig,
    #[serde(default)]
    pub wild_type: WildTypeConfig,
}

/// Reporting policy knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportingConfig {
    /// Evidence weaker than this level is never reported.
    #[serde(default = "default_max_reportable_level")]
    pub max_reportable_level: EvidenceLevel,
    /// Keep off-label trials reported (diagnostic runs only).
    #[serde(default)]
    pub report_off_label_trials: bool,
}

fn default_max_reportable_level() -> EvidenceLevel { EvidenceLevel::D }

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            max_reportable_level: default_max_reportable_level(),
            report_off_label_trials: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WildTypeConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// QC statuses under which no wild-type claim is made.
    #[serde(default = "default_failure_qc_statuses")]
    pub failure_qc_statuses: BTreeSet<PurpleQcStatus>,
}

fn default_true() -> bool { true }

fn default_failure_qc_statuses() -> BTreeSet<PurpleQcStatus> {
    BTreeSet::from([PurpleQcStatus::FailContamination, PurpleQcStatus::FailNoTumor])
}

impl Default for WildTypeConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            failure_qc_statuses: default_failure_qc_statuses(),
        }
    }
}

impl WildTypeConfig {
    /// Is wild-type calling meaningful for a sample with these QC statuses?
    pub fn allows(&self, qc_status: &BTreeSet<PurpleQcStatus>) -> bool {
        self.enabled && qc_status.is_disjoint(&self.failure_qc_statuses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reporting_is_permissive() {
        let reporting = ReportingConfig::default();
        assert_eq!(reporting.max_reportable_level, EvidenceLevel::D);
        assert!(!reporting.report_off_label_trials);
    }

    #[test]
    fn test_wild_type_blocked_on_failure_status() {
        let config = WildTypeConfig::default();
        assert!(config.allows(&BTreeSet::from([PurpleQcStatus::Pass])));
        assert!(config.allows(&BTreeSet::from([PurpleQcStatus::WarnLowPurity])));
        assert!(!config.allows(&BTreeSet::from([PurpleQcStatus::FailNoTumor])));
        assert!(!config.allows(&BTreeSet::from([PurpleQcStatus::Pass, PurpleQcStatus::FailContamination])));
    }

    #[test]
    fn test_disabled_wild_type_never_allows() {
        let config = WildTypeConfig { enabled: false, ..Default::default() };
        assert!(!config.allows(&BTreeSet::from([PurpleQcStatus::Pass])));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AlgoConfig = toml::from_str(
            r#"
            [reporting]
            max_reportable_level = "B"

            [wild_type]
            failure_qc_statuses = ["FAIL_NO_TUMOR"]
            "#,
        )
        .unwrap();
        assert_eq!(config.reporting.max_reportable_level, EvidenceLevel::B);
        assert!(!config.reporting.report_off_label_trials);
        assert!(config.wild_type.enabled);
        assert_eq!(config.wild_type.failure_qc_statuses, BTreeSet::from([PurpleQcStatus::FailNoTumor]));
    }
}
