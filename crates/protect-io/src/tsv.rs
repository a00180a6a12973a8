//! Tab-separated evidence file.
//!
//! Nullable scalars are written as empty strings, sets are joined with `,`.
//! Each citation is `name|sourceEvent|sourceUrls|evidenceType|[rangeRank]|evidenceUrls`
//! with the rank field present only when set; citations are joined with `;`.

use std::collections::BTreeSet;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use tracing::{debug, info, warn};

use protect_common::{
    ClinicalTrial, GenderCriterium, Intervention, KnowledgebaseSource, ProtectError, ProtectEvidence,
    Result, Treatment,
};

pub const COLUMNS: [&str; 20] = [
    "gene",
    "transcript",
    "isCanonical",
    "event",
    "eventIsHighDriver",
    "germline",
    "reported",
    "studyNctId",
    "studyTitle",
    "studyAcronym",
    "studyGender",
    "countriesOfStudy",
    "matchGender",
    "treatment",
    "treatmentApproachesDrugClass",
    "treatmentApproachesTherapy",
    "onLabel",
    "level",
    "direction",
    "sources",
];

const FIELD_DELIMITER: char = '|';
const SOURCE_DELIMITER: char = ';';
const SET_DELIMITER: char = ',';

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

pub fn write_evidence(path: &Path, evidences: &[ProtectEvidence]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_evidence_to(file, evidences)?;
    info!("Wrote {} evidence records to {}", evidences.len(), path.display());
    Ok(())
}

pub fn write_evidence_to<W: Write>(writer: W, evidences: &[ProtectEvidence]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .from_writer(writer);

    writer.write_record(COLUMNS)?;
    for evidence in evidences {
        writer.write_record(to_row(evidence))?;
    }
    writer.flush()?;
    Ok(())
}

fn to_row(evidence: &ProtectEvidence) -> Vec<String> {
    let trial = evidence.clinical_trial();
    let treatment = evidence.treatment();

    vec![
        evidence.gene.clone().unwrap_or_default(),
        evidence.transcript.clone().unwrap_or_default(),
        optional_bool(evidence.is_canonical),
        evidence.event.clone(),
        optional_bool(evidence.event_is_high_driver),
        evidence.germline.to_string(),
        evidence.reported.to_string(),
        trial.map(|t| t.study_nct_id.clone()).unwrap_or_default(),
        trial.map(|t| t.study_title.clone()).unwrap_or_default(),
        trial.and_then(|t| t.study_acronym.clone()).unwrap_or_default(),
        trial
            .and_then(|t| t.gender_criterium)
            .map(|g| g.as_str().to_string())
            .unwrap_or_default(),
        trial.map(|t| join_set(&t.countries_of_study)).unwrap_or_default(),
        optional_bool(evidence.match_gender),
        match &evidence.intervention {
            Intervention::Treatment(t) => t.name.clone(),
            Intervention::ClinicalTrial(t) => join_set(&t.therapy_names),
        },
        treatment
            .map(|t| join_set(&t.source_relevant_treatment_approaches))
            .unwrap_or_default(),
        treatment
            .map(|t| join_set(&t.relevant_treatment_approaches))
            .unwrap_or_default(),
        evidence.on_label.to_string(),
        evidence.level.as_str().to_string(),
        evidence.direction.as_str().to_string(),
        sources_to_field(&evidence.sources),
    ]
}

fn optional_bool(value: Option<bool>) -> String {
    value.map(|b| b.to_string()).unwrap_or_default()
}

fn join_set(set: &BTreeSet<String>) -> String {
    set.iter().cloned().collect::<Vec<_>>().join(&SET_DELIMITER.to_string())
}

fn sources_to_field(sources: &BTreeSet<KnowledgebaseSource>) -> String {
    sources
        .iter()
        .map(source_to_field)
        .collect::<Vec<_>>()
        .join(&SOURCE_DELIMITER.to_string())
}

fn source_to_field(source: &KnowledgebaseSource) -> String {
    let mut fields = vec![
        source.name.as_str().to_string(),
        source.source_event.clone(),
        join_set(&source.source_urls),
        source.evidence_type.as_str().to_string(),
    ];
    if let Some(rank) = source.range_rank {
        fields.push(rank.to_string());
    }
    fields.push(join_set(&source.evidence_urls));
    fields.join(&FIELD_DELIMITER.to_string())
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

pub fn read_evidence(path: &Path) -> Result<Vec<ProtectEvidence>> {
    let file = std::fs::File::open(path)?;
    let evidences = read_evidence_from(file)?;
    info!("Read {} evidence records from {}", evidences.len(), path.display());
    Ok(evidences)
}

/// Rows with a malformed citation are skipped with a warning; any other
/// malformed field fails the read.
pub fn read_evidence_from<R: Read>(reader: R) -> Result<Vec<ProtectEvidence>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .has_headers(true)
        .from_reader(reader);

    let columns = Columns::from_headers(reader.headers()?)?;
    let mut evidences = Vec::new();
    let mut skipped = 0usize;

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        // Header is line 1.
        let line = index + 2;
        match from_row(&columns, &record, line)? {
            Some(evidence) => evidences.push(evidence),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("Skipped {} evidence rows with malformed sources", skipped);
    }
    debug!("Parsed {} evidence rows", evidences.len());
    Ok(evidences)
}

/// Column positions resolved from the header row.
struct Columns([usize; COLUMNS.len()]);

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let mut positions = [0usize; COLUMNS.len()];
        for (slot, name) in positions.iter_mut().zip(COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ProtectError::Parse(format!("evidence file lacks column '{name}'")))?;
        }
        Ok(Self(positions))
    }

    fn get<'r>(&self, record: &'r StringRecord, name: &str) -> &'r str {
        COLUMNS
            .iter()
            .position(|c| *c == name)
            .and_then(|i| record.get(self.0[i]))
            .unwrap_or("")
    }
}

fn from_row(columns: &Columns, record: &StringRecord, line: usize) -> Result<Option<ProtectEvidence>> {
    let field = |name: &str| columns.get(record, name);

    let Some(sources) = parse_sources(field("sources")) else {
        warn!(line, sources = field("sources"), "Dropping evidence row with malformed sources");
        return Ok(None);
    };

    let study_nct_id = optional_string(field("studyNctId"));
    let intervention = match study_nct_id {
        Some(study_nct_id) => Intervention::ClinicalTrial(ClinicalTrial {
            study_nct_id,
            study_title: field("studyTitle").to_string(),
            study_acronym: optional_string(field("studyAcronym")),
            gender_criterium: optional_parse::<GenderCriterium>(field("studyGender"), line)?,
            countries_of_study: split_set(field("countriesOfStudy")),
            therapy_names: split_set(field("treatment")),
        }),
        None => Intervention::Treatment(Treatment {
            name: field("treatment").to_string(),
            source_relevant_treatment_approaches: split_set(field("treatmentApproachesDrugClass")),
            relevant_treatment_approaches: split_set(field("treatmentApproachesTherapy")),
        }),
    };

    Ok(Some(ProtectEvidence {
        gene: optional_string(field("gene")),
        transcript: optional_string(field("transcript")),
        is_canonical: optional_parse(field("isCanonical"), line)?,
        event: field("event").to_string(),
        event_is_high_driver: optional_parse(field("eventIsHighDriver"), line)?,
        germline: required_parse(field("germline"), "germline", line)?,
        reported: required_parse(field("reported"), "reported", line)?,
        intervention,
        match_gender: optional_parse(field("matchGender"), line)?,
        on_label: required_parse(field("onLabel"), "onLabel", line)?,
        level: required_parse(field("level"), "level", line)?,
        direction: required_parse(field("direction"), "direction", line)?,
        sources,
    }))
}

fn optional_string(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn split_set(value: &str) -> BTreeSet<String> {
    value
        .split(SET_DELIMITER)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn optional_parse<T>(value: &str, line: usize) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|e| ProtectError::Parse(format!("line {line}: '{value}': {e}")))
}

fn required_parse<T>(value: &str, column: &str, line: usize) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional_parse(value, line)?
        .ok_or_else(|| ProtectError::Parse(format!("line {line}: column '{column}' is empty")))
}

/// `None` when any citation has a field count other than five or six, or an
/// unparsable field.
fn parse_sources(value: &str) -> Option<BTreeSet<KnowledgebaseSource>> {
    if value.is_empty() {
        return None;
    }
    value.split(SOURCE_DELIMITER).map(parse_source).collect()
}

fn parse_source(value: &str) -> Option<KnowledgebaseSource> {
    let fields: Vec<&str> = value.split(FIELD_DELIMITER).collect();
    let (range_rank, evidence_urls) = match fields.len() {
        5 => (None, fields[4]),
        6 => (Some(fields[4].parse().ok()?), fields[5]),
        _ => return None,
    };

    Some(KnowledgebaseSource {
        name: fields[0].parse().ok()?,
        source_event: fields[1].to_string(),
        source_urls: split_set(fields[2]),
        evidence_type: fields[3].parse().ok()?,
        range_rank,
        evidence_urls: split_set(evidence_urls),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use protect_common::{EvidenceType, Knowledgebase};

    #[test]
    fn test_source_field_count() {
        let five = parse_source("CKB_EVIDENCE|BRAF V600E|https://ckb.org|HOTSPOT_MUTATION|").unwrap();
        assert_eq!(five.range_rank, None);
        assert_eq!(five.name, Knowledgebase::CkbEvidence);
        assert_eq!(five.source_urls, BTreeSet::from(["https://ckb.org".to_string()]));
        assert!(five.evidence_urls.is_empty());

        let six = parse_source("VICC_CGI|BRAF V600X||CODON_MUTATION|600|https://pubmed/1,https://pubmed/2").unwrap();
        assert_eq!(six.range_rank, Some(600));
        assert_eq!(six.evidence_type, EvidenceType::CodonMutation);
        assert_eq!(six.evidence_urls.len(), 2);

        assert!(parse_source("CKB_EVIDENCE|BRAF|HOTSPOT_MUTATION").is_none());
        assert!(parse_source("CKB_EVIDENCE|a|b|HOTSPOT_MUTATION|1|c|d").is_none());
    }

    #[test]
    fn test_source_serialization_omits_missing_rank() {
        let source = KnowledgebaseSource {
            name: Knowledgebase::ViccCivic,
            source_event: "KRAS G12D".to_string(),
            source_urls: BTreeSet::new(),
            evidence_type: EvidenceType::HotspotMutation,
            range_rank: None,
            evidence_urls: BTreeSet::from(["u1".to_string(), "u2".to_string()]),
        };
        assert_eq!(source_to_field(&source), "VICC_CIVIC|KRAS G12D||HOTSPOT_MUTATION|u1,u2");
    }

    #[test]
    fn test_empty_sources_are_malformed() {
        assert!(parse_sources("").is_none());
        assert!(parse_sources("CKB_EVIDENCE|e||HOTSPOT_MUTATION|;broken").is_none());
    }
}
