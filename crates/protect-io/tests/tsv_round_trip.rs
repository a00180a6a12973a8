//! Evidence file round trips through the filesystem.

use std::collections::BTreeSet;
use std::io::Write;

use pretty_assertions::assert_eq;

use protect_common::{
    EvidenceDirection, EvidenceLevel, EvidenceType, GenderCriterium, Intervention, Knowledgebase, ProtectEvidence,
    Treatment,
};
use protect_io::{read_evidence, read_evidence_from, write_evidence, write_evidence_to};
use protect_test_utils::{clinical_trial, evidence, source, trial_evidence};

fn treatment_item() -> ProtectEvidence {
    let mut item = evidence("BRAF", "p.Val600Glu", "Vemurafenib", EvidenceLevel::A);
    item.intervention = Intervention::Treatment(Treatment {
        name: "Vemurafenib".to_string(),
        source_relevant_treatment_approaches: BTreeSet::from(["BRAF inhibitor".to_string()]),
        relevant_treatment_approaches: BTreeSet::from(["Targeted therapy".to_string(), "Kinase inhibitor".to_string()]),
    });
    item.sources.insert(source(Knowledgebase::ViccCgi, "BRAF V600E", EvidenceType::HotspotMutation));
    item
}

fn trial_item(countries: &[&str]) -> ProtectEvidence {
    let mut trial = clinical_trial("NCT04543188", Some("BRAF-MEL"));
    trial.gender_criterium = Some(GenderCriterium::Female);
    trial.countries_of_study = countries.iter().map(|c| c.to_string()).collect();
    trial.therapy_names = BTreeSet::from(["Dabrafenib".to_string(), "Trametinib".to_string()]);

    let mut item = trial_evidence("BRAF", "p.Val600Glu", trial, true);
    item.match_gender = Some(true);
    item
}

fn ranged_item() -> ProtectEvidence {
    let mut ranged_source = source(Knowledgebase::ViccCivic, "KRAS G12X", EvidenceType::CodonMutation);
    ranged_source.range_rank = Some(12);
    ranged_source.source_urls = BTreeSet::from(["https://civicdb.org/events/12".to_string()]);
    ranged_source.evidence_urls = BTreeSet::from(["https://pubmed/1".to_string(), "https://pubmed/2".to_string()]);

    let mut item = evidence("KRAS", "p.Gly12Asp", "Cetuximab", EvidenceLevel::B);
    item.direction = EvidenceDirection::Resistant;
    item.sources = BTreeSet::from([ranged_source]);
    item
}

fn signature_item() -> ProtectEvidence {
    let mut item = evidence("KRAS", "Microsatellite unstable", "Pembrolizumab", EvidenceLevel::A);
    item.gene = None;
    item.transcript = None;
    item.is_canonical = None;
    item.event_is_high_driver = None;
    item.reported = false;
    item.on_label = false;
    item
}

#[test]
fn test_round_trip_preserves_every_field() {
    let evidences = vec![
        treatment_item(),
        trial_item(&["Netherlands"]),
        trial_item(&["Belgium", "Netherlands"]),
        ranged_item(),
        signature_item(),
    ];

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.protect.tsv");
    write_evidence(&path, &evidences).unwrap();

    assert_eq!(read_evidence(&path).unwrap(), evidences);
}

#[test]
fn test_header_and_row_layout() {
    let mut buffer = Vec::new();
    write_evidence_to(&mut buffer, &[ranged_item()]).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    let mut lines = text.lines();

    let header: Vec<&str> = lines.next().unwrap().split('\t').collect();
    assert_eq!(header.len(), 20);
    assert_eq!(header[0], "gene");
    assert_eq!(header[19], "sources");

    let row: Vec<&str> = lines.next().unwrap().split('\t').collect();
    assert_eq!(row[0], "KRAS");
    // No trial: the study columns are empty.
    assert_eq!(&row[7..12], &["", "", "", "", ""]);
    assert_eq!(row[17], "B");
    assert_eq!(row[18], "RESISTANT");
    assert_eq!(
        row[19],
        "VICC_CIVIC|KRAS G12X|https://civicdb.org/events/12|CODON_MUTATION|12|https://pubmed/1,https://pubmed/2"
    );
}

#[test]
fn test_malformed_source_row_is_dropped() {
    let mut buffer = Vec::new();
    write_evidence_to(&mut buffer, &[treatment_item(), ranged_item()]).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    // Truncate the citation of the last row to three fields.
    let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
    let last = lines.len() - 1;
    let mut cells: Vec<String> = lines[last].split('\t').map(str::to_string).collect();
    cells[19] = "VICC_CIVIC|KRAS G12X|CODON_MUTATION".to_string();
    lines[last] = cells.join("\t");

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{}", lines.join("\n")).unwrap();

    let read = read_evidence(file.path()).unwrap();
    assert_eq!(read, vec![treatment_item()]);
}

#[test]
fn test_missing_column_fails() {
    let input = "gene\ttranscript\nBRAF\tENST00000646891\n";
    assert!(read_evidence_from(input.as_bytes()).is_err());
}
