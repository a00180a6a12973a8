//! Merges raw evidence that asserts the same clinical claim.

use std::collections::BTreeMap;

use protect_common::ProtectEvidence;

use crate::key::EvidenceKey;

/// One record per distinct `EvidenceKey`. Sources are unioned, the driver
/// flag and reportability are OR-ed across members. Remaining fields come
/// from the member that sorts first, so the result is independent of input
/// order.
pub fn consolidate(evidences: Vec<ProtectEvidence>) -> Vec<ProtectEvidence> {
    let mut groups: BTreeMap<EvidenceKey, Vec<ProtectEvidence>> = BTreeMap::new();
    for evidence in evidences {
        groups.entry(EvidenceKey::create(&evidence)).or_default().push(evidence);
    }

    groups.into_values().filter_map(merge).collect()
}

fn merge(mut group: Vec<ProtectEvidence>) -> Option<ProtectEvidence> {
    group.sort();
    let mut members = group.into_iter();
    let mut merged = members.next()?;

    for member in members {
        merged.reported |= member.reported;
        merged.event_is_high_driver = match (merged.event_is_high_driver, member.event_is_high_driver) {
            (Some(true), _) | (_, Some(true)) => Some(true),
            (None, None) => None,
            _ => Some(false),
        };
        merged.sources.extend(member.sources);
    }

    Some(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use protect_common::{EvidenceLevel, EvidenceType, Knowledgebase};
    use protect_test_utils::{evidence, source};
    use std::collections::BTreeSet;

    #[test]
    fn test_same_claim_from_two_knowledgebases_merges() {
        let ckb = evidence("BRAF", "p.Val600Glu", "Vemurafenib", EvidenceLevel::A);
        let mut cgi = ckb.clone();
        cgi.sources = BTreeSet::from([source(Knowledgebase::ViccCgi, "BRAF V600E", EvidenceType::HotspotMutation)]);

        let consolidated = consolidate(vec![ckb, cgi]);
        assert_eq!(consolidated.len(), 1);
        assert_eq!(consolidated[0].sources.len(), 2);
    }

    #[test]
    fn test_flags_are_or_ed() {
        let mut a = evidence("BRAF", "p.Val600Glu", "Vemurafenib", EvidenceLevel::A);
        a.reported = false;
        a.event_is_high_driver = Some(false);
        let mut b = a.clone();
        b.reported = true;
        b.event_is_high_driver = Some(true);
        b.sources = BTreeSet::from([source(Knowledgebase::ViccCivic, "V600E", EvidenceType::HotspotMutation)]);

        let consolidated = consolidate(vec![a, b]);
        assert_eq!(consolidated.len(), 1);
        assert!(consolidated[0].reported);
        assert_eq!(consolidated[0].event_is_high_driver, Some(true));
    }

    #[test]
    fn test_distinct_claims_stay_separate() {
        let a = evidence("BRAF", "p.Val600Glu", "Vemurafenib", EvidenceLevel::A);
        let b = evidence("BRAF", "p.Val600Glu", "Dabrafenib", EvidenceLevel::A);
        let c = evidence("KRAS", "p.Gly12Asp", "Vemurafenib", EvidenceLevel::A);
        assert_eq!(consolidate(vec![a, b, c]).len(), 3);
    }

    #[test]
    fn test_result_is_independent_of_input_order() {
        let a = evidence("BRAF", "p.Val600Glu", "Vemurafenib", EvidenceLevel::A);
        let mut b = a.clone();
        b.level = EvidenceLevel::B;
        b.sources = BTreeSet::from([source(Knowledgebase::ViccCgi, "V600E", EvidenceType::HotspotMutation)]);

        let forward = consolidate(vec![a.clone(), b.clone()]);
        let backward = consolidate(vec![b, a]);
        assert_eq!(forward, backward);
        assert_eq!(forward[0].level, EvidenceLevel::A);
    }

    #[test]
    fn test_no_source_is_dropped() {
        let a = evidence("BRAF", "p.Val600Glu", "Vemurafenib", EvidenceLevel::A);
        let mut b = a.clone();
        b.sources = BTreeSet::from([
            source(Knowledgebase::ViccCgi, "V600E", EvidenceType::HotspotMutation),
            source(Knowledgebase::ViccOncokb, "V600E", EvidenceType::HotspotMutation),
        ]);
        let total: usize = [&a, &b].iter().map(|e| e.sources.len()).sum();

        let consolidated = consolidate(vec![a, b]);
        assert_eq!(consolidated[0].sources.len(), total);
    }
}
