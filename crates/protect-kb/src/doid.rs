//! Disease-ontology ancestor closure.
//!
//! Built from (child -> parent) "is-a" edges. The input is expected to be a
//! DAG but cycles are tolerated: traversal keeps a visited set.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Directed "is-a" edge between two disease identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoidEdge {
    pub child: String,
    pub parent: String,
}

impl DoidEdge {
    pub fn new(child: impl Into<String>, parent: impl Into<String>) -> Self {
        Self { child: child.into(), parent: parent.into() }
    }
}

/// Parent graph with a per-identifier memo of ancestor sets.
#[derive(Debug, Default)]
pub struct DoidParents {
    parents: HashMap<String, BTreeSet<String>>,
    cache: RwLock<HashMap<String, Arc<BTreeSet<String>>>>,
}

impl DoidParents {
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = DoidEdge>,
    {
        let mut parents: HashMap<String, BTreeSet<String>> = HashMap::new();
        let mut count = 0usize;
        for edge in edges {
            parents.entry(edge.child).or_default().insert(edge.parent);
            count += 1;
        }
        debug!("Built disease ontology from {} edges over {} nodes", count, parents.len());
        Self { parents, cache: RwLock::new(HashMap::new()) }
    }

    /// `doid` itself plus everything reachable through parent edges.
    pub fn ancestors(&self, doid: &str) -> Arc<BTreeSet<String>> {
        if let Some(hit) = self.read_cache().get(doid) {
            return Arc::clone(hit);
        }

        let closure = Arc::new(self.traverse(doid));
        self.cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(doid.to_string(), Arc::clone(&closure));
        closure
    }

    /// Union of the ancestor closures of all initial tumor identifiers.
    ///
    /// An empty input yields an empty set; every event then ends up off-label.
    pub fn expanded_tumor_types(&self, initial: &BTreeSet<String>) -> BTreeSet<String> {
        if initial.is_empty() {
            warn!("No primary tumor doids provided; all evidence will be considered off-label");
            return BTreeSet::new();
        }

        let mut expanded = BTreeSet::new();
        for doid in initial {
            expanded.extend(self.ancestors(doid).iter().cloned());
        }
        debug!("Expanded {} tumor doids to {} including ancestors", initial.len(), expanded.len());
        expanded
    }

    fn read_cache(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<BTreeSet<String>>>> {
        self.cache.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // Breadth-first walk with a visited set so cyclic input terminates.
    fn traverse(&self, doid: &str) -> BTreeSet<String> {
        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::new();
        visited.insert(doid.to_string());
        queue.push_back(doid.to_string());

        while let Some(current) = queue.pop_front() {
            if let Some(parents) = self.parents.get(&current) {
                for parent in parents {
                    if visited.insert(parent.clone()) {
                        queue.push_back(parent.clone());
                    }
                }
            }
        }
        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn lung_ontology() -> DoidParents {
        // 3910 lung adenocarcinoma -> 3905 lung carcinoma -> 1324 lung cancer -> 162 cancer
        DoidParents::from_edges(vec![
            DoidEdge::new("3910", "3905"),
            DoidEdge::new("3905", "1324"),
            DoidEdge::new("1324", "162"),
            DoidEdge::new("3905", "305"),
            DoidEdge::new("305", "162"),
        ])
    }

    #[test]
    fn test_ancestors_include_self_and_transitive_parents() {
        let doids = lung_ontology();
        assert_eq!(*doids.ancestors("3910"), set(&["3910", "3905", "1324", "305", "162"]));
    }

    #[test]
    fn test_unknown_doid_is_its_own_closure() {
        let doids = lung_ontology();
        assert_eq!(*doids.ancestors("9999"), set(&["9999"]));
    }

    #[test]
    fn test_closure_is_idempotent() {
        let doids = lung_ontology();
        let closure = doids.ancestors("3910");
        for member in closure.iter() {
            assert!(doids.ancestors(member).is_subset(&closure));
        }
    }

    #[test]
    fn test_cycle_terminates() {
        let doids = DoidParents::from_edges(vec![
            DoidEdge::new("1", "2"),
            DoidEdge::new("2", "3"),
            DoidEdge::new("3", "1"),
        ]);
        assert_eq!(*doids.ancestors("1"), set(&["1", "2", "3"]));
        assert_eq!(*doids.ancestors("3"), set(&["1", "2", "3"]));
    }

    #[test]
    fn test_memoized_closure_is_shared() {
        let doids = lung_ontology();
        let first = doids.ancestors("3905");
        let second = doids.ancestors("3905");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_expanded_tumor_types() {
        let doids = lung_ontology();
        let expanded = doids.expanded_tumor_types(&set(&["3910", "4159"]));
        assert!(expanded.contains("162"));
        assert!(expanded.contains("4159"));
        assert!(doids.expanded_tumor_types(&BTreeSet::new()).is_empty());
    }
}
