//! Graph model and builder for the crate.
//!
//! This module defines the core data structures for the package graph
//! (`PackageGraph`, `PackageVertex`) and the three edge-construction passes
//! (dependency, shared-keyword, shared-maintainer) that populate the
//! per-vertex relationship sets.
//!
//! You typically construct a graph via `PackageGraph::build_from_records`
//! and then pass it to queries in `crate::query`. The graph is read-only
//! after construction: no method mutates container-owned structures once
//! the build returns, so shared references can be handed to any number of
//! concurrent readers.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::ingest::PackageRecord;

pub mod traversal;

/// Keyword buckets above this size are wired as a star around the bucket's
/// first member instead of a full clique. A bucket of size n otherwise
/// contributes n(n-1)/2 edges, which a single pathologically common keyword
/// can turn into the dominant cost of the whole build.
pub const MAX_KEYWORD_BUCKET: usize = 64;

/// A vertex representing one package.
///
/// Descriptive attributes come straight from the ingested record and never
/// change. The relationship sets are populated exactly once, during the
/// graph's edge-construction passes, and hold package *names*: every name
/// stored here is a key of the owning graph's vertex map, so edges to
/// packages outside the sampled dataset simply never exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageVertex {
    pub name: String,
    pub version: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub dependencies: BTreeMap<String, String>,
    pub downloads_count: f64,
    pub dependents_count: f64,
    pub quality: f64,
    pub popularity: f64,
    pub maintenance: f64,
    pub maintainers: BTreeSet<String>,
    /// Packages this package directly depends on.
    pub upstream_dependencies: BTreeSet<String>,
    /// Packages that directly depend on this package (mirror of upstream).
    pub downstream_dependencies: BTreeSet<String>,
    /// Keyword -> packages sharing that keyword (self excluded).
    pub keyword_relationships: BTreeMap<String, BTreeSet<String>>,
    /// Packages sharing at least one maintainer (self excluded).
    pub maintainer_relationships: BTreeSet<String>,
}

impl PackageVertex {
    fn from_record(record: PackageRecord) -> Self {
        Self {
            name: record.name,
            version: record.version,
            description: record.description,
            keywords: record.keywords,
            dependencies: record.dependencies,
            downloads_count: record.downloads_count,
            dependents_count: record.dependents_count,
            quality: record.quality,
            popularity: record.popularity,
            maintenance: record.maintenance,
            maintainers: record.maintainers.into_iter().collect(),
            upstream_dependencies: BTreeSet::new(),
            downstream_dependencies: BTreeSet::new(),
            keyword_relationships: BTreeMap::new(),
            maintainer_relationships: BTreeSet::new(),
        }
    }

    fn add_upstream_dependency(&mut self, other: &str) {
        self.upstream_dependencies.insert(other.to_string());
    }

    fn add_downstream_dependency(&mut self, other: &str) {
        self.downstream_dependencies.insert(other.to_string());
    }

    fn add_keyword_relationship(&mut self, other: &str, keyword: &str) {
        self.keyword_relationships
            .entry(keyword.to_string())
            .or_default()
            .insert(other.to_string());
    }

    /// Union `others` into the maintainer relationship set, filtering out
    /// this vertex's own name before insertion.
    fn add_maintainer_relationships<'a, I>(&mut self, others: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for other in others {
            if *other != self.name {
                self.maintainer_relationships.insert(other.clone());
            }
        }
    }
}

/// A graph of package relationships keyed by package name.
///
/// Three independent edge kinds share the one vertex set: dependency edges
/// (directed, mirrored up/downstream), keyword edges (undirected, tagged by
/// the shared keyword), and maintainer edges (undirected).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PackageGraph {
    vertices: BTreeMap<String, PackageVertex>,
}

impl PackageGraph {
    /// Build a graph from a batch of ingested records.
    ///
    /// One vertex per record, keyed by name; a duplicate name overwrites the
    /// earlier record (last write wins, no error). The three edge passes run
    /// in a fixed order for reproducibility, though the edge kinds are
    /// independent of each other.
    #[must_use]
    pub fn build_from_records(records: Vec<PackageRecord>) -> Self {
        let mut graph = PackageGraph::default();
        for record in records {
            graph.vertices.insert(record.name.clone(), PackageVertex::from_record(record));
        }
        graph.construct_dependency_edges();
        graph.construct_keyword_edges();
        graph.construct_maintainer_edges();
        graph
    }

    /// For every vertex V and declared dependency K present in the vertex
    /// set, record K in V's upstream set and V in K's downstream set.
    /// Dependencies naming packages outside the sampled dataset are dropped,
    /// as is a record declaring a dependency on itself.
    fn construct_dependency_edges(&mut self) {
        let mut edges: Vec<(String, String)> = Vec::new();
        for (name, vertex) in &self.vertices {
            for dependency in vertex.dependencies.keys() {
                if dependency != name && self.vertices.contains_key(dependency) {
                    edges.push((dependency.clone(), name.clone()));
                }
            }
        }
        for (upstream, downstream) in edges {
            if let Some(v) = self.vertices.get_mut(&downstream) {
                v.add_upstream_dependency(&upstream);
            }
            if let Some(v) = self.vertices.get_mut(&upstream) {
                v.add_downstream_dependency(&downstream);
            }
        }
    }

    /// Connect packages sharing a keyword. Buckets with at least two members
    /// get a full clique; oversized buckets degrade to a star around the
    /// first member to keep the pass linear in the bucket size.
    fn construct_keyword_edges(&mut self) {
        let mut buckets: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, vertex) in &self.vertices {
            for keyword in &vertex.keywords {
                buckets.entry(keyword.clone()).or_default().push(name.clone());
            }
        }

        for (keyword, members) in &buckets {
            if members.len() < 2 {
                continue;
            }
            if members.len() > MAX_KEYWORD_BUCKET {
                let hub = &members[0];
                for other in &members[1..] {
                    self.add_keyword_edge(hub, other, keyword);
                }
            } else {
                for first in 0..members.len() - 1 {
                    for second in first + 1..members.len() {
                        self.add_keyword_edge(&members[first], &members[second], keyword);
                    }
                }
            }
        }
    }

    fn add_keyword_edge(&mut self, package1: &str, package2: &str, keyword: &str) {
        if let Some(v) = self.vertices.get_mut(package1) {
            v.add_keyword_relationship(package2, keyword);
        }
        if let Some(v) = self.vertices.get_mut(package2) {
            v.add_keyword_relationship(package1, keyword);
        }
    }

    /// Fully connect each maintainer's set of packages. Every member receives
    /// the whole set minus itself, so packages sharing any maintainer end up
    /// mutually present in each other's relationship sets.
    fn construct_maintainer_edges(&mut self) {
        let mut buckets: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (name, vertex) in &self.vertices {
            for maintainer in &vertex.maintainers {
                buckets.entry(maintainer.clone()).or_default().insert(name.clone());
            }
        }
        for members in buckets.values() {
            for name in members {
                if let Some(v) = self.vertices.get_mut(name) {
                    v.add_maintainer_relationships(members.iter());
                }
            }
        }
    }

    #[must_use]
    pub fn has_package(&self, name: &str) -> bool {
        self.vertices.contains_key(name)
    }

    /// All package names, in lexicographic order.
    #[must_use]
    pub fn all_packages(&self) -> Vec<String> {
        self.vertices.keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub(crate) fn vertex(&self, name: &str) -> Option<&PackageVertex> {
        self.vertices.get(name)
    }

    pub(crate) fn vertices(&self) -> impl Iterator<Item = &PackageVertex> {
        self.vertices.values()
    }

    /// Build a graph straight from a records JSON file.
    ///
    /// # Errors
    /// Returns `PackageGraphError::Ingest` if the file cannot be read or
    /// parsed.
    pub fn build_from_file(
        path: &std::path::Path,
    ) -> Result<Self, crate::errors::PackageGraphError> {
        let records = crate::ingest::load_records(path)?;
        Ok(Self::build_from_records(records))
    }

    /// Save the graph as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns `PackageGraphError::Io` if serialization or writing fails.
    pub fn save_json(&self, path: &std::path::Path) -> Result<(), crate::errors::PackageGraphError> {
        let data = serde_json::to_string_pretty(self).map_err(|e| {
            crate::errors::PackageGraphError::Io(std::io::Error::other(e.to_string()))
        })?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Load a graph from a JSON file previously written by `save_json`.
    ///
    /// # Errors
    /// Returns `PackageGraphError::Io` if reading fails or the JSON is invalid.
    pub fn load_json(path: &std::path::Path) -> Result<Self, crate::errors::PackageGraphError> {
        let data = std::fs::read_to_string(path)?;
        let graph: PackageGraph = serde_json::from_str(&data).map_err(|e| {
            crate::errors::PackageGraphError::Io(std::io::Error::other(e.to_string()))
        })?;
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::PackageRecord;

    fn record(name: &str, deps: &[&str], keywords: &[&str], maintainers: &[&str]) -> PackageRecord {
        let mut r = PackageRecord::named(name);
        r.dependencies =
            deps.iter().map(|d| ((*d).to_string(), "^1.0.0".to_string())).collect();
        r.keywords = keywords.iter().map(|k| (*k).to_string()).collect();
        r.maintainers = maintainers.iter().map(|m| (*m).to_string()).collect();
        r
    }

    #[test]
    fn dependency_edges_are_mirror_images() {
        let g = PackageGraph::build_from_records(vec![
            record("a", &["b"], &[], &[]),
            record("b", &[], &[], &[]),
        ]);
        let a = g.vertex("a").unwrap();
        let b = g.vertex("b").unwrap();
        assert!(a.upstream_dependencies.contains("b"));
        assert!(b.downstream_dependencies.contains("a"));
        assert!(a.downstream_dependencies.is_empty());
        assert!(b.upstream_dependencies.is_empty());
    }

    #[test]
    fn dangling_dependency_is_silently_dropped() {
        let g = PackageGraph::build_from_records(vec![record("a", &["ghost"], &[], &[])]);
        let a = g.vertex("a").unwrap();
        assert!(a.upstream_dependencies.is_empty());
        assert!(!g.has_package("ghost"));
    }

    #[test]
    fn self_dependency_is_dropped() {
        let g = PackageGraph::build_from_records(vec![
            record("ouro", &["ouro", "base"], &[], &[]),
            record("base", &[], &[], &[]),
        ]);
        let v = g.vertex("ouro").unwrap();
        assert!(!v.upstream_dependencies.contains("ouro"));
        assert!(!v.downstream_dependencies.contains("ouro"));
        // The legitimate dependency still comes through
        assert!(v.upstream_dependencies.contains("base"));
    }

    #[test]
    fn duplicate_name_last_write_wins() {
        let mut first = record("a", &[], &["old"], &[]);
        first.version = "1.0.0".to_string();
        let mut second = record("a", &[], &["new"], &[]);
        second.version = "2.0.0".to_string();
        let g = PackageGraph::build_from_records(vec![first, second]);
        assert_eq!(g.len(), 1);
        let a = g.vertex("a").unwrap();
        assert_eq!(a.version, "2.0.0");
        assert_eq!(a.keywords, vec!["new".to_string()]);
    }

    #[test]
    fn keyword_bucket_connects_all_pairs_without_self() {
        let g = PackageGraph::build_from_records(vec![
            record("a", &[], &["web"], &[]),
            record("b", &[], &["web"], &[]),
            record("c", &[], &["web", "cli"], &[]),
        ]);
        for name in ["a", "b", "c"] {
            let v = g.vertex(name).unwrap();
            let bucket = v.keyword_relationships.get("web").unwrap();
            assert_eq!(bucket.len(), 2);
            assert!(!bucket.contains(name));
        }
        // "cli" appears once, so no bucket is created anywhere
        assert!(g.vertex("c").unwrap().keyword_relationships.get("cli").is_none());
    }

    #[test]
    fn oversized_keyword_bucket_falls_back_to_star() {
        let n = MAX_KEYWORD_BUCKET + 6;
        let records: Vec<PackageRecord> =
            (0..n).map(|i| record(&format!("pkg{i:03}"), &[], &["common"], &[])).collect();
        let g = PackageGraph::build_from_records(records);

        // Hub is the lexicographically first member (vertex-map iteration order)
        let hub = g.vertex("pkg000").unwrap();
        assert_eq!(hub.keyword_relationships.get("common").unwrap().len(), n - 1);

        // Spokes connect only to the hub
        let spoke = g.vertex("pkg001").unwrap();
        let bucket = spoke.keyword_relationships.get("common").unwrap();
        assert_eq!(bucket.len(), 1);
        assert!(bucket.contains("pkg000"));
    }

    #[test]
    fn maintainer_sets_are_mutual_and_self_free() {
        let g = PackageGraph::build_from_records(vec![
            record("a", &[], &[], &["alice"]),
            record("b", &[], &[], &["alice", "bob"]),
            record("c", &[], &[], &["bob"]),
        ]);
        let a = g.vertex("a").unwrap();
        let b = g.vertex("b").unwrap();
        let c = g.vertex("c").unwrap();
        assert!(a.maintainer_relationships.contains("b"));
        assert!(b.maintainer_relationships.contains("a"));
        assert!(b.maintainer_relationships.contains("c"));
        assert!(c.maintainer_relationships.contains("b"));
        // a and c share no maintainer
        assert!(!a.maintainer_relationships.contains("c"));
        // never self
        for v in [a, b, c] {
            assert!(!v.maintainer_relationships.contains(&v.name));
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let g = PackageGraph::build_from_records(vec![
            record("a", &["b"], &["web"], &["alice"]),
            record("b", &[], &["web"], &["alice"]),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        g.save_json(&path).unwrap();
        let loaded = PackageGraph::load_json(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.vertex("a").unwrap().upstream_dependencies.contains("b"));
        assert!(loaded.vertex("b").unwrap().maintainer_relationships.contains("a"));
    }
}
