use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::errors::PackageGraphError;
use crate::graph::traversal::{self, DependencyEdge, DepthEdge, KeywordEdge};
use crate::graph::PackageGraph;

/// Query trait implemented by all query types.
///
/// Given an immutable reference to a `PackageGraph`, returns a result of
/// type `R`. Every query naming a package fails with
/// `PackageGraphError::PackageNotFound` when that name is absent from the
/// graph; this is the only error condition in this module.
pub trait Query<R> {
    /// # Errors
    /// `PackageNotFound` if a package named by the query is not in the graph.
    fn run(&self, graph: &PackageGraph) -> Result<R, PackageGraphError>;
}

/// Parallel (name, transitive count) rows plus parallel count list, the
/// shape chart renderers consume directly.
pub type RankingData = (Vec<String>, Vec<usize>);

fn ensure_package(graph: &PackageGraph, name: &str) -> Result<(), PackageGraphError> {
    if graph.has_package(name) {
        Ok(())
    } else {
        Err(PackageGraphError::not_found(name))
    }
}

/// Immediate upstream dependencies of a package, lexicographically ordered.
pub struct DirectDependenciesQuery {
    pub package: String,
}

impl DirectDependenciesQuery {
    #[must_use]
    pub fn new(package: &str) -> Self {
        Self { package: package.to_string() }
    }
}

impl Query<Vec<String>> for DirectDependenciesQuery {
    fn run(&self, graph: &PackageGraph) -> Result<Vec<String>, PackageGraphError> {
        ensure_package(graph, &self.package)?;
        let vertex = graph
            .vertex(&self.package)
            .ok_or_else(|| PackageGraphError::not_found(&self.package))?;
        Ok(vertex.upstream_dependencies.iter().cloned().collect())
    }
}

/// Transitive upstream closure of a package.
///
/// The result includes the queried package itself; callers wanting the
/// exclusive set remove it.
pub struct AllDependenciesQuery {
    pub package: String,
}

impl AllDependenciesQuery {
    #[must_use]
    pub fn new(package: &str) -> Self {
        Self { package: package.to_string() }
    }
}

impl Query<BTreeSet<String>> for AllDependenciesQuery {
    fn run(&self, graph: &PackageGraph) -> Result<BTreeSet<String>, PackageGraphError> {
        ensure_package(graph, &self.package)?;
        Ok(traversal::dependency_closure(graph, &self.package))
    }
}

/// Count of transitive upstream dependencies, excluding the package itself.
pub struct DependencyCountQuery {
    pub package: String,
}

impl DependencyCountQuery {
    #[must_use]
    pub fn new(package: &str) -> Self {
        Self { package: package.to_string() }
    }
}

impl Query<usize> for DependencyCountQuery {
    fn run(&self, graph: &PackageGraph) -> Result<usize, PackageGraphError> {
        ensure_package(graph, &self.package)?;
        Ok(traversal::transitive_dependency_count(graph, &self.package))
    }
}

/// Count of immediate upstream dependencies.
pub struct DirectDependencyCountQuery {
    pub package: String,
}

impl DirectDependencyCountQuery {
    #[must_use]
    pub fn new(package: &str) -> Self {
        Self { package: package.to_string() }
    }
}

impl Query<usize> for DirectDependencyCountQuery {
    fn run(&self, graph: &PackageGraph) -> Result<usize, PackageGraphError> {
        ensure_package(graph, &self.package)?;
        let vertex = graph
            .vertex(&self.package)
            .ok_or_else(|| PackageGraphError::not_found(&self.package))?;
        Ok(vertex.upstream_dependencies.len())
    }
}

/// (dependent, dependency) pairs over the full transitive closure.
///
/// A package with no dependencies yields the single self-loop
/// `(package, package)` sentinel consumed by layout/visualization.
pub struct DependencyEdgesQuery {
    pub package: String,
}

impl DependencyEdgesQuery {
    #[must_use]
    pub fn new(package: &str) -> Self {
        Self { package: package.to_string() }
    }
}

impl Query<Vec<DependencyEdge>> for DependencyEdgesQuery {
    fn run(&self, graph: &PackageGraph) -> Result<Vec<DependencyEdge>, PackageGraphError> {
        ensure_package(graph, &self.package)?;
        Ok(traversal::dependency_edges(graph, &self.package))
    }
}

/// Same traversal as `DependencyEdgesQuery`, annotated with 1-based depth
/// from the origin. Layout input.
pub struct DependencyDepthEdgesQuery {
    pub package: String,
}

impl DependencyDepthEdgesQuery {
    #[must_use]
    pub fn new(package: &str) -> Self {
        Self { package: package.to_string() }
    }
}

impl Query<Vec<DepthEdge>> for DependencyDepthEdgesQuery {
    fn run(&self, graph: &PackageGraph) -> Result<Vec<DepthEdge>, PackageGraphError> {
        ensure_package(graph, &self.package)?;
        Ok(traversal::dependency_depth_edges(graph, &self.package))
    }
}

/// Keyword edges within `max_depth` hops of a package, each tagged with the
/// shared keyword. Default depth 1 (the package's own keyword neighbors).
pub struct KeywordRelationshipsQuery {
    pub package: String,
    pub max_depth: usize,
}

impl KeywordRelationshipsQuery {
    #[must_use]
    pub fn new(package: &str) -> Self {
        Self { package: package.to_string(), max_depth: 1 }
    }

    #[must_use]
    pub fn with_depth(package: &str, max_depth: usize) -> Self {
        Self { package: package.to_string(), max_depth }
    }
}

impl Query<Vec<KeywordEdge>> for KeywordRelationshipsQuery {
    fn run(&self, graph: &PackageGraph) -> Result<Vec<KeywordEdge>, PackageGraphError> {
        ensure_package(graph, &self.package)?;
        Ok(traversal::keyword_edges(graph, &self.package, self.max_depth))
    }
}

/// Two-hop maintainer ego network around a package.
pub struct MaintainerNetworkQuery {
    pub package: String,
}

impl MaintainerNetworkQuery {
    #[must_use]
    pub fn new(package: &str) -> Self {
        Self { package: package.to_string() }
    }
}

impl Query<Vec<DepthEdge>> for MaintainerNetworkQuery {
    fn run(&self, graph: &PackageGraph) -> Result<Vec<DepthEdge>, PackageGraphError> {
        ensure_package(graph, &self.package)?;
        Ok(traversal::maintainer_network(graph, &self.package))
    }
}

/// Packages sharing at least one maintainer with the queried package.
pub struct SharedMaintainersQuery {
    pub package: String,
}

impl SharedMaintainersQuery {
    #[must_use]
    pub fn new(package: &str) -> Self {
        Self { package: package.to_string() }
    }
}

impl Query<BTreeSet<String>> for SharedMaintainersQuery {
    fn run(&self, graph: &PackageGraph) -> Result<BTreeSet<String>, PackageGraphError> {
        ensure_package(graph, &self.package)?;
        let vertex = graph
            .vertex(&self.package)
            .ok_or_else(|| PackageGraphError::not_found(&self.package))?;
        Ok(vertex.maintainer_relationships.clone())
    }
}

/// Top-N packages by transitive dependency count, ascending.
///
/// Computes every vertex's transitive count in one parallel scan (the graph
/// is immutable, so the per-vertex walks are independent), sorts ascending
/// by (count, name) — ties broken by natural string ordering of the name —
/// and keeps the N largest, still in ascending order for chart rendering.
pub struct MostDependenciesQuery {
    pub top: usize,
}

impl MostDependenciesQuery {
    #[must_use]
    pub fn new(top: usize) -> Self {
        Self { top }
    }
}

impl Default for MostDependenciesQuery {
    fn default() -> Self {
        Self { top: 25 }
    }
}

impl Query<RankingData> for MostDependenciesQuery {
    fn run(&self, graph: &PackageGraph) -> Result<RankingData, PackageGraphError> {
        let names = graph.all_packages();
        let mut rows: Vec<(usize, String)> = names
            .into_par_iter()
            .map(|name| (traversal::transitive_dependency_count(graph, &name), name))
            .collect();
        rows.sort();
        let skip = rows.len().saturating_sub(self.top);
        let top = &rows[skip..];
        Ok((
            top.iter().map(|(_, name)| name.clone()).collect(),
            top.iter().map(|(count, _)| *count).collect(),
        ))
    }
}

/// Keyword frequency histogram over the whole graph, ascending by
/// (count, keyword). Returns the full list; callers truncate for display.
pub struct MostKeywordsQuery;

impl MostKeywordsQuery {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for MostKeywordsQuery {
    fn default() -> Self {
        Self
    }
}

impl Query<RankingData> for MostKeywordsQuery {
    fn run(&self, graph: &PackageGraph) -> Result<RankingData, PackageGraphError> {
        let mut counts: std::collections::BTreeMap<&str, usize> = std::collections::BTreeMap::new();
        for vertex in graph.vertices() {
            for keyword in &vertex.keywords {
                *counts.entry(keyword.as_str()).or_insert(0) += 1;
            }
        }
        let mut rows: Vec<(usize, &str)> =
            counts.into_iter().map(|(keyword, count)| (count, keyword)).collect();
        rows.sort();
        Ok((
            rows.iter().map(|(_, keyword)| (*keyword).to_string()).collect(),
            rows.iter().map(|(count, _)| *count).collect(),
        ))
    }
}

/// Display attributes of a single package. Dependency lists are deliberately
/// excluded; the dependency queries cover those.
#[derive(Debug, Clone, Serialize)]
pub struct PackageMetadata {
    pub keywords: Vec<String>,
    pub downloads_count: f64,
    pub dependents_count: f64,
    pub quality: f64,
    pub popularity: f64,
    pub maintenance: f64,
}

pub struct PackageMetadataQuery {
    pub package: String,
}

impl PackageMetadataQuery {
    #[must_use]
    pub fn new(package: &str) -> Self {
        Self { package: package.to_string() }
    }
}

impl Query<PackageMetadata> for PackageMetadataQuery {
    fn run(&self, graph: &PackageGraph) -> Result<PackageMetadata, PackageGraphError> {
        let vertex = graph
            .vertex(&self.package)
            .ok_or_else(|| PackageGraphError::not_found(&self.package))?;
        Ok(PackageMetadata {
            keywords: vertex.keywords.clone(),
            downloads_count: vertex.downloads_count,
            dependents_count: vertex.dependents_count,
            quality: vertex.quality,
            popularity: vertex.popularity,
            maintenance: vertex.maintenance,
        })
    }
}

/// Package names matching a regex, lexicographically ordered. No failure
/// case: an unmatched pattern yields an empty list.
pub struct SearchPackagesQuery {
    pub pattern: Regex,
}

impl SearchPackagesQuery {
    #[must_use]
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }
}

impl Query<Vec<String>> for SearchPackagesQuery {
    fn run(&self, graph: &PackageGraph) -> Result<Vec<String>, PackageGraphError> {
        Ok(graph.all_packages().into_iter().filter(|n| self.pattern.is_match(n)).collect())
    }
}
