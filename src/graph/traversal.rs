//! Cycle-safe traversal over the package graph's adjacency.
//!
//! All dependency-closure walks are iterative (explicit queue) and share a
//! single visited set for the whole walk: each vertex is expanded once and
//! each closure edge is emitted once, so diamond-shaped dependency graphs
//! are not double-counted and true cycles are cut at the first revisit.
//!
//! Keyword traversal is breadth-bounded by `max_depth` instead: keyword
//! edges are symmetric and densely connected, and an unbounded walk would
//! visit the entire keyword-connected component. Maintainer traversal is
//! deliberately not transitive at all; it computes a two-hop ego network
//! (full maintainer closure would collapse much of the ecosystem into one
//! component).
//!
//! Edge-enumeration functions return a single self-loop `(origin, origin)`
//! row when the origin has no edges of the requested kind. Downstream
//! layout/visualization consumes that as a "no edges" marker; it is not an
//! error. Callers are expected to have checked that the origin exists
//! (`crate::query` turns absent names into `PackageNotFound`).
use std::collections::{BTreeSet, VecDeque};

use super::PackageGraph;

// Type aliases to keep query and layout signatures concise
pub type DependencyEdge = (String, String);
pub type DepthEdge = (String, String, usize);
pub type KeywordEdge = (String, String, usize, String);

/// Names reachable from `origin` by repeatedly following upstream
/// dependencies. Includes `origin` itself; callers wanting the exclusive
/// set remove it.
pub(crate) fn dependency_closure(graph: &PackageGraph, origin: &str) -> BTreeSet<String> {
    let mut visited: BTreeSet<String> = BTreeSet::new();
    visited.insert(origin.to_string());
    let mut queue: VecDeque<String> = VecDeque::new();
    queue.push_back(origin.to_string());
    while let Some(name) = queue.pop_front() {
        let Some(vertex) = graph.vertex(&name) else { continue };
        for dep in &vertex.upstream_dependencies {
            if visited.insert(dep.clone()) {
                queue.push_back(dep.clone());
            }
        }
    }
    visited
}

/// Count of the transitive upstream closure, excluding `origin`.
pub(crate) fn transitive_dependency_count(graph: &PackageGraph, origin: &str) -> usize {
    dependency_closure(graph, origin).len() - 1
}

/// Every (dependent, dependency) edge in the upstream closure of `origin`,
/// annotated with the 1-based depth at which the dependency is reached:
/// edges out of the origin carry depth 1, edges out of its direct
/// dependencies carry depth 2, and so on.
pub(crate) fn dependency_depth_edges(graph: &PackageGraph, origin: &str) -> Vec<DepthEdge> {
    let mut edges: Vec<DepthEdge> = Vec::new();
    let mut visited: BTreeSet<String> = BTreeSet::new();
    visited.insert(origin.to_string());
    let mut queue: VecDeque<(String, usize)> = VecDeque::new();
    queue.push_back((origin.to_string(), 0));
    while let Some((name, depth)) = queue.pop_front() {
        let Some(vertex) = graph.vertex(&name) else { continue };
        for dep in &vertex.upstream_dependencies {
            edges.push((name.clone(), dep.clone(), depth + 1));
            if visited.insert(dep.clone()) {
                queue.push_back((dep.clone(), depth + 1));
            }
        }
    }
    if edges.is_empty() {
        edges.push((origin.to_string(), origin.to_string(), 1));
    }
    edges
}

/// Same traversal as `dependency_depth_edges`, without the depth column.
pub(crate) fn dependency_edges(graph: &PackageGraph, origin: &str) -> Vec<DependencyEdge> {
    dependency_depth_edges(graph, origin).into_iter().map(|(from, to, _)| (from, to)).collect()
}

/// Keyword edges reachable from `origin` within `max_depth` hops.
///
/// At each depth the whole frontier's keyword buckets are emitted, but a
/// vertex joins the next frontier only on its first appearance, which keeps
/// the walk finite on densely connected keyword components.
pub(crate) fn keyword_edges(graph: &PackageGraph, origin: &str, max_depth: usize) -> Vec<KeywordEdge> {
    let mut edges: Vec<KeywordEdge> = Vec::new();
    let mut visited: BTreeSet<String> = BTreeSet::new();
    visited.insert(origin.to_string());
    let mut frontier: Vec<String> = vec![origin.to_string()];
    for depth in 1..=max_depth {
        let mut next: Vec<String> = Vec::new();
        for name in &frontier {
            let Some(vertex) = graph.vertex(name) else { continue };
            for (keyword, others) in &vertex.keyword_relationships {
                for other in others {
                    edges.push((name.clone(), other.clone(), depth, keyword.clone()));
                    if visited.insert(other.clone()) {
                        next.push(other.clone());
                    }
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }
    if edges.is_empty() {
        edges.push((origin.to_string(), origin.to_string(), 1, String::new()));
    }
    edges
}

/// Two-hop maintainer ego network around `origin`: depth-1 rows pair the
/// origin with each package sharing a maintainer, depth-2 rows pair those
/// neighbors with each other when they also share a maintainer. Each
/// unordered neighbor pair appears once.
pub(crate) fn maintainer_network(graph: &PackageGraph, origin: &str) -> Vec<DepthEdge> {
    let mut edges: Vec<DepthEdge> = Vec::new();
    let Some(vertex) = graph.vertex(origin) else {
        return vec![(origin.to_string(), origin.to_string(), 1)];
    };
    let neighbors: Vec<&String> = vertex.maintainer_relationships.iter().collect();
    for neighbor in &neighbors {
        edges.push((origin.to_string(), (*neighbor).clone(), 1));
    }
    for (i, a) in neighbors.iter().enumerate() {
        let Some(a_vertex) = graph.vertex(a) else { continue };
        for b in &neighbors[i + 1..] {
            if a_vertex.maintainer_relationships.contains(*b) {
                edges.push(((*a).clone(), (*b).clone(), 2));
            }
        }
    }
    if edges.is_empty() {
        edges.push((origin.to_string(), origin.to_string(), 1));
    }
    edges
}
