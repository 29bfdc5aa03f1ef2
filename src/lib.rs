//! package-relations-explorer — npm Package Relationship Graph
//!
//! Build a relationship graph from npm registry package records and query it.
//!
//! # Features
//! - Directed dependency edges plus symmetric keyword and maintainer edges
//! - Cycle-safe traversal: transitive closures, depth-annotated edge lists
//! - Rankings: top packages by transitive dependency count, keyword histogram
//! - Deterministic layered layout producing renderer-ready figure data
//!
//! # Quickstart (Library)
//! ```no_run
//! use package_relations_explorer::graph::PackageGraph;
//! use package_relations_explorer::ingest::load_records;
//! use package_relations_explorer::query::{DependencyCountQuery, Query};
//!
//! let records = load_records(std::path::Path::new("packages.json")).expect("read records");
//! let graph = PackageGraph::build_from_records(records);
//! let count = DependencyCountQuery::new("lodash").run(&graph).expect("known package");
//! println!("lodash pulls in {count} packages");
//! ```
//!
//! # Quickstart (CLI)
//! ```text
//! package-relations-explorer build --data packages.json --save graph.json
//! package-relations-explorer query deps --graph graph.json --package lodash --all
//! package-relations-explorer query figure --graph graph.json --package lodash --edges keywords
//! ```
pub mod app;
pub mod cli;
pub mod errors;
pub mod graph;
pub mod ingest;
pub mod layout;
pub mod query;
pub mod utils;
pub mod visualization;
