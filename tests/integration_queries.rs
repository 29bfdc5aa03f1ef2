use std::path::Path;

use package_relations_explorer::graph::PackageGraph;
use package_relations_explorer::ingest::records_from_str;
use package_relations_explorer::query::{
    AllDependenciesQuery, DependencyCountQuery, DirectDependenciesQuery, MostDependenciesQuery,
    Query, SearchPackagesQuery, SharedMaintainersQuery,
};

const RECORDS: &str = r#"[
    {
        "name": "left-pad",
        "version": "1.3.0",
        "keywords": ["string", "padding"],
        "dependencies": {},
        "maintainers": ["stevemao"],
        "quality": 0.8,
        "downloadsCount": 1000000.0
    },
    {
        "name": "pad-kit",
        "version": "0.2.1",
        "keywords": ["padding"],
        "dependencies": {"left-pad": "^1.0.0"},
        "maintainers": ["stevemao", "alice"]
    },
    {
        "name": "webapp",
        "version": "2.0.0",
        "keywords": ["web"],
        "dependencies": {"pad-kit": "*", "left-pad": "*"},
        "maintainers": ["alice"]
    }
]"#;

fn sample_graph() -> PackageGraph {
    let records = records_from_str(RECORDS, Path::new("fixture.json")).expect("parse fixture");
    PackageGraph::build_from_records(records)
}

#[test]
fn integration_dependency_queries() {
    let graph = sample_graph();
    assert_eq!(graph.len(), 3);

    let direct = DirectDependenciesQuery::new("webapp").run(&graph).unwrap();
    assert_eq!(direct, vec!["left-pad".to_string(), "pad-kit".to_string()]);

    // left-pad is reachable both directly and through pad-kit; counted once
    assert_eq!(DependencyCountQuery::new("webapp").run(&graph).unwrap(), 2);

    let all = AllDependenciesQuery::new("webapp").run(&graph).unwrap();
    assert!(all.contains("webapp"));
    assert_eq!(all.len(), 3);
}

#[test]
fn integration_shared_maintainers() {
    let graph = sample_graph();
    let shared = SharedMaintainersQuery::new("pad-kit").run(&graph).unwrap();
    let names: Vec<&str> = shared.iter().map(String::as_str).collect();
    assert_eq!(names, vec!["left-pad", "webapp"]);
}

#[test]
fn integration_ranking_and_search() {
    let graph = sample_graph();
    let (names, counts) = MostDependenciesQuery::new(2).run(&graph).unwrap();
    assert_eq!(names, vec!["pad-kit".to_string(), "webapp".to_string()]);
    assert_eq!(counts, vec![1, 2]);

    let pattern = regex::Regex::new("pad").unwrap();
    let hits = SearchPackagesQuery::new(pattern).run(&graph).unwrap();
    assert_eq!(hits, vec!["left-pad".to_string(), "pad-kit".to_string()]);
}

#[test]
fn integration_self_dependency_yields_empty_closure() {
    let records =
        records_from_str(r#"[{"name": "ouro", "dependencies": {"ouro": "*"}}]"#, Path::new("x"))
            .unwrap();
    let graph = PackageGraph::build_from_records(records);

    assert_eq!(DependencyCountQuery::new("ouro").run(&graph).unwrap(), 0);
    assert!(DirectDependenciesQuery::new("ouro").run(&graph).unwrap().is_empty());

    // The serialized vertex carries no self-edge either
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");
    graph.save_json(&path).unwrap();
    let json = std::fs::read_to_string(&path).unwrap();
    assert!(!json.contains(r#""upstream_dependencies": ["ouro"]"#));
}

#[test]
fn integration_save_load_round_trip() {
    let graph = sample_graph();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");
    graph.save_json(&path).unwrap();

    let loaded = PackageGraph::load_json(&path).unwrap();
    assert_eq!(loaded.len(), graph.len());
    assert_eq!(
        DependencyCountQuery::new("webapp").run(&loaded).unwrap(),
        DependencyCountQuery::new("webapp").run(&graph).unwrap()
    );
}
