//! Figure assembly for the dashboard renderer.
//!
//! Combines an edge query with a layout algorithm into a serializable
//! `FigureData`: positioned nodes plus the edge list, which is everything
//! the external renderer needs. Styling (colors, sizes, hover text) is the
//! renderer's business; the only display-adjacent attribute carried here is
//! each node's quality score, which dashboards bucket into colors.
use serde::Serialize;

use crate::errors::PackageGraphError;
use crate::graph::traversal::DepthEdge;
use crate::graph::PackageGraph;
use crate::layout::LayoutKind;
use crate::query::{
    DependencyDepthEdgesQuery, KeywordRelationshipsQuery, MaintainerNetworkQuery, Query,
};

/// Which relationship edges a figure is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Dependencies,
    Keywords,
    Maintainers,
}

#[derive(Debug, Clone, Serialize)]
pub struct FigureNode {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub quality: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FigureEdge {
    pub from: String,
    pub to: String,
    pub depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

/// Position-and-edge data for one package's relationship figure.
///
/// A package with no edges of the requested kind carries the self-loop
/// sentinel row, which renderers use to detect the empty case.
#[derive(Debug, Clone, Serialize)]
pub struct FigureData {
    pub package: String,
    pub nodes: Vec<FigureNode>,
    pub edges: Vec<FigureEdge>,
}

/// Builds `FigureData` for a package from an edge kind and a layout kind.
pub struct FigureBuilder {
    pub edges: EdgeKind,
    pub layout: LayoutKind,
    /// Hop bound for keyword figures; ignored by the other edge kinds.
    pub max_depth: usize,
}

impl FigureBuilder {
    #[must_use]
    pub fn new(edges: EdgeKind, layout: LayoutKind) -> Self {
        Self { edges, layout, max_depth: 1 }
    }

    /// # Errors
    /// `PackageNotFound` when `package` is absent from the graph.
    pub fn build(
        &self,
        graph: &PackageGraph,
        package: &str,
    ) -> Result<FigureData, PackageGraphError> {
        let (depth_edges, figure_edges): (Vec<DepthEdge>, Vec<FigureEdge>) = match self.edges {
            EdgeKind::Dependencies => {
                let rows = DependencyDepthEdgesQuery::new(package).run(graph)?;
                let figure = rows
                    .iter()
                    .map(|(from, to, depth)| FigureEdge {
                        from: from.clone(),
                        to: to.clone(),
                        depth: *depth,
                        keyword: None,
                    })
                    .collect();
                (rows, figure)
            }
            EdgeKind::Keywords => {
                let rows =
                    KeywordRelationshipsQuery::with_depth(package, self.max_depth).run(graph)?;
                let depth_rows = rows
                    .iter()
                    .map(|(from, to, depth, _)| (from.clone(), to.clone(), *depth))
                    .collect();
                let figure = rows
                    .into_iter()
                    .map(|(from, to, depth, keyword)| FigureEdge {
                        from,
                        to,
                        depth,
                        keyword: Some(keyword),
                    })
                    .collect();
                (depth_rows, figure)
            }
            EdgeKind::Maintainers => {
                let rows = MaintainerNetworkQuery::new(package).run(graph)?;
                let figure = rows
                    .iter()
                    .map(|(from, to, depth)| FigureEdge {
                        from: from.clone(),
                        to: to.clone(),
                        depth: *depth,
                        keyword: None,
                    })
                    .collect();
                (rows, figure)
            }
        };

        let positions = self.layout.algorithm().compute_positions(&depth_edges);
        let nodes = positions
            .into_iter()
            .map(|(name, position)| {
                let quality = graph.vertex(&name).map_or(0.0, |v| v.quality);
                FigureNode { name, x: position.x, y: position.y, quality }
            })
            .collect();

        Ok(FigureData { package: package.to_string(), nodes, edges: figure_edges })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::PackageRecord;

    fn sample_graph() -> PackageGraph {
        let mut a = PackageRecord::named("a");
        a.dependencies.insert("b".to_string(), "*".to_string());
        a.keywords = vec!["web".to_string()];
        a.quality = 0.9;
        let mut b = PackageRecord::named("b");
        b.keywords = vec!["web".to_string()];
        b.quality = 0.4;
        PackageGraph::build_from_records(vec![a, b])
    }

    #[test]
    fn dependency_figure_positions_every_referenced_node() {
        let g = sample_graph();
        let figure =
            FigureBuilder::new(EdgeKind::Dependencies, LayoutKind::Layered).build(&g, "a").unwrap();
        assert_eq!(figure.package, "a");
        assert_eq!(figure.nodes.len(), 2);
        assert_eq!(figure.edges.len(), 1);
        assert!(figure.edges[0].keyword.is_none());
        let a = figure.nodes.iter().find(|n| n.name == "a").unwrap();
        assert!((a.quality - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn keyword_figure_carries_the_shared_keyword() {
        let g = sample_graph();
        let figure =
            FigureBuilder::new(EdgeKind::Keywords, LayoutKind::Layered).build(&g, "a").unwrap();
        assert!(figure.edges.iter().all(|e| e.keyword.as_deref() == Some("web")));
    }

    #[test]
    fn empty_maintainer_figure_keeps_the_sentinel_edge() {
        let g = sample_graph();
        let figure =
            FigureBuilder::new(EdgeKind::Maintainers, LayoutKind::Layered).build(&g, "a").unwrap();
        assert_eq!(figure.edges.len(), 1);
        assert_eq!(figure.edges[0].from, "a");
        assert_eq!(figure.edges[0].to, "a");
        assert_eq!(figure.nodes.len(), 1);
    }

    #[test]
    fn unknown_package_is_an_error() {
        let g = sample_graph();
        let err = FigureBuilder::new(EdgeKind::Dependencies, LayoutKind::Layered)
            .build(&g, "ghost")
            .unwrap_err();
        assert!(matches!(err, PackageGraphError::PackageNotFound { .. }));
    }
}
