//! Deterministic layered placement of traversal output.
//!
//! The input is a depth-annotated edge list as produced by the dependency
//! depth query; the output is a name -> coordinate map for an external
//! renderer. Standard layouts (force-directed, circular, ...) come from
//! whatever plotting library the dashboard uses and are selected through
//! the same `LayoutAlgorithm` seam; only the layered algorithm lives here.
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::graph::traversal::DepthEdge;

const LEVEL_SPACING: f64 = 4.0;
const NODE_SPACING: f64 = 1.0;
const VERTICAL_JITTER: f64 = 0.3;

/// A 2D coordinate handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Capability interface for layout algorithms.
///
/// Implementations must be deterministic: the same edge sequence in the
/// same order yields bit-identical coordinates.
pub trait LayoutAlgorithm {
    fn compute_positions(&self, edges: &[DepthEdge]) -> BTreeMap<String, Position>;
}

/// Tag for selecting a layout implementation explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Layered,
}

impl LayoutKind {
    #[must_use]
    pub fn algorithm(self) -> &'static dyn LayoutAlgorithm {
        match self {
            LayoutKind::Layered => &LayeredLayout,
        }
    }
}

/// Layered ("topological depth") layout.
///
/// Each vertex is assigned the deepest level it is observed at across all
/// edges: a "from" endpoint of an edge at depth d sits at level d - 1, a
/// "to" endpoint at level d, and a later observation at a deeper level
/// moves the vertex down, never up. Within a level, vertices appear in the
/// order they were assigned to that level; a vertex moved deeper leaves its
/// old level and joins the end of the new one. Members are spread at unit
/// spacing, with a half-unit stagger on odd levels and a small repeating
/// vertical jitter so same-level vertices are not perfectly collinear.
#[derive(Debug, Default, Clone, Copy)]
pub struct LayeredLayout;

fn assign(
    levels: &mut HashMap<String, usize>,
    buckets: &mut BTreeMap<usize, Vec<String>>,
    name: &str,
    level: usize,
) {
    match levels.get(name).copied() {
        Some(current) if current >= level => {}
        Some(current) => {
            if let Some(members) = buckets.get_mut(&current) {
                members.retain(|n| n != name);
            }
            levels.insert(name.to_string(), level);
            buckets.entry(level).or_default().push(name.to_string());
        }
        None => {
            levels.insert(name.to_string(), level);
            buckets.entry(level).or_default().push(name.to_string());
        }
    }
}

impl LayoutAlgorithm for LayeredLayout {
    fn compute_positions(&self, edges: &[DepthEdge]) -> BTreeMap<String, Position> {
        let mut levels: HashMap<String, usize> = HashMap::new();
        let mut buckets: BTreeMap<usize, Vec<String>> = BTreeMap::new();

        for (from, to, depth) in edges {
            assign(&mut levels, &mut buckets, from, depth.saturating_sub(1));
            assign(&mut levels, &mut buckets, to, *depth);
        }

        let mut positions: BTreeMap<String, Position> = BTreeMap::new();
        for (&level, members) in &buckets {
            let stagger = if level % 2 == 1 { NODE_SPACING / 2.0 } else { 0.0 };
            for (index, name) in members.iter().enumerate() {
                #[allow(clippy::cast_precision_loss)]
                let x = index as f64 * NODE_SPACING + stagger;
                #[allow(clippy::cast_precision_loss)]
                let y = -(level as f64) * LEVEL_SPACING + VERTICAL_JITTER * ((index % 3) as f64);
                positions.insert(name.clone(), Position { x, y });
            }
        }
        positions
    }
}
