// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Deterministic node placement and curved edge geometry for execution graphs.
//!
//! Class chains stack rounded boxes in one column; occurrence graphs place circles on a
//! class-row grid and draw arrowed curves between them. Both end by sizing the canvas to the
//! padded bounding box of everything drawn.

use std::fmt;

use serde::Serialize;
use smol_str::SmolStr;

use crate::config::GraphConfig;
use crate::graph::{ExecutionGraph, GraphEdge, GraphMode, NodeRef};
use crate::model::Taxonomy;

pub mod class_chain;
pub mod geometry;
pub mod occurrence;

pub use class_chain::layout_class_chain;
pub use geometry::{unit, Arrowhead, Point, QuadCurve, Vector};
pub use occurrence::layout_occurrence;

use geometry::Bounds;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedGraph {
    mode: GraphMode,
    nodes: Vec<PositionedNode>,
    edges: Vec<EdgePath>,
    canvas: Option<Canvas>,
}

impl PositionedGraph {
    pub fn empty(mode: GraphMode) -> Self {
        Self { mode, nodes: Vec::new(), edges: Vec::new(), canvas: None }
    }

    pub fn mode(&self) -> GraphMode {
        self.mode
    }

    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgePath] {
        &self.edges
    }

    /// `None` for an empty graph: there is nothing to draw and no surface to size.
    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    pub fn node(&self, node: NodeRef) -> Option<&PositionedNode> {
        self.nodes.get(node.index())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    pub node: NodeRef,
    pub label: SmolStr,
    pub class_name: SmolStr,
    pub color: SmolStr,
    pub center: Point,
    pub shape: NodeShape,
}

impl PositionedNode {
    /// Top-left corner of the node's bounding box.
    pub fn origin(&self) -> Point {
        match self.shape {
            NodeShape::RoundedBox { width, height, .. } => {
                self.center.offset(-width / 2.0, -height / 2.0)
            }
            NodeShape::Circle { radius } => self.center.offset(-radius, -radius),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeShape {
    RoundedBox { width: f64, height: f64, corner_radius: f64 },
    Circle { radius: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgePath {
    pub edge: GraphEdge,
    pub curve: QuadCurve,
    pub arrowhead: Option<Arrowhead>,
}

/// Drawing surface fitted to the content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Canvas {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    /// Value for an SVG `viewBox` attribute.
    pub fn view_box(&self) -> String {
        format!(
            "{} {} {} {}",
            geometry::svg_num(self.min_x),
            geometry::svg_num(self.min_y),
            geometry::svg_num(self.width),
            geometry::svg_num(self.height)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    UnknownNode { edge_index: usize, node: NodeRef },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode { edge_index, node } => {
                write!(f, "edge {edge_index} references unknown node {node}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Positions `graph`, coloring nodes from the built-in taxonomy.
pub fn layout(
    graph: &ExecutionGraph,
    config: &GraphConfig,
) -> Result<PositionedGraph, LayoutError> {
    layout_with(graph, config, Taxonomy::builtin())
}

pub fn layout_with(
    graph: &ExecutionGraph,
    config: &GraphConfig,
    taxonomy: &Taxonomy,
) -> Result<PositionedGraph, LayoutError> {
    let (nodes, edges) = match graph {
        ExecutionGraph::ClassChain(graph) => {
            layout_class_chain(graph, &config.class_chain, taxonomy)?
        }
        ExecutionGraph::Occurrence(graph) => {
            layout_occurrence(graph, &config.occurrence, taxonomy)?
        }
    };
    let canvas = fit_canvas(&nodes, &edges, config.canvas_padding);
    Ok(PositionedGraph { mode: graph.mode(), nodes, edges, canvas })
}

pub(crate) fn endpoint<'a>(
    nodes: &'a [PositionedNode],
    edge_index: usize,
    node: NodeRef,
) -> Result<&'a PositionedNode, LayoutError> {
    nodes.get(node.index()).ok_or(LayoutError::UnknownNode { edge_index, node })
}

/// Union of all node extents and edge geometry, grown by `padding` on every side.
fn fit_canvas(nodes: &[PositionedNode], edges: &[EdgePath], padding: f64) -> Option<Canvas> {
    let mut bounds = Bounds::empty();
    for node in nodes {
        match node.shape {
            NodeShape::RoundedBox { width, height, .. } => {
                let origin = node.origin();
                bounds.include_rect(origin.x, origin.y, width, height);
            }
            NodeShape::Circle { radius } => bounds.include_circle(node.center, radius),
        }
    }
    for edge in edges {
        for point in edge.curve.points() {
            bounds.include_point(point);
        }
        if let Some(arrowhead) = &edge.arrowhead {
            for point in arrowhead.points() {
                bounds.include_point(point);
            }
        }
    }

    if bounds.is_empty() {
        return None;
    }
    Some(Canvas {
        min_x: bounds.min_x() - padding,
        min_y: bounds.min_y() - padding,
        width: bounds.width() + padding * 2.0,
        height: bounds.height() + padding * 2.0,
    })
}
