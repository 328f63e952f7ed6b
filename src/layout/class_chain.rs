// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smol_str::SmolStr;

use super::geometry::{Point, QuadCurve};
use super::{endpoint, EdgePath, LayoutError, NodeShape, PositionedNode};
use crate::config::{ChainAnchor, ClassChainStyle};
use crate::graph::{ClassChainGraph, NodeRef};
use crate::model::Taxonomy;

/// Single column of boxes, one row pitch apart in first-appearance order.
///
/// Each transition is a curve from the source box's anchor to the target box's anchor through
/// a point pulled half a box width off the column, straightened toward the chord by
/// `bundle_beta`. [`ChainAnchor`] picks where on the box a curve attaches.
pub fn layout_class_chain(
    graph: &ClassChainGraph,
    style: &ClassChainStyle,
    taxonomy: &Taxonomy,
) -> Result<(Vec<PositionedNode>, Vec<EdgePath>), LayoutError> {
    let nodes = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(idx, node)| {
            let x = style.column_x;
            let y = style.top_margin + node.rank() as f64 * style.row_pitch;
            PositionedNode {
                node: NodeRef::new(idx),
                label: SmolStr::new(node.class_name()),
                class_name: SmolStr::new(node.class_name()),
                color: SmolStr::new(taxonomy.class_color(node.class_name())),
                center: Point::new(x + style.node_width / 2.0, y + style.node_height / 2.0),
                shape: NodeShape::RoundedBox {
                    width: style.node_width,
                    height: style.node_height,
                    corner_radius: style.corner_radius,
                },
            }
        })
        .collect::<Vec<_>>();

    let beta = style.bundle_beta.clamp(0.0, 1.0);
    let mut edges = Vec::with_capacity(graph.edges().len());
    for (edge_index, edge) in graph.edges().iter().enumerate() {
        let source = anchor(endpoint(&nodes, edge_index, edge.source)?, style);
        let target = anchor(endpoint(&nodes, edge_index, edge.target)?, style);

        let chord_mid = source.midpoint(target);
        let pulled = chord_mid.offset(-style.node_width / 2.0, 0.0);
        let through = chord_mid.lerp(pulled, beta);

        edges.push(EdgePath {
            edge: *edge,
            curve: QuadCurve::through(source, through, target),
            arrowhead: None,
        });
    }

    Ok((nodes, edges))
}

fn anchor(node: &PositionedNode, style: &ClassChainStyle) -> Point {
    let origin = node.origin();
    match style.anchor {
        ChainAnchor::BottomCenter => {
            Point::new(origin.x + style.node_width / 2.0, origin.y + style.node_height)
        }
        ChainAnchor::LeftEdge => Point::new(origin.x, origin.y + style.node_height / 2.0),
    }
}
