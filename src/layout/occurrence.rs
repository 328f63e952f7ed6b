// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smol_str::SmolStr;

use super::geometry::{unit, Arrowhead, Point, QuadCurve, Vector};
use super::{endpoint, EdgePath, LayoutError, NodeShape, PositionedNode};
use crate::config::{CurvatureSign, OccurrenceStyle};
use crate::graph::{NodeRef, OccurrenceGraph};
use crate::model::Taxonomy;

/// Places each occurrence on its `(row, column)` slot and routes every edge as a curve that
/// leaves the source circle's rim and stops short of the target so the arrowhead touches it.
pub fn layout_occurrence(
    graph: &OccurrenceGraph,
    style: &OccurrenceStyle,
    taxonomy: &Taxonomy,
) -> Result<(Vec<PositionedNode>, Vec<EdgePath>), LayoutError> {
    let nodes = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(idx, node)| PositionedNode {
            node: NodeRef::new(idx),
            label: SmolStr::new(node.cluster_name()),
            class_name: SmolStr::new(node.class_name()),
            color: SmolStr::new(taxonomy.class_color(node.class_name())),
            center: slot_center(node.row(), node.column(), style),
            shape: NodeShape::Circle { radius: style.node_radius },
        })
        .collect::<Vec<_>>();

    let mut edges = Vec::with_capacity(graph.edges().len());
    for (edge_index, edge) in graph.edges().iter().enumerate() {
        let source = endpoint(&nodes, edge_index, edge.source)?.center;
        let target = endpoint(&nodes, edge_index, edge.target)?.center;
        let (curve, arrowhead) = route(source, target, style);
        edges.push(EdgePath { edge: *edge, curve, arrowhead });
    }

    Ok((nodes, edges))
}

fn slot_center(row: usize, column: usize, style: &OccurrenceStyle) -> Point {
    Point::new(
        style.margin + column as f64 * style.spacing_x,
        style.margin + row as f64 * style.spacing_y,
    )
}

fn route(
    source: Point,
    target: Point,
    style: &OccurrenceStyle,
) -> (QuadCurve, Option<Arrowhead>) {
    let chord_mid = source.midpoint(target);
    let control = match unit(source, target) {
        Some(dir) => {
            let normal = bend_normal(dir, style.curvature_sign);
            chord_mid.along(normal, style.curvature)
        }
        None => chord_mid,
    };

    let radius = style.node_radius;
    let start = match unit(source, control) {
        Some(dir) => source.along(dir, radius),
        None => source,
    };
    let incoming = unit(control, target).or_else(|| unit(source, target));
    let (end, arrowhead) = match incoming {
        Some(dir) => {
            let tip = target.along(dir, -radius);
            let end = target.along(dir, -(radius + style.arrow_length));
            (end, Some(Arrowhead::new(tip, dir, style.arrow_length)))
        }
        None => (target, None),
    };

    (QuadCurve { start, control, end }, arrowhead)
}

/// Unit offset direction for the control point of an edge travelling along `dir`.
fn bend_normal(dir: Vector, sign: CurvatureSign) -> Vector {
    let left = dir.left_normal();
    match sign {
        CurvatureSign::Fixed => left,
        CurvatureSign::BowAwayFromTravel => {
            let upward = if left.y < 0.0 || (left.y == 0.0 && left.x < 0.0) {
                left
            } else {
                left.negated()
            };
            let forward = dir.y > 0.0 || (dir.y == 0.0 && dir.x > 0.0);
            if forward {
                upward
            } else {
                upward.negated()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{route, Point};
    use crate::config::{CurvatureSign, OccurrenceStyle};

    fn style(sign: CurvatureSign) -> OccurrenceStyle {
        OccurrenceStyle { curvature_sign: sign, ..OccurrenceStyle::default() }
    }

    #[rstest]
    #[case(CurvatureSign::BowAwayFromTravel)]
    #[case(CurvatureSign::Fixed)]
    fn reversed_edges_take_different_paths(#[case] sign: CurvatureSign) {
        let a = Point::new(50.0, 50.0);
        let b = Point::new(200.0, 200.0);
        let (forward, _) = route(a, b, &style(sign));
        let (backward, _) = route(b, a, &style(sign));

        let (fx, fy) = (forward.control.x, forward.control.y);
        let (bx, by) = (backward.control.x, backward.control.y);
        assert!((fx - bx).abs() > 1.0 || (fy - by).abs() > 1.0);
    }

    #[test]
    fn downward_travel_bows_up_and_upward_travel_bows_down() {
        let style = style(CurvatureSign::BowAwayFromTravel);
        let top = Point::new(50.0, 50.0);
        let bottom = Point::new(50.0, 200.0);

        let (down, _) = route(top, bottom, &style);
        let (up, _) = route(bottom, top, &style);
        assert_eq!(down.control, Point::new(0.0, 125.0));
        assert_eq!(up.control, Point::new(100.0, 125.0));
    }

    #[test]
    fn leftward_travel_on_one_row_bows_down() {
        let style = style(CurvatureSign::BowAwayFromTravel);
        let (curve, arrowhead) = route(Point::new(200.0, 50.0), Point::new(50.0, 50.0), &style);
        assert_eq!(curve.control, Point::new(125.0, 100.0));
        assert!(arrowhead.is_some());
    }
}
