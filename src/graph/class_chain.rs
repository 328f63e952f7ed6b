// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use serde::Serialize;
use smol_str::SmolStr;

use super::{GraphEdge, NodeRef};
use crate::model::CellRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassNode {
    class_name: SmolStr,
    rank: usize,
}

impl ClassNode {
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// First-appearance rank; the layout stacks nodes vertically by it.
    pub fn rank(&self) -> usize {
        self.rank
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ClassChainGraph {
    nodes: Vec<ClassNode>,
    edges: Vec<GraphEdge>,
}

impl ClassChainGraph {
    pub fn nodes(&self) -> &[ClassNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node(&self, node: NodeRef) -> Option<&ClassNode> {
        self.nodes.get(node.index())
    }

    pub fn find(&self, class_name: &str) -> Option<NodeRef> {
        self.nodes.iter().position(|node| node.class_name == class_name).map(NodeRef::new)
    }
}

/// One node per distinct class, one edge per adjacent pair whose class differs.
///
/// Runs of the same class collapse into their node without a self-edge. Repeated transitions
/// between the same two classes each get their own edge.
pub fn build_class_chain<R: Borrow<CellRecord>>(cells: &[R]) -> ClassChainGraph {
    let mut graph = ClassChainGraph::default();
    let mut seen = BTreeMap::<SmolStr, NodeRef>::new();
    let mut previous: Option<NodeRef> = None;

    for cell in cells {
        let cell = cell.borrow();
        let node = match seen.get(cell.class_name()) {
            Some(&node) => node,
            None => {
                let node = NodeRef::new(graph.nodes.len());
                graph.nodes.push(ClassNode {
                    class_name: cell.class_name_smol().clone(),
                    rank: node.index(),
                });
                seen.insert(cell.class_name_smol().clone(), node);
                node
            }
        };

        if let Some(previous) = previous {
            if previous != node {
                graph.edges.push(GraphEdge { source: previous, target: node });
            }
        }
        previous = Some(node);
    }

    graph
}
