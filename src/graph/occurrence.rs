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

use super::{GraphBuildError, GraphEdge, NodeRef};
use crate::model::{CellId, CellKey, CellRecord, DocumentId, Taxonomy};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccurrenceNode {
    id: usize,
    cell_id: CellId,
    document_id: DocumentId,
    class_name: SmolStr,
    cluster_name: SmolStr,
    row: usize,
    column: usize,
}

impl OccurrenceNode {
    /// Position of the cell in the visible sequence.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn cell_id(&self) -> CellId {
        self.cell_id
    }

    pub fn document_id(&self) -> DocumentId {
        self.document_id
    }

    pub fn key(&self) -> CellKey {
        CellKey::new(self.document_id, self.cell_id)
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    /// Grid row: first-appearance rank of the node's class.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Grid column within the row.
    pub fn column(&self) -> usize {
        self.column
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct OccurrenceGraph {
    nodes: Vec<OccurrenceNode>,
    edges: Vec<GraphEdge>,
    rows: Vec<SmolStr>,
}

impl OccurrenceGraph {
    /// Nodes in grid order: row by row, left to right.
    pub fn nodes(&self) -> &[OccurrenceNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Class name of each row.
    pub fn rows(&self) -> &[SmolStr] {
        &self.rows
    }

    pub fn node(&self, node: NodeRef) -> Option<&OccurrenceNode> {
        self.nodes.get(node.index())
    }

    pub fn find(&self, key: CellKey) -> Option<NodeRef> {
        self.nodes.iter().position(|node| node.key() == key).map(NodeRef::new)
    }
}

/// One node per visible cell, edges between consecutive cells of the same document.
///
/// Rows follow class first appearance. Within a row, cells are ordered by cluster (taxonomy
/// order for known clusters, then discovery order), then by document first appearance, then by
/// sequence position.
pub fn build_occurrence<R: Borrow<CellRecord>>(
    cells: &[R],
    taxonomy: &Taxonomy,
) -> Result<OccurrenceGraph, GraphBuildError> {
    let mut rows = Vec::<SmolStr>::new();
    let mut row_of_class = BTreeMap::<SmolStr, usize>::new();
    let mut row_members = Vec::<Vec<usize>>::new();
    let mut document_rank = BTreeMap::<DocumentId, usize>::new();
    let mut cluster_discovery = BTreeMap::<(usize, SmolStr), usize>::new();

    for (seq, cell) in cells.iter().enumerate() {
        let cell = cell.borrow();
        let row = *row_of_class.entry(cell.class_name_smol().clone()).or_insert_with(|| {
            rows.push(cell.class_name_smol().clone());
            row_members.push(Vec::new());
            rows.len() - 1
        });
        row_members[row].push(seq);

        let next_rank = document_rank.len();
        document_rank.entry(cell.document_id()).or_insert(next_rank);

        let next_cluster = cluster_discovery.len();
        cluster_discovery.entry((row, cell.cluster_name_smol().clone())).or_insert(next_cluster);
    }

    let cluster_order = |row: usize, cell: &CellRecord| -> (usize, usize) {
        let canonical = taxonomy
            .cluster_rank(cell.class_name(), cell.cluster_name())
            .or_else(|| taxonomy.cluster_rank(cell.class_name(), cell.cluster_key()));
        let discovered = cluster_discovery
            .get(&(row, cell.cluster_name_smol().clone()))
            .copied()
            .unwrap_or(usize::MAX);
        match canonical {
            Some(rank) => (0, rank),
            None => (1, discovered),
        }
    };

    let mut graph = OccurrenceGraph { rows, ..OccurrenceGraph::default() };
    let mut node_of_cell = BTreeMap::<CellKey, NodeRef>::new();

    for (row, members) in row_members.iter_mut().enumerate() {
        members.sort_by_key(|&seq| {
            let cell = cells[seq].borrow();
            (cluster_order(row, cell), document_rank[&cell.document_id()], seq)
        });

        for (column, &seq) in members.iter().enumerate() {
            let cell = cells[seq].borrow();
            let node = NodeRef::new(graph.nodes.len());
            if node_of_cell.insert(cell.key(), node).is_some() {
                return Err(GraphBuildError::DuplicateOccurrence {
                    document_id: cell.document_id(),
                    cell_id: cell.cell_id(),
                });
            }
            graph.nodes.push(OccurrenceNode {
                id: seq,
                cell_id: cell.cell_id(),
                document_id: cell.document_id(),
                class_name: cell.class_name_smol().clone(),
                cluster_name: cell.cluster_name_smol().clone(),
                row,
                column,
            });
        }
    }

    graph.edges = link_same_document(cells, &node_of_cell)?;
    Ok(graph)
}

/// Edges between consecutive cells sharing a document, resolved through `node_of_cell`.
///
/// Every cell is expected to have a node; a miss is an internal inconsistency and fails the
/// whole build rather than dropping the edge.
fn link_same_document<R: Borrow<CellRecord>>(
    cells: &[R],
    node_of_cell: &BTreeMap<CellKey, NodeRef>,
) -> Result<Vec<GraphEdge>, GraphBuildError> {
    let lookup = |cell: &CellRecord| -> Result<NodeRef, GraphBuildError> {
        node_of_cell.get(&cell.key()).copied().ok_or(GraphBuildError::NodeLookupInconsistency {
            document_id: cell.document_id(),
            cell_id: cell.cell_id(),
        })
    };

    let mut edges = Vec::new();
    for pair in cells.windows(2) {
        let (from, to) = (pair[0].borrow(), pair[1].borrow());
        if from.document_id() != to.document_id() {
            continue;
        }
        edges.push(GraphEdge { source: lookup(from)?, target: lookup(to)? });
        log::trace!("occurrence edge {} -> {}", from.key(), to.key());
    }
    Ok(edges)
}

#[cfg(test)]
mod tests;
