// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Execution graphs built from an ordered, filtered cell sequence.
//!
//! Two shapes exist. The class chain has one node per distinct class and an edge per class
//! transition; it stays legible for long sequences. The occurrence graph has one node per
//! visible cell and links consecutive cells of the same document; it shows execution detail but
//! only reads well for a couple dozen nodes.

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

use crate::model::{CellId, CellRecord, DocumentId, Taxonomy};

pub mod class_chain;
pub mod occurrence;

pub use class_chain::{build_class_chain, ClassChainGraph, ClassNode};
pub use occurrence::{build_occurrence, OccurrenceGraph, OccurrenceNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphMode {
    ClassChain,
    Occurrence,
}

impl fmt::Display for GraphMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClassChain => f.write_str("class-chain"),
            Self::Occurrence => f.write_str("occurrence"),
        }
    }
}

/// Index of a node within its graph's node list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeRef(usize);

impl NodeRef {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub source: NodeRef,
    pub target: NodeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ExecutionGraph {
    ClassChain(ClassChainGraph),
    Occurrence(OccurrenceGraph),
}

impl ExecutionGraph {
    pub fn mode(&self) -> GraphMode {
        match self {
            Self::ClassChain(_) => GraphMode::ClassChain,
            Self::Occurrence(_) => GraphMode::Occurrence,
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            Self::ClassChain(graph) => graph.nodes().len(),
            Self::Occurrence(graph) => graph.nodes().len(),
        }
    }

    pub fn edges(&self) -> &[GraphEdge] {
        match self {
            Self::ClassChain(graph) => graph.edges(),
            Self::Occurrence(graph) => graph.edges(),
        }
    }

    /// An empty graph means "render nothing".
    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphBuildError {
    /// An edge endpoint has no constructed occurrence node.
    NodeLookupInconsistency { document_id: DocumentId, cell_id: CellId },
    /// The same `(document, cell)` occurs twice, so edge pairing would be ambiguous.
    DuplicateOccurrence { document_id: DocumentId, cell_id: CellId },
}

impl fmt::Display for GraphBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeLookupInconsistency { document_id, cell_id } => write!(
                f,
                "internal inconsistency: no occurrence node for cell {cell_id} of document {document_id}"
            ),
            Self::DuplicateOccurrence { document_id, cell_id } => {
                write!(f, "cell {cell_id} of document {document_id} occurs more than once")
            }
        }
    }
}

impl std::error::Error for GraphBuildError {}

/// Builds the graph of `mode` over `cells`, ordering clusters by the built-in taxonomy.
pub fn build_graph<R: Borrow<CellRecord>>(
    cells: &[R],
    mode: GraphMode,
) -> Result<ExecutionGraph, GraphBuildError> {
    build_graph_with(cells, mode, Taxonomy::builtin())
}

pub fn build_graph_with<R: Borrow<CellRecord>>(
    cells: &[R],
    mode: GraphMode,
    taxonomy: &Taxonomy,
) -> Result<ExecutionGraph, GraphBuildError> {
    let graph = match mode {
        GraphMode::ClassChain => ExecutionGraph::ClassChain(build_class_chain(cells)),
        GraphMode::Occurrence => ExecutionGraph::Occurrence(build_occurrence(cells, taxonomy)?),
    };
    log::debug!(
        "built {mode} graph: {} cells, {} nodes, {} edges",
        cells.len(),
        graph.node_count(),
        graph.edges().len()
    );
    Ok(graph)
}
