// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::{build_occurrence, link_same_document, OccurrenceGraph};
use crate::graph::{GraphBuildError, GraphEdge};
use crate::model::{CellId, CellKey, CellRecord, DocumentId, Taxonomy, TaxonomyClass};

fn cell(doc: i64, id: i64, class: &str, cluster: &str) -> CellRecord {
    CellRecord::new(DocumentId::new(doc), CellId::new(id), format!("code{id}"), class, cluster)
}

fn key(doc: i64, id: i64) -> CellKey {
    CellKey::new(DocumentId::new(doc), CellId::new(id))
}

fn edge_keys(graph: &OccurrenceGraph) -> Vec<(CellKey, CellKey)> {
    graph
        .edges()
        .iter()
        .map(|GraphEdge { source, target }| {
            (graph.node(*source).unwrap().key(), graph.node(*target).unwrap().key())
        })
        .collect()
}

#[test]
fn single_document_scenario_links_consecutive_cells() {
    let cells = vec![
        cell(1, 1, "Extract", "c1"),
        cell(1, 2, "Extract", "c1"),
        cell(1, 3, "Transform", "c2"),
    ];
    let graph = build_occurrence(&cells, Taxonomy::builtin()).unwrap();

    assert_eq!(graph.nodes().len(), 3);
    assert_eq!(edge_keys(&graph), vec![(key(1, 1), key(1, 2)), (key(1, 2), key(1, 3))]);
    let rows = graph.rows().iter().map(|row| row.as_str()).collect::<Vec<_>>();
    assert_eq!(rows, vec!["Extract", "Transform"]);

    let slots = graph
        .nodes()
        .iter()
        .map(|node| (node.cell_id().get(), node.row(), node.column()))
        .collect::<Vec<_>>();
    assert_eq!(slots, vec![(1, 0, 0), (2, 0, 1), (3, 1, 0)]);
}

#[test]
fn cross_document_adjacency_never_links() {
    let cells = vec![
        cell(1, 1, "A", "c1"),
        cell(1, 2, "B", "c2"),
        cell(2, 1, "A", "c1"),
        cell(2, 2, "A", "c3"),
    ];
    let graph = build_occurrence(&cells, Taxonomy::builtin()).unwrap();

    assert_eq!(edge_keys(&graph), vec![(key(1, 1), key(1, 2)), (key(2, 1), key(2, 2))]);
    for edge in graph.edges() {
        let source = graph.node(edge.source).unwrap();
        let target = graph.node(edge.target).unwrap();
        assert_eq!(source.document_id(), target.document_id());
    }
}

#[test]
fn interleaved_documents_only_link_sequence_neighbours() {
    let cells = vec![cell(1, 1, "A", "x"), cell(2, 1, "A", "x"), cell(1, 2, "A", "x")];
    let graph = build_occurrence(&cells, Taxonomy::builtin()).unwrap();
    assert!(graph.edges().is_empty());
}

#[test]
fn row_groups_by_cluster_then_document() {
    let cells = vec![
        cell(1, 1, "A", "late"),
        cell(1, 2, "A", "early"),
        cell(2, 1, "A", "early"),
        cell(2, 2, "A", "late"),
    ];
    let graph = build_occurrence(&cells, Taxonomy::builtin()).unwrap();
    let order = graph
        .nodes()
        .iter()
        .map(|node| (node.cluster_name(), node.document_id().get()))
        .collect::<Vec<_>>();
    assert_eq!(order, vec![("late", 1), ("late", 2), ("early", 1), ("early", 2)]);
}

#[test]
fn known_clusters_follow_taxonomy_order() {
    let taxonomy = Taxonomy::new(vec![
        TaxonomyClass::new("Load", "#000").with_clusters(["csv", "sql"]),
    ]);
    let cells = vec![
        cell(1, 1, "Load", "custom"),
        cell(1, 2, "Load", "sql"),
        cell(2, 1, "Load", "csv"),
    ];
    let graph = build_occurrence(&cells, &taxonomy).unwrap();
    let order = graph.nodes().iter().map(|node| node.cluster_name()).collect::<Vec<_>>();
    assert_eq!(order, vec!["csv", "sql", "custom"]);
    let columns = graph.nodes().iter().map(|node| node.column()).collect::<Vec<_>>();
    assert_eq!(columns, vec![0, 1, 2]);
    assert_eq!(graph.nodes()[0].id(), 2);
    assert_eq!(graph.find(key(2, 1)).map(|node| node.index()), Some(0));
}

#[test]
fn duplicate_occurrence_fails_the_build() {
    let cells = vec![cell(1, 1, "A", "x"), cell(1, 1, "A", "x")];
    let err = build_occurrence(&cells, Taxonomy::builtin()).unwrap_err();
    assert_eq!(
        err,
        GraphBuildError::DuplicateOccurrence {
            document_id: DocumentId::new(1),
            cell_id: CellId::new(1),
        }
    );
}

#[test]
fn missing_node_is_a_lookup_inconsistency() {
    let cells = vec![cell(4, 1, "A", "x"), cell(4, 2, "B", "y")];
    let partial = BTreeMap::from([(key(4, 1), crate::graph::NodeRef::new(0))]);
    let err = link_same_document(&cells, &partial).unwrap_err();
    assert_eq!(
        err,
        GraphBuildError::NodeLookupInconsistency {
            document_id: DocumentId::new(4),
            cell_id: CellId::new(2),
        }
    );
}

#[test]
fn empty_sequence_builds_empty_graph() {
    let graph = build_occurrence::<CellRecord>(&[], Taxonomy::builtin()).unwrap();
    assert!(graph.nodes().is_empty());
    assert!(graph.edges().is_empty());
    assert!(graph.rows().is_empty());
}
