// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Owner of the loaded cells, the selection, and the view derived from them.
//!
//! Every selection change runs the whole pipeline (filter, group, build, lay out) against a
//! candidate selection. The new view and selection replace the current ones only when every
//! stage succeeded; a failed rebuild leaves both untouched.

use std::fmt;

use serde::Serialize;

use crate::config::GraphConfig;
use crate::format::{normalize, MissingTitleWarning, VizDocument};
use crate::graph::{build_graph_with, ExecutionGraph, GraphBuildError, GraphMode};
use crate::layout::{layout_with, LayoutError, PositionedGraph};
use crate::model::{CellRecord, ClusterRef, DocumentId, DocumentSelection, SelectionState, Taxonomy};
use crate::query::{group, Grouping};
use crate::store::{read_document, ContentSource, LoadError};

/// One complete, consistent projection of the records under a selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedView {
    generation: u64,
    #[serde(skip)]
    visible: Vec<usize>,
    groups: Grouping,
    inspected: Grouping,
    graph: ExecutionGraph,
    layout: PositionedGraph,
}

impl DerivedView {
    /// Bumped on every successful rebuild.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn mode(&self) -> GraphMode {
        self.graph.mode()
    }

    pub fn groups(&self) -> &Grouping {
        &self.groups
    }

    pub fn inspected_groups(&self) -> &Grouping {
        &self.inspected
    }

    pub fn graph(&self) -> &ExecutionGraph {
        &self.graph
    }

    pub fn layout(&self) -> &PositionedGraph {
        &self.layout
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebuildError {
    Graph(GraphBuildError),
    Layout(LayoutError),
}

impl fmt::Display for RebuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Graph(err) => write!(f, "graph construction failed: {err}"),
            Self::Layout(err) => write!(f, "layout failed: {err}"),
        }
    }
}

impl std::error::Error for RebuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Graph(err) => Some(err),
            Self::Layout(err) => Some(err),
        }
    }
}

impl From<GraphBuildError> for RebuildError {
    fn from(value: GraphBuildError) -> Self {
        Self::Graph(value)
    }
}

impl From<LayoutError> for RebuildError {
    fn from(value: LayoutError) -> Self {
        Self::Layout(value)
    }
}

#[derive(Debug, Clone)]
pub struct Workbench {
    records: Vec<CellRecord>,
    document_ids: Vec<DocumentId>,
    warnings: Vec<MissingTitleWarning>,
    selection: SelectionState,
    config: GraphConfig,
    taxonomy: Taxonomy,
    view: DerivedView,
}

impl Workbench {
    /// Waits for the full content of `source`, then builds the initial view over all documents.
    ///
    /// Content that is empty or is not JSON yields an empty "no data" workbench; the parse
    /// failure is logged, not returned. JSON without the document's shape, or with a malformed
    /// cell list, is a [`LoadError::Malformed`].
    pub async fn load<S: ContentSource>(
        source: &S,
        config: GraphConfig,
    ) -> Result<Self, LoadError> {
        let document = match read_document(source).await {
            Ok(document) => document,
            Err(LoadError::Parse(err)) => {
                log::warn!("{} could not be parsed, showing no data: {err}", source.describe());
                None
            }
            Err(err) => return Err(err),
        };
        match document {
            Some(document) => Self::from_document(&document, config),
            None => Ok(Self::empty(config)),
        }
    }

    pub fn from_document(document: &VizDocument, config: GraphConfig) -> Result<Self, LoadError> {
        let normalized = normalize(&document.notebooks, document.cluster_titles())?;
        let warnings = normalized.warnings().to_vec();
        let mut workbench = Self::from_records(normalized.into_records(), config)?;
        workbench.document_ids = document.document_ids();
        workbench.warnings = warnings;
        Ok(workbench)
    }

    pub fn from_records(
        records: Vec<CellRecord>,
        config: GraphConfig,
    ) -> Result<Self, RebuildError> {
        Self::with_taxonomy(records, config, Taxonomy::builtin().clone())
    }

    pub fn with_taxonomy(
        records: Vec<CellRecord>,
        config: GraphConfig,
        taxonomy: Taxonomy,
    ) -> Result<Self, RebuildError> {
        let mut document_ids = Vec::<DocumentId>::new();
        for record in &records {
            if !document_ids.contains(&record.document_id()) {
                document_ids.push(record.document_id());
            }
        }
        let selection = SelectionState::new();
        let view = derive_view(&records, &selection, &config, &taxonomy, 1)?;
        Ok(Self { records, document_ids, warnings: Vec::new(), selection, config, taxonomy, view })
    }

    /// A workbench with nothing loaded. Its view is empty and has no canvas.
    pub fn empty(config: GraphConfig) -> Self {
        let graph = ExecutionGraph::Occurrence(Default::default());
        let layout = PositionedGraph::empty(GraphMode::Occurrence);
        Self {
            records: Vec::new(),
            document_ids: Vec::new(),
            warnings: Vec::new(),
            selection: SelectionState::new(),
            config,
            taxonomy: Taxonomy::builtin().clone(),
            view: DerivedView {
                generation: 1,
                visible: Vec::new(),
                groups: Grouping::default(),
                inspected: Grouping::default(),
                graph,
                layout,
            },
        }
    }

    pub fn is_no_data(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CellRecord] {
        &self.records
    }

    /// Distinct document ids in input order.
    pub fn document_ids(&self) -> &[DocumentId] {
        &self.document_ids
    }

    pub fn warnings(&self) -> &[MissingTitleWarning] {
        &self.warnings
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn active_documents(&self) -> &DocumentSelection {
        self.selection.documents()
    }

    pub fn is_cluster_active(&self, cluster: &ClusterRef) -> bool {
        self.selection.is_cluster_active(cluster)
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn view(&self) -> &DerivedView {
        &self.view
    }

    pub fn generation(&self) -> u64 {
        self.view.generation
    }

    /// Cells of the selected documents in sequence order.
    pub fn visible_cells(&self) -> Vec<&CellRecord> {
        self.view.visible.iter().map(|&idx| &self.records[idx]).collect()
    }

    pub fn groups(&self) -> &Grouping {
        &self.view.groups
    }

    /// Visible cells restricted to the active clusters, grouped for code inspection.
    pub fn inspected_groups(&self) -> &Grouping {
        &self.view.inspected
    }

    pub fn graph(&self) -> &ExecutionGraph {
        &self.view.graph
    }

    pub fn layout(&self) -> &PositionedGraph {
        &self.view.layout
    }

    pub fn set_active_documents(
        &mut self,
        ids: impl IntoIterator<Item = DocumentId>,
    ) -> Result<(), RebuildError> {
        self.update(|selection| selection.set_active_documents(ids))
    }

    pub fn set_document_selection(
        &mut self,
        documents: DocumentSelection,
    ) -> Result<(), RebuildError> {
        self.update(|selection| selection.set_document_selection(documents))
    }

    pub fn add_active_document(&mut self, document_id: DocumentId) -> Result<bool, RebuildError> {
        self.update(|selection| selection.add_active_document(document_id))
    }

    pub fn remove_active_document(
        &mut self,
        document_id: DocumentId,
    ) -> Result<bool, RebuildError> {
        self.update(|selection| selection.remove_active_document(document_id))
    }

    /// Flips one cluster and returns whether it is active afterwards.
    pub fn toggle_cluster(&mut self, cluster: ClusterRef) -> Result<bool, RebuildError> {
        self.update(|selection| selection.toggle_cluster(cluster))
    }

    pub fn clear_clusters(&mut self) -> Result<(), RebuildError> {
        self.update(SelectionState::clear_clusters)
    }

    pub fn set_config(&mut self, config: GraphConfig) -> Result<(), RebuildError> {
        let view = derive_view(
            &self.records,
            &self.selection,
            &config,
            &self.taxonomy,
            self.view.generation + 1,
        )?;
        self.config = config;
        self.view = view;
        Ok(())
    }

    fn update<T>(
        &mut self,
        change: impl FnOnce(&mut SelectionState) -> T,
    ) -> Result<T, RebuildError> {
        let mut selection = self.selection.clone();
        let outcome = change(&mut selection);
        let view = derive_view(
            &self.records,
            &selection,
            &self.config,
            &self.taxonomy,
            self.view.generation + 1,
        )?;
        self.selection = selection;
        self.view = view;
        Ok(outcome)
    }
}

fn derive_view(
    records: &[CellRecord],
    selection: &SelectionState,
    config: &GraphConfig,
    taxonomy: &Taxonomy,
    generation: u64,
) -> Result<DerivedView, RebuildError> {
    let visible = selection.visible_indices(records);
    let cells = visible.iter().map(|&idx| &records[idx]).collect::<Vec<_>>();

    let groups = group(cells.iter().copied());
    let inspected = group(cells.iter().copied().filter(|record| selection.admits_cluster(record)));

    let mode = config.mode_for(cells.len());
    let graph = build_graph_with(&cells, mode, taxonomy)?;
    let layout = layout_with(&graph, config, taxonomy)?;

    log::debug!(
        "rebuilt view generation {generation}: {} visible cells, {mode} graph with {} nodes and {} edges",
        cells.len(),
        graph.node_count(),
        graph.edges().len()
    );

    Ok(DerivedView { generation, visible, groups, inspected, graph, layout })
}
