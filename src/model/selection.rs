// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use serde::Serialize;

use super::cell::{CellRecord, ClusterRef};
use super::ids::DocumentId;

/// Which documents are shown.
///
/// `All` is the explicit "no filter" marker. An `Ids` selection is never empty: every
/// constructor and mutation on [`SelectionState`] folds an empty id set back into `All`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "ids", rename_all = "snake_case")]
pub enum DocumentSelection {
    #[default]
    All,
    Ids(BTreeSet<DocumentId>),
}

impl DocumentSelection {
    pub fn from_ids(ids: impl IntoIterator<Item = DocumentId>) -> Self {
        let ids = ids.into_iter().collect::<BTreeSet<_>>();
        if ids.is_empty() {
            Self::All
        } else {
            Self::Ids(ids)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn contains(&self, document_id: DocumentId) -> bool {
        match self {
            Self::All => true,
            Self::Ids(ids) => ids.contains(&document_id),
        }
    }

    fn normalized(self) -> Self {
        match self {
            Self::Ids(ids) if ids.is_empty() => Self::All,
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SelectionState {
    documents: DocumentSelection,
    active_clusters: BTreeSet<ClusterRef>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents(&self) -> &DocumentSelection {
        &self.documents
    }

    pub fn active_clusters(&self) -> &BTreeSet<ClusterRef> {
        &self.active_clusters
    }

    /// Replaces the document selection. An empty id list means "show everything".
    pub fn set_active_documents(&mut self, ids: impl IntoIterator<Item = DocumentId>) {
        self.documents = DocumentSelection::from_ids(ids);
    }

    pub fn set_document_selection(&mut self, selection: DocumentSelection) {
        self.documents = selection.normalized();
    }

    pub fn show_all_documents(&mut self) {
        self.documents = DocumentSelection::All;
    }

    /// Adds one document; an explicit id always replaces `All`.
    ///
    /// Returns `false` when the id was already selected.
    pub fn add_active_document(&mut self, document_id: DocumentId) -> bool {
        match &mut self.documents {
            DocumentSelection::All => {
                self.documents = DocumentSelection::Ids(BTreeSet::from([document_id]));
                true
            }
            DocumentSelection::Ids(ids) => ids.insert(document_id),
        }
    }

    /// Removes one document; removing the last explicit id resets to `All`.
    ///
    /// Returns `false` when the id was not explicitly selected.
    pub fn remove_active_document(&mut self, document_id: DocumentId) -> bool {
        let DocumentSelection::Ids(ids) = &mut self.documents else {
            return false;
        };
        let removed = ids.remove(&document_id);
        if ids.is_empty() {
            self.documents = DocumentSelection::All;
        }
        removed
    }

    /// Flips cluster membership and returns whether the cluster is active afterwards.
    pub fn toggle_cluster(&mut self, cluster: ClusterRef) -> bool {
        if self.active_clusters.remove(&cluster) {
            false
        } else {
            self.active_clusters.insert(cluster);
            true
        }
    }

    pub fn is_cluster_active(&self, cluster: &ClusterRef) -> bool {
        self.active_clusters.contains(cluster)
    }

    pub fn clear_clusters(&mut self) {
        self.active_clusters.clear();
    }

    /// Filters `records` down to the selected documents, keeping sequence order.
    pub fn visible_cells<'a>(&self, records: &'a [CellRecord]) -> Vec<&'a CellRecord> {
        self.visible_indices(records).into_iter().map(|idx| &records[idx]).collect()
    }

    /// Positions in `records` of the cells [`Self::visible_cells`] returns.
    pub fn visible_indices(&self, records: &[CellRecord]) -> Vec<usize> {
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.documents.contains(record.document_id()))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Whether `record` belongs to an active cluster. No active cluster means no restriction.
    pub fn admits_cluster(&self, record: &CellRecord) -> bool {
        self.active_clusters.is_empty() || self.active_clusters.contains(&ClusterRef::of(record))
    }
}
