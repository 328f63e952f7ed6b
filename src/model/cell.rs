// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;
use smol_str::SmolStr;

use super::ids::{CellId, CellKey, DocumentId};

/// One classified, clustered code cell tagged with the document it came from.
///
/// Produced by the normalizer and never mutated afterwards. `cluster_name` is the display name
/// (the resolved title when the input carried one), while `cluster_key` keeps the raw id the
/// clusterer assigned. `cluster_description` is the long title, when the input has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellRecord {
    cell_id: CellId,
    document_id: DocumentId,
    code: String,
    class_name: SmolStr,
    cluster_name: SmolStr,
    cluster_key: SmolStr,
    #[serde(skip_serializing_if = "Option::is_none")]
    cluster_description: Option<SmolStr>,
}

impl CellRecord {
    pub fn new(
        document_id: DocumentId,
        cell_id: CellId,
        code: impl Into<String>,
        class_name: impl Into<SmolStr>,
        cluster_name: impl Into<SmolStr>,
    ) -> Self {
        let cluster_name = cluster_name.into();
        Self {
            cell_id,
            document_id,
            code: code.into(),
            class_name: class_name.into(),
            cluster_key: cluster_name.clone(),
            cluster_name,
            cluster_description: None,
        }
    }

    pub(crate) fn with_cluster_key(mut self, cluster_key: impl Into<SmolStr>) -> Self {
        self.cluster_key = cluster_key.into();
        self
    }

    pub(crate) fn with_cluster_description(
        mut self,
        description: Option<impl Into<SmolStr>>,
    ) -> Self {
        self.cluster_description = description.map(Into::into);
        self
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

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    pub fn cluster_key(&self) -> &str {
        &self.cluster_key
    }

    pub fn cluster_description(&self) -> Option<&str> {
        self.cluster_description.as_deref()
    }

    pub(crate) fn class_name_smol(&self) -> &SmolStr {
        &self.class_name
    }

    pub(crate) fn cluster_name_smol(&self) -> &SmolStr {
        &self.cluster_name
    }
}

/// A cluster reference scoped to its class.
///
/// Cluster ids restart per class upstream (every class has a cluster `0`), so the class is part
/// of the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClusterRef {
    pub class_name: SmolStr,
    pub cluster_name: SmolStr,
}

impl ClusterRef {
    pub fn new(class_name: impl Into<SmolStr>, cluster_name: impl Into<SmolStr>) -> Self {
        Self { class_name: class_name.into(), cluster_name: cluster_name.into() }
    }

    pub fn of(record: &CellRecord) -> Self {
        Self {
            class_name: record.class_name_smol().clone(),
            cluster_name: record.cluster_name_smol().clone(),
        }
    }
}

impl std::fmt::Display for ClusterRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.class_name, self.cluster_name)
    }
}
