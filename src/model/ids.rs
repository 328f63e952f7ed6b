// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identifies one student's notebook ("document") inside a loaded batch.
///
/// Document ids come straight from the input file and are only unique within it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct DocumentId(i64);

impl DocumentId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for DocumentId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Position of a cell inside its document.
///
/// Monotonically increasing within one document and therefore defines the execution order
/// there. Two documents routinely reuse the same cell ids, so a cell is only identified by the
/// `(DocumentId, CellId)` pair.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct CellId(i64);

impl CellId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CellId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Globally unique cell identity across a batch of documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellKey {
    pub document_id: DocumentId,
    pub cell_id: CellId,
}

impl CellKey {
    pub const fn new(document_id: DocumentId, cell_id: CellId) -> Self {
        Self { document_id, cell_id }
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.document_id, self.cell_id)
    }
}

#[cfg(test)]
mod tests {
    use super::{CellId, CellKey, DocumentId};

    #[test]
    fn cell_key_orders_by_document_then_cell() {
        let a = CellKey::new(DocumentId::new(1), CellId::new(9));
        let b = CellKey::new(DocumentId::new(2), CellId::new(1));
        assert!(a < b);
        assert_eq!(a.to_string(), "1:9");
    }

    #[test]
    fn ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&DocumentId::new(-1)).unwrap();
        assert_eq!(json, "-1");
        let parsed: CellId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, CellId::new(42));
    }
}
