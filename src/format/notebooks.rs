// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::model::{CellId, CellKey, CellRecord, DocumentId};

/// Cluster id the upstream clusterer assigns to cells it could not cluster.
pub const UNCLUSTERED_KEY: &str = "-1";

/// The batch file the labeling backend writes: many notebooks plus per-class cluster metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct VizDocument {
    #[serde(default)]
    pub notebooks: Vec<NotebookInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<VizMetadata>,
}

impl VizDocument {
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Distinct document ids in input order.
    pub fn document_ids(&self) -> Vec<DocumentId> {
        let mut seen = BTreeSet::new();
        self.notebooks
            .iter()
            .map(|notebook| notebook.notebook_id)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    pub fn cluster_titles(&self) -> Option<&ClusterTitles> {
        self.metadata.as_ref().and_then(|metadata| metadata.clusters.as_ref())
    }
}

/// One notebook as found in the input.
///
/// `cells` stays untyped until normalization so a bad cell list is reported as malformed input
/// for this notebook instead of failing the whole file as unparseable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NotebookInput {
    pub notebook_id: DocumentId,
    #[schemars(with = "Vec<CellInput>")]
    pub cells: serde_json::Value,
}

impl NotebookInput {
    pub fn new(notebook_id: DocumentId, cells: Vec<CellInput>) -> Self {
        let cells = cells.into_iter().map(CellInput::into_value).collect();
        Self { notebook_id, cells: serde_json::Value::Array(cells) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CellInput {
    pub cell_id: CellId,
    pub code: String,
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<ClusterLabel>,
}

impl CellInput {
    pub fn new(
        cell_id: i64,
        code: impl Into<String>,
        class: impl Into<String>,
        cluster: impl Into<ClusterLabel>,
    ) -> Self {
        Self {
            cell_id: CellId::new(cell_id),
            code: code.into(),
            class: class.into(),
            cluster: Some(cluster.into()),
        }
    }

    fn into_value(self) -> serde_json::Value {
        serde_json::json!({
            "cell_id": self.cell_id,
            "code": self.code,
            "class": self.class,
            "cluster": self.cluster,
        })
    }
}

/// Raw cluster id. The clusterer writes integers; hand-edited files use strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ClusterLabel {
    Number(i64),
    Text(String),
}

impl ClusterLabel {
    pub fn key(&self) -> SmolStr {
        match self {
            Self::Number(value) => SmolStr::new(value.to_string()),
            Self::Text(value) => SmolStr::new(value),
        }
    }
}

impl From<&str> for ClusterLabel {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<i64> for ClusterLabel {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct VizMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clusters: Option<ClusterTitles>,
}

/// Per-class cluster titles: `class -> titles`.
pub type ClusterTitles = BTreeMap<String, ClassClusterTitles>;

/// Titles for one class.
///
/// Accepts both `{ "titles": { "<key>": ... } }` and the bare `{ "<key>": ... }` map the title
/// generator writes directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ClassClusterTitles {
    Wrapped { titles: BTreeMap<String, ClusterTitle> },
    Bare(BTreeMap<String, ClusterTitle>),
}

impl ClassClusterTitles {
    fn titles(&self) -> &BTreeMap<String, ClusterTitle> {
        match self {
            Self::Wrapped { titles } | Self::Bare(titles) => titles,
        }
    }
}

/// A cluster title: either a plain string or `[short_title, long_title]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ClusterTitle {
    Plain(String),
    ShortAndLong(Vec<String>),
}

impl ClusterTitle {
    pub fn short(&self) -> Option<&str> {
        let title = match self {
            Self::Plain(title) => title.as_str(),
            Self::ShortAndLong(parts) => parts.first()?.as_str(),
        };
        let title = title.trim();
        (!title.is_empty()).then_some(title)
    }

    pub fn long(&self) -> Option<&str> {
        let Self::ShortAndLong(parts) = self else {
            return None;
        };
        let title = parts.get(1)?.trim();
        (!title.is_empty()).then_some(title)
    }
}

/// JSON Schema of the accepted input document.
pub fn input_schema() -> schemars::Schema {
    schemars::schema_for!(VizDocument)
}

/// Structurally invalid input.
///
/// Errors found while walking one notebook carry its position and id; errors in the shape of the
/// batch file itself (a notebook without an id, `notebooks` that is not a list) carry neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedInputError {
    pub document_index: Option<usize>,
    pub document_id: Option<DocumentId>,
    pub cell_index: Option<usize>,
    pub reason: String,
}

impl MalformedInputError {
    /// The batch file parsed as JSON but does not have the document's shape.
    pub fn document_shape(err: &serde_json::Error) -> Self {
        Self { document_index: None, document_id: None, cell_index: None, reason: err.to_string() }
    }
}

impl fmt::Display for MalformedInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Some(document_id), Some(document_index)) = (self.document_id, self.document_index)
        else {
            return write!(f, "batch file has the wrong shape: {}", self.reason);
        };
        match self.cell_index {
            Some(cell_index) => write!(
                f,
                "malformed cell {cell_index} in notebook {document_id} (position {document_index}): {reason}",
                reason = self.reason
            ),
            None => write!(
                f,
                "malformed notebook {document_id} (position {document_index}): {}",
                self.reason
            ),
        }
    }
}

impl std::error::Error for MalformedInputError {}

/// A cluster id that has no title mapping; the raw id was used instead.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MissingTitleWarning {
    pub class_name: SmolStr,
    pub cluster_key: SmolStr,
}

impl fmt::Display for MissingTitleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no title for cluster {} of class {}; using the raw id",
            self.cluster_key, self.class_name
        )
    }
}

/// Normalizer output: records in sequence order plus recovered warnings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Normalized {
    records: Vec<CellRecord>,
    warnings: Vec<MissingTitleWarning>,
}

impl Normalized {
    pub fn records(&self) -> &[CellRecord] {
        &self.records
    }

    pub fn warnings(&self) -> &[MissingTitleWarning] {
        &self.warnings
    }

    pub fn into_records(self) -> Vec<CellRecord> {
        self.records
    }
}

/// Flattens notebooks into one record sequence.
///
/// Notebooks are emitted in the order given, each in its own cell order. Cluster ids are
/// resolved through `titles` when a title exists. A missing title is recovered locally by
/// keeping the raw id; it is only reported as a warning when `titles` is present at all, since
/// legacy files carry no titles anywhere.
pub fn normalize<'a, I>(
    documents: I,
    titles: Option<&ClusterTitles>,
) -> Result<Normalized, MalformedInputError>
where
    I: IntoIterator<Item = &'a NotebookInput>,
{
    let mut records = Vec::new();
    let mut missing = BTreeSet::<MissingTitleWarning>::new();
    let mut seen = BTreeSet::<CellKey>::new();

    for (document_index, notebook) in documents.into_iter().enumerate() {
        let document_id = notebook.notebook_id;
        let malformed = |cell_index: Option<usize>, reason: String| MalformedInputError {
            document_index: Some(document_index),
            document_id: Some(document_id),
            cell_index,
            reason,
        };

        let cells = notebook.cells.as_array().ok_or_else(|| {
            malformed(None, format!("cells must be an array, got {}", kind_of(&notebook.cells)))
        })?;

        let mut last_cell_id: Option<CellId> = None;
        for (cell_index, value) in cells.iter().enumerate() {
            let cell = CellInput::deserialize(value)
                .map_err(|err| malformed(Some(cell_index), err.to_string()))?;

            if let Some(previous) = last_cell_id {
                if cell.cell_id <= previous {
                    return Err(malformed(
                        Some(cell_index),
                        format!(
                            "cell_id {} does not increase (previous cell_id {previous})",
                            cell.cell_id
                        ),
                    ));
                }
            }
            last_cell_id = Some(cell.cell_id);
            if !seen.insert(CellKey::new(document_id, cell.cell_id)) {
                return Err(malformed(
                    Some(cell_index),
                    format!("cell {document_id}:{} appears twice in the batch", cell.cell_id),
                ));
            }

            let cluster_key = cell
                .cluster
                .as_ref()
                .map(ClusterLabel::key)
                .unwrap_or_else(|| SmolStr::new_static(UNCLUSTERED_KEY));

            let title = titles.and_then(|titles| lookup_title(titles, &cell.class, &cluster_key));
            let cluster_name = match titles {
                Some(_) => match title.and_then(ClusterTitle::short) {
                    Some(short) => SmolStr::new(short),
                    None => {
                        let warning = MissingTitleWarning {
                            class_name: SmolStr::new(&cell.class),
                            cluster_key: cluster_key.clone(),
                        };
                        if !missing.contains(&warning) {
                            log::warn!("{warning}");
                            missing.insert(warning);
                        }
                        cluster_key.clone()
                    }
                },
                None => cluster_key.clone(),
            };

            log::trace!(
                "normalized cell {document_id}:{} class={} cluster={cluster_name}",
                cell.cell_id,
                cell.class
            );
            records.push(
                CellRecord::new(document_id, cell.cell_id, cell.code, cell.class, cluster_name)
                    .with_cluster_key(cluster_key)
                    .with_cluster_description(title.and_then(ClusterTitle::long)),
            );
        }
    }

    Ok(Normalized { records, warnings: missing.into_iter().collect() })
}

fn lookup_title<'a>(
    titles: &'a ClusterTitles,
    class_name: &str,
    cluster_key: &str,
) -> Option<&'a ClusterTitle> {
    titles.get(class_name)?.titles().get(cluster_key)
}

fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests;
