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

use crate::model::CellRecord;

/// Two-level partition of a record sequence: class, then cluster within class.
///
/// Both levels keep first-appearance order. A `Grouping` is a pure projection of its input and
/// is rebuilt, never patched, when the input changes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Grouping {
    classes: Vec<ClassGroup>,
    #[serde(skip)]
    class_index: BTreeMap<SmolStr, usize>,
}

impl Grouping {
    pub fn classes(&self) -> &[ClassGroup] {
        &self.classes
    }

    pub fn class(&self, class_name: &str) -> Option<&ClassGroup> {
        self.class_index.get(class_name).map(|&idx| &self.classes[idx])
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.classes.iter().map(ClassGroup::class_name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        self.classes.iter().map(ClassGroup::cell_count).sum()
    }

    fn push(&mut self, record: &CellRecord) {
        let idx = match self.class_index.get(record.class_name()) {
            Some(&idx) => idx,
            None => {
                let idx = self.classes.len();
                self.classes.push(ClassGroup::new(record.class_name_smol().clone()));
                self.class_index.insert(record.class_name_smol().clone(), idx);
                idx
            }
        };
        self.classes[idx].push(record);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassGroup {
    class_name: SmolStr,
    clusters: Vec<ClusterGroup>,
    #[serde(skip)]
    cluster_index: BTreeMap<SmolStr, usize>,
}

impl ClassGroup {
    fn new(class_name: SmolStr) -> Self {
        Self { class_name, clusters: Vec::new(), cluster_index: BTreeMap::new() }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Clusters in first-appearance order.
    pub fn clusters(&self) -> &[ClusterGroup] {
        &self.clusters
    }

    pub fn cluster(&self, cluster_name: &str) -> Option<&ClusterGroup> {
        self.cluster_index.get(cluster_name).map(|&idx| &self.clusters[idx])
    }

    pub fn cluster_letter(&self, cluster_name: &str) -> Option<&str> {
        self.cluster(cluster_name).map(ClusterGroup::letter)
    }

    pub fn cell_count(&self) -> usize {
        self.clusters.iter().map(ClusterGroup::size).sum()
    }

    /// All cells of the class, cluster by cluster.
    pub fn cells(&self) -> impl Iterator<Item = &CellRecord> + '_ {
        self.clusters.iter().flat_map(|cluster| cluster.cells.iter())
    }

    fn push(&mut self, record: &CellRecord) {
        let idx = match self.cluster_index.get(record.cluster_name()) {
            Some(&idx) => idx,
            None => {
                let idx = self.clusters.len();
                self.clusters.push(ClusterGroup {
                    name: record.cluster_name_smol().clone(),
                    letter: cluster_letter(idx),
                    description: record.cluster_description().map(SmolStr::new),
                    cells: Vec::new(),
                });
                self.cluster_index.insert(record.cluster_name_smol().clone(), idx);
                idx
            }
        };
        self.clusters[idx].cells.push(record.clone());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterGroup {
    name: SmolStr,
    letter: SmolStr,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<SmolStr>,
    cells: Vec<CellRecord>,
}

impl ClusterGroup {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short identifier, assigned by first appearance within the class.
    pub fn letter(&self) -> &str {
        &self.letter
    }

    /// Long title of the cluster, taken from its first cell.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn cells(&self) -> &[CellRecord] {
        &self.cells
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }
}

/// Groups `records` by class, then by cluster, in a single left-to-right pass.
pub fn group<I, R>(records: I) -> Grouping
where
    I: IntoIterator<Item = R>,
    R: Borrow<CellRecord>,
{
    let mut grouping = Grouping::default();
    for record in records {
        grouping.push(record.borrow());
    }
    grouping
}

/// Spreadsheet-style cluster identifier: `A`..`Z`, then `AA`, `AB`, ..., `ZZ`, `AAA`, ...
pub fn cluster_letter(index: usize) -> SmolStr {
    let mut letters = Vec::<char>::with_capacity(2);
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect::<String>().into()
}
