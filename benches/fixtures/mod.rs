// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use cellgraph::format::{CellInput, NotebookInput, VizDocument};
use cellgraph::model::{CellId, CellRecord, DocumentId, Taxonomy};

fn ascii_repeat_to_len(prefix: &str, fill: char, target_len: usize) -> String {
    if prefix.len() >= target_len {
        return prefix[..target_len].to_owned();
    }
    let mut out = String::with_capacity(target_len);
    out.push_str(prefix);
    while out.len() < target_len {
        out.push(fill);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub documents: usize,
    pub cells_per_document: usize,
    pub code_len: usize,
}

impl Params {
    pub const fn new(documents: usize, cells_per_document: usize, code_len: usize) -> Self {
        Self { documents, cells_per_document, code_len }
    }

    pub const fn cell_count(self) -> usize {
        self.documents * self.cells_per_document
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// One student, under the class-chain threshold.
    Single,
    Classroom,
    LargeCohort,
}

impl Case {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Classroom => "classroom",
            Self::LargeCohort => "large_cohort",
        }
    }

    pub const fn params(self) -> Params {
        match self {
            Self::Single => Params::new(1, 18, 40),
            Self::Classroom => Params::new(30, 40, 80),
            Self::LargeCohort => Params::new(250, 60, 120),
        }
    }

    pub const ALL: [Case; 3] = [Self::Single, Self::Classroom, Self::LargeCohort];
}

/// Deterministic class/cluster pick for cell `idx` of document `doc`.
///
/// Students drift through the pipeline stages in roughly the taxonomy order, with a stride that
/// differs per document so runs of equal classes and back-jumps both occur.
fn label(doc: usize, idx: usize) -> (&'static str, &'static str) {
    let classes = Taxonomy::builtin().classes();
    let class = &classes[(idx / 3 + doc * 5 + (idx * doc) % 4) % classes.len()];
    let clusters = class.clusters();
    let cluster = if clusters.is_empty() {
        "-1"
    } else {
        clusters[(doc * 7 + idx * 11) % clusters.len()].as_str()
    };
    (class.name(), cluster)
}

pub fn records(params: Params) -> Vec<CellRecord> {
    let mut out = Vec::with_capacity(params.cell_count());
    for doc in 0..params.documents {
        for idx in 0..params.cells_per_document {
            let (class, cluster) = label(doc, idx);
            let code = ascii_repeat_to_len(&format!("step_{doc}_{idx} = "), '#', params.code_len);
            out.push(CellRecord::new(
                DocumentId::new(doc as i64 + 1),
                CellId::new(idx as i64 + 1),
                code,
                class,
                cluster,
            ));
        }
    }
    out
}

/// The same cells as [`records`], in input-document form.
pub fn document(params: Params) -> VizDocument {
    let notebooks = (0..params.documents)
        .map(|doc| {
            let cells = (0..params.cells_per_document)
                .map(|idx| {
                    let (class, cluster) = label(doc, idx);
                    let code =
                        ascii_repeat_to_len(&format!("step_{doc}_{idx} = "), '#', params.code_len);
                    CellInput::new(idx as i64 + 1, code, class, cluster)
                })
                .collect();
            NotebookInput::new(DocumentId::new(doc as i64 + 1), cells)
        })
        .collect();
    VizDocument { notebooks, metadata: None }
}

pub fn fixture(case: Case) -> Vec<CellRecord> {
    records(case.params())
}
