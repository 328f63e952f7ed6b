// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Input format parsing and normalization.
//!
//! The labeling backend writes one JSON batch file per assignment; this module validates it and
//! flattens it into [`CellRecord`](crate::model::CellRecord)s.

pub mod notebooks;

pub use notebooks::{
    input_schema, normalize, CellInput, ClassClusterTitles, ClusterLabel, ClusterTitle,
    ClusterTitles, MalformedInputError, MissingTitleWarning, Normalized, NotebookInput,
    VizDocument, VizMetadata, UNCLUSTERED_KEY,
};
