// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Cell records are flat and immutable; everything else in the crate is derived from them plus a
//! [`SelectionState`].

pub mod cell;
pub mod ids;
pub mod selection;
pub mod taxonomy;

pub use cell::{CellRecord, ClusterRef};
pub use ids::{CellId, CellKey, DocumentId};
pub use selection::{DocumentSelection, SelectionState};
pub use taxonomy::{class_color, Taxonomy, TaxonomyClass, DEFAULT_CLASS_COLOR};
