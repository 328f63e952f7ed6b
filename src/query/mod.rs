// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over cell records.
//!
//! Queries provide derived views (class/cluster partitions) that power the code-inspection panel
//! and the graph builders.

pub mod grouping;

pub use grouping::{cluster_letter, group, ClassGroup, ClusterGroup, Grouping};
