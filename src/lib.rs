// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Cellgraph — grouping and execution-graph layout for classified notebook cells.
//!
//! Pipeline: [`format::normalize`] flattens a batch of notebooks into cell records,
//! [`query::group`] partitions them by class and cluster, [`model::SelectionState`] filters
//! them by document, [`graph::build_graph`] turns the visible sequence into a class-chain or
//! occurrence graph, and [`layout::layout`] positions it. [`workbench::Workbench`] owns the
//! whole chain and rebuilds it on every selection change.

pub mod config;
pub mod format;
pub mod graph;
pub mod layout;
pub mod model;
pub mod query;
pub mod store;
pub mod workbench;

pub use config::{ConfigError, GraphConfig};
pub use workbench::{DerivedView, RebuildError, Workbench};
