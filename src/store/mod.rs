// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Loading the backing document.
//!
//! Content arrives as raw JSON text from a [`ContentSource`]; it is fully read and parsed before
//! anything downstream touches it.

pub mod source;

pub use source::{read_document, ContentSource, FileSource, LoadError, StaticSource};
