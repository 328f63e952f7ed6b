// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use crate::format::{MalformedInputError, VizDocument};
use crate::workbench::RebuildError;

/// Provider of the backing document's raw JSON text.
pub trait ContentSource {
    fn fetch(&self) -> impl Future<Output = io::Result<String>> + Send;

    /// Human-readable origin, used in log lines.
    fn describe(&self) -> String;
}

/// Reads the document from a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentSource for FileSource {
    fn fetch(&self) -> impl Future<Output = io::Result<String>> + Send {
        let path = self.path.clone();
        async move { tokio::fs::read_to_string(path).await }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Content already held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSource {
    text: String,
}

impl StaticSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl ContentSource for StaticSource {
    fn fetch(&self) -> impl Future<Output = io::Result<String>> + Send {
        let text = self.text.clone();
        async move { Ok(text) }
    }

    fn describe(&self) -> String {
        format!("<in-memory, {} bytes>", self.text.len())
    }
}

#[derive(Debug)]
pub enum LoadError {
    Parse(serde_json::Error),
    Malformed(MalformedInputError),
    Source(io::Error),
    /// The initial view over freshly loaded records could not be built.
    Build(RebuildError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "document is not valid JSON: {err}"),
            Self::Malformed(err) => write!(f, "malformed document: {err}"),
            Self::Source(err) => write!(f, "failed to read document: {err}"),
            Self::Build(err) => write!(f, "failed to build initial view: {err}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Malformed(err) => Some(err),
            Self::Source(err) => Some(err),
            Self::Build(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<MalformedInputError> for LoadError {
    fn from(value: MalformedInputError) -> Self {
        Self::Malformed(value)
    }
}

impl From<RebuildError> for LoadError {
    fn from(value: RebuildError) -> Self {
        Self::Build(value)
    }
}

impl From<io::Error> for LoadError {
    fn from(value: io::Error) -> Self {
        Self::Source(value)
    }
}

/// Awaits the full content of `source` and parses it.
///
/// Empty or whitespace-only content is "no data" and yields `Ok(None)`. Text that is not JSON
/// at all is a [`LoadError::Parse`]; JSON that does not have the document's shape is
/// [`LoadError::Malformed`].
pub async fn read_document<S: ContentSource>(
    source: &S,
) -> Result<Option<VizDocument>, LoadError> {
    let text = source.fetch().await?;
    if text.trim().is_empty() {
        log::debug!("{} is empty", source.describe());
        return Ok(None);
    }
    let document = match VizDocument::from_json_str(&text) {
        Ok(document) => document,
        Err(err) if err.is_data() => {
            return Err(MalformedInputError::document_shape(&err).into());
        }
        Err(err) => return Err(err.into()),
    };
    log::debug!("read {} notebooks from {}", document.notebooks.len(), source.describe());
    Ok(Some(document))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{read_document, FileSource, LoadError, StaticSource};

    #[tokio::test]
    async fn whitespace_is_no_data() {
        let document = read_document(&StaticSource::new("  \n\t")).await.unwrap();
        assert!(document.is_none());
    }

    #[tokio::test]
    async fn invalid_json_is_a_parse_error() {
        let err = read_document(&StaticSource::new("{not json")).await.unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[rstest]
    #[case::notebook_without_id(r#"{"notebooks":[{"cells":[]}]}"#)]
    #[case::notebooks_not_a_list(r#"{"notebooks": 5}"#)]
    #[case::string_notebook_id(r#"{"notebooks":[{"notebook_id":"x","cells":[]}]}"#)]
    #[tokio::test]
    async fn wrong_document_shape_is_malformed(#[case] text: &str) {
        let err = read_document(&StaticSource::new(text)).await.unwrap_err();
        match err {
            LoadError::Malformed(err) => {
                assert_eq!(err.document_id, None);
                assert!(err.to_string().starts_with("batch file has the wrong shape"));
            }
            other => panic!("expected malformed input, got {other}"),
        }
    }

    #[tokio::test]
    async fn static_source_parses_notebooks() {
        let text = r#"{"notebooks":[{"notebook_id":3,"cells":[]}]}"#;
        let document = read_document(&StaticSource::new(text)).await.unwrap().unwrap();
        assert_eq!(document.notebooks.len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_a_source_error() {
        let source = FileSource::new("/nonexistent/cellgraph/input.json");
        let err = read_document(&source).await.unwrap_err();
        assert!(matches!(err, LoadError::Source(_)));
        assert!(err.to_string().starts_with("failed to read document"));
    }
}
