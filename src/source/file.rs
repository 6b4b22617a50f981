//! File-backed metadata source.
//!
//! Loads a `SourceTree` (plus optional dependency descriptors) from a JSON
//! document. Used for offline runs and as the reference input format for
//! real connector exports.

use std::path::Path;

use serde::Deserialize;
use tokio::fs;

use super::provider::StaticSource;
use super::types::{DependencyRecord, SourceTree};
use super::SourceError;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileDocument {
    #[serde(flatten)]
    tree: SourceTree,
    dependencies: Vec<DependencyRecord>,
}

/// Load a static source from a JSON tree file.
pub async fn load(path: &Path) -> Result<StaticSource, SourceError> {
    let raw = fs::read_to_string(path).await?;
    let doc: FileDocument = serde_json::from_str(&raw)
        .map_err(|e| SourceError::Query(format!("invalid source tree file: {e}")))?;
    Ok(StaticSource::new(doc.tree).with_dependencies(doc.dependencies))
}
