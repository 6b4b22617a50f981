//! Object storage upload boundary.
//!
//! The pipeline writes the import file locally, then hands it to an
//! `ObjectStore`. Real bucket clients live outside this crate; the local
//! directory store covers offline runs and tests.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::info;

/// Destination for generated import files.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload a local file to `remote_path` (relative to the store root).
    async fn upload(&self, local: &Path, remote_path: &str) -> std::io::Result<()>;
}

/// Store that copies files into a local directory tree.
#[derive(Debug, Clone)]
pub struct LocalDirStore {
    root: PathBuf,
}

impl LocalDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalDirStore { root: root.into() }
    }
}

#[async_trait]
impl ObjectStore for LocalDirStore {
    async fn upload(&self, local: &Path, remote_path: &str) -> std::io::Result<()> {
        let destination = self.root.join(remote_path);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::copy(local, &destination).await?;
        info!(destination = %destination.display(), "import file stored");
        Ok(())
    }
}
