use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, StatsError};
use crate::source::DataSource;

/// Reads payloads from the local filesystem.
///
/// Absolute locations are read as-is; relative ones are resolved against
/// `root`.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, location: &str) -> PathBuf {
        let path = Path::new(location);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl DataSource for FileSource {
    async fn fetch_text(&self, location: &str) -> Result<String> {
        let path = self.resolve(location);
        debug!(location, path = %path.display(), "reading file");
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| StatsError::Io {
                location: location.to_owned(),
                source: e,
            })
    }
}
