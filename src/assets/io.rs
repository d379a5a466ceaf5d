use std::path::{Path, PathBuf};

use crate::errors::{MantleError, Result};

/// Asset reader trait
/// Asynchronously reads the raw bytes behind a URI.
pub trait AssetReader: Send + Sync {
    fn read_bytes(&self, uri: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// Local file reader rooted at a directory.
///
/// Relative URIs resolve against the root; absolute paths are used as is.
#[derive(Debug, Clone)]
pub struct FileAssetReader {
    root_path: PathBuf,
}

impl FileAssetReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let root_path = if path.is_file() {
            path.parent().unwrap_or(Path::new(".")).to_path_buf()
        } else {
            path.to_path_buf()
        };
        Self { root_path }
    }

    #[inline]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn resolve(&self, uri: &str) -> PathBuf {
        self.root_path.join(uri)
    }
}

impl Default for FileAssetReader {
    fn default() -> Self {
        Self::new(".")
    }
}

impl AssetReader for FileAssetReader {
    async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        let path = self.resolve(uri);
        tokio::fs::read(&path)
            .await
            .map_err(|e| MantleError::asset_load(path.display().to_string(), e))
    }
}

/// File name portion of a URI, for labels.
pub fn source_filename(source: &str) -> &str {
    Path::new(source)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(source)
}
