//! Loading container bytes from wherever the caller keeps them.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::MAX_ASSET_BYTES;
use crate::error::{ExtractError, Result};

/// Source of container bytes. Network clients implement this outside the
/// crate and report their failures as [`ExtractError::Fetch`].
pub trait Fetch {
    fn fetch(&self, location: &str) -> Result<Vec<u8>>;
}

/// Reads containers from the local filesystem, relative to an optional root.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    root: Option<PathBuf>,
    max_bytes: u64,
}

impl Default for FileFetcher {
    fn default() -> Self {
        Self {
            root: None,
            max_bytes: MAX_ASSET_BYTES,
        }
    }
}

impl FileFetcher {
    /// Create a fetcher with the default size limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative locations against `root`.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Reject files larger than `max_bytes`.
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    fn resolve(&self, location: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(location),
            None => PathBuf::from(location),
        }
    }

    /// Read a file, enforcing the size limit.
    pub fn read_path(&self, path: &Path) -> Result<Vec<u8>> {
        if !path.exists() {
            return Err(ExtractError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        let size = file.metadata()?.len();
        if size > self.max_bytes {
            return Err(ExtractError::AssetTooLarge {
                size,
                limit: self.max_bytes,
            });
        }

        let mut data = Vec::with_capacity(size as usize);
        // The file may grow after the metadata check.
        file.take(self.max_bytes + 1).read_to_end(&mut data)?;
        if data.len() as u64 > self.max_bytes {
            return Err(ExtractError::AssetTooLarge {
                size: data.len() as u64,
                limit: self.max_bytes,
            });
        }
        Ok(data)
    }
}

impl Fetch for FileFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        self.read_path(&self.resolve(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_fetch_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("chair.glb"), b"abc").unwrap();
        let fetcher = FileFetcher::new().with_root(dir.path());
        assert_eq!(fetcher.fetch("chair.glb").unwrap(), b"abc");
    }

    #[test]
    fn test_fetch_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FileFetcher::new().with_root(dir.path());
        let err = fetcher.fetch("missing.glb").unwrap_err();
        assert!(matches!(err, ExtractError::FileNotFound { .. }));
        assert_eq!(err.kind(), ErrorKind::Fetch);
    }

    #[test]
    fn test_fetch_too_large() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("big.glb"), vec![0u8; 64]).unwrap();
        let fetcher = FileFetcher::new().with_root(dir.path()).with_max_bytes(16);
        let err = fetcher.fetch("big.glb").unwrap_err();
        assert!(matches!(err, ExtractError::AssetTooLarge { size: 64, limit: 16 }));
        assert_eq!(err.kind(), ErrorKind::Fetch);
    }
}
