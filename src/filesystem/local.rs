use crate::error::{Error, Result};
use crate::filesystem::interface::FileSystem;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Filesystem backed by the real disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| {
                entry.map(|e| e.into_path()).map_err(|e| {
                    Error::Other(anyhow::anyhow!(
                        "Failed to list directory '{}': {}",
                        path.display(),
                        e
                    ))
                })
            })
            .collect()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }
}
