use crate::error::Result;
use std::path::{Path, PathBuf};

/// Trait for the filesystem operations kiln needs.
///
/// Implementations must be shareable across threads because the template
/// engine keeps a handle to load partials lazily.
pub trait FileSystem: Send + Sync {
    /// Returns true if `path` is an existing regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Returns true if `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Lists the direct children of a directory, sorted by file name.
    ///
    /// # Arguments
    /// * `path` - Directory to list
    ///
    /// # Returns
    /// * `Result<Vec<PathBuf>>` - Child paths joined onto `path`
    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Reads a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String>;
}
