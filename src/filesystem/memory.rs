use crate::error::{Error, Result};
use crate::filesystem::interface::FileSystem;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// In-memory filesystem.
///
/// Directories are created implicitly for every ancestor of an added file;
/// empty directories can be added with [`MemoryFileSystem::add_dir`].
#[derive(Debug, Default, Clone)]
pub struct MemoryFileSystem {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file<P: AsRef<Path>, S: Into<String>>(&mut self, path: P, content: S) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(path.to_path_buf(), content.into());
    }

    pub fn add_dir<P: AsRef<Path>>(&mut self, path: P) {
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    /// Builder-style variant of [`MemoryFileSystem::add_file`].
    pub fn with_file<P: AsRef<Path>, S: Into<String>>(mut self, path: P, content: S) -> Self {
        self.add_file(path, content);
        self
    }

    /// Builder-style variant of [`MemoryFileSystem::add_dir`].
    pub fn with_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.add_dir(path);
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if !self.is_dir(path) {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("directory '{}' not found", path.display()),
            )));
        }
        let children: BTreeSet<PathBuf> = self
            .files
            .keys()
            .chain(self.dirs.iter())
            .filter(|candidate| candidate.parent() == Some(path))
            .cloned()
            .collect();
        let mut children: Vec<PathBuf> = children.into_iter().collect();
        children.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(children)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("file '{}' not found", path.display()),
            ))
        })
    }
}
