//! Locating the directory partial includes resolve against.
//!
//! Search order, first existing directory wins:
//! 1. the explicit override, which must exist if given
//! 2. `partials/` next to the template
//! 3. `partials/` one level above the template's directory

use crate::constants::{PARTIALS_DIR_NAME, PARTIAL_FILE_PREFIX, PARTIAL_SUFFIXES};
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::filesystem::FileSystem;
use log::{debug, trace};
use std::path::{Component, Path, PathBuf};

/// Fails if an explicit override was given but is not a directory.
pub fn validate_override(fs: &dyn FileSystem, explicit_override: Option<&Path>) -> Result<()> {
    match explicit_override {
        Some(dir) if !fs.is_dir(dir) => {
            Err(Error::PartialsDirNotFound { path: dir.to_path_buf() })
        }
        _ => Ok(()),
    }
}

/// Candidate partials directories for a template, in search order.
pub fn fallback_dirs(template_path: &Path) -> [PathBuf; 2] {
    let template_dir = template_path.template_dir();
    [template_dir.join(PARTIALS_DIR_NAME), parent_dir(&template_dir).join(PARTIALS_DIR_NAME)]
}

/// Lexical parent of `dir`, stepping out with `..` only when there is no
/// named component left to strip.
fn parent_dir(dir: &Path) -> PathBuf {
    match dir.components().next_back() {
        Some(Component::Normal(_)) => dir.parent().map(Path::to_path_buf).unwrap_or_default(),
        Some(Component::RootDir) | Some(Component::Prefix(_)) => dir.to_path_buf(),
        Some(Component::CurDir) | Some(Component::ParentDir) | None => dir.join(".."),
    }
}

/// Resolves the partials directory for one template.
///
/// # Arguments
/// * `fs` - Filesystem used for existence checks
/// * `explicit_override` - Directory given with `--partials-dir`
/// * `template_path` - Location of the template being rendered
///
/// # Returns
/// * `Ok(Some(dir))` - The first directory found
/// * `Ok(None)` - Nothing found; includes will fail when evaluated
/// * `Err(_)` - The override was given but does not exist
pub fn resolve(
    fs: &dyn FileSystem,
    explicit_override: Option<&Path>,
    template_path: &Path,
) -> Result<Option<PathBuf>> {
    if let Some(dir) = explicit_override {
        validate_override(fs, Some(dir))?;
        return Ok(Some(dir.to_path_buf()));
    }

    for candidate in fallback_dirs(template_path) {
        trace!("Looking for partials in '{}'", candidate.display());
        if fs.is_dir(&candidate) {
            debug!(
                "Using partials directory '{}' for '{}'",
                candidate.display(),
                template_path.display()
            );
            return Ok(Some(candidate));
        }
    }
    debug!("No partials directory found for '{}'", template_path.display());
    Ok(None)
}

/// File names tried for a partial called `name`, in order.
///
/// For `deploy/labels` this yields `deploy/labels`, `deploy/_labels`,
/// `deploy/labels.yaml.j2`, `deploy/_labels.yaml.j2` and so on.
pub fn partial_candidates(name: &str) -> Vec<PathBuf> {
    let relative = Path::new(name);
    let parent = relative.template_dir();
    let file_name = relative.display_name();

    PARTIAL_SUFFIXES
        .iter()
        .flat_map(|suffix| {
            let plain = format!("{file_name}{suffix}");
            let prefixed = format!("{PARTIAL_FILE_PREFIX}{plain}");
            [parent.join(plain), parent.join(prefixed)]
        })
        .collect()
}

/// Finds the file backing partial `name` inside `partials_dir`.
pub fn find_partial(fs: &dyn FileSystem, partials_dir: &Path, name: &str) -> Option<PathBuf> {
    partial_candidates(name)
        .into_iter()
        .map(|candidate| partials_dir.join(candidate))
        .find(|candidate| fs.is_file(candidate))
}
