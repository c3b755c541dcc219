//! Resolution of `--filenames` entries into concrete template sources.
//!
//! Directories expand to the template files directly inside them (no
//! recursion), in lexicographic order. A file counts as a template when its
//! name matches one of [`TEMPLATE_GLOBS`]. Explicit files are taken as-is.

use crate::constants::{STDIN_INDICATOR, STDIN_SOURCE_NAME, TEMPLATE_GLOBS};
use crate::error::{Error, Result};
use crate::filesystem::FileSystem;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::io::Read;
use std::path::{Path, PathBuf};

pub mod stdin;

pub use stdin::StdinCapture;

/// A single template scheduled for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Template file on disk
    File(PathBuf),
    /// Temporary file holding everything read from standard input
    Stdin(PathBuf),
}

impl TemplateSource {
    pub fn path(&self) -> &Path {
        match self {
            TemplateSource::File(path) | TemplateSource::Stdin(path) => path,
        }
    }

    pub fn is_stdin(&self) -> bool {
        matches!(self, TemplateSource::Stdin(_))
    }

    /// Identity reported to the user. The capture file of a stdin source is
    /// gone by the time an error surfaces, so it is named `<stdin>` instead.
    pub fn name(&self) -> &Path {
        match self {
            TemplateSource::File(path) => path,
            TemplateSource::Stdin(_) => Path::new(STDIN_SOURCE_NAME),
        }
    }
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::File(path) => write!(f, "'{}'", path.display()),
            TemplateSource::Stdin(_) => write!(f, "standard input"),
        }
    }
}

/// How `-` entries are treated while resolving sources.
#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// Whether `-` may appear among the paths
    pub allow_stdin: bool,
    /// Directory the stdin capture file is created in
    pub temp_dir: PathBuf,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self { allow_stdin: true, temp_dir: std::env::temp_dir() }
    }
}

/// Builds the matcher used to pick template files out of a directory.
pub fn template_globset() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in TEMPLATE_GLOBS {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// Lists the template files directly inside `dir`, sorted by file name.
///
/// # Arguments
/// * `fs` - Filesystem to inspect
/// * `dir` - Directory to expand
/// * `templates` - Matcher applied to each file name
pub fn expand_directory(
    fs: &dyn FileSystem,
    dir: &Path,
    templates: &GlobSet,
) -> Result<Vec<PathBuf>> {
    let files: Vec<PathBuf> = fs
        .list_dir(dir)?
        .into_iter()
        .filter(|entry| fs.is_file(entry))
        .filter(|entry| {
            entry.file_name().is_some_and(|name| templates.is_match(Path::new(name)))
        })
        .collect();
    debug!("Expanded directory '{}' into {} template(s)", dir.display(), files.len());
    Ok(files)
}

/// Turns the caller's path list into an ordered list of template sources.
///
/// # Arguments
/// * `fs` - Filesystem used to check and expand paths
/// * `paths` - Files, directories or `-`, in output order
/// * `allow_stdin` - Whether `-` is permitted
/// * `stdin_path` - Location of the captured stdin content, if any
///
/// # Returns
/// * `Result<Vec<TemplateSource>>` - Sources in input order, duplicates kept
pub fn resolve_sources<S: AsRef<str>>(
    fs: &dyn FileSystem,
    paths: &[S],
    allow_stdin: bool,
    stdin_path: Option<&Path>,
) -> Result<Vec<TemplateSource>> {
    if paths.is_empty() {
        return Err(Error::MissingInput);
    }

    let templates = template_globset()?;
    let mut sources = Vec::new();

    for raw in paths {
        let raw = raw.as_ref();
        if raw == STDIN_INDICATOR {
            if !allow_stdin {
                return Err(Error::StdinNotPermitted);
            }
            let path = stdin_path.ok_or(Error::StdinNotPermitted)?;
            sources.push(TemplateSource::Stdin(path.to_path_buf()));
            continue;
        }

        let path = Path::new(raw);
        if fs.is_dir(path) {
            sources.extend(
                expand_directory(fs, path, &templates)?.into_iter().map(TemplateSource::File),
            );
        } else if fs.is_file(path) {
            sources.push(TemplateSource::File(path.to_path_buf()));
        } else {
            return Err(Error::SourceNotFound { path: path.to_path_buf() });
        }
    }

    if sources.is_empty() {
        return Err(Error::MissingInput);
    }
    Ok(sources)
}

/// Resolves `paths` and hands the sources to `f`, capturing stdin first when
/// `-` is present.
///
/// The stdin capture file is deleted before this function returns, whatever
/// `f` returned. If `f` failed, its error wins over a cleanup failure.
pub fn with_processed_template_paths<S, R, F, T>(
    fs: &dyn FileSystem,
    paths: &[S],
    options: &SourceOptions,
    stdin: R,
    f: F,
) -> Result<T>
where
    S: AsRef<str>,
    R: Read,
    F: FnOnce(&[TemplateSource]) -> Result<T>,
{
    let wants_stdin = paths.iter().any(|p| p.as_ref() == STDIN_INDICATOR);
    if wants_stdin && !options.allow_stdin {
        return Err(Error::StdinNotPermitted);
    }

    let capture = if wants_stdin {
        Some(StdinCapture::capture_in(stdin, &options.temp_dir)?)
    } else {
        None
    };

    let result = resolve_sources(
        fs,
        paths,
        options.allow_stdin,
        capture.as_ref().map(StdinCapture::path),
    )
    .and_then(|sources| f(&sources));

    let cleanup = match capture {
        Some(capture) => capture.close(),
        None => Ok(()),
    };

    match (result, cleanup) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(cleanup_err)) => Err(cleanup_err),
        (Err(err), Err(cleanup_err)) => {
            log::warn!("Failed to remove stdin capture file: {cleanup_err}");
            Err(err)
        }
        (Err(err), Ok(())) => Err(err),
    }
}
