use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

use crate::constants::exit_codes;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("No templates to render: --filenames must be set and not empty.")]
    MissingInput,

    #[error("Invalid binding '{binding}': {reason}.")]
    MalformedBinding { binding: String, reason: String },

    #[error("Cannot load bindings from '{}': {reason}.", .path.display())]
    BindingFile { path: PathBuf, reason: String },

    #[error("Failed to build template file patterns. Original error: {0}")]
    GlobSetParseError(#[from] globset::Error),

    #[error("Reading templates from stdin ('-') is not permitted here.")]
    StdinNotPermitted,

    #[error("Cannot proceed: template source '{}' does not exist.", .path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Cannot proceed: partials directory '{}' does not exist.", .path.display())]
    PartialsDirNotFound { path: PathBuf },

    /// A single template failed to evaluate. `source` carries MiniJinja's
    /// own location and cause.
    #[error(
        "Failed to render template '{}'. Original error: {source}",
        .source_path.display()
    )]
    Render {
        source_path: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Broad class of an [`Error`], used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Caller-correctable input problem, nothing was rendered.
    Configuration,
    /// A named path could not be found.
    Resolution,
    /// A template failed during evaluation.
    Render,
    /// Reading input or writing output failed.
    Io,
}

impl Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorClass::Configuration => "configuration error",
            ErrorClass::Resolution => "resolution error",
            ErrorClass::Render => "render error",
            ErrorClass::Io => "io error",
        };
        write!(f, "{s}")
    }
}

impl Error {
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::MissingInput
            | Error::MalformedBinding { .. }
            | Error::BindingFile { .. }
            | Error::StdinNotPermitted
            | Error::GlobSetParseError(_) => ErrorClass::Configuration,
            Error::SourceNotFound { .. } | Error::PartialsDirNotFound { .. } => {
                ErrorClass::Resolution
            }
            Error::Render { .. } => ErrorClass::Render,
            Error::IoError(_) | Error::Other(_) => ErrorClass::Io,
        }
    }
}

/// Convenience type alias for Results with kiln's Error as the error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error and its class to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("Error ({}): {}", err.class(), err);
    std::process::exit(exit_codes::FAILURE);
}
