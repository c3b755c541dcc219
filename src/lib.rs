/// Parsing of `--bindings` values.
pub mod bindings;

/// Handles argument parsing and the top-level run.
pub mod cli;

/// Names and defaults shared across the crate.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// Extension traits for standard library types.
pub mod ext;

/// Filesystem abstraction with local and in-memory implementations.
pub mod filesystem;

/// Resolution of input paths into template sources, including stdin capture.
pub mod loader;

/// Partials directory search.
pub mod partials;

/// Template evaluation.
pub mod renderer;

/// Render context and the ordered render task.
pub mod template;
