//! Constants used throughout kiln

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Name stdin templates are reported under in errors and logs
pub const STDIN_SOURCE_NAME: &str = "<stdin>";

/// Glob patterns identifying template files when a directory is expanded
pub const TEMPLATE_GLOBS: &[&str] = &["*.yml", "*.yaml", "*.yml.j2", "*.yaml.j2"];

/// Name of the partials directory searched next to and above each template
pub const PARTIALS_DIR_NAME: &str = "partials";

/// Suffixes tried, in order, when looking up a partial by name
pub const PARTIAL_SUFFIXES: &[&str] = &["", ".yaml.j2", ".yml.j2", ".yaml", ".yml"];

/// Prefix optionally carried by partial file names
pub const PARTIAL_FILE_PREFIX: &str = "_";

/// Line written before every rendered document
pub const DOCUMENT_SEPARATOR: &str = "---";

/// Temporary file naming for captured standard input
pub mod stdin_file {
    pub const PREFIX: &str = "kiln-stdin-";
    pub const SUFFIX: &str = ".yml";
}

/// Names injected into every render context
pub mod context_keys {
    pub const CURRENT_SHA: &str = "current_sha";
    pub const DEPLOYMENT_ID: &str = "deployment_id";
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
