use crate::constants::verbosity;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

/// CLI arguments for kiln.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directories and files to render, `-` reads templates from stdin.
    #[arg(short = 'f', long, value_name = "PATH", num_args = 1.., value_delimiter = ',')]
    pub filenames: Vec<String>,

    /// Bindings for templates: `key=value`, `@file.json`, `@file.yaml` or a JSON object.
    #[arg(long, value_name = "BINDING", num_args = 1..)]
    pub bindings: Vec<String>,

    /// [DEPRECATED] Read templates from stdin. Use `--filenames -` instead.
    #[arg(long)]
    pub stdin: bool,

    /// Expose SHA as `current_sha` in template bindings.
    #[arg(
        long = "current-sha",
        value_name = "SHA",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub current_sha: Option<String>,

    /// First directory to look for partials in, before `./partials` and `../partials`.
    #[arg(long = "partials-dir", value_name = "DIR")]
    pub partials_dir: Option<PathBuf>,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse command line arguments, exiting with clap's usage message on error.
pub fn get_args() -> Args {
    Args::parse()
}

/// Map `-v` counts to the appropriate log level.
///
/// Warnings are always shown so deprecation notices reach the user.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Warn,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_verbose_flags_to_log_filters() {
        assert_eq!(get_log_level_from_verbose(verbosity::OFF), LevelFilter::Warn);
        assert_eq!(get_log_level_from_verbose(verbosity::INFO), LevelFilter::Info);
        assert_eq!(get_log_level_from_verbose(verbosity::DEBUG), LevelFilter::Debug);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE), LevelFilter::Trace);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE + 1), LevelFilter::Trace);
    }

    #[test]
    fn filenames_accept_comma_separated_lists() {
        let args = Args::parse_from(["kiln", "-f", "deploy,-", "extra.yml"]);
        assert_eq!(args.filenames, ["deploy", "-", "extra.yml"]);
    }

    #[test]
    fn parses_minimal_args() {
        let args = Args::parse_from(["kiln", "-f", "config/deploy"]);
        assert_eq!(args.filenames, ["config/deploy"]);
        assert!(args.bindings.is_empty());
        assert_eq!(args.current_sha, None);
        assert_eq!(args.partials_dir, None);
        assert!(!args.stdin);
    }

    #[test]
    fn parses_full_feature_flags() {
        let args = Args::parse_from([
            "kiln",
            "--filenames",
            "config/deploy/production",
            "extra.yml",
            "-",
            "--bindings",
            "region=us-east-1",
            "replicas=3",
            "--current-sha",
            "abc123",
            "--partials-dir",
            "shared/partials",
            "--stdin",
            "-vv",
        ]);
        assert_eq!(args.filenames, ["config/deploy/production", "extra.yml", "-"]);
        assert_eq!(args.bindings, ["region=us-east-1", "replicas=3"]);
        assert_eq!(args.current_sha.as_deref(), Some("abc123"));
        assert_eq!(args.partials_dir, Some(PathBuf::from("shared/partials")));
        assert!(args.stdin);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn bare_current_sha_flag_means_empty_string() {
        let args = Args::parse_from(["kiln", "-f", "deploy", "--current-sha"]);
        assert_eq!(args.current_sha.as_deref(), Some(""));
    }
}
