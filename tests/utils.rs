#![allow(dead_code)]

use kiln::cli::{Args, Runner};
use kiln::error::Result;
use kiln::loader::SourceOptions;
use kiln::template::RenderSummary;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Writes `files` (relative path, content) under `root`, creating directories.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

/// Builds `Args` for the given filenames and bindings.
pub fn args(filenames: &[&str], bindings: &[&str]) -> Args {
    Args {
        filenames: filenames.iter().map(|f| f.to_string()).collect(),
        bindings: bindings.iter().map(|b| b.to_string()).collect(),
        ..Default::default()
    }
}

/// Runs kiln against the real filesystem, capturing stdin into `temp_dir`.
///
/// # Returns
/// * The run result and everything written to the sink
pub fn render(args: Args, stdin: &str, temp_dir: &Path) -> (Result<RenderSummary>, String) {
    let runner = Runner::new(args).with_source_options(SourceOptions {
        allow_stdin: true,
        temp_dir: temp_dir.to_path_buf(),
    });
    let mut sink: Vec<u8> = Vec::new();
    let result = runner.run_with(Cursor::new(stdin.to_string()), &mut sink);
    (result, String::from_utf8(sink).unwrap())
}

/// Number of entries directly inside `dir`.
pub fn count_entries(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

/// Compares rendered output to an expected file, printing both on mismatch.
pub fn assert_matches_expected(actual: &str, expected_file: &str) {
    let expected = fs::read_to_string(expected_file).unwrap();
    if actual != expected {
        println!("\n=== Rendered output ===\n{actual}");
        println!("=== Expected ({expected_file}) ===\n{expected}");
        panic!("Rendered output differs from {expected_file}. See above for details.");
    }
}
