/// Extension traits for built-in Rust types.
///
/// Each extension trait lives in its own file named after the type it
/// extends (`path.rs` for `std::path::Path`) and is re-exported here.
pub mod path;

pub use path::PathExt;
