//! Filesystem access used while resolving sources and partials.
//!
//! - `interface`: the `FileSystem` trait
//! - `local`: the real disk
//! - `memory`: an in-memory tree, handy for tests and embedding

pub mod interface;
pub mod local;
pub mod memory;

pub use interface::FileSystem;
pub use local::LocalFileSystem;
pub use memory::MemoryFileSystem;
