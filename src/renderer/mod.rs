//! Template evaluation.
//!
//! - `interface`: the `TemplateRenderer` trait the render task depends on
//! - `minijinja`: the MiniJinja-backed implementation
//! - `filters`: filters registered on every environment

pub mod filters;
pub mod interface;
pub mod minijinja;

pub use interface::TemplateRenderer;
pub use self::minijinja::MiniJinjaRenderer;
