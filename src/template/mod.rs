//! Template rendering orchestration for kiln
//!
//! - `context`: the values every template of a run can see
//! - `task`: renders resolved sources in order and streams them to a sink

pub mod context;
pub mod task;

pub use context::RenderContext;
pub use task::{write_document, RenderSummary, RenderTask};
