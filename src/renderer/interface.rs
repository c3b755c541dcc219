use crate::error::Result;
use std::path::Path;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders one template body against a context.
    ///
    /// # Arguments
    /// * `template` - Template text to render
    /// * `context` - Context variables for rendering
    /// * `source_path` - Where the template came from, used to name it in errors
    /// * `partials_dir` - Directory partial includes resolve against, if any
    ///
    /// # Returns
    /// * `Result<String>` - Rendered text, or `Error::Render` naming `source_path`
    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
        source_path: &Path,
        partials_dir: Option<&Path>,
    ) -> Result<String>;
}
