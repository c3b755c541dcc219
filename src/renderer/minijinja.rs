use super::filters::*;
use crate::{
    error::{Error, Result},
    filesystem::{FileSystem, LocalFileSystem},
    partials::find_partial,
    renderer::interface::TemplateRenderer,
};
use minijinja::{value::Value, AutoEscape, Environment, ErrorKind, State, UndefinedBehavior};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// MiniJinja-based template rendering engine.
///
/// Undefined variables are errors and output is never escaped. Partials are
/// served from the directory handed to [`TemplateRenderer::render`], both for
/// `{% include "name" %}` and for `partial("name", {"key": "value"})`.
pub struct MiniJinjaRenderer {
    /// Environment with filters registered, cloned for every render
    env: Environment<'static>,
    /// Filesystem partials are read from
    fs: Arc<dyn FileSystem>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer reading partials from the local disk.
    pub fn new() -> Self {
        Self::with_filesystem(Arc::new(LocalFileSystem::new()))
    }

    /// Creates a renderer reading partials through `fs`.
    pub fn with_filesystem(fs: Arc<dyn FileSystem>) -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);

        env.add_filter("kebab_case", to_kebab_case);
        env.add_filter("snake_case", to_snake_case);
        env.add_filter("dns_label", dns_label);
        env.add_filter("sha256", sha256);
        env.add_filter("to_json", to_json);
        env.add_filter("to_yaml", to_yaml);
        env.add_filter("regex", regex_filter);

        Self { env, fs }
    }

    /// Clones the base environment and binds it to one partials directory
    /// and one render context.
    fn environment_for(
        &self,
        partials_dir: Option<&Path>,
        context: &serde_json::Value,
    ) -> Environment<'static> {
        let mut env = self.env.clone();

        let fs = Arc::clone(&self.fs);
        let dir = partials_dir.map(Path::to_path_buf);
        env.set_loader(move |name| load_partial(fs.as_ref(), dir.as_deref(), name));

        let base = context.clone();
        env.add_function(
            "partial",
            move |state: &State, name: String, locals: Option<Value>| {
                render_partial(state, &base, &name, locals)
            },
        );
        env
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(
        &self,
        template: &str,
        context: &serde_json::Value,
        source_path: &Path,
        partials_dir: Option<&Path>,
    ) -> Result<String> {
        let render_error = |source: minijinja::Error| Error::Render {
            source_path: source_path.to_path_buf(),
            source,
        };

        let name = source_path.display().to_string();
        let mut env = self.environment_for(partials_dir, context);
        env.add_template_owned(name.clone(), template.to_string()).map_err(render_error)?;
        let tmpl = env.get_template(&name).map_err(render_error)?;
        tmpl.render(context).map_err(render_error)
    }
}

fn load_partial(
    fs: &dyn FileSystem,
    partials_dir: Option<&Path>,
    name: &str,
) -> std::result::Result<Option<String>, minijinja::Error> {
    let Some(dir) = partials_dir else {
        return Err(minijinja::Error::new(
            ErrorKind::TemplateNotFound,
            format!("partial '{name}' requested but no partials directory was found"),
        ));
    };

    let path: PathBuf = find_partial(fs, dir, name).ok_or_else(|| {
        minijinja::Error::new(
            ErrorKind::TemplateNotFound,
            format!("could not find partial '{name}' in '{}'", dir.display()),
        )
    })?;

    log::debug!("Loading partial '{name}' from '{}'", path.display());
    fs.read_to_string(&path).map(Some).map_err(|e| {
        minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("cannot read partial '{}'", path.display()),
        )
        .with_source(e)
    })
}

/// Renders partial `name` with the run context plus `locals`, locals taking
/// precedence.
fn render_partial(
    state: &State,
    base: &serde_json::Value,
    name: &str,
    locals: Option<Value>,
) -> std::result::Result<String, minijinja::Error> {
    let template = state.env().get_template(name)?;

    let mut context = base.as_object().cloned().unwrap_or_default();
    if let Some(locals) = locals {
        let locals = serde_json::to_value(&locals).map_err(|e| {
            minijinja::Error::new(
                ErrorKind::InvalidOperation,
                format!("locals for partial '{name}' cannot be converted"),
            )
            .with_source(e)
        })?;
        match locals {
            serde_json::Value::Object(map) => context.extend(map),
            serde_json::Value::Null => {}
            _ => {
                return Err(minijinja::Error::new(
                    ErrorKind::InvalidOperation,
                    format!("locals for partial '{name}' must be a map"),
                ))
            }
        }
    }

    template.render(serde_json::Value::Object(context))
}
