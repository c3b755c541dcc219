use crate::constants::DOCUMENT_SEPARATOR;
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::filesystem::{FileSystem, LocalFileSystem};
use crate::loader::TemplateSource;
use crate::partials;
use crate::renderer::TemplateRenderer;
use crate::template::context::RenderContext;
use log::{debug, info, trace};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Outcome of a run that rendered every source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    /// Number of documents written to the sink
    pub rendered: usize,
}

/// Renders resolved sources one after another into a sink.
///
/// Each document is written as soon as it is rendered. The first failure
/// stops the run; documents already written stay in the sink and no later
/// source is touched.
pub struct RenderTask<'a> {
    renderer: &'a dyn TemplateRenderer,
    fs: &'a dyn FileSystem,
    context: &'a RenderContext,
    partials_override: Option<&'a Path>,
}

impl<'a> RenderTask<'a> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        fs: &'a dyn FileSystem,
        context: &'a RenderContext,
        partials_override: Option<&'a Path>,
    ) -> Self {
        Self { renderer, fs, context, partials_override }
    }

    /// Renders `sources` in order and writes them to `sink`.
    ///
    /// # Arguments
    /// * `sources` - Resolved sources, in output order
    /// * `sink` - Destination for the rendered documents
    ///
    /// # Returns
    /// * `Result<RenderSummary>` - How many documents were written, or the
    ///   first error, which names the offending source
    pub fn run<W: Write + ?Sized>(
        &self,
        sources: &[TemplateSource],
        sink: &mut W,
    ) -> Result<RenderSummary> {
        partials::validate_override(self.fs, self.partials_override)?;
        info!("Rendering {} template(s)", sources.len());

        for (index, source) in sources.iter().enumerate() {
            trace!("Rendering source {} of {}: {}", index + 1, sources.len(), source);
            let rendered = self.render_source(source)?;
            write_document(sink, &rendered)?;
            info!("Rendered {}", source.path().display_name());
        }

        sink.flush()?;
        Ok(RenderSummary { rendered: sources.len() })
    }

    fn render_source(&self, source: &TemplateSource) -> Result<String> {
        let partials_dir = self.partials_dir_for(source)?;
        let template = self.read_source(source).map_err(|e| {
            Error::Other(anyhow::anyhow!("Failed to read template {source}: {e}"))
        })?;
        self.renderer.render(
            &template,
            self.context.as_value(),
            source.name(),
            partials_dir.as_deref(),
        )
    }

    /// Stdin is always captured on the local disk, whatever filesystem the
    /// templates themselves live on.
    fn read_source(&self, source: &TemplateSource) -> Result<String> {
        match source {
            TemplateSource::File(path) => self.fs.read_to_string(path),
            TemplateSource::Stdin(path) => LocalFileSystem::new().read_to_string(path),
        }
    }

    /// Stdin content has no meaningful location, so only the override
    /// applies to it.
    fn partials_dir_for(&self, source: &TemplateSource) -> Result<Option<PathBuf>> {
        let dir = match source {
            TemplateSource::Stdin(_) => self.partials_override.map(Path::to_path_buf),
            TemplateSource::File(path) => {
                partials::resolve(self.fs, self.partials_override, path)?
            }
        };
        if let Some(dir) = &dir {
            debug!("Partials for {source} resolve against '{}'", dir.display());
        }
        Ok(dir)
    }
}

/// Writes one document preceded by the separator line.
///
/// A leading separator already present in `document` is not repeated, and a
/// missing final newline is added.
pub fn write_document<W: Write + ?Sized>(sink: &mut W, document: &str) -> Result<()> {
    let body = document
        .strip_prefix(DOCUMENT_SEPARATOR)
        .and_then(|rest| rest.strip_prefix('\n'))
        .unwrap_or(document);

    writeln!(sink, "{DOCUMENT_SEPARATOR}")?;
    sink.write_all(body.as_bytes())?;
    if !body.ends_with('\n') {
        sink.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::Bindings;
    use crate::error::ErrorClass;
    use crate::filesystem::MemoryFileSystem;
    use crate::renderer::MiniJinjaRenderer;
    use serde_json::json;
    use std::sync::Arc;

    fn file(path: &str) -> TemplateSource {
        TemplateSource::File(PathBuf::from(path))
    }

    fn context() -> RenderContext {
        let mut bindings = Bindings::new();
        bindings.insert("app".into(), json!("web"));
        RenderContext::new(bindings, Some("abc123".into()))
    }

    fn run(
        fs: MemoryFileSystem,
        sources: &[TemplateSource],
        partials_override: Option<&Path>,
    ) -> (Result<RenderSummary>, String) {
        let fs = Arc::new(fs);
        let renderer = MiniJinjaRenderer::with_filesystem(fs.clone());
        let context = context();
        let task = RenderTask::new(&renderer, fs.as_ref(), &context, partials_override);
        let mut sink: Vec<u8> = Vec::new();
        let result = task.run(sources, &mut sink);
        (result, String::from_utf8(sink).unwrap())
    }

    #[test]
    fn renders_sources_in_order_with_separators() {
        let fs = MemoryFileSystem::new()
            .with_file("deploy/b.yml", "name: {{ app }}-b\n")
            .with_file("deploy/a.yml", "name: {{ app }}-a\nsha: {{ current_sha }}");

        let (result, out) = run(fs, &[file("deploy/b.yml"), file("deploy/a.yml")], None);
        assert_eq!(result.unwrap(), RenderSummary { rendered: 2 });
        assert_eq!(out, "---\nname: web-b\n---\nname: web-a\nsha: abc123\n");
    }

    #[test]
    fn stops_at_the_first_failure_and_names_it() {
        let fs = MemoryFileSystem::new()
            .with_file("deploy/1.yml", "first: {{ app }}\n")
            .with_file("deploy/2.yml", "second: {{ missing }}\n")
            .with_file("deploy/3.yml", "third: {{ app }}\n");

        let (result, out) = run(
            fs,
            &[file("deploy/1.yml"), file("deploy/2.yml"), file("deploy/3.yml")],
            None,
        );
        assert_eq!(out, "---\nfirst: web\n");

        let err = result.unwrap_err();
        assert_eq!(err.class(), ErrorClass::Render);
        match err {
            Error::Render { source_path, .. } => {
                assert_eq!(source_path, PathBuf::from("deploy/2.yml"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn each_template_uses_its_own_partials_directory() {
        let fs = MemoryFileSystem::new()
            .with_file("a/web.yml", "{% include 'labels' %}")
            .with_file("a/partials/labels.yml", "from: a")
            .with_file("b/web.yml", "{% include 'labels' %}")
            .with_file("b/partials/labels.yml", "from: b");

        let (result, out) = run(fs, &[file("a/web.yml"), file("b/web.yml")], None);
        result.unwrap();
        assert_eq!(out, "---\nfrom: a\n---\nfrom: b\n");
    }

    #[test]
    fn override_is_shared_by_every_template() {
        let fs = MemoryFileSystem::new()
            .with_file("a/web.yml", "{% include 'labels' %}")
            .with_file("a/partials/labels.yml", "from: a")
            .with_file("shared/labels.yml", "from: shared");

        let (result, out) = run(fs, &[file("a/web.yml")], Some(Path::new("shared")));
        result.unwrap();
        assert_eq!(out, "---\nfrom: shared\n");
    }

    #[test]
    fn missing_override_fails_before_rendering() {
        let fs = MemoryFileSystem::new().with_file("a/web.yml", "kind: Pod");
        let (result, out) = run(fs, &[file("a/web.yml")], Some(Path::new("nowhere")));
        assert!(matches!(result.unwrap_err(), Error::PartialsDirNotFound { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn templates_without_includes_need_no_partials() {
        let fs = MemoryFileSystem::new().with_file("a/web.yml", "kind: Pod\n");
        let (result, out) = run(fs, &[file("a/web.yml")], None);
        result.unwrap();
        assert_eq!(out, "---\nkind: Pod\n");
    }

    #[test]
    fn stdin_is_read_from_disk_and_reported_as_stdin() {
        let capture = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(capture.path(), "kind: {{ kind }}\n").unwrap();
        let fs = MemoryFileSystem::new().with_file("deploy/web.yml", "name: {{ app }}\n");

        let (result, out) = run(
            fs,
            &[TemplateSource::Stdin(capture.path().to_path_buf()), file("deploy/web.yml")],
            None,
        );
        assert_eq!(out, "");
        match result.unwrap_err() {
            Error::Render { source_path, .. } => {
                assert_eq!(source_path, PathBuf::from("<stdin>"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn write_document_does_not_repeat_a_leading_separator() {
        let mut sink: Vec<u8> = Vec::new();
        write_document(&mut sink, "---\nkind: Pod\n---\nkind: Service").unwrap();
        write_document(&mut sink, "").unwrap();
        assert_eq!(
            String::from_utf8(sink).unwrap(),
            "---\nkind: Pod\n---\nkind: Service\n---\n\n"
        );
    }
}
