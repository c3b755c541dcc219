use crate::{
    bindings::parse_bindings,
    cli::Args,
    constants::STDIN_INDICATOR,
    error::{Error, Result},
    filesystem::{FileSystem, LocalFileSystem},
    loader::{with_processed_template_paths, SourceOptions},
    partials,
    renderer::MiniJinjaRenderer,
    template::{RenderContext, RenderSummary, RenderTask},
};
use log::{debug, info, warn};
use std::io::{Read, Write};
use std::sync::Arc;

/// Main CLI runner that wires arguments to the render pipeline
pub struct Runner {
    args: Args,
    fs: Arc<dyn FileSystem>,
    source_options: SourceOptions,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self {
            args,
            fs: Arc::new(LocalFileSystem::new()),
            source_options: SourceOptions::default(),
        }
    }

    /// Replaces the filesystem templates and partials are read from.
    pub fn with_filesystem(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Replaces how `-` is handled, including where stdin is captured.
    pub fn with_source_options(mut self, options: SourceOptions) -> Self {
        self.source_options = options;
        self
    }

    /// Renders using the process's stdin and stdout.
    pub fn run(self) -> Result<RenderSummary> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.run_with(stdin.lock(), &mut stdout.lock())
    }

    /// Executes the complete render workflow
    ///
    /// # Arguments
    /// * `stdin` - Read to the end if `-` is among the filenames
    /// * `sink` - Receives the rendered documents
    pub fn run_with<R: Read, W: Write>(self, stdin: R, sink: &mut W) -> Result<RenderSummary> {
        let filenames = self.filenames();
        if filenames.is_empty() {
            return Err(Error::MissingInput);
        }

        let bindings = parse_bindings(&self.args.bindings)?;
        debug!("Parsed {} binding(s)", bindings.len());

        let partials_override = self.args.partials_dir.as_deref();
        partials::validate_override(self.fs.as_ref(), partials_override)?;

        let context = RenderContext::new(bindings, self.args.current_sha.clone());
        let renderer = MiniJinjaRenderer::with_filesystem(Arc::clone(&self.fs));
        let fs = self.fs.as_ref();

        let summary = with_processed_template_paths(
            fs,
            filenames.as_slice(),
            &self.source_options,
            stdin,
            |sources| {
                RenderTask::new(&renderer, fs, &context, partials_override).run(sources, sink)
            },
        )?;

        info!("Successfully rendered {} template(s)", summary.rendered);
        Ok(summary)
    }

    /// Filenames with the deprecated `--stdin` flag folded in.
    fn filenames(&self) -> Vec<String> {
        let mut filenames = self.args.filenames.clone();
        if self.args.stdin {
            warn!("--stdin is deprecated and will be removed; use `--filenames -` instead");
            if !filenames.iter().any(|f| f == STDIN_INDICATOR) {
                filenames.push(STDIN_INDICATOR.to_string());
            }
        }
        filenames
    }
}

/// Main entry point for CLI execution
pub fn run(args: Args) -> Result<RenderSummary> {
    Runner::new(args).run()
}
