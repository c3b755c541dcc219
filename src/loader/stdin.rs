use crate::constants::stdin_file;
use crate::error::Result;
use log::debug;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Standard input materialized as a temporary template file.
///
/// The file is removed by [`StdinCapture::close`], or on drop if the capture
/// is abandoned by an early return or a panic.
#[derive(Debug)]
pub struct StdinCapture {
    file: NamedTempFile,
}

impl StdinCapture {
    /// Reads `reader` to the end and writes it into a new temporary file
    /// inside `dir`.
    pub fn capture_in<R: Read>(mut reader: R, dir: &Path) -> Result<Self> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        let mut file = tempfile::Builder::new()
            .prefix(stdin_file::PREFIX)
            .suffix(stdin_file::SUFFIX)
            .tempfile_in(dir)?;
        file.write_all(&content)?;
        file.flush()?;

        debug!(
            "Captured {} bytes from stdin into '{}'",
            content.len(),
            file.path().display()
        );
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Deletes the temporary file, reporting any failure.
    pub fn close(self) -> Result<()> {
        let path = self.file.path().to_path_buf();
        self.file.close()?;
        debug!("Removed stdin capture file '{}'", path.display());
        Ok(())
    }
}
