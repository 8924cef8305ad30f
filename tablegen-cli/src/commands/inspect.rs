//! List the entries of a generated archive

use anyhow::{Context, Result};
use console::style;
use std::fmt::Write as _;
use std::path::PathBuf;
use tablegen::archive;

/// Inspect a zip archive produced by `download`
pub struct InspectCommand {
    archive: PathBuf,
}

impl InspectCommand {
    /// Create a new command instance
    pub const fn new(archive: PathBuf) -> Self {
        Self { archive }
    }

    /// Render the entry listing
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid archive.
    pub fn render(&self) -> Result<String> {
        let bytes = std::fs::read(&self.archive)
            .with_context(|| format!("Failed to read archive: {}", self.archive.display()))?;
        let files = archive::unpack(&bytes)
            .with_context(|| format!("Invalid archive: {}", self.archive.display()))?;

        let mut out = String::new();
        for (path, content) in files.iter() {
            writeln!(out, "{:>8}  {path}", content.len())?;
        }
        writeln!(
            out,
            "{} entries, {} bytes",
            style(files.len()).bold(),
            bytes.len()
        )?;
        Ok(out)
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be read.
    pub fn execute(&self) -> Result<()> {
        print!("{}", self.render()?);
        Ok(())
    }
}
