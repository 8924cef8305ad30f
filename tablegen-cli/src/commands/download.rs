//! Package generated files into a zip archive

use anyhow::{Context, Result};
use console::{style, Emoji};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tablegen::{ArchivePackager, Compression};

use crate::{read_request, GeneratorOptions};

static PACKAGE: Emoji<'_, '_> = Emoji("📦", "");

/// Generate a request and write the result as a zip archive
pub struct DownloadCommand {
    request: PathBuf,
    output: Option<PathBuf>,
    compression: Option<Compression>,
    options: GeneratorOptions,
}

impl DownloadCommand {
    /// Create a new command instance
    ///
    /// # Arguments
    ///
    /// * `request` - Generation request JSON file
    /// * `output` - Archive path; `<table name>.zip` in the working directory
    ///   when absent
    pub const fn new(request: PathBuf, output: Option<PathBuf>, options: GeneratorOptions) -> Self {
        Self {
            request,
            output,
            compression: None,
            options,
        }
    }

    /// Override the configured compression
    #[must_use]
    pub const fn with_compression(mut self, compression: Option<Compression>) -> Self {
        self.compression = compression;
        self
    }

    /// Execute the command, returning the archive path
    ///
    /// # Errors
    ///
    /// Returns an error if generation, packaging or writing fails.
    pub async fn execute(&self) -> Result<PathBuf> {
        let request = read_request(&self.request)?;
        let (config, generator) = self.options.generator()?;
        let files = generator
            .generate(&request)
            .with_context(|| format!("Failed to generate {}", request.name))?;

        let compression = self.compression.unwrap_or(config.archive.compression);
        let path = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.zip", request.name)));

        let bytes = ArchivePackager::new(compression)
            .pack(&files)
            .with_context(|| format!("Failed to package {}", request.name))?;
        let size = bytes.len();
        write_replacing(&path, &bytes)
            .await
            .with_context(|| format!("Failed to write archive: {}", path.display()))?;

        println!(
            "{}{} {} ({} files, {size} bytes)",
            PACKAGE,
            style("Packaged").green().bold(),
            style(path.display()).cyan(),
            files.len()
        );

        Ok(path)
    }
}

/// Write `bytes` next to `path` and move them into place
///
/// An existing archive is only replaced once the new one is complete.
async fn write_replacing(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut partial = OsString::from(path.as_os_str());
    partial.push(".part");
    let partial = PathBuf::from(partial);

    let result = async {
        tokio::fs::write(&partial, bytes).await?;
        tokio::fs::rename(&partial, path).await
    }
    .await;

    if result.is_err() {
        let _ = tokio::fs::remove_file(&partial).await;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_replacing_swaps_in_complete_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.zip");
        std::fs::write(&path, "old").unwrap();

        write_replacing(&path, b"new").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
        assert!(!dir.path().join("out.zip.part").exists());
    }

    #[tokio::test]
    async fn test_write_replacing_leaves_nothing_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.zip");

        assert!(write_replacing(&path, b"new").await.is_err());
        assert!(!path.exists());
        assert!(!dir.path().join("missing").exists());
    }
}
