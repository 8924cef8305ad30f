//! Render a request without writing anything

use anyhow::{anyhow, Context, Result};
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::{read_request, GeneratorOptions};

/// What a preview prints
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewOutput {
    /// One generated path per line
    #[default]
    Paths,
    /// Content of a single generated path
    Show(String),
    /// The whole `{ path: content }` map as JSON
    Json,
}

/// Preview the files a request would generate
pub struct PreviewCommand {
    request: PathBuf,
    output: PreviewOutput,
    source_names: bool,
    options: GeneratorOptions,
}

impl PreviewCommand {
    /// Create a new command instance
    ///
    /// # Arguments
    ///
    /// * `request` - Generation request JSON file
    /// * `output` - What to print
    /// * `source_names` - Key files by template name (suffix kept) instead
    ///   of output path
    pub const fn new(
        request: PathBuf,
        output: PreviewOutput,
        source_names: bool,
        options: GeneratorOptions,
    ) -> Self {
        Self {
            request,
            output,
            source_names,
            options,
        }
    }

    /// Render the preview output
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be read, a template fails, or
    /// the path given to `Show` was not generated.
    pub fn render(&self) -> Result<String> {
        let request = read_request(&self.request)?;
        let (_, generator) = self.options.generator()?;
        let rendered = if self.source_names {
            generator.preview(&request)
        } else {
            generator.generate(&request)
        };
        let files = rendered.with_context(|| format!("Failed to preview {}", request.name))?;

        match &self.output {
            PreviewOutput::Paths => {
                let mut out = String::new();
                for path in files.paths() {
                    writeln!(out, "{path}")?;
                }
                Ok(out)
            }
            PreviewOutput::Show(path) => files.get(path).map(str::to_string).ok_or_else(|| {
                anyhow!(
                    "{path} is not generated for {} ({} files)",
                    request.name,
                    files.len()
                )
            }),
            PreviewOutput::Json => Ok(serde_json::to_string_pretty(&files)? + "\n"),
        }
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn execute(&self) -> Result<()> {
        print!("{}", self.render()?);
        Ok(())
    }
}
