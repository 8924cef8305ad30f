//! tablegen CLI library
//!
//! Command implementations behind the `tablegen` binary. Each command is a
//! plain struct with an `execute` method so it can be driven from tests.

pub mod commands;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tablegen::{GenerationRequest, Generator, GeneratorConfig};

pub use commands::{
    ContextCommand, DownloadCommand, GenerateCommand, ImportCommand, InspectCommand,
    PreviewCommand, PreviewOutput, TemplatesCommand,
};

/// Name used for configuration lookup
pub const SERVICE_NAME: &str = "tablegen";

/// Options shared by every command that renders templates
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// Explicit configuration file
    pub config: Option<PathBuf>,
    /// Template directory overriding the configured one
    pub templates: Option<PathBuf>,
}

impl GeneratorOptions {
    /// Load the configuration these options describe
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn load_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load_from(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => GeneratorConfig::load_for_service(SERVICE_NAME)
                .context("Failed to load configuration")?,
        };

        if let Some(dir) = &self.templates {
            config.templates.dir = Some(dir.clone());
        }

        tracing::debug!(
            templates = ?config.templates.dir,
            category = %config.defaults.category,
            "configuration loaded"
        );

        Ok(config)
    }

    /// Build the generator these options describe
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the templates fail to load.
    pub fn generator(&self) -> Result<(GeneratorConfig, Generator)> {
        let config = self.load_config()?;
        let generator = Generator::from_config(&config).context("Failed to load templates")?;
        Ok((config, generator))
    }
}

/// Read a generation request from a JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid request.
pub fn read_request(path: &Path) -> Result<GenerationRequest> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request: {}", path.display()))?;
    GenerationRequest::from_json(&text)
        .with_context(|| format!("Invalid request file: {}", path.display()))
}
