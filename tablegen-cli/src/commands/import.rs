//! Turn an introspected table into a generation request

use anyhow::{Context, Result};
use console::style;
use std::fs;
use std::path::PathBuf;
use tablegen::{import_table, Category, GenerationRequest, RawTable};

use crate::GeneratorOptions;

/// Import a table description
pub struct ImportCommand {
    table: PathBuf,
    output: Option<PathBuf>,
    module: Option<String>,
    category: Option<Category>,
    options: GeneratorOptions,
}

impl ImportCommand {
    /// Create a new command instance
    ///
    /// # Arguments
    ///
    /// * `table` - JSON file holding `{ name, comment, fields }`
    /// * `output` - Request file to write; stdout when absent
    pub const fn new(table: PathBuf, output: Option<PathBuf>, options: GeneratorOptions) -> Self {
        Self {
            table,
            output,
            module: None,
            category: None,
            options,
        }
    }

    /// Override the configured module name
    #[must_use]
    pub fn with_module(mut self, module: Option<String>) -> Self {
        self.module = module;
        self
    }

    /// Override the configured category
    #[must_use]
    pub const fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    /// Build the request without writing it
    ///
    /// # Errors
    ///
    /// Returns an error if the table file cannot be read or parsed.
    pub fn request(&self) -> Result<GenerationRequest> {
        let text = fs::read_to_string(&self.table)
            .with_context(|| format!("Failed to read table: {}", self.table.display()))?;
        let table = RawTable::from_json(&text)
            .with_context(|| format!("Invalid table description: {}", self.table.display()))?;

        let mut defaults = self.options.load_config()?.defaults;
        if let Some(module) = &self.module {
            defaults.module_name.clone_from(module);
        }
        if let Some(category) = self.category {
            defaults.category = category;
        }

        Ok(import_table(&table, &defaults))
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be imported or the request cannot
    /// be written.
    pub fn execute(&self) -> Result<()> {
        let request = self.request()?;
        let json = request.to_json_pretty()?;

        match &self.output {
            Some(path) => {
                fs::write(path, json + "\n")
                    .with_context(|| format!("Failed to write request: {}", path.display()))?;
                eprintln!(
                    "{} {} ({} fields, {}) -> {}",
                    style("Imported").green().bold(),
                    style(&request.name).cyan().bold(),
                    request.fields.len(),
                    request.category,
                    style(path.display()).dim()
                );
            }
            None => println!("{json}"),
        }

        Ok(())
    }
}
