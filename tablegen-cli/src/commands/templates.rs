//! List the loaded template set

use anyhow::Result;
use console::style;
use std::fmt::Write as _;
use tablegen::Category;

use crate::GeneratorOptions;

/// List templates with their output paths and categories
pub struct TemplatesCommand {
    category: Option<Category>,
    options: GeneratorOptions,
}

impl TemplatesCommand {
    /// Create a new command instance
    ///
    /// When `category` is set only templates selected for it are listed.
    pub const fn new(category: Option<Category>, options: GeneratorOptions) -> Self {
        Self { category, options }
    }

    /// Render the listing
    ///
    /// # Errors
    ///
    /// Returns an error if the templates fail to load.
    pub fn render(&self) -> Result<String> {
        let (config, generator) = self.options.generator()?;
        let registry = generator.registry();

        let mut out = String::new();
        match &config.templates.dir {
            Some(dir) => writeln!(out, "{} {}", style("Templates from").bold(), dir.display())?,
            None => writeln!(out, "{}", style("Built-in templates").bold())?,
        }

        let selected: Vec<_> = match self.category {
            Some(category) => registry.select(category).collect(),
            None => registry.iter().collect(),
        };

        for template in &selected {
            let tag = template.category().map_or("all", Category::as_str);
            writeln!(
                out,
                "  {:<5} {} -> {}",
                tag,
                template.source(),
                style(template.output_path()).cyan()
            )?;
        }
        writeln!(out, "{} templates", selected.len())?;

        Ok(out)
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the templates fail to load.
    pub fn execute(&self) -> Result<()> {
        print!("{}", self.render()?);
        Ok(())
    }
}
