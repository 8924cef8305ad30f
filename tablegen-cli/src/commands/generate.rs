//! Write generated files into a directory

use anyhow::{bail, Context, Result};
use console::{style, Emoji};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::{read_request, GeneratorOptions};

static SUCCESS: Emoji<'_, '_> = Emoji("✓", "√");

/// Generate files for a request into an output directory
pub struct GenerateCommand {
    request: PathBuf,
    output: PathBuf,
    force: bool,
    options: GeneratorOptions,
}

impl GenerateCommand {
    /// Create a new command instance
    ///
    /// # Arguments
    ///
    /// * `request` - Generation request JSON file
    /// * `output` - Directory receiving the generated tree
    /// * `force` - Overwrite files that already exist
    pub const fn new(
        request: PathBuf,
        output: PathBuf,
        force: bool,
        options: GeneratorOptions,
    ) -> Self {
        Self {
            request,
            output,
            force,
            options,
        }
    }

    /// Execute the command
    ///
    /// Every path is validated and checked for conflicts before the first
    /// file is written.
    ///
    /// # Errors
    ///
    /// Returns an error if generation fails, a path escapes the output
    /// directory, or a file exists and `force` is not set.
    pub fn execute(&self) -> Result<Vec<PathBuf>> {
        let request = read_request(&self.request)?;
        let (_, generator) = self.options.generator()?;
        let files = generator
            .generate(&request)
            .with_context(|| format!("Failed to generate {}", request.name))?;

        let mut targets = Vec::with_capacity(files.len());
        for (path, content) in files.iter() {
            let target = self.output.join(checked_relative(path)?);
            if target.exists() && !self.force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    target.display()
                );
            }
            targets.push((target, content));
        }

        println!(
            "{} {} ({})",
            style("Generating").green().bold(),
            style(&request.name).cyan().bold(),
            request.category
        );

        let mut written = Vec::with_capacity(targets.len());
        for (target, content) in targets {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
            fs::write(&target, content)
                .with_context(|| format!("Failed to write file: {}", target.display()))?;
            println!("  {} {}", style(SUCCESS).green(), target.display());
            written.push(target);
        }

        println!(
            "\n{} {} files written to {}",
            style(SUCCESS).green().bold(),
            written.len(),
            style(self.output.display()).cyan()
        );

        Ok(written)
    }
}

/// Reject generated paths that would leave the output directory
fn checked_relative(path: &str) -> Result<&Path> {
    let relative = Path::new(path);
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes || path.is_empty() {
        bail!("Refusing to write generated path outside the output directory: {path}");
    }
    Ok(relative)
}
