//! Show the context templates are rendered with

use anyhow::Result;
use std::path::PathBuf;
use tablegen::{resolve_placeholders, RenderContext};

use crate::read_request;

/// Print the render context of a request, or resolve a path pattern against it
pub struct ContextCommand {
    request: PathBuf,
    pattern: Option<String>,
}

impl ContextCommand {
    /// Create a new command instance
    ///
    /// # Arguments
    ///
    /// * `request` - Generation request JSON file
    /// * `pattern` - Output path pattern such as `vue/{module_name}/{businessName}`
    pub const fn new(request: PathBuf, pattern: Option<String>) -> Self {
        Self { request, pattern }
    }

    /// Render the context as JSON, or the resolved pattern
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be read.
    pub fn render(&self) -> Result<String> {
        let request = read_request(&self.request)?;
        let ctx = RenderContext::build(&request);

        Ok(match &self.pattern {
            Some(pattern) => resolve_placeholders(pattern, &ctx),
            None => serde_json::to_string_pretty(ctx.as_value())?,
        })
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be read.
    pub fn execute(&self) -> Result<()> {
        println!("{}", self.render()?);
        Ok(())
    }
}
