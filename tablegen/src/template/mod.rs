//! Template discovery, selection and evaluation
//!
//! Templates are plain Jinja files. Their source path encodes two things:
//!
//! - the logical output path, which may carry `{placeholder}` tokens resolved
//!   per request (e.g. `vue/api/{module_name}/{businessName}/index.ts.jinja`)
//! - an optional category restriction, written as `<category>_index.<ext>` or
//!   `<category>_popup.<ext>` (e.g. `tree_index.vue.jinja`)
//!
//! [`descriptor`] turns a source path into a [`TemplateDescriptor`],
//! [`TemplateRegistry`] holds the immutable descriptor list and answers
//! per-category selection, and [`TemplateEngine`] is the evaluation capability
//! the generator renders through.

pub mod descriptor;
pub mod engine;
pub mod registry;

use thiserror::Error;

pub use descriptor::{PathStyle, TemplateDescriptor};
pub use engine::MiniJinjaEngine;
pub use registry::TemplateRegistry;

/// Default template file suffix
pub const DEFAULT_EXTENSION: &str = "jinja";

/// Error signalled by a [`TemplateEngine`]
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error raised by the Jinja engine (syntax, undefined value, bad operation)
    #[error(transparent)]
    Engine(#[from] minijinja::Error),

    /// Error raised by any other engine implementation
    #[error("{0}")]
    Other(String),
}

/// Text templating capability
///
/// Implementations evaluate a template body against a JSON context. The
/// generator only needs loops, conditionals and property access; anything the
/// engine cannot evaluate must surface as a [`RenderError`].
pub trait TemplateEngine: Send + Sync {
    /// Check that a template body compiles without rendering it
    ///
    /// # Errors
    ///
    /// Returns an error if the body has invalid syntax.
    fn check(&self, name: &str, body: &str) -> Result<(), RenderError>;

    /// Render a template body against a context
    ///
    /// `name` is only used in diagnostics.
    ///
    /// # Errors
    ///
    /// Returns an error if the body has invalid syntax or evaluation fails.
    fn render(
        &self,
        name: &str,
        body: &str,
        context: &serde_json::Value,
    ) -> Result<String, RenderError>;
}
